//! Command-line front-ends for the `dijkstra` and `gen_graph` binaries.
//!
//! The binaries only parse arguments, install logging and map errors to
//! exit statuses; everything else lives here so it can be driven with
//! in-memory readers and writers.

use std::io;
use std::io::Read;
use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::engine::Goal;
use crate::engine::InvalidDestination;
use crate::engine::shortest_distances;
use crate::generator::DEFAULT_MAX_WEIGHT;
use crate::generator::DEFAULT_SEED;
use crate::generator::GeneratorConfig;
use crate::generator::random_graph;
use crate::loader::LoadError;
use crate::loader::read_graph;
use crate::report::report;

#[derive(Parser, Debug)]
#[command(
    name = "dijkstra",
    version,
    about = "Shortest distances from vertex 0 in a graph read from stdin"
)]
pub struct DijkstraArgs {
    /// Print only the distance to this vertex.
    pub destination: Option<usize>,

    /// Print the weight matrix before the distances.
    #[arg(long)]
    pub print_graph: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "gen_graph",
    version,
    about = "Write a random graph description to stdout"
)]
pub struct GenGraphArgs {
    /// Number of vertices.
    pub vertex_count: usize,

    /// Largest edge weight.
    #[arg(default_value_t = DEFAULT_MAX_WEIGHT)]
    pub max_weight: u64,

    /// Seed for the weight sequence.
    #[arg(default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Probability that an edge between two distinct vertices exists.
    #[arg(long, default_value_t = 1.0, value_parser = parse_density)]
    pub density: f64,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("density must be within [0, 1], got {p}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Destination(#[from] InvalidDestination),

    #[error("failed to write results: {0}")]
    Output(#[source] io::Error),
}

/// Exit status of `dijkstra` for malformed command-line arguments.
///
/// clap's own usage status is 2, which already means a malformed weight
/// token here.
pub const USAGE_EXIT_CODE: u8 = 7;

impl CliError {
    /// Process exit status for this failure category.
    ///
    /// 2 bad weight token, 3 missing or invalid vertex count, 4 destination,
    /// 5 too many weights, 6 too few weights, 1 allocation or I/O failure.
    /// Only the vertex-count status differs from the long-standing codes:
    /// it moved off 1, which stays reserved for allocation and I/O.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Load(LoadError::InvalidWeight { .. }) => 2,
            Self::Load(LoadError::MissingVertexCount { .. })
            | Self::Load(LoadError::InvalidVertexCount { .. }) => 3,
            Self::Destination(_) => 4,
            Self::Load(LoadError::TooManyWeights { .. }) => 5,
            Self::Load(LoadError::WeightCountMismatch { .. }) => 6,
            Self::Load(LoadError::Allocation(_))
            | Self::Load(LoadError::Io(_))
            | Self::Output(_) => 1,
        }
    }
}

/// Exit status for a failed argument parse; `--help` and `--version` exit 0.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { USAGE_EXIT_CODE } else { 0 }
}

pub fn run_dijkstra<R: Read, W: Write>(
    args: &DijkstraArgs,
    input: R,
    out: &mut W,
) -> Result<(), CliError> {
    let graph = read_graph(input)?;
    let goal = match args.destination {
        Some(d) => Goal::OneDistance(d),
        None => Goal::AllDistances,
    }
    .validate(graph.vertex_count())?;
    info!(vertices = graph.vertex_count(), ?goal, "computing distances");

    let table = shortest_distances(&graph, goal);

    if args.print_graph {
        write!(out, "graph weights:\n{graph}").map_err(CliError::Output)?;
    }
    report(out, &table, goal).map_err(CliError::Output)?;
    out.flush().map_err(CliError::Output)
}

pub fn run_gen_graph<W: Write>(args: &GenGraphArgs, out: &mut W) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        vertex_count: args.vertex_count,
        max_weight: args.max_weight,
        seed: args.seed,
        density: args.density,
    };
    let graph = random_graph(&config)
        .with_context(|| format!("generating graph with {} vertices", args.vertex_count))?;

    write!(out, "{graph}").context("writing graph")?;
    out.flush().context("writing graph")?;
    Ok(())
}

/// Logs go to stderr; `SSSP_LOG` overrides the filter.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SSSP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "dense_sssp=debug,warn"
        } else {
            "warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}
