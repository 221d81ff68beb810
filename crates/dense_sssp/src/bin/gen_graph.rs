#![forbid(unsafe_code)]

use std::io;

use anyhow::Result;
use clap::Parser;
use dense_sssp::cli::GenGraphArgs;
use dense_sssp::cli::init_tracing;
use dense_sssp::cli::run_gen_graph;

fn main() -> Result<()> {
    let args = GenGraphArgs::parse();
    init_tracing(args.verbose);

    let stdout = io::stdout();
    run_gen_graph(&args, &mut io::BufWriter::new(stdout.lock()))
}
