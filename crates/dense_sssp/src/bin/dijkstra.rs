#![forbid(unsafe_code)]

use std::io;
use std::process::ExitCode;

use clap::Parser;
use dense_sssp::cli::DijkstraArgs;
use dense_sssp::cli::init_tracing;
use dense_sssp::cli::run_dijkstra;
use dense_sssp::cli::usage_exit_code;

fn main() -> ExitCode {
    let args = match DijkstraArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };
    init_tracing(args.verbose);

    let stdout = io::stdout();
    match run_dijkstra(
        &args,
        io::stdin().lock(),
        &mut io::BufWriter::new(stdout.lock()),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
