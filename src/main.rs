use dirsort::cli::{Args, SortOptions, run_cli};
use std::env;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only the sorting report.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let options = SortOptions::from(Args::parse_normalized(env::args_os()));

    match run_cli(&options, io::stdout().lock()) {
        Ok(summary) => {
            if summary.failed > 0 {
                tracing::warn!(failed = summary.failed, "Some files could not be sorted");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(directory = %options.directory.display(), "Error: {e}");
            ExitCode::FAILURE
        }
    }
}
