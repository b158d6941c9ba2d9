use std::process::ExitCode;

use arrow_inspector::{Cli, run};
use clap::Parser;
use log::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(summary) => {
            debug!(
                "{} of {} batches rendered",
                summary.rendered, summary.batches
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
