//! consultdesk CLI entry point.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use consultdesk_cli::app;
use consultdesk_cli::cli::Cli;
use consultdesk_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    let now = Utc::now();
    match app::run(cli, now) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
