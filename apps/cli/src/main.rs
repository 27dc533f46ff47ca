//! Marquee command-line entry point.
//!
//! All logic lives in the library crate (`marquee_cli`); this file parses
//! arguments, loads configuration, and prints the result.

use std::process::ExitCode;

use clap::Parser;
use marquee_cli::cli::Cli;
use marquee_cli::state::AppConfig;
use serde::Serialize;
use tracing::warn;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, load_error) = AppConfig::load_or_default(cli.config.as_deref());
    marquee_cli::init_tracing(&config.log.filter);
    if let Some(err) = load_error {
        warn!(error = %err, "Configuration unusable, using defaults");
    }

    match marquee_cli::run(cli, &config).await {
        Ok(output) => {
            println!("{}", pretty(&output));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", pretty(&err));
            ExitCode::FAILURE
        }
    }
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}
