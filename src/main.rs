use clap::Parser;
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use pathrev::config::{AppConfig, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app_config = AppConfig::from_env().unwrap_or_else(|err| {
        eprintln!(
            "Problem reading configuration: {}",
            err.to_string().red().bold()
        );
        process::exit(1);
    });
    #[cfg(debug_assertions)]
    tracing::debug!(?app_config, "resolved configuration");

    if let Err(e) = pathrev::run(cli, app_config) {
        eprintln!("Application error: {}", e.to_string().red().bold());
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "pathrev=debug" } else { "pathrev=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
