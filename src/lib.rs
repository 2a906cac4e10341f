use colored::Colorize;

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod runner;

use crate::config::{AppConfig, Cli, Commands};
use crate::engine::EnrichmentEngine;
use crate::error::Result;
use crate::pipeline::Report;
use crate::runner::GseapyEngine;

/// Entry point behind the `pathrev` binary.
pub fn run(cli: Cli, app_config: AppConfig) -> Result<()> {
    let app_config = app_config.with_python(cli.python);
    let engine = GseapyEngine::new(app_config.python().as_str());
    dispatch(&cli.command, &engine, &app_config)
}

/// Validate the command's arguments, then run the matching pipeline with `engine`.
///
/// The data directory is only created once the arguments are valid.
pub fn dispatch<E: EnrichmentEngine + ?Sized>(
    command: &Commands,
    engine: &E,
    app_config: &AppConfig,
) -> Result<()> {
    match command {
        Commands::Gsea(args) => {
            let inputs = args.validate()?;
            app_config.ensure_data_dir()?;
            let report = pipeline::do_gsea(engine, &inputs)?;
            print_done(&report);
        }
        Commands::Prerank(args) => {
            let inputs = args.validate()?;
            app_config.ensure_data_dir()?;
            let report = pipeline::do_preranked(engine, &inputs)?;
            print_done(&report);
        }
        Commands::Check => runner::check_environment(app_config)?,
    }
    Ok(())
}

fn print_done(report: &Report) {
    println!(
        "{} {} gene sets written to {}",
        "✅ Done.".green().bold(),
        report.gene_sets,
        report.result_path.display()
    );
}
