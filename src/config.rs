//! # config.rs
//!
//! Command-line parsing and process-wide settings for pathrev.
//! It includes:
//! - `Cli` / `Commands`: the `gsea`, `prerank` and `check` subcommands.
//! - `GseaArgs` / `PrerankArgs`: raw arguments, validated into `GseaInputs` / `PrerankInputs`
//!   before any pipeline work starts.
//! - `AppConfig`: the data directory and Python interpreter, resolved once at startup
//!   from defaults and `PATHREV_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use config::{Config, Environment};
use getset::Getters;
use serde::Deserialize;

use crate::error::{PathrevError, Result};

pub const ENV_PREFIX: &str = "PATHREV";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DATA_DIR_NAME: &str = ".pathrev";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pathrev",
    version = env!("CARGO_PKG_VERSION"),
    about = "Run GSEA and GSEA-PreRanked through GSEApy and collect the result tables."
)]
pub struct Cli {
    /// Python interpreter with gseapy installed. Overrides PATHREV_PYTHON.
    #[arg(long, global = true, value_name = "INTERPRETER")]
    pub python: Option<String>,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run GSEA on an expression matrix and phenotype labels
    Gsea(GseaArgs),
    /// Run GSEA-PreRanked on a precomputed gene ranking
    Prerank(PrerankArgs),
    /// Check that the Python interpreter and gseapy are available
    Check,
}

#[derive(Debug, Clone, Args)]
pub struct GseaArgs {
    /// path to expression matrix (TSV, genes as rows, samples as columns)
    #[arg(short, long, required = true)]
    pub matrix: PathBuf,
    /// path to cls file
    #[arg(short, long, required = true)]
    pub cls: PathBuf,
    /// path to gmt file
    #[arg(short, long, required = true)]
    pub gmt: PathBuf,
    /// Output directory. Created if it does not exist.
    #[arg(short = 'o', long = "out-dir", required = true)]
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct PrerankArgs {
    /// path to rank file (TSV, gene and ranking score)
    #[arg(short, long, required = true)]
    pub rnk: PathBuf,
    /// path to gmt file
    #[arg(short, long, required = true)]
    pub gmt: PathBuf,
    /// Output directory. Created if it does not exist.
    #[arg(short = 'o', long = "out-dir", required = true)]
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Getters)]
pub struct GseaInputs {
    #[getset(get = "pub")]
    matrix: PathBuf,
    #[getset(get = "pub")]
    cls: PathBuf,
    #[getset(get = "pub")]
    gmt: PathBuf,
    #[getset(get = "pub")]
    out_dir: PathBuf,
}

#[derive(Debug, Clone, Getters)]
pub struct PrerankInputs {
    #[getset(get = "pub")]
    rnk: PathBuf,
    #[getset(get = "pub")]
    gmt: PathBuf,
    #[getset(get = "pub")]
    out_dir: PathBuf,
}

impl GseaArgs {
    /// Check that every input is an existing file and the output path is usable.
    /// Nothing is written to disk.
    pub fn validate(&self) -> Result<GseaInputs> {
        check_input_file(&self.matrix, "Matrix")?;
        check_input_file(&self.cls, "Cls")?;
        check_input_file(&self.gmt, "Gmt")?;
        check_out_dir(&self.out_dir)?;

        Ok(GseaInputs {
            matrix: self.matrix.clone(),
            cls: self.cls.clone(),
            gmt: self.gmt.clone(),
            out_dir: self.out_dir.clone(),
        })
    }
}

impl PrerankArgs {
    pub fn validate(&self) -> Result<PrerankInputs> {
        check_input_file(&self.rnk, "Rank")?;
        check_input_file(&self.gmt, "Gmt")?;
        check_out_dir(&self.out_dir)?;

        Ok(PrerankInputs {
            rnk: self.rnk.clone(),
            gmt: self.gmt.clone(),
            out_dir: self.out_dir.clone(),
        })
    }
}

fn check_input_file(path: &Path, label: &str) -> Result<()> {
    if !path.exists() {
        return Err(PathrevError::InvalidArgument(format!(
            "{} file {} does not exist",
            label,
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(PathrevError::InvalidArgument(format!(
            "{} path {} is not a file",
            label,
            path.display()
        )));
    }
    Ok(())
}

// the directory itself may not exist yet, the pipeline creates it
fn check_out_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(PathrevError::InvalidArgument(
            "Output directory path is empty".to_string(),
        ));
    }
    // symlink_metadata also sees symlinks whose target is missing
    if fs::symlink_metadata(path).is_ok() && !path.is_dir() {
        let reason = if path.exists() {
            "is a file"
        } else {
            "is a broken symbolic link"
        };
        return Err(PathrevError::InvalidArgument(format!(
            "Output path {} {}, please use a valid directory",
            path.display(),
            reason
        )));
    }
    Ok(())
}

/// Settings shared by the whole process.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct AppConfig {
    /// local data directory, `PATHREV_DIRECTORY`
    #[getset(get = "pub")]
    directory: PathBuf,
    /// interpreter used to run gseapy, `PATHREV_PYTHON`
    #[getset(get = "pub")]
    python: String,
}

impl AppConfig {
    /// Resolve settings from defaults and the process environment.
    pub fn from_env() -> Result<AppConfig> {
        AppConfig::build(None)
    }

    /// Resolve settings from defaults and `env` in place of the process environment.
    pub fn build(env: Option<config::Map<String, String>>) -> Result<AppConfig> {
        let default_directory = default_data_dir();
        let settings = Config::builder()
            .set_default("directory", default_directory.to_string_lossy().to_string())?
            .set_default("python", DEFAULT_PYTHON)?
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        Ok(settings.try_deserialize::<AppConfig>()?)
    }

    /// Replace the interpreter when one was given on the command line.
    pub fn with_python(mut self, python: Option<String>) -> AppConfig {
        if let Some(python) = python {
            self.python = python;
        }
        self
    }

    /// Create the data directory if needed and return it.
    pub fn ensure_data_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.directory)?;
        Ok(&self.directory)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
