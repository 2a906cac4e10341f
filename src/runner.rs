use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::engine::{EnrichmentEngine, GseaParams, PrerankParams};
use crate::error::{PathrevError, Result};
use crate::io::{self, Table};

/// Python driver handed to the interpreter with `-c`.
///
/// Called as `<driver> <mode> <payload-json> <result-path>` with the input
/// table as TSV on stdin; writes the engine's `res2d` table to `result-path`.
pub const GSEAPY_DRIVER: &str = include_str!("../scripts/python/run_gseapy.py");

const CHECK_ENV_SCRIPT: &str = include_str!("../scripts/python/check_env.py");
const RESULT_FILE: &str = "res2d.tsv";

pub fn check_python_installed(python: &str) -> Result<String> {
    let output = Command::new(python).arg("--version").output();

    match output {
        Ok(out) => {
            if out.status.success() {
                // python 2 printed its version on stderr
                let raw = if out.stdout.is_empty() { &out.stderr } else { &out.stdout };
                Ok(String::from_utf8_lossy(raw).trim().to_string())
            } else {
                Err(PathrevError::EngineFailure(format!(
                    "{} command failed to execute properly.",
                    python
                )))
            }
        }
        Err(_) => Err(PathrevError::EngineFailure(format!(
            "{} is not installed or not found in PATH.",
            python
        ))),
    }
}

/// Returns the installed gseapy version.
pub fn check_gseapy_installed(python: &str) -> Result<String> {
    let output = Command::new(python)
        .arg("-c")
        .arg(CHECK_ENV_SCRIPT)
        .output()
        .map_err(|e| PathrevError::EngineFailure(format!("could not start {}: {}", python, e)))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(PathrevError::EngineFailure(format!(
            "gseapy check failed: {}",
            stderr.trim()
        )))
    }
}

/// Print the interpreter, the gseapy version and the data directory,
/// creating the latter once both checks pass.
pub fn check_environment(app_config: &AppConfig) -> Result<()> {
    let python = app_config.python();
    let python_version = check_python_installed(python)?;
    println!("✅ {} ({})", python, python_version);
    let gseapy_version = check_gseapy_installed(python)?;
    println!("✅ gseapy {}", gseapy_version);
    let data_dir = app_config.ensure_data_dir()?;
    println!("{} {}", "Data directory:".bold(), data_dir.display());
    Ok(())
}

#[derive(Serialize)]
struct DriverPayload<'a, P: Serialize> {
    gene_sets: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    cls: Option<&'a Path>,
    #[serde(flatten)]
    params: &'a P,
}

/// Runs GSEApy in a child Python process.
#[derive(Debug, Clone)]
pub struct GseapyEngine {
    python: String,
    driver: String,
}

impl GseapyEngine {
    pub fn new(python: impl Into<String>) -> Self {
        GseapyEngine {
            python: python.into(),
            driver: GSEAPY_DRIVER.to_string(),
        }
    }

    /// Replace the driver script passed with `-c`. It receives the same
    /// arguments and stdin as the bundled one.
    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    fn run_driver<P: Serialize>(
        &self,
        mode: &str,
        payload: &DriverPayload<'_, P>,
        input: &Table,
    ) -> Result<Table> {
        let payload = serde_json::to_string(payload)?;
        let scratch = tempfile::tempdir()?;
        let result_path = scratch.path().join(RESULT_FILE);

        debug!(python = %self.python, mode, payload = %payload, "starting engine");
        let start = Instant::now();

        let mut child = Command::new(&self.python)
            .arg("-c")
            .arg(&self.driver)
            .arg(mode)
            .arg(&payload)
            .arg(&result_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PathrevError::EngineFailure(format!("could not start {}: {}", self.python, e))
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            PathrevError::EngineFailure("engine stdin was not captured".to_string())
        })?;

        // stdin is fed from its own thread so a large table cannot fill the
        // pipe while we wait on the child's output
        let (fed, output) = thread::scope(|s| {
            let feeder = s.spawn(move || io::write_table(input, stdin));
            let output = child.wait_with_output();
            (feeder.join(), output)
        });
        let output = output?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(mode, stdout = %stdout.trim(), "engine output");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PathrevError::EngineFailure(format!(
                "{} exited with {}: {}",
                mode,
                output.status,
                stderr.trim()
            )));
        }

        match fed {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(PathrevError::EngineFailure(format!(
                    "could not stream input table to the engine: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(PathrevError::EngineFailure(
                    "input table writer panicked".to_string(),
                ));
            }
        }

        let result = io::read_table(&result_path).map_err(|e| {
            PathrevError::EngineFailure(format!("could not read engine result: {}", e))
        })?;

        info!(
            mode,
            elapsed = ?start.elapsed(),
            gene_sets = result.n_rows(),
            "engine finished"
        );
        Ok(result)
    }
}

impl EnrichmentEngine for GseapyEngine {
    fn gsea(
        &self,
        data: &Table,
        cls: &Path,
        gene_sets: &Path,
        params: &GseaParams,
    ) -> Result<Table> {
        let payload = DriverPayload {
            gene_sets,
            cls: Some(cls),
            params,
        };
        self.run_driver("gsea", &payload, data)
    }

    fn prerank(&self, rnk: &Table, gene_sets: &Path, params: &PrerankParams) -> Result<Table> {
        let payload = DriverPayload {
            gene_sets,
            cls: None,
            params,
        };
        self.run_driver("prerank", &payload, rnk)
    }
}
