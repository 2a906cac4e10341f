//! # engine.rs
//!
//! The boundary between pathrev and the enrichment engine that does the real work.
//!
//! - `EnrichmentEngine`: the two delegated calls, standard GSEA and pre-ranked GSEA.
//! - `GseaParams` / `PrerankParams`: the fixed configuration each pipeline forwards,
//!   as typed records rather than a loose keyword bag.
//!
//! The production engine lives in `runner.rs`.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::io::Table;

pub const PERMUTATION_NUM: u32 = 100;
pub const PROCESSES: u32 = 4;

/// What the engine shuffles to build its null distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermutationType {
    Phenotype,
}

/// Metric used to rank genes from the expression matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    SignalToNoise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    Png,
}

impl Display for PermutationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PermutationType::Phenotype => "phenotype",
        };
        write!(f, "{}", s)
    }
}

impl Display for RankingMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RankingMetric::SignalToNoise => "signal_to_noise",
        };
        write!(f, "{}", s)
    }
}

/// Parameters forwarded with a standard GSEA run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GseaParams {
    pub permutation_type: PermutationType,
    pub permutation_num: u32,
    pub method: RankingMetric,
    /// worker processes the engine may use for permutations
    pub processes: u32,
    pub format: PlotFormat,
    pub no_plot: bool,
    /// where the engine writes its own intermediate artifacts
    pub outdir: PathBuf,
}

impl GseaParams {
    /// The parameter set every `gsea` invocation uses.
    pub fn fixed(outdir: &Path) -> Self {
        GseaParams {
            permutation_type: PermutationType::Phenotype,
            permutation_num: PERMUTATION_NUM,
            method: RankingMetric::SignalToNoise,
            processes: PROCESSES,
            format: PlotFormat::Png,
            no_plot: true,
            outdir: outdir.to_path_buf(),
        }
    }
}

/// Parameters forwarded with a pre-ranked run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrerankParams {
    pub permutation_num: u32,
    pub processes: u32,
    pub format: PlotFormat,
    pub no_plot: bool,
    pub outdir: PathBuf,
}

impl PrerankParams {
    /// The parameter set every `prerank` invocation uses. Plots are left on.
    pub fn fixed(outdir: &Path) -> Self {
        PrerankParams {
            permutation_num: PERMUTATION_NUM,
            processes: PROCESSES,
            format: PlotFormat::Png,
            no_plot: false,
            outdir: outdir.to_path_buf(),
        }
    }
}

/// An implementation of the GSEA and pre-ranked GSEA algorithms.
///
/// Both calls return the engine's primary result table, one row per gene set
/// that survived the engine's own filtering. Class and gene-set files are
/// handed over as paths and never parsed on this side.
pub trait EnrichmentEngine {
    fn gsea(
        &self,
        data: &Table,
        cls: &Path,
        gene_sets: &Path,
        params: &GseaParams,
    ) -> Result<Table>;

    fn prerank(&self, rnk: &Table, gene_sets: &Path, params: &PrerankParams) -> Result<Table>;
}
