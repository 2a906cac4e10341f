//! GSEA and GSEA-PreRanked pipelines.
//!
//! Each pipeline loads its input table, hands it to the engine with the fixed
//! parameter set, and writes the engine's primary result table into the
//! output directory. Errors are returned as-is; whatever the engine already
//! wrote into the output directory stays there.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use tracing::info;

use crate::config::{GseaInputs, PrerankInputs};
use crate::engine::{EnrichmentEngine, GseaParams, PrerankParams};
use crate::error::Result;
use crate::io::{read_table, write_table_to_path};

pub const GSEA_RESULT_FILE: &str = "gsea_result.tsv";
pub const PRERANK_RESULT_FILE: &str = "prerank_result.tsv";

/// Where a pipeline left its result, and how many gene sets it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub result_path: PathBuf,
    pub gene_sets: usize,
}

/// Run GSEA on a validated matrix, cls and gmt triple.
pub fn do_gsea<E: EnrichmentEngine + ?Sized>(engine: &E, inputs: &GseaInputs) -> Result<Report> {
    let data = read_table(inputs.matrix())?;
    println!("{}", "Running GSEA".cyan().bold());

    fs::create_dir_all(inputs.out_dir())?;
    let params = GseaParams::fixed(inputs.out_dir());
    info!(
        genes = data.n_rows(),
        samples = data.n_cols(),
        permutation_type = %params.permutation_type,
        method = %params.method,
        permutations = params.permutation_num,
        "running gsea"
    );

    let result = engine.gsea(&data, inputs.cls(), inputs.gmt(), &params)?;

    let result_path = inputs.out_dir().join(GSEA_RESULT_FILE);
    write_table_to_path(&result, &result_path)?;
    Ok(Report {
        result_path,
        gene_sets: result.n_rows(),
    })
}

/// Run GSEA-PreRanked on a validated rank and gmt pair.
pub fn do_preranked<E: EnrichmentEngine + ?Sized>(
    engine: &E,
    inputs: &PrerankInputs,
) -> Result<Report> {
    let rnk = read_table(inputs.rnk())?;
    println!("{}", "Running GSEA-PreRanked".cyan().bold());

    fs::create_dir_all(inputs.out_dir())?;
    let params = PrerankParams::fixed(inputs.out_dir());
    info!(
        genes = rnk.n_rows(),
        permutations = params.permutation_num,
        "running prerank"
    );

    let result = engine.prerank(&rnk, inputs.gmt(), &params)?;

    let result_path = inputs.out_dir().join(PRERANK_RESULT_FILE);
    write_table_to_path(&result, &result_path)?;
    Ok(Report {
        result_path,
        gene_sets: result.n_rows(),
    })
}
