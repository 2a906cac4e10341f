//! End-to-end runs against a real gseapy installation.
//!
//! Run with `cargo test -- --ignored`; the interpreter comes from
//! `PATHREV_PYTHON` (default `python3`). gseapy drops gene sets smaller than
//! 15 genes by default, so these inputs use 15-gene sets.

use std::path::Path;
use std::process::Command;

use pathrev::io::{Table, read_table};
use tempfile::tempdir;

const RESULT_COLUMNS: [&str; 4] = ["Term", "ES", "NES", "Lead_genes"];

fn pathrev(data_dir: &Path, args: &[&str]) {
    let output = Command::new(env!("CARGO_BIN_EXE_pathrev"))
        .args(args)
        .env("PATHREV_DIRECTORY", data_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "pathrev failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn run_gsea(data_dir: &Path, out_dir: &Path) -> Table {
    pathrev(
        data_dir,
        &[
            "gsea",
            "-m",
            "tests/data/matrix_30x6.tsv",
            "-c",
            "tests/data/phenotype_3v3.cls",
            "-g",
            "tests/data/fifteen_gene_set.gmt",
            "-o",
            out_dir.to_str().unwrap(),
        ],
    );
    read_table(out_dir.join("gsea_result.tsv")).unwrap()
}

fn assert_result_schema(result: &Table) {
    for column in RESULT_COLUMNS {
        assert!(
            result.columns().iter().any(|c| c == column),
            "missing column {} in {:?}",
            column,
            result.columns()
        );
    }
}

#[test]
#[ignore = "needs python with gseapy installed"]
fn test_gsea_single_gene_set() {
    let dir = tempdir().unwrap();
    let result = run_gsea(dir.path(), &dir.path().join("out"));

    assert_result_schema(&result);
    assert_eq!(result.n_rows(), 1);
    assert_eq!(result.column("Term").unwrap(), vec!["UP_IN_TUMOR"]);
    let es: f64 = result.column("ES").unwrap()[0].parse().unwrap();
    assert!(es.is_finite());
}

#[test]
#[ignore = "needs python with gseapy installed"]
fn test_prerank_single_gene_set() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("out");
    pathrev(
        dir.path(),
        &[
            "prerank",
            "-r",
            "tests/data/ranking_100.rnk",
            "-g",
            "tests/data/fifteen_gene_set.gmt",
            "-o",
            out_dir.to_str().unwrap(),
        ],
    );

    let result = read_table(out_dir.join("prerank_result.tsv")).unwrap();
    assert_result_schema(&result);
    assert_eq!(result.n_rows(), 1);
}

#[test]
#[ignore = "needs python with gseapy installed"]
fn test_repeat_gsea_runs_share_schema() {
    let dir = tempdir().unwrap();
    let first = run_gsea(dir.path(), &dir.path().join("run1"));
    let second = run_gsea(dir.path(), &dir.path().join("run2"));

    assert_eq!(first.columns(), second.columns());
    assert_eq!(first.n_rows(), second.n_rows());
}
