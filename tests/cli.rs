use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn pathrev(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pathrev"))
        .args(args)
        .env("PATHREV_DIRECTORY", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_input_exits_non_zero() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let out_dir = dir.path().join("results");
    let out = out_dir.to_str().unwrap();

    let gsea = pathrev(
        &data_dir,
        &[
            "gsea",
            "-m",
            "tests/data/no_such_matrix.tsv",
            "-c",
            "tests/data/phenotype_3v3.cls",
            "-g",
            "tests/data/one_set.gmt",
            "-o",
            out,
        ],
    );
    assert!(!gsea.status.success());
    assert!(String::from_utf8_lossy(&gsea.stderr).contains("no_such_matrix.tsv"));

    let prerank = pathrev(
        &data_dir,
        &[
            "prerank",
            "-r",
            "tests/data/ranking_100.rnk",
            "-g",
            "tests/data/no_such_sets.gmt",
            "-o",
            out,
        ],
    );
    assert!(!prerank.status.success());
    assert!(!out_dir.exists());
    assert!(!data_dir.exists());
}

#[test]
fn test_out_dir_collides_with_file() {
    let dir = tempdir().unwrap();
    let occupied = dir.path().join("results.tsv");
    fs::write(&occupied, "keep me").unwrap();

    let output = pathrev(
        dir.path(),
        &[
            "prerank",
            "-r",
            "tests/data/ranking_100.rnk",
            "-g",
            "tests/data/ten_gene_set.gmt",
            "-o",
            occupied.to_str().unwrap(),
            "--python",
            "pathrev-no-such-python",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    // validation fails before the engine is ever started
    assert!(stderr.contains("is a file"));
    assert!(!stderr.contains("pathrev-no-such-python"));
    assert_eq!(fs::read_to_string(&occupied).unwrap(), "keep me");
}

#[test]
fn test_missing_required_argument() {
    let dir = tempdir().unwrap();
    let output = pathrev(dir.path(), &["gsea", "-m", "tests/data/matrix_3x6.tsv"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_engine_unavailable() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("results");

    let output = pathrev(
        dir.path(),
        &[
            "gsea",
            "-m",
            "tests/data/matrix_3x6.tsv",
            "-c",
            "tests/data/phenotype_3v3.cls",
            "-g",
            "tests/data/one_set.gmt",
            "-o",
            out_dir.to_str().unwrap(),
            "--python",
            "pathrev-no-such-python",
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Running GSEA"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Enrichment engine failed"));
    assert!(!out_dir.join("gsea_result.tsv").exists());
}

#[test]
fn test_check_reports_missing_interpreter() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");

    let output = pathrev(&data_dir, &["check", "--python", "pathrev-no-such-python"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not installed"));
    assert!(!data_dir.exists());
}
