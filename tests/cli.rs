//! Command-line tests for the `relgraph` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SHEET: &str = "人物姓名,中文译名,身份/职位,人物类别,与奥古斯都关系,与其他人物的重要关系\n\
Augustus,奥古斯都,皇帝,核心人物,,\n\
Livia Drusilla,李维娅,皇后,家族成员,妻子,提比略之母\n\
Tiberius,提比略,继承人,家族成员,继子,\n";

fn relgraph() -> Command {
    Command::cargo_bin("relgraph").unwrap()
}

#[test]
fn convert_writes_book_and_prints_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sheet.csv");
    let output = dir.path().join("books/augustus.json");
    fs::write(&input, SHEET).unwrap();

    relgraph()
        .arg("convert")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Characters:         3"))
        .stdout(predicate::str::contains("Relations:          3"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["edges"][0]["id"], "e-augustus-livia-drusilla");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sheet.csv");
    let output = dir.path().join("out.json");
    fs::write(&input, SHEET).unwrap();

    relgraph()
        .args(["convert", "--dry-run", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();

    relgraph()
        .args(["convert", "-i"])
        .arg(dir.path().join("missing.xlsx"))
        .arg("-o")
        .arg(dir.path().join("out.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source not found"));
}

#[test]
fn collision_error_policy_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sheet.csv");
    fs::write(
        &input,
        format!("{}Drusus,李维娅,,,,\n", SHEET),
    )
    .unwrap();

    relgraph()
        .args(["convert", "--on-name-collision", "error", "--dry-run", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name collision"));
}

#[test]
fn inspect_prints_headers_and_rows() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sheet.csv");
    fs::write(&input, SHEET).unwrap();

    relgraph()
        .args(["inspect", "--rows", "1", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total rows: 3"))
        .stdout(predicate::str::contains("中文译名: 奥古斯都"))
        .stdout(predicate::str::contains("=== Row 2 ===").not());
}

#[test]
fn matrix_subcommand_writes_book() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("matrix.csv");
    let output = dir.path().join("matrix.json");
    fs::write(&input, "人物,A,B\nA,,朋友\nB,朋友,\n").unwrap();

    relgraph()
        .args(["matrix", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("A --[朋友]--> B"));

    assert!(output.exists());
}

#[test]
fn every_subcommand_defaults_to_the_workbook() {
    for sub in ["convert", "matrix", "inspect"] {
        relgraph()
            .args([sub, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("奥古斯都人物信息表_完整版.xlsx"));
    }
}

#[test]
fn bare_matrix_reads_the_default_workbook() {
    let dir = TempDir::new().unwrap();

    relgraph()
        .current_dir(dir.path())
        .arg("matrix")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source not found: 奥古斯都人物信息表_完整版.xlsx"));
}
