//! End-to-end tests for the `srcstat` binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn srcstat() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("srcstat").unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/Main.java",
        "package demo;\n\
         import java.util.List;\n\
         \n\
         /**\n\
          * Entry point.\n\
          */\n\
         public class Main {\n\
         \tpublic static void main(String[] args) { // start\n\
         \t\tint x = 1; /* trailing\n\
         \t\t   note */ int y = 2;\n\
         \t}\n\
         }\n",
    );
    write(dir.path(), "src/util.c", "// helper\nint add(int a, int b) { return a + b; }\n");
    write(dir.path(), "README.txt", "not counted\n");
    dir
}

fn json_report(args: &[&str], root: &Path) -> Value {
    let output = srcstat()
        .arg(root)
        .args(["--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("valid JSON report")
}

#[test]
fn help_mentions_formats() {
    srcstat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn json_counts_per_file() {
    let dir = sample_tree();
    let v = json_report(&[], dir.path());

    let rows = v["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let java = rows
        .iter()
        .find(|r| r["label"].as_str().unwrap().ends_with("Main.java"))
        .unwrap();
    assert_eq!(java["total"], 12);
    assert_eq!(java["import"], 2);
    assert_eq!(java["blank"], 1);
    assert_eq!(java["comment"], 3);
    assert_eq!(java["code"], 4);
    assert_eq!(java["brace"], 2);

    assert_eq!(v["total"]["files"], 2);
    assert_eq!(v["total"]["code"], 5);
    assert_eq!(v["total"]["comment"], 4);
}

#[test]
fn counting_flags_change_sloc() {
    let dir = sample_tree();
    let v = json_report(&["--imports-as-code", "--braces-as-code"], dir.path());
    assert_eq!(v["total"]["sloc"], 9);
}

#[test]
fn ext_filter() {
    let dir = sample_tree();
    let v = json_report(&["--ext", "c"], dir.path());
    assert_eq!(v["total"]["files"], 1);
    assert_eq!(v["total"]["code"], 1);
}

#[test]
fn summary_mode_groups_extensions() {
    let dir = sample_tree();
    let v = json_report(&["--mode", "summary", "--all-ext"], dir.path());
    let labels: Vec<_> = v["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["c", "java", "txt"]);
}

#[test]
fn csv_total_only() {
    let dir = sample_tree();
    srcstat()
        .arg(dir.path())
        .args(["--format", "csv", "--mode", "total-only"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("TOTAL\n"));
}

#[test]
fn table_is_default() {
    let dir = sample_tree();
    srcstat()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTAL (2 files)"))
        .stdout(predicate::str::contains("CODE%"));
}

#[test]
fn missing_path_fails() {
    srcstat()
        .arg("/no/such/srcstat/path")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn invalid_sort_key_is_rejected() {
    srcstat()
        .args(["--sort", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sort key"));
}
