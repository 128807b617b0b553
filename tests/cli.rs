//! Command-line interface.

use assert_cmd::Command;
use plotstore::dump;
use plotstore::plot::Axes;
use plotstore::store::{Container, MemoryStore, Store};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_sample(path: &Path) {
    let mut ax = Axes::new();
    let line = ax
        .plot(vec![0.0, 1.0, 2.0], vec![1.0, 0.5, 0.25])
        .label("decay")
        .build()
        .unwrap();
    let errors = ax
        .errorbar(vec![0.0, 1.0], vec![2.0, 3.0])
        .yerr(vec![0.5, 0.25])
        .build()
        .unwrap();

    let mut container = Container::create(path).unwrap();
    dump(&mut container, "fig/decay", &line).unwrap();
    dump(&mut container, "fig/errors", &errors).unwrap();
    container.save().unwrap();
}

fn plotstore() -> Command {
    Command::cargo_bin("plotstore").unwrap()
}

#[test]
fn info_prints_versions() {
    plotstore()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "plotstore={}\n",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains("plot="));
}

#[test]
fn ls_prints_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.nc");
    write_sample(&path);

    plotstore()
        .arg("ls")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tree Structure: sample.nc"))
        .stdout(predicate::str::contains("fig (2)"))
        .stdout(predicate::str::contains("decay (3, 2) Line2D"))
        .stdout(predicate::str::contains("errors (2, 2) ErrorbarContainer"));
}

#[test]
fn show_prints_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.json");
    write_sample(&path);

    plotstore()
        .args(["show", path.to_str().unwrap(), "fig/errors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record: fig/errors"))
        .stdout(predicate::str::contains("Shape: (2, 2)"))
        .stdout(predicate::str::contains("yerr: [0.5, 0.25]"));
}

#[test]
fn show_missing_key_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.json");
    write_sample(&path);

    plotstore()
        .args(["show", path.to_str().unwrap(), "fig/nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Node not found"));
}

#[test]
fn export_writes_json_mapping() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("sample.nc");
    let output = dir.path().join("out.json");
    write_sample(&source);

    plotstore()
        .arg("export")
        .arg(&source)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 records"));

    let exported = MemoryStore::load(&output).unwrap();
    let mut keys = exported.keys().unwrap();
    keys.sort();
    assert_eq!(keys, vec!["/fig/decay".to_string(), "/fig/errors".to_string()]);
    let record = exported.read_record("fig/decay").unwrap();
    assert_eq!(record.get_str("label"), Some("decay"));
}

#[test]
fn missing_file_fails() {
    plotstore()
        .args(["ls", "does-not-exist.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn log_option_writes_file() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("plotstore.log");

    plotstore()
        .arg("--log")
        .arg(&log)
        .arg("info")
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Starting plotstore"));
}
