use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn causal_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_causal-sim"))
        .args(args)
        .output()
        .expect("run causal-sim")
}

fn write_data(dir: &Path) -> String {
    let path = dir.join("data.csv");
    fs::write(&path, "1,1\n0,0\n1,1\n").unwrap();
    path.display().to_string()
}

#[test]
fn estimate_writes_artefacts_and_inspect_reads_them() {
    let dir = tempdir().unwrap();
    let data = write_data(dir.path());
    let out = dir.path().join("run");
    let out_str = out.display().to_string();

    let output = causal_sim(&[
        "estimate",
        "--data",
        &data,
        "--iterations",
        "1000",
        "--burnin",
        "200",
        "--seed",
        "11",
        "--out",
        &out_str,
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    for name in ["scores.csv", "summary.json", "manifest.json", "config.yaml"] {
        assert!(out.join(name).exists(), "missing {name}");
    }

    let summary: Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["dimension"], 2);
    assert_eq!(summary["retained_samples"], 800.0);
    assert_eq!(summary["finite"], true);

    let output = causal_sim(&["inspect", "--run", &out_str]);
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["master_seed"], 11);
    assert_eq!(report["non_finite_scores"], 0);
}

#[test]
fn equal_burnin_writes_nan_scores() {
    let dir = tempdir().unwrap();
    let data = write_data(dir.path());
    let out = dir.path().join("run");
    let out_str = out.display().to_string();

    let output = causal_sim(&[
        "estimate",
        "--data",
        &data,
        "--iterations",
        "5",
        "--burnin",
        "5",
        "--out",
        &out_str,
    ]);
    assert!(output.status.success());
    let scores = fs::read_to_string(out.join("scores.csv")).unwrap();
    assert_eq!(scores, "NaN,NaN\nNaN,NaN\n");

    let output = causal_sim(&["inspect", "--run", &out_str]);
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["non_finite_scores"], 4);
}

#[test]
fn strict_flag_rejects_degenerate_runs() {
    let dir = tempdir().unwrap();
    let data = write_data(dir.path());
    let out = dir.path().join("run");

    let output = causal_sim(&[
        "estimate",
        "--data",
        &data,
        "--iterations",
        "5",
        "--burnin",
        "-1",
        "--strict",
        "--out",
        &out.display().to_string(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("negative-burnin"));
    assert!(!out.exists());
}

#[test]
fn config_with_nested_scores_file_writes_into_subdirectory() {
    let dir = tempdir().unwrap();
    let data = write_data(dir.path());
    let config = dir.path().join("c.yaml");
    fs::write(
        &config,
        "iterations: 20\nburnin: 5\noutput:\n  scores_file: scores/s.csv\n",
    )
    .unwrap();
    let out = dir.path().join("run");
    let out_str = out.display().to_string();

    let output = causal_sim(&[
        "estimate",
        "--data",
        &data,
        "--config",
        &config.display().to_string(),
        "--out",
        &out_str,
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("scores").join("s.csv").exists());

    let output = causal_sim(&["inspect", "--run", &out_str]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["iterations"], 20);
    assert_eq!(report["non_finite_scores"], 0);
}
