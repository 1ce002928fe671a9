#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn gt() -> Command {
    cargo_bin_cmd!("geotrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_geotrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add one well-formed region useful for many tests
pub fn init_db_with_region(db_path: &str) {
    gt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    gt().args([
        "--db", db_path, "regions", "--add", "--name", "Tokyo", "--lat", "35.0", "--lon",
        "139.0", "--lat-tol", "0.5", "--lon-tol", "0.5", "--sends", "3",
    ])
    .assert()
    .success();
}
