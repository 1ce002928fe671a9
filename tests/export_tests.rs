//! Export command tests: CSV and JSON dumps of the position log.

use predicates::str::contains;
use std::fs;

mod common;
use common::{gt, init_db_with_region, setup_test_db, temp_out};

fn ingest_sample(db_path: &str) {
    gt().args([
        "--db",
        db_path,
        "ingest",
        r#"{"latitude": 35.0, "longitude": 139.0, "timestamp": "t1", "distance": 12, "altitude": 40}"#,
    ])
    .assert()
    .success();
}

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("export_csv");
    let out = temp_out("export_csv", "csv");

    init_db_with_region(&db_path);
    ingest_sample(&db_path);

    gt().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("Exported 1 entries"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("recorded_at,timestamp,distance,latitude,longitude,altitude"));
    assert!(content.contains("t1,12,35,139,40"));
}

#[test]
fn test_export_json() {
    let db_path = setup_test_db("export_json");
    let out = temp_out("export_json", "json");

    init_db_with_region(&db_path);
    ingest_sample(&db_path);

    gt().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(parsed[0]["latitude"], 35.0);
    assert_eq!(parsed[0]["timestamp"], "t1");
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let db_path = setup_test_db("export_force");
    let out = temp_out("export_force", "csv");

    init_db_with_region(&db_path);
    ingest_sample(&db_path);

    fs::write(&out, "already here").expect("seed existing file");

    gt().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .failure()
    .stderr(contains("already exists"));

    gt().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
    ])
    .assert()
    .success();
}
