//! CLI integration tests: init, region management and one-shot ingest
//! through the geotrack binary.

use predicates::str::contains;

mod common;
use common::{gt, init_db_with_region, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    gt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_regions_add_and_list() {
    let db_path = setup_test_db("regions_add_list");
    init_db_with_region(&db_path);

    gt().args(["--db", &db_path, "regions"])
        .assert()
        .success()
        .stdout(contains("Tokyo"))
        .stdout(contains("35.0"))
        .stdout(contains("ok"));
}

#[test]
fn test_regions_incomplete_definition_is_marked_inert() {
    let db_path = setup_test_db("regions_inert");

    gt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    // No coordinates at all: stored fine, flagged as inert.
    gt().args(["--db", &db_path, "regions", "--add", "--name", "Nowhere"])
        .assert()
        .success();

    gt().args(["--db", &db_path, "regions"])
        .assert()
        .success()
        .stdout(contains("Nowhere"))
        .stdout(contains("inert"));
}

#[test]
fn test_regions_delete() {
    let db_path = setup_test_db("regions_del");
    init_db_with_region(&db_path);

    gt().args(["--db", &db_path, "regions", "--del", "1"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    gt().args(["--db", &db_path, "regions"])
        .assert()
        .success()
        .stdout(contains("No regions configured"));
}

#[test]
fn test_ingest_end_to_end() {
    let db_path = setup_test_db("ingest_e2e");
    init_db_with_region(&db_path);

    // The default config still carries the webhook placeholder, so the
    // notifier skips delivery; the firing and state update happen anyway.
    gt().args([
        "--db",
        &db_path,
        "ingest",
        r#"{"latitude": 35.0, "longitude": 139.0, "timestamp": "t1", "distance": 1, "altitude": 10}"#,
    ])
    .assert()
    .success()
    .stdout(contains("\"status\":\"success\""));

    // Budget went from 3 to 2.
    gt().args(["--db", &db_path, "regions"])
        .assert()
        .success()
        .stdout(contains("Tokyo"))
        .stdout(contains("2"));

    // Position was logged.
    gt().args(["--db", &db_path, "log", "--positions"])
        .assert()
        .success()
        .stdout(contains("139"));

    // Trace recorded the skipped delivery.
    gt().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("webhook URL not configured"));
}

#[test]
fn test_ingest_invalid_latitude() {
    let db_path = setup_test_db("ingest_bad_lat");
    init_db_with_region(&db_path);

    gt().args([
        "--db",
        &db_path,
        "ingest",
        r#"{"latitude": "abc", "longitude": 139.0}"#,
    ])
    .assert()
    .success()
    .stdout(contains("\"status\":\"error\""))
    .stdout(contains("Invalid latitude"));

    // Nothing was logged.
    gt().args(["--db", &db_path, "log", "--positions"])
        .assert()
        .success()
        .stdout(contains("No positions recorded"));
}

#[test]
fn test_ingest_without_body() {
    let db_path = setup_test_db("ingest_no_body");

    gt().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    gt().args(["--db", &db_path, "ingest"])
        .assert()
        .success()
        .stdout(contains("\"status\":\"error\""))
        .stdout(contains("Request body is missing"));
}

#[test]
fn test_ingest_outside_all_regions() {
    let db_path = setup_test_db("ingest_outside");
    init_db_with_region(&db_path);

    gt().args([
        "--db",
        &db_path,
        "ingest",
        r#"{"latitude": 0.0, "longitude": 0.0}"#,
    ])
    .assert()
    .success()
    .stdout(contains("\"status\":\"success\""));

    // Budget untouched.
    gt().args(["--db", &db_path, "regions"])
        .assert()
        .success()
        .stdout(contains("3"));
}
