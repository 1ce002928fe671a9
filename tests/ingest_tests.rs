//! Library-level tests for the ingest pipeline: parsing, log append,
//! evaluation side effects and notifier interplay, using an in-memory
//! database and a recording mock notifier.

use std::cell::RefCell;

use geotrack::core::ingest::{IngestLogic, SUCCESS_MESSAGE};
use geotrack::db::initialize::init_db;
use geotrack::db::pool::DbPool;
use geotrack::db::queries::{insert_region, load_log_entries, load_regions};
use geotrack::errors::{AppError, AppResult};
use geotrack::models::region::RegionRow;
use geotrack::notify::{Delivery, Notifier};

/// Recording notifier, modeled on the mock HTTP clients used for
/// provider tests elsewhere: every message is captured, and delivery
/// can be forced to fail.
struct MockNotifier {
    sent: RefCell<Vec<String>>,
    fail: bool,
}

impl MockNotifier {
    fn new() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    fn messages(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Notifier for MockNotifier {
    fn send(&self, message: &str) -> AppResult<Delivery> {
        if self.fail {
            return Err(AppError::Delivery("simulated delivery failure".to_string()));
        }
        self.sent.borrow_mut().push(message.to_string());
        Ok(Delivery::Delivered)
    }
}

fn test_pool() -> DbPool {
    let pool = DbPool::new(":memory:").expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

fn tokyo() -> RegionRow {
    RegionRow {
        id: 0,
        name: Some("Tokyo".to_string()),
        center_lat: Some("35.0".to_string()),
        center_lon: Some("139.0".to_string()),
        lat_tolerance: Some("0.5".to_string()),
        lon_tolerance: Some("0.5".to_string()),
        last_notified_at: None,
        grace_period: None,
        remaining_sends: Some("3".to_string()),
    }
}

const TOKYO_REPORT: &str =
    r#"{"latitude": 35.0, "longitude": 139.0, "timestamp": "t1", "distance": 1, "altitude": 10}"#;

#[test]
fn end_to_end_tokyo_scenario() {
    let mut pool = test_pool();
    insert_region(&pool.conn, &tokyo()).unwrap();

    let notifier = MockNotifier::new();
    let response = IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT));

    assert!(response.is_success());
    assert_eq!(response.message, SUCCESS_MESSAGE);

    // Log entry appended with the parsed coordinates and verbatim
    // pass-through fields.
    let entries = load_log_entries(&pool.conn, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].latitude, 35.0);
    assert_eq!(entries[0].longitude, 139.0);
    assert_eq!(entries[0].timestamp, "t1");
    assert_eq!(entries[0].distance, "1");
    assert_eq!(entries[0].altitude, "10");
    assert!(!entries[0].recorded_at.is_empty());

    // Notifier invoked exactly once with the region message.
    assert_eq!(notifier.messages(), vec!["Here is Tokyo.".to_string()]);

    // Region state updated: budget decremented, timestamp set.
    let regions = load_regions(&pool.conn).unwrap();
    assert_eq!(regions[0].remaining_sends.as_deref(), Some("2"));
    assert!(regions[0].last_notified_at.is_some());
}

#[test]
fn invalid_latitude_is_rejected_without_side_effects() {
    let mut pool = test_pool();
    insert_region(&pool.conn, &tokyo()).unwrap();

    let notifier = MockNotifier::new();
    let body = r#"{"latitude": "abc", "longitude": 139.0}"#;
    let response = IngestLogic::handle(&mut pool, &notifier, Some(body));

    assert_eq!(response.status, "error");
    assert!(response.message.contains("Invalid latitude"));

    // No log entry, no evaluation, no state change.
    assert!(load_log_entries(&pool.conn, None).unwrap().is_empty());
    assert!(notifier.messages().is_empty());
    assert_eq!(
        load_regions(&pool.conn).unwrap()[0].remaining_sends.as_deref(),
        Some("3")
    );
}

#[test]
fn absent_body_is_malformed() {
    let mut pool = test_pool();

    let notifier = MockNotifier::new();
    let response = IngestLogic::handle(&mut pool, &notifier, None);

    assert_eq!(response.status, "error");
    assert!(response.message.contains("Request body is missing"));
    assert!(load_log_entries(&pool.conn, None).unwrap().is_empty());
}

#[test]
fn empty_json_object_is_invalid_payload() {
    let mut pool = test_pool();

    let notifier = MockNotifier::new();
    let response = IngestLogic::handle(&mut pool, &notifier, Some("{}"));

    assert_eq!(response.status, "error");
    assert!(response.message.contains("Invalid latitude"));
}

#[test]
fn coordinates_coerce_from_numeric_strings() {
    let mut pool = test_pool();
    insert_region(&pool.conn, &tokyo()).unwrap();

    let notifier = MockNotifier::new();
    let body = r#"{"latitude": "35.1", "longitude": "139.2"}"#;
    let response = IngestLogic::handle(&mut pool, &notifier, Some(body));

    assert!(response.is_success());
    assert_eq!(notifier.messages().len(), 1);

    let entries = load_log_entries(&pool.conn, None).unwrap();
    assert_eq!(entries[0].latitude, 35.1);
}

#[test]
fn log_append_happens_even_with_no_matching_region() {
    let mut pool = test_pool();
    insert_region(&pool.conn, &tokyo()).unwrap();

    let notifier = MockNotifier::new();
    let body = r#"{"latitude": 0.0, "longitude": 0.0}"#;
    let response = IngestLogic::handle(&mut pool, &notifier, Some(body));

    assert!(response.is_success());
    assert_eq!(load_log_entries(&pool.conn, None).unwrap().len(), 1);
    assert!(notifier.messages().is_empty());
}

#[test]
fn delivery_failure_does_not_block_state_update() {
    let mut pool = test_pool();
    insert_region(&pool.conn, &tokyo()).unwrap();

    let notifier = MockNotifier::failing();
    let response = IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT));

    // The report is still recorded and the region state still moves.
    assert!(response.is_success());
    let regions = load_regions(&pool.conn).unwrap();
    assert_eq!(regions[0].remaining_sends.as_deref(), Some("2"));
    assert!(regions[0].last_notified_at.is_some());
}

#[test]
fn exhausted_region_is_not_notified_and_not_touched() {
    let mut pool = test_pool();
    let mut spent = tokyo();
    spent.remaining_sends = Some("0".to_string());
    insert_region(&pool.conn, &spent).unwrap();

    let notifier = MockNotifier::new();
    let response = IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT));

    assert!(response.is_success());
    assert!(notifier.messages().is_empty());

    let regions = load_regions(&pool.conn).unwrap();
    assert_eq!(regions[0].remaining_sends.as_deref(), Some("0"));
    assert!(regions[0].last_notified_at.is_none());
}

#[test]
fn inert_region_is_skipped_silently() {
    let mut pool = test_pool();
    let mut broken = tokyo();
    broken.center_lat = None;
    insert_region(&pool.conn, &broken).unwrap();

    let notifier = MockNotifier::new();
    let response = IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT));

    // Inert regions never fail an ingest and never fire.
    assert!(response.is_success());
    assert!(notifier.messages().is_empty());
    assert_eq!(load_log_entries(&pool.conn, None).unwrap().len(), 1);
}

#[test]
fn multiple_matching_regions_all_fire_independently() {
    let mut pool = test_pool();
    insert_region(&pool.conn, &tokyo()).unwrap();

    let mut wide = tokyo();
    wide.name = Some("Kanto".to_string());
    wide.lat_tolerance = Some("2.0".to_string());
    wide.lon_tolerance = Some("2.0".to_string());
    wide.remaining_sends = Some("1".to_string());
    insert_region(&pool.conn, &wide).unwrap();

    let notifier = MockNotifier::new();
    let response = IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT));

    assert!(response.is_success());
    assert_eq!(
        notifier.messages(),
        vec!["Here is Tokyo.".to_string(), "Here is Kanto.".to_string()]
    );

    let regions = load_regions(&pool.conn).unwrap();
    assert_eq!(regions[0].remaining_sends.as_deref(), Some("2"));
    assert_eq!(regions[1].remaining_sends.as_deref(), Some("0"));
}

#[test]
fn second_ingest_decrements_again() {
    let mut pool = test_pool();
    insert_region(&pool.conn, &tokyo()).unwrap();

    let notifier = MockNotifier::new();
    assert!(IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT)).is_success());
    assert!(IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT)).is_success());

    // No grace period configured, so both ingests fire and the budget
    // drops by exactly one per firing.
    assert_eq!(notifier.messages().len(), 2);
    assert_eq!(
        load_regions(&pool.conn).unwrap()[0].remaining_sends.as_deref(),
        Some("1")
    );
    assert_eq!(load_log_entries(&pool.conn, None).unwrap().len(), 2);
}

#[test]
fn grace_period_gates_the_second_ingest() {
    let mut pool = test_pool();
    let mut region = tokyo();
    region.grace_period = Some("1:00".to_string());
    insert_region(&pool.conn, &region).unwrap();

    let notifier = MockNotifier::new();
    assert!(IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT)).is_success());
    assert!(IngestLogic::handle(&mut pool, &notifier, Some(TOKYO_REPORT)).is_success());

    // First ingest fires and stamps last_notified_at; the second lands
    // well inside the one-hour grace period.
    assert_eq!(notifier.messages().len(), 1);
    assert_eq!(
        load_regions(&pool.conn).unwrap()[0].remaining_sends.as_deref(),
        Some("2")
    );
}

#[test]
fn log_entries_read_newest_first() {
    let mut pool = test_pool();
    let notifier = MockNotifier::new();

    let first = r#"{"latitude": 1.0, "longitude": 1.0}"#;
    let second = r#"{"latitude": 2.0, "longitude": 2.0}"#;
    assert!(IngestLogic::handle(&mut pool, &notifier, Some(first)).is_success());
    assert!(IngestLogic::handle(&mut pool, &notifier, Some(second)).is_success());

    let entries = load_log_entries(&pool.conn, None).unwrap();
    assert_eq!(entries[0].latitude, 2.0);
    assert_eq!(entries[1].latitude, 1.0);
}
