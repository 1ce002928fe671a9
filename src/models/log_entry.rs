use serde::Serialize;

/// One persisted row of the position log (`gps_log` table).
///
/// Rows are append-only: created once per successful ingest, never
/// mutated or deleted. Reads return newest-first.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub recorded_at: String, // server timestamp at ingest, ISO8601
    pub timestamp: String,   // device-supplied, verbatim
    pub distance: String,    // device-supplied, verbatim
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: String, // device-supplied, verbatim
}
