use crate::errors::AppResult;
use crate::models::log_entry::LogEntry;
use crate::models::region::RegionRow;
use crate::models::report::PositionReport;
use rusqlite::{Connection, Result, Row, params};

/// Append one position report to the `gps_log` table.
///
/// The log is append-only; rows are never updated or deleted here.
pub fn insert_log_entry(
    conn: &Connection,
    report: &PositionReport,
    recorded_at: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO gps_log (recorded_at, timestamp, distance, latitude, longitude, altitude)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            recorded_at,
            report.timestamp,
            report.distance,
            report.latitude,
            report.longitude,
            report.altitude,
        ],
    )?;
    Ok(())
}

pub fn map_log_row(row: &Row) -> Result<LogEntry> {
    Ok(LogEntry {
        id: row.get("id")?,
        recorded_at: row.get("recorded_at")?,
        timestamp: row.get("timestamp")?,
        distance: row.get("distance")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        altitude: row.get("altitude")?,
    })
}

/// Load position log entries, newest first.
pub fn load_log_entries(conn: &Connection, limit: Option<usize>) -> AppResult<Vec<LogEntry>> {
    let sql = match limit {
        Some(n) => format!(
            "SELECT * FROM gps_log ORDER BY id DESC LIMIT {}",
            n
        ),
        None => "SELECT * FROM gps_log ORDER BY id DESC".to_string(),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_log_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_region_row(row: &Row) -> Result<RegionRow> {
    Ok(RegionRow {
        id: row.get("id")?,
        name: row.get("name")?,
        center_lat: row.get("center_lat")?,
        center_lon: row.get("center_lon")?,
        lat_tolerance: row.get("lat_tolerance")?,
        lon_tolerance: row.get("lon_tolerance")?,
        last_notified_at: row.get("last_notified_at")?,
        grace_period: row.get("grace_period")?,
        remaining_sends: row.get("remaining_sends")?,
    })
}

/// Load all regions in store order (insertion order, stable across
/// reads — the evaluator relies on it for deterministic results).
pub fn load_regions(conn: &Connection) -> AppResult<Vec<RegionRow>> {
    let mut stmt = conn.prepare("SELECT * FROM area_list ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_region_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a region definition. `id` is assigned by SQLite.
pub fn insert_region(conn: &Connection, region: &RegionRow) -> AppResult<()> {
    conn.execute(
        "INSERT INTO area_list (name, center_lat, center_lon, lat_tolerance, lon_tolerance,
                                last_notified_at, grace_period, remaining_sends)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            region.name,
            region.center_lat,
            region.center_lon,
            region.lat_tolerance,
            region.lon_tolerance,
            region.last_notified_at,
            region.grace_period,
            region.remaining_sends,
        ],
    )?;
    Ok(())
}

/// Update the two mutable fields of a region after a firing.
///
/// Regions are addressed by their stable `id`, never by positional row
/// number, so storage layout stays invisible to the evaluator.
pub fn update_region_state(
    conn: &Connection,
    region_id: i64,
    last_notified_at: &str,
    remaining_sends: i64,
) -> AppResult<()> {
    conn.execute(
        "UPDATE area_list
         SET last_notified_at = ?1, remaining_sends = ?2
         WHERE id = ?3",
        params![last_notified_at, remaining_sends.to_string(), region_id],
    )?;
    Ok(())
}

pub fn delete_region(conn: &Connection, region_id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM area_list WHERE id = ?1", [region_id])?;
    Ok(n)
}
