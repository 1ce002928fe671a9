use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the internal `trace` table exists.
/// Every diagnostic the ingest path produces ends up here; nothing in
/// this table is ever returned to an HTTP caller.
fn ensure_trace_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS trace (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the position log table.
///
/// `timestamp`, `distance` and `altitude` are device-supplied and pass
/// through uninterpreted, so they stay TEXT. Latitude/longitude are
/// validated at ingest and stored as REAL.
fn create_gps_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS gps_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            recorded_at TEXT NOT NULL,
            timestamp   TEXT NOT NULL DEFAULT '',
            distance    TEXT NOT NULL DEFAULT '',
            latitude    REAL NOT NULL,
            longitude   REAL NOT NULL,
            altitude    TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_gps_log_recorded_at ON gps_log(recorded_at);
        "#,
    )?;
    Ok(())
}

/// Create the region list table.
///
/// All payload columns are nullable TEXT on purpose: regions are edited
/// by an operator and may hold junk. A row whose name or geo fields do
/// not parse is inert (skipped at evaluation time), never a failure.
fn create_area_list_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS area_list (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT,
            center_lat       TEXT,
            center_lon       TEXT,
            lat_tolerance    TEXT,
            lon_tolerance    TEXT,
            last_notified_at TEXT,
            grace_period     TEXT,
            remaining_sends  TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure trace table (everything below may want to write to it)
    ensure_trace_table(conn)?;

    // 2) Position log
    if !table_exists(conn, "gps_log")? {
        create_gps_log_table(conn)?;
        success("Created gps_log table.");
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_gps_log_recorded_at ON gps_log(recorded_at);",
        )?;
    }

    // 3) Region list
    if !table_exists(conn, "area_list")? {
        create_area_list_table(conn)?;
        success("Created area_list table.");
    }

    Ok(())
}
