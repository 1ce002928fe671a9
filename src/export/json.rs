use crate::errors::{AppError, AppResult};
use crate::models::log_entry::LogEntry;

/// Write position log entries as pretty-printed JSON.
pub fn write_json(path: &str, entries: &[LogEntry]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
