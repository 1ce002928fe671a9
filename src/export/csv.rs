use crate::models::log_entry::LogEntry;
use csv::Writer;

/// Write position log entries as CSV.
pub fn write_csv(path: &str, entries: &[LogEntry]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "recorded_at",
        "timestamp",
        "distance",
        "latitude",
        "longitude",
        "altitude",
    ])?;

    for e in entries {
        wtr.write_record(&[
            e.recorded_at.clone(),
            e.timestamp.clone(),
            e.distance.clone(),
            e.latitude.to_string(),
            e.longitude.to_string(),
            e.altitude.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
