use crate::db::pool::DbPool;
use crate::db::queries::load_log_entries;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, csv, json};
use crate::ui::messages::success;
use std::path::Path;

/// Export the position log to a file in the requested format.
pub fn run_export(
    pool: &mut DbPool,
    format: ExportFormat,
    file: &str,
    force: bool,
) -> AppResult<()> {
    if Path::new(file).exists() && !force {
        return Err(AppError::Export(format!(
            "File '{}' already exists (use --force to overwrite)",
            file
        )));
    }

    let entries = load_log_entries(&pool.conn, None)?;

    match format {
        ExportFormat::Csv => csv::write_csv(file, &entries)?,
        ExportFormat::Json => json::write_json(file, &entries)?,
    }

    success(format!("Exported {} entries to {}", entries.len(), file));
    Ok(())
}
