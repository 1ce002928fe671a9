use crate::db::pool::DbPool;
use crate::db::queries::load_log_entries;
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// ANSI color for a trace operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "notify" => Colour::Green,
        "gate" => Colour::Yellow,
        "skip" => Colour::Purple,
        "region_add" => Colour::Blue,
        "region_del" => Colour::Red,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

pub struct TraceLogic;

impl TraceLogic {
    /// Print the operational trace table, oldest entry first.
    pub fn print_trace(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM trace ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: String = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            // Single op+target column
            let op_target = if target.is_empty() {
                operation.clone()
            } else {
                format!("{operation} ({target})")
            };

            Ok((id, date, operation, op_target, message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("📜 Trace is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.len())
            .max()
            .unwrap_or(10)
            .min(60);

        let id_w = entries
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Operational trace:\n");

        for (id, date, operation_raw, op_target, message) in entries {
            let color = color_for_operation(&operation_raw);

            // Color only the operation word, keep the target plain
            let colored = if let Some((op_word, rest)) = op_target.split_once(' ') {
                format!("{} {}", color.paint(op_word), rest)
            } else {
                color.paint(op_target.as_str()).to_string()
            };

            // Padding computed on visible width (ANSI stripped)
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }

    /// Print recent position log entries, newest first.
    pub fn print_positions(pool: &mut DbPool, limit: Option<usize>) -> AppResult<()> {
        let entries = load_log_entries(&pool.conn, limit)?;

        if entries.is_empty() {
            println!("📍 No positions recorded yet.");
            return Ok(());
        }

        println!("📍 Position log (newest first):\n");
        for e in entries {
            println!(
                "{:>5}: {} | lat {:>12.7} lon {:>12.7} | ts '{}' dist '{}' alt '{}'",
                e.id, e.recorded_at, e.latitude, e.longitude, e.timestamp, e.distance, e.altitude
            );
        }

        Ok(())
    }
}
