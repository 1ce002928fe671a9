use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_region, insert_region, load_regions};
use crate::errors::{AppError, AppResult};
use crate::models::region::RegionRow;
use crate::ui::messages::{success, warning};

fn cell(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

/// Handle the `regions` subcommand: list, add or delete region rows.
/// Values are stored verbatim; validation happens at evaluation time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Regions {
        add,
        name,
        center_lat,
        center_lon,
        lat_tolerance,
        lon_tolerance,
        grace_period,
        remaining_sends,
        del,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        // ---- DELETE ----
        if let Some(id) = del {
            let n = delete_region(&pool.conn, *id)?;
            if n == 0 {
                return Err(AppError::Other(format!("No region with id {}", id)));
            }
            ttlog(&pool.conn, "region_del", &format!("region {}", id), "deleted")?;
            success(format!("Region {} deleted.", id));
            return Ok(());
        }

        // ---- ADD ----
        if *add {
            let region = RegionRow {
                id: 0, // assigned by SQLite
                name: name.clone(),
                center_lat: center_lat.clone(),
                center_lon: center_lon.clone(),
                lat_tolerance: lat_tolerance.clone(),
                lon_tolerance: lon_tolerance.clone(),
                last_notified_at: None,
                grace_period: grace_period.clone(),
                remaining_sends: remaining_sends.clone(),
            };

            insert_region(&pool.conn, &region)?;
            ttlog(
                &pool.conn,
                "region_add",
                cell(name),
                "region added",
            )?;
            success(format!("Region '{}' added.", cell(name)));

            if region.geofence().is_none() {
                warning(
                    "Region definition is incomplete or non-numeric: it will be skipped \
                     during evaluation until fixed.",
                );
            }
            return Ok(());
        }

        // ---- LIST (default) ----
        let regions = load_regions(&pool.conn)?;

        if regions.is_empty() {
            println!("No regions configured.");
            return Ok(());
        }

        println!(
            "{:>4}  {:<20} {:>12} {:>12} {:>9} {:>9} {:>7} {:>6}  {:<25}  {}",
            "id", "name", "lat", "lon", "lat-tol", "lon-tol", "grace", "sends", "last notified", "state"
        );

        for r in &regions {
            let state = if r.geofence().is_some() { "ok" } else { "inert" };
            println!(
                "{:>4}  {:<20} {:>12} {:>12} {:>9} {:>9} {:>7} {:>6}  {:<25}  {}",
                r.id,
                cell(&r.name),
                cell(&r.center_lat),
                cell(&r.center_lon),
                cell(&r.lat_tolerance),
                cell(&r.lon_tolerance),
                cell(&r.grace_period),
                cell(&r.remaining_sends),
                cell(&r.last_notified_at),
                state
            );
        }
    }

    Ok(())
}
