//! Ingest orchestration: parse a report, append it to the position
//! log, run the geofence evaluator and apply its verdicts.

use crate::core::evaluator::{self, Decision, GeoPoint, Verdict};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::report::PositionReport;
use crate::notify::{Delivery, Notifier};
use chrono::{DateTime, Local};
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Data recorded and checked successfully";

/// Structured outcome returned to the inbound caller. Always one of
/// `{"status":"success"}` or `{"status":"error"}` with a message;
/// internal diagnostics go to the trace table instead.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    pub status: String,
    pub message: String,
}

impl IngestResponse {
    pub fn success(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// High-level business logic for one inbound position report.
pub struct IngestLogic;

impl IngestLogic {
    /// Handle a raw request body end to end.
    ///
    /// Every failure along the way is caught and converted into an
    /// error response; nothing escapes as a panic or unhandled fault.
    pub fn handle(
        pool: &mut DbPool,
        notifier: &dyn Notifier,
        raw_body: Option<&str>,
    ) -> IngestResponse {
        match Self::process(pool, notifier, raw_body) {
            Ok(()) => IngestResponse::success(SUCCESS_MESSAGE),
            Err(e) => IngestResponse::error(&e.to_string()),
        }
    }

    fn process(
        pool: &mut DbPool,
        notifier: &dyn Notifier,
        raw_body: Option<&str>,
    ) -> AppResult<()> {
        let raw = match raw_body {
            Some(r) if !r.trim().is_empty() => r,
            _ => return Err(AppError::MalformedRequest),
        };

        let report = PositionReport::from_json(raw)?;
        let now = Local::now();

        // The log append is unconditional: it happens even when zero
        // regions end up firing.
        queries::insert_log_entry(&pool.conn, &report, &now.to_rfc3339())?;

        let regions = queries::load_regions(&pool.conn)?;
        let point = GeoPoint {
            lat: report.latitude,
            lon: report.longitude,
        };

        for decision in evaluator::evaluate(point, &regions, now) {
            Self::apply(pool, notifier, &decision, now)?;
        }

        Ok(())
    }

    /// Apply one region verdict: trace the gated cases, notify and
    /// update state for a firing.
    fn apply(
        pool: &mut DbPool,
        notifier: &dyn Notifier,
        decision: &Decision,
        now: DateTime<Local>,
    ) -> AppResult<()> {
        let target = format!("region {}", decision.region_id);

        match &decision.verdict {
            Verdict::Inert => {
                ttlog(
                    &pool.conn,
                    "skip",
                    &target,
                    "incomplete or invalid geo data",
                )?;
            }
            Verdict::OutOfBounds => {
                // Most common case, not worth a trace row per report.
            }
            Verdict::CoolingDown => {
                ttlog(
                    &pool.conn,
                    "gate",
                    &target,
                    &format!("'{}' matched but is inside its grace period", decision.region_name),
                )?;
            }
            Verdict::QuotaExhausted => {
                ttlog(
                    &pool.conn,
                    "gate",
                    &target,
                    &format!("'{}' matched but has no sends left", decision.region_name),
                )?;
            }
            Verdict::Fire {
                remaining,
                cooldown_fail_open,
            } => {
                if *cooldown_fail_open {
                    ttlog(
                        &pool.conn,
                        "gate",
                        &target,
                        "last_notified_at unparseable, cooldown failed open",
                    )?;
                }

                let message = format!("Here is {}.", decision.region_name);

                // Delivery is best-effort: a failure is traced and must
                // never block the state update or later regions.
                match notifier.send(&message) {
                    Ok(Delivery::Delivered) => {
                        ttlog(&pool.conn, "notify", &target, &message)?;
                    }
                    Ok(Delivery::SkippedUnconfigured) => {
                        ttlog(
                            &pool.conn,
                            "notify",
                            &target,
                            "delivery skipped: webhook URL not configured",
                        )?;
                    }
                    Err(e) => {
                        ttlog(
                            &pool.conn,
                            "notify",
                            &target,
                            &format!("delivery failed: {}", e),
                        )?;
                    }
                }

                queries::update_region_state(
                    &pool.conn,
                    decision.region_id,
                    &now.to_rfc3339(),
                    remaining - 1,
                )?;
            }
        }

        Ok(())
    }
}
