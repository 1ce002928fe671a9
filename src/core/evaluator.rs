//! Geofence evaluator.
//!
//! Pure decision function: given one point and the stored regions it
//! says which regions fire. It performs no side effects of its own;
//! the ingest logic applies the notifications and state updates the
//! verdicts prescribe.

use crate::models::region::RegionRow;
use crate::utils::time::parse_grace_period;
use chrono::{DateTime, Local};

/// If `last_notified_at` holds an unparseable timestamp the cooldown
/// gate opens instead of blocking the region forever. Deliberate
/// policy, asserted by tests.
pub const COOLDOWN_FAIL_OPEN: bool = true;

#[derive(Debug, Clone, Copy)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Outcome of evaluating one region against one point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Static definition invalid (missing name or non-numeric geo
    /// field). Skipped forever, never an error.
    Inert,
    /// Point outside the bounding box; cooldown/quota not consulted.
    OutOfBounds,
    /// Spatially matched but still inside the grace period.
    CoolingDown,
    /// Spatially matched, cooldown satisfied, but no sends left.
    QuotaExhausted,
    /// All three gates passed. `remaining` is the budget before the
    /// decrement; `cooldown_fail_open` marks that the gate only opened
    /// because the stored timestamp failed to parse.
    Fire {
        remaining: i64,
        cooldown_fail_open: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub region_id: i64,
    pub region_name: String,
    pub verdict: Verdict,
}

impl Decision {
    pub fn fires(&self) -> bool {
        matches!(self.verdict, Verdict::Fire { .. })
    }
}

enum CooldownGate {
    Open,
    OpenFailOpen,
    Blocked,
}

/// Cooldown gate for one region.
///
/// No last-notified timestamp or no grace period means the gate is
/// unconditionally open. Otherwise the region is eligible again only
/// strictly after `last_notified_at + grace`: a report arriving exactly
/// at the boundary does not yet qualify.
fn cooldown_gate(region: &RegionRow, now: DateTime<Local>) -> CooldownGate {
    let last = region.last_notified_at.as_deref().unwrap_or("");
    let grace = region.grace_period.as_deref().unwrap_or("");
    if last.is_empty() || grace.is_empty() {
        return CooldownGate::Open;
    }

    match DateTime::parse_from_rfc3339(last) {
        Ok(last_dt) => {
            let next_eligible = last_dt.with_timezone(&Local) + parse_grace_period(grace);
            if now > next_eligible {
                CooldownGate::Open
            } else {
                CooldownGate::Blocked
            }
        }
        Err(_) => {
            if COOLDOWN_FAIL_OPEN {
                CooldownGate::OpenFailOpen
            } else {
                CooldownGate::Blocked
            }
        }
    }
}

fn decide(point: GeoPoint, region: &RegionRow, now: DateTime<Local>) -> Decision {
    let region_name = region.display_name().unwrap_or("").to_string();

    let verdict = match region.geofence() {
        None => Verdict::Inert,
        Some(fence) if !fence.contains(point.lat, point.lon) => Verdict::OutOfBounds,
        Some(_) => {
            let (cooldown_ok, fail_open) = match cooldown_gate(region, now) {
                CooldownGate::Open => (true, false),
                CooldownGate::OpenFailOpen => (true, true),
                CooldownGate::Blocked => (false, false),
            };

            if !cooldown_ok {
                Verdict::CoolingDown
            } else {
                match region.remaining_sends() {
                    Some(remaining) if remaining > 0 => Verdict::Fire {
                        remaining,
                        cooldown_fail_open: fail_open,
                    },
                    _ => Verdict::QuotaExhausted,
                }
            }
        }
    };

    Decision {
        region_id: region.id,
        region_name,
        verdict,
    }
}

/// Evaluate a point against every stored region, in store order.
///
/// Regions are independent: no early exit, no shared state, the
/// verdict for one row never influences another.
pub fn evaluate(point: GeoPoint, regions: &[RegionRow], now: DateTime<Local>) -> Vec<Decision> {
    regions.iter().map(|r| decide(point, r, now)).collect()
}
