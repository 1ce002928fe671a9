use serde::Serialize;

/// A raw region row as the operator stored it (`area_list` table).
///
/// All payload fields are kept as optional text: the table is edited
/// by hand and may contain anything. Validation happens at evaluation
/// time; a row that does not validate is inert, never an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionRow {
    pub id: i64,
    pub name: Option<String>,
    pub center_lat: Option<String>,
    pub center_lon: Option<String>,
    pub lat_tolerance: Option<String>,
    pub lon_tolerance: Option<String>,
    pub last_notified_at: Option<String>,
    pub grace_period: Option<String>,
    pub remaining_sends: Option<String>,
}

/// The validated, numeric view of a region used for spatial matching.
#[derive(Debug, Clone, Copy)]
pub struct Geofence {
    pub center_lat: f64,
    pub center_lon: f64,
    pub lat_tolerance: f64,
    pub lon_tolerance: f64,
}

fn finite(field: Option<&String>) -> Option<f64> {
    let n = field?.trim().parse::<f64>().ok()?;
    n.is_finite().then_some(n)
}

impl RegionRow {
    /// Region name, or None when empty/absent (which makes the row inert).
    pub fn display_name(&self) -> Option<&str> {
        match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => Some(n),
            _ => None,
        }
    }

    /// Validity gate: a region is usable only when it has a non-empty
    /// name and all four geo fields parse as finite numbers.
    pub fn geofence(&self) -> Option<Geofence> {
        self.display_name()?;
        Some(Geofence {
            center_lat: finite(self.center_lat.as_ref())?,
            center_lon: finite(self.center_lon.as_ref())?,
            lat_tolerance: finite(self.lat_tolerance.as_ref())?,
            lon_tolerance: finite(self.lon_tolerance.as_ref())?,
        })
    }

    /// Remaining notification budget, if the stored value is an integer.
    pub fn remaining_sends(&self) -> Option<i64> {
        self.remaining_sends.as_ref()?.trim().parse::<i64>().ok()
    }
}

impl Geofence {
    /// Bounding-box membership check. Bounds are inclusive on both
    /// axes: a point sitting exactly on the box edge matches.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let lat_min = self.center_lat - self.lat_tolerance;
        let lat_max = self.center_lat + self.lat_tolerance;
        let lon_min = self.center_lon - self.lon_tolerance;
        let lon_max = self.center_lon + self.lon_tolerance;

        lat >= lat_min && lat <= lat_max && lon >= lon_min && lon <= lon_max
    }
}
