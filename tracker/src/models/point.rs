use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::fix::Fix;

/// Source tag for points produced from live position fixes.
pub const GPS_SOURCE: &str = "gps";

/// The record appended to the remote store. Wire field names are fixed by
/// the store schema; `color` and `note` are reserved for later manual
/// enrichment and are always written as explicit nulls here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPoint {
    pub lat: f64,
    pub lng: f64,
    /// Epoch milliseconds, stamped with the current wall clock when the
    /// source fix carries no timestamp.
    pub ts: i64,
    pub source: String,
    #[serde(rename = "tripId")]
    pub trip_id: String,
    pub color: Option<String>,
    pub note: Option<String>,
}

impl PersistedPoint {
    pub fn from_fix(fix: &Fix, trip_id: &str) -> Self {
        Self {
            lat: fix.lat,
            lng: fix.lng,
            ts: fix.ts.unwrap_or_else(|| Utc::now().timestamp_millis()),
            source: GPS_SOURCE.to_string(),
            trip_id: trip_id.to_string(),
            color: None,
            note: None,
        }
    }
}
