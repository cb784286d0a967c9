use serde::{Deserialize, Serialize};

/// One raw position sample as delivered by a location source.
/// Immutable once produced; `heading` and `speed` are `None` when the
/// receiver cannot determine them, `ts` when the source omits a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Heading in degrees, 0..360.
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    /// Epoch milliseconds.
    pub ts: Option<i64>,
}

/// Parameters for the adaptive decimation policy.
///
/// Supplied at session start and replaced wholesale on restart, never
/// mutated field by field while a session is live.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Heading change (degrees) above which a turn is worth a point.
    pub corner_angle_deg: f64,
    /// Distance (miles) after which a point is kept even on a straightaway.
    pub straight_dist_mi: f64,
    /// Floor (miles) below which no point is kept, turn or not.
    pub min_move_mi: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            corner_angle_deg: 12.0,
            straight_dist_mi: 15.0,
            min_move_mi: 0.05,
        }
    }
}

/// Selected decimation policy, with the mode-specific interval carried in
/// the variant so a fixed mode can never be active without its interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TrackMode {
    /// Corner/straight hybrid driven by a [`TrackingConfig`].
    Adaptive,
    /// Keep a point every `miles` of travel.
    FixedDistance { miles: f64 },
    /// Keep a point every `millis` of elapsed fix time.
    FixedTime { millis: i64 },
}
