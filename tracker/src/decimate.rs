//! Online fix decimation.
//!
//! Decides, fix by fix, whether a candidate is worth persisting given only
//! the last accepted fix. O(1) memory: no trajectory buffer, no
//! simplification pass. The adaptive policy keeps points dense at turns and
//! sparse on straightaways.

use crate::geo::{bearing_delta, dist_miles};
use crate::models::{Fix, TrackMode, TrackingConfig};

/// Minimum travel (miles) before a heading change alone can keep a point.
/// Below this, heading readings are mostly receiver jitter.
pub const CORNER_FLOOR_MILES: f64 = 0.02;

/// Returns true when `candidate` should be kept. Total over well-formed
/// inputs; never errors. The first fix of a session (`last == None`) is
/// always kept.
pub fn should_keep(
    last: Option<&Fix>,
    candidate: &Fix,
    mode: &TrackMode,
    config: &TrackingConfig,
) -> bool {
    let Some(last) = last else {
        return true;
    };

    let dist = dist_miles(last, candidate);

    match mode {
        TrackMode::Adaptive => {
            // A missing heading on either side contributes no delta, so the
            // corner rule cannot fire on unknown headings.
            let head_delta = match (last.heading, candidate.heading) {
                (Some(h1), Some(h2)) => bearing_delta(h1, h2).abs(),
                _ => 0.0,
            };

            let keep = (dist > CORNER_FLOOR_MILES && head_delta > config.corner_angle_deg)
                || dist > config.straight_dist_mi;

            // Stationary-jitter floor: even a qualifying turn is dropped
            // when the device has barely moved.
            keep && dist >= config.min_move_mi
        }
        TrackMode::FixedDistance { miles } => dist >= *miles,
        TrackMode::FixedTime { millis } => {
            let elapsed = candidate.ts.unwrap_or(0) - last.ts.unwrap_or(0);
            elapsed >= *millis
        }
    }
}
