use thiserror::Error;

use crate::models::{Fix, TrackMode, TrackingConfig};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error("start rejected: missing trip id")]
    MissingTripId,
}

/// Live state of one tracking session. The service holds an
/// `Option<TrackingSession>`; `None` is the idle state, so "idle implies no
/// trip id and no last fix" holds by construction.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    pub trip_id: String,
    pub mode: TrackMode,
    pub config: TrackingConfig,
    /// `None` exactly when nothing has been accepted since start.
    pub last_accepted: Option<Fix>,
    /// Points persisted this session.
    pub accepted: u64,
    /// Stamp comparing a write completion against the session it was issued
    /// for. Bumped on every (re)start so a stale completion cannot advance a
    /// newer session.
    pub generation: u64,
}

impl TrackingSession {
    pub fn new(
        trip_id: &str,
        mode: TrackMode,
        config: TrackingConfig,
        generation: u64,
    ) -> Result<Self, StartError> {
        let trip_id = trip_id.trim();
        if trip_id.is_empty() {
            return Err(StartError::MissingTripId);
        }

        Ok(Self {
            trip_id: trip_id.to_string(),
            mode,
            config,
            last_accepted: None,
            accepted: 0,
            generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trip_id_is_rejected() {
        for trip_id in ["", "   ", "\t\n"] {
            let res =
                TrackingSession::new(trip_id, TrackMode::Adaptive, TrackingConfig::default(), 1);
            assert_eq!(res.unwrap_err(), StartError::MissingTripId);
        }
    }

    #[test]
    fn new_session_starts_empty() {
        let s = TrackingSession::new(" T1 ", TrackMode::Adaptive, TrackingConfig::default(), 3)
            .unwrap();
        assert_eq!(s.trip_id, "T1");
        assert_eq!(s.accepted, 0);
        assert_eq!(s.generation, 3);
        assert!(s.last_accepted.is_none());
    }
}
