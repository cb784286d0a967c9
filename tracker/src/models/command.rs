use tokio::sync::oneshot;

use super::fix::{Fix, TrackMode, TrackingConfig};
use crate::session::StartError;

/// The command surface the tracking service exposes to the rest of the
/// application. `Start` replies on a oneshot so an invalid request can be
/// rejected synchronously; fixes and `Stop` are fire-and-forget.
#[derive(Debug)]
pub enum TrackerCommand {
    Start {
        trip_id: String,
        mode: TrackMode,
        config: TrackingConfig,
        resp: oneshot::Sender<Result<(), StartError>>,
    },
    Stop,
    Position(Fix),
}
