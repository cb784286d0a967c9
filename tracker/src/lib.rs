pub mod decimate;
pub mod geo;
pub mod models;
pub mod service;
pub mod session;
pub mod sink;

pub use models::{Fix, PersistedPoint, TrackMode, TrackerCommand, TrackerUpdate, TrackingConfig};
pub use service::{Tracker, TrackerConfig};
pub use session::{StartError, TrackingSession};
pub use sink::PointSink;
