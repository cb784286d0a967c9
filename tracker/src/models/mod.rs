pub mod command;
pub mod fix;
pub mod point;
pub mod update;

pub use command::TrackerCommand;
pub use fix::{Fix, TrackMode, TrackingConfig};
pub use point::{PersistedPoint, GPS_SOURCE};
pub use update::TrackerUpdate;
