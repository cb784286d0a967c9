pub mod client;
pub mod writer;

pub use client::{RestStore, StoreConfig, StoreError};
pub use writer::{PointCollections, TrackPointWriter};
