mod sim;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use pointstore::{RestStore, StoreConfig, TrackPointWriter};
use tracker::models::{TrackMode, TrackingConfig};
use tracker::{Tracker, TrackerConfig, TrackerUpdate};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_or("RUST_LOG", "info"))
        .init();

    let store_cfg = StoreConfig {
        base_url: env_or("TRACK_BASE_URL", "http://localhost:4000"),
        session_id: env_or("TRACK_SESSION", "live"),
    };
    info!(
        "point store: {} (session {})",
        store_cfg.base_url, store_cfg.session_id
    );

    let writer = TrackPointWriter::new(RestStore::new(store_cfg));
    let tracker = Tracker::start(TrackerConfig::default(), Arc::new(writer));

    // Observer: the display layer of this agent is its log.
    let mut updates = tracker.subscribe();
    let observer = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(TrackerUpdate::Status {
                    speed,
                    heading,
                    accepted,
                }) => {
                    info!(?speed, ?heading, accepted, "fix processed");
                }
                Ok(TrackerUpdate::Progress(msg)) => info!("{msg}"),
                Err(RecvError::Lagged(n)) => warn!("observer lagged by {n} updates"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let trip_id = format!("trip-{}", uuid::Uuid::new_v4());
    tracker
        .start_tracking(&trip_id, TrackMode::Adaptive, TrackingConfig::default())
        .await?;
    info!("tracking trip {trip_id}");

    let drive = sim::SimDrive::default();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, shutting down");
        }
        res = drive.run(&tracker) => {
            res?;
            info!("simulated drive finished");
        }
    }

    tracker.stop_tracking().await?;
    tracker.stop().await?;
    observer.await?;

    info!("agent stopped");
    Ok(())
}
