//! Simulated drive: a deterministic rectangular circuit fed to the tracker,
//! used for end-to-end smoke runs without a GPS receiver.

use anyhow::Result;
use chrono::Utc;
use tokio::time::{sleep, Duration};

use tracker::models::Fix;
use tracker::Tracker;

pub struct SimDrive {
    pub laps: u32,
    pub ticks_per_leg: u32,
    /// Per-tick coordinate step in degrees (~0.2 miles).
    pub step_deg: f64,
    pub tick: Duration,
}

impl Default for SimDrive {
    fn default() -> Self {
        Self {
            laps: 2,
            ticks_per_leg: 20,
            step_deg: 0.003,
            tick: Duration::from_millis(500),
        }
    }
}

impl SimDrive {
    pub async fn run(&self, tracker: &Tracker) -> Result<()> {
        let mut lat = 47.62;
        let mut lng = -122.33;

        // North, east, south, west legs of the rectangle.
        let legs: [(f64, f64, f64); 4] = [
            (0.0, self.step_deg, 0.0),
            (90.0, 0.0, self.step_deg),
            (180.0, -self.step_deg, 0.0),
            (270.0, 0.0, -self.step_deg),
        ];

        for _ in 0..self.laps {
            for (heading, dlat, dlng) in legs {
                for _ in 0..self.ticks_per_leg {
                    lat += dlat;
                    lng += dlng;
                    tracker
                        .submit_fix(Fix {
                            lat,
                            lng,
                            heading: Some(heading),
                            speed: Some(28.0),
                            ts: Some(Utc::now().timestamp_millis()),
                        })
                        .await?;
                    sleep(self.tick).await;
                }
            }
        }

        Ok(())
    }
}
