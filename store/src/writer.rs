//! Dual-append point writer.
//!
//! Every accepted point lands in two collections: the session's flat point
//! stream and the stream of the trip it belongs to.

use async_trait::async_trait;
use serde_json::Value;

use tracker::models::PersistedPoint;
use tracker::PointSink;

use crate::client::{RestStore, StoreError};

/// The slice of client behavior the writer drives. Narrow on purpose so a
/// recording fake can stand in for the REST client.
#[async_trait]
pub trait PointCollections: Send + Sync {
    /// Flat stream of every point in the session.
    fn points_path(&self) -> String;
    /// Per-trip stream.
    fn trip_points_path(&self, trip_id: &str) -> String;
    async fn create_point(&self, path: &str, point: &PersistedPoint)
        -> Result<Value, StoreError>;
}

#[async_trait]
impl PointCollections for RestStore {
    fn points_path(&self) -> String {
        RestStore::points_path(self)
    }

    fn trip_points_path(&self, trip_id: &str) -> String {
        RestStore::trip_points_path(self, trip_id)
    }

    async fn create_point(
        &self,
        path: &str,
        point: &PersistedPoint,
    ) -> Result<Value, StoreError> {
        self.create(path, point).await
    }
}

pub struct TrackPointWriter<S = RestStore> {
    store: S,
}

impl<S: PointCollections> TrackPointWriter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Appends to the flat session stream, then to the trip stream. The
    /// point counts as written only when both acknowledge; a failure of the
    /// second leg is reported without undoing the first, since the store has
    /// no cross-collection transaction. A retried point may therefore appear
    /// twice in the flat stream.
    pub async fn append_point(&self, point: &PersistedPoint) -> Result<(), StoreError> {
        let reply = self
            .store
            .create_point(&self.store.points_path(), point)
            .await?;
        log_child_key(&reply, "session stream");

        let trip_path = self.store.trip_points_path(&point.trip_id);
        let reply = self.store.create_point(&trip_path, point).await?;
        log_child_key(&reply, "trip stream");

        Ok(())
    }
}

// The store answers a create with `{"name": <child key>}`; the key is
// advisory and only worth a debug line.
fn log_child_key(reply: &Value, stream: &str) {
    if let Some(key) = reply.get("name").and_then(Value::as_str) {
        log::debug!("{stream} append stored as {key}");
    }
}

#[async_trait]
impl<S: PointCollections> PointSink for TrackPointWriter<S> {
    async fn append(&self, point: &PersistedPoint) -> anyhow::Result<()> {
        self.append_point(point).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct RecordingStore {
        calls: Arc<Mutex<Vec<String>>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl PointCollections for RecordingStore {
        fn points_path(&self) -> String {
            "sessions/live/points".to_string()
        }

        fn trip_points_path(&self, trip_id: &str) -> String {
            format!("sessions/live/trips/{trip_id}/points")
        }

        async fn create_point(
            &self,
            path: &str,
            _point: &PersistedPoint,
        ) -> Result<Value, StoreError> {
            self.calls.lock().unwrap().push(path.to_string());
            if self.fail_on.as_deref() == Some(path) {
                return Err(StoreError::Status {
                    status: 500,
                    path: path.to_string(),
                });
            }
            Ok(serde_json::json!({ "name": "-key1" }))
        }
    }

    fn point(trip_id: &str) -> PersistedPoint {
        PersistedPoint {
            lat: 47.6,
            lng: -122.3,
            ts: 1_700_000_000_000,
            source: "gps".to_string(),
            trip_id: trip_id.to_string(),
            color: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn session_stream_append_precedes_trip_stream_append() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let writer = TrackPointWriter::new(RecordingStore {
            calls: calls.clone(),
            fail_on: None,
        });

        writer.append_point(&point("T1")).await.unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            ["sessions/live/points", "sessions/live/trips/T1/points"]
        );
    }

    #[tokio::test]
    async fn first_leg_failure_short_circuits_the_trip_append() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let writer = TrackPointWriter::new(RecordingStore {
            calls: calls.clone(),
            fail_on: Some("sessions/live/points".to_string()),
        });

        let err = writer.append_point(&point("T1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500, .. }));

        // The trip stream was never touched.
        assert_eq!(*calls.lock().unwrap(), ["sessions/live/points"]);
    }

    #[tokio::test]
    async fn second_leg_failure_fails_the_append_without_rollback() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let writer = TrackPointWriter::new(RecordingStore {
            calls: calls.clone(),
            fail_on: Some("sessions/live/trips/T1/points".to_string()),
        });

        let err = writer.append_point(&point("T1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500, .. }));

        // Both legs were attempted; the session-stream write stands.
        assert_eq!(
            *calls.lock().unwrap(),
            ["sessions/live/points", "sessions/live/trips/T1/points"]
        );
    }
}
