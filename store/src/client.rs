use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned status {status} for {path}")]
    Status { status: u16, path: String },
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub session_id: String,
}

/// Thin client for the remote point store. All collection paths live under
/// one session namespace.
pub struct RestStore {
    client: Client,
    base_url: String,
    session_id: String,
}

impl RestStore {
    pub fn new(cfg: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            session_id: cfg.session_id,
        }
    }

    /// Flat stream of every point in the session.
    pub fn points_path(&self) -> String {
        format!("sessions/{}/points", self.session_id)
    }

    /// Per-trip stream.
    pub fn trip_points_path(&self, trip_id: &str) -> String {
        format!("sessions/{}/trips/{}/points", self.session_id, trip_id)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// POST one JSON record to a collection path. Success is judged on the
    /// HTTP status alone; the response body is parsed leniently for callers
    /// interested in the store-assigned key.
    pub async fn create<T: Serialize>(&self, path: &str, record: &T) -> Result<Value, StoreError> {
        let resp = self.client.post(self.url(path)).json(record).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(resp.json::<Value>().await.unwrap_or(Value::Null))
    }
}
