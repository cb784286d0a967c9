use async_trait::async_trait;

use crate::models::PersistedPoint;

/// Persistence port for accepted points. A single call must cover every
/// collection the point belongs to; the service only advances its session
/// state when the whole append is acknowledged.
#[async_trait]
pub trait PointSink: Send + Sync {
    async fn append(&self, point: &PersistedPoint) -> anyhow::Result<()>;
}
