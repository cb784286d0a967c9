/// Outbound observer messages. Delivery is fire-and-forget over a broadcast
/// channel; a lagging or absent receiver never blocks the service.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerUpdate {
    /// Emitted after every fix processed while a session is active.
    Status {
        speed: Option<f64>,
        heading: Option<f64>,
        accepted: u64,
    },
    /// Human-readable progress line, emitted after each persisted point.
    Progress(String),
}
