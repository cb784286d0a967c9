//! The tracking service: a single task owning the session state machine.
//!
//! Commands arrive on one mpsc channel and are processed to completion in
//! order, including the awaited store append, so at most one write is in
//! flight and every fix is decimated against a committed reference point.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::decimate;
use crate::models::{Fix, PersistedPoint, TrackMode, TrackerCommand, TrackerUpdate, TrackingConfig};
use crate::session::TrackingSession;
use crate::sink::PointSink;

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub command_channel_capacity: usize,
    pub update_channel_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            command_channel_capacity: 256,
            update_channel_capacity: 256,
        }
    }
}

/// Handle to the running tracking service.
pub struct Tracker {
    join: JoinHandle<()>,
    commands_tx: mpsc::Sender<TrackerCommand>,
    updates_tx: broadcast::Sender<TrackerUpdate>,
    shutdown: CancellationToken,
}

impl Tracker {
    pub fn start(cfg: TrackerConfig, sink: Arc<dyn PointSink>) -> Self {
        let shutdown = CancellationToken::new();
        let (commands_tx, commands_rx) = mpsc::channel(cfg.command_channel_capacity);
        let (updates_tx, _) = broadcast::channel(cfg.update_channel_capacity);

        let task_shutdown = shutdown.clone();
        let task_updates = updates_tx.clone();
        let join = tokio::spawn(async move {
            run_loop(commands_rx, task_updates, sink, task_shutdown).await;
        });

        Self {
            join,
            commands_tx,
            updates_tx,
            shutdown,
        }
    }

    /// Begin a session for `trip_id`. Restarting while active is idempotent:
    /// the session resets in place with a cleared reference point and counter.
    pub async fn start_tracking(
        &self,
        trip_id: &str,
        mode: TrackMode,
        config: TrackingConfig,
    ) -> Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.commands_tx
            .send(TrackerCommand::Start {
                trip_id: trip_id.to_string(),
                mode,
                config,
                resp: resp_tx,
            })
            .await
            .context("tracker command channel closed")?;
        resp_rx.await.context("tracker dropped the start reply")??;
        Ok(())
    }

    /// End the current session, if any. Idempotent from idle.
    pub async fn stop_tracking(&self) -> Result<()> {
        self.commands_tx
            .send(TrackerCommand::Stop)
            .await
            .context("tracker command channel closed")
    }

    /// Submit one position fix. Silently ignored while idle.
    pub async fn submit_fix(&self, fix: Fix) -> Result<()> {
        self.commands_tx
            .send(TrackerCommand::Position(fix))
            .await
            .context("tracker command channel closed")
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackerUpdate> {
        self.updates_tx.subscribe()
    }

    pub async fn stop(self) -> Result<()> {
        self.shutdown.cancel();
        self.join.await.context("tracker join failed")
    }
}

async fn run_loop(
    mut commands_rx: mpsc::Receiver<TrackerCommand>,
    updates_tx: broadcast::Sender<TrackerUpdate>,
    sink: Arc<dyn PointSink>,
    shutdown: CancellationToken,
) {
    let mut session: Option<TrackingSession> = None;
    let mut generation: u64 = 0;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("tracker shutdown requested");
                break;
            }

            cmd = commands_rx.recv() => {
                let Some(cmd) = cmd else {
                    warn!("command channel closed, stopping tracker task");
                    break;
                };

                match cmd {
                    TrackerCommand::Start { trip_id, mode, config, resp } => {
                        match TrackingSession::new(&trip_id, mode, config, generation + 1) {
                            Ok(s) => {
                                generation += 1;
                                info!(trip = %s.trip_id, ?mode, "tracking started");
                                session = Some(s);
                                let _ = resp.send(Ok(()));
                            }
                            Err(e) => {
                                warn!("{e}");
                                let _ = resp.send(Err(e));
                            }
                        }
                    }

                    TrackerCommand::Stop => {
                        if let Some(s) = session.take() {
                            info!(trip = %s.trip_id, points = s.accepted, "tracking stopped");
                        }
                    }

                    TrackerCommand::Position(fix) => {
                        handle_fix(&mut session, fix, &updates_tx, sink.as_ref()).await;
                    }
                }
            }
        }
    }
}

async fn handle_fix(
    session: &mut Option<TrackingSession>,
    fix: Fix,
    updates_tx: &broadcast::Sender<TrackerUpdate>,
    sink: &dyn PointSink,
) {
    // Idle: fixes are expected noise, not an error.
    let Some(live) = session.as_ref() else {
        return;
    };

    let keep = decimate::should_keep(live.last_accepted.as_ref(), &fix, &live.mode, &live.config);

    if keep {
        let point = PersistedPoint::from_fix(&fix, &live.trip_id);
        let issued_for = live.generation;

        // The append may suspend; the session slot is only touched again
        // after checking the completion still belongs to the same session
        // incarnation (stop or restart while suspended makes it stale).
        let result = sink.append(&point).await;

        match (result, session.as_mut().filter(|s| s.generation == issued_for)) {
            (Ok(()), Some(s)) => {
                s.last_accepted = Some(Fix {
                    ts: Some(point.ts),
                    ..fix.clone()
                });
                s.accepted += 1;
                debug!(trip = %s.trip_id, total = s.accepted, "point persisted");
                let _ = updates_tx.send(TrackerUpdate::Progress(format!(
                    "{} points recorded",
                    s.accepted
                )));
            }
            (Ok(()), None) => {
                debug!(trip = %point.trip_id, "append completed for a stale session, ignored");
            }
            (Err(e), _) => {
                // Not advanced: the next candidate is decimated against the
                // same reference point. The session keeps running.
                warn!(trip = %point.trip_id, "point append failed, keeping previous reference: {e:#}");
            }
        }
    }

    if let Some(s) = session.as_ref() {
        let _ = updates_tx.send(TrackerUpdate::Status {
            speed: fix.speed,
            heading: fix.heading,
            accepted: s.accepted,
        });
    }
}
