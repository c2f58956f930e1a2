//! Periodic state publishing.
//!
//! The wire mutates the canonical state roughly every 300 ms; downstream
//! consumers get a snapshot once per second by default, deliberately slower
//! to throttle traffic. The outbound transport itself is a collaborator
//! behind the [`PublishSink`] trait; this module only guarantees the
//! contract: consistent snapshots on a fixed cadence, exactly-once discovery
//! announcements from the receive path, and a replay operation for the
//! collaborator's reconnect handling.

use crate::state::{StateAggregator, StateSnapshot};
use crate::tracker::NodeTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default publish cadence.
pub const DEFAULT_PUBLISH_INTERVAL: Duration = Duration::from_secs(1);

/// Outbound collaborator interface.
///
/// Implementations own connection lifecycle, availability signaling and any
/// retry policy; the bridge core has no opinion on those.
pub trait PublishSink: Send + Sync {
    /// Publish a point-in-time state snapshot.
    fn publish_state(&self, snapshot: &StateSnapshot);

    /// Announce a newly discovered node. Called exactly once per node id for
    /// the process lifetime from the receive path, plus on explicit replay.
    /// `system_id` identifies the broadcasting monitor so the collaborator
    /// can build per-node descriptors.
    fn announce_node(&self, node_id: u8, system_id: u16);
}

/// Sink that renders snapshots to JSON and logs them. Stands in for a real
/// transport during development and soak testing.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    /// Create a new log sink.
    pub fn new() -> Self {
        LogSink
    }
}

impl PublishSink for LogSink {
    fn publish_state(&self, snapshot: &StateSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(payload) => debug!("State published ({} bytes)", payload.len()),
            Err(e) => warn!("State snapshot failed to serialize: {}", e),
        }
    }

    fn announce_node(&self, node_id: u8, system_id: u16) {
        info!("Node discovered: id={} system_id={}", node_id, system_id);
    }
}

/// Re-announce every node id observed so far.
///
/// For the collaborator's reconnect handler: a downstream transport that
/// lost its session can replay the accumulated discovery set without
/// touching the exactly-once first-sighting path.
pub fn replay_discoveries(sink: &dyn PublishSink, tracker: &NodeTracker, system_id: u16) {
    let ids = tracker.seen_ids();
    for node_id in &ids {
        sink.announce_node(*node_id, system_id);
    }
    if !ids.is_empty() {
        info!("Replayed {} node discovery announcements", ids.len());
    }
}

/// Timer-driven snapshot publisher.
///
/// Reads a consistent copy of the state each tick and hands it to the sink.
/// Nothing is published until the first frame has merged something.
pub struct StatePublisher {
    handle: Option<JoinHandle<()>>,
}

impl StatePublisher {
    /// Spawn the publish task on the current tokio runtime.
    pub fn start(
        aggregator: Arc<StateAggregator>,
        sink: Arc<dyn PublishSink>,
        interval: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so the cadence
            // starts one interval after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let snapshot = aggregator.snapshot();
                if !snapshot.is_empty() {
                    sink.publish_state(&snapshot);
                }
            }
        });
        StatePublisher {
            handle: Some(handle),
        }
    }

    /// Stop the publish task. Safe to call any number of times; stopping an
    /// already-stopped publisher is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("State publisher stopped");
        }
    }

    /// Whether the publish task is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for StatePublisher {
    fn drop(&mut self) {
        self.stop();
    }
}
