//! Frame dispatch.
//!
//! One frame is decoded and merged at a time: validate the header, route by
//! message type, drive the node tracker for node-bearing records, merge the
//! result into the canonical state. Every per-frame failure is local: a
//! malformed or short frame is dropped with debug-level logging and the loop
//! keeps receiving. The loop's availability is the liveness guarantee the
//! rest of the system depends on.

use crate::error::BridgeError;
use crate::publisher::PublishSink;
use crate::state::StateAggregator;
use crate::tracker::NodeTracker;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, info};
use watchmon_packet::{decode_frame, Header, Message, MAX_FRAME_LEN};

/// Routes decoded frames into the tracker, aggregator and sink.
pub struct Bridge {
    aggregator: Arc<StateAggregator>,
    tracker: Arc<NodeTracker>,
    sink: Arc<dyn PublishSink>,
}

impl Bridge {
    /// Create a bridge over the given shared resources.
    pub fn new(
        aggregator: Arc<StateAggregator>,
        tracker: Arc<NodeTracker>,
        sink: Arc<dyn PublishSink>,
    ) -> Self {
        Bridge {
            aggregator,
            tracker,
            sink,
        }
    }

    /// Process one raw frame. Never fails: drop reasons are counted and
    /// logged at debug severity only.
    pub fn handle_frame(&self, data: &[u8]) {
        metrics::counter!("batbridge.frames_received").increment(1);
        match decode_frame(data) {
            Ok(Some((header, message))) => {
                metrics::counter!("batbridge.frames_decoded").increment(1);
                self.apply(&header, &message);
            }
            Ok(None) => {
                metrics::counter!("batbridge.frames_ignored").increment(1);
            }
            Err(e) => {
                metrics::counter!("batbridge.frames_dropped").increment(1);
                debug!("Dropping frame ({} bytes): {}", data.len(), e);
            }
        }
    }

    fn apply(&self, header: &Header, message: &Message) {
        match message {
            Message::NodeFullInfo(info) => {
                self.observe_node(info.node_id, header.system_id);
                self.aggregator
                    .apply_node_full_info(info, self.tracker.count());
            }
            Message::NodeStatusArray(array) => {
                for entry in &array.nodes {
                    self.observe_node(entry.node_id, header.system_id);
                }
                self.aggregator
                    .apply_node_status_array(array, self.tracker.count());
            }
            Message::CellStats(stats) => self.aggregator.apply_cell_stats(stats),
            Message::StatusShunt(shunt) => self.aggregator.apply_status_shunt(shunt),
            Message::StatusFast(fast) => self.aggregator.apply_status_fast(fast),
        }
    }

    /// Record a node sighting; on the first one, fire the discovery trigger.
    fn observe_node(&self, node_id: u8, system_id: u16) {
        if self.tracker.observe(node_id) {
            info!("New node discovered: id={}", node_id);
            self.sink.announce_node(node_id, system_id);
        }
    }

    /// The tracker shared with this bridge.
    pub fn tracker(&self) -> &Arc<NodeTracker> {
        &self.tracker
    }

    /// The aggregator shared with this bridge.
    pub fn aggregator(&self) -> &Arc<StateAggregator> {
        &self.aggregator
    }
}

/// Bind the broadcast UDP port and feed every received datagram through the
/// bridge. Frames arrive whole (no reassembly) and may be lost or reordered;
/// each is processed independently.
///
/// Runs until the socket fails; per-frame errors never escape.
pub async fn run_udp_listener(bridge: Arc<Bridge>, port: u16) -> Result<(), BridgeError> {
    let socket = UdpSocket::bind(("0.0.0.0", port)).await?;
    socket.set_broadcast(true)?;
    info!("Listening for WatchMon broadcasts on 0.0.0.0:{}", port);
    serve(bridge, socket).await
}

/// Feed every datagram received on an already-bound socket through the
/// bridge. The receive buffer holds [`MAX_FRAME_LEN`] bytes, the size of a
/// node-status-array with all 255 entries, so no valid frame is truncated
/// on receive.
pub async fn serve(bridge: Arc<Bridge>, socket: UdpSocket) -> Result<(), BridgeError> {
    let mut buf = [0u8; MAX_FRAME_LEN];
    loop {
        let (len, _addr) = socket.recv_from(&mut buf).await?;
        bridge.handle_frame(&buf[..len]);
    }
}
