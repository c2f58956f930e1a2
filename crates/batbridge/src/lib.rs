//! Batrium WatchMon UDP bridge.
//!
//! Listens for WatchMon broadcast frames, decodes them with
//! [`watchmon-packet`](watchmon_packet), continuously merges the results
//! into one canonical key→value state, tracks newly appearing nodes, and
//! hands periodic snapshots plus one-time discovery announcements to an
//! outbound collaborator behind the [`PublishSink`] trait.
//!
//! Data flow: datagram → header validation → per-type decode → node
//! tracking → state merge → periodic snapshot publish.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod project;
pub mod publisher;
pub mod state;
pub mod tracker;

pub use config::BridgeConfig;
pub use dispatch::{run_udp_listener, serve, Bridge};
pub use error::BridgeError;
pub use publisher::{replay_discoveries, LogSink, PublishSink, StatePublisher};
pub use state::{FieldValue, StateAggregator, StateSnapshot};
pub use tracker::NodeTracker;
