//! Batrium WatchMon UDP broadcast protocol.
//!
//! The WatchMon controller broadcasts fixed-layout binary telemetry frames on
//! UDP port 18542, one message per datagram, roughly every 300 ms. This crate
//! decodes those frames into typed records. All multi-byte integers are
//! little-endian.
//!
//! # Frame Format
//!
//! Every frame starts with an 8-byte header:
//!
//! | Offset | Size | Description                         |
//! |--------|------|-------------------------------------|
//! | 0      | 1    | Start marker `0x3A` (`:`)           |
//! | 1      | 2    | Message type (u16 le)               |
//! | 3      | 1    | Separator marker `0x2C` (`,`)       |
//! | 4      | 2    | System identifier (u16 le)          |
//! | 6      | 2    | Reserved                            |
//!
//! The body layout depends on the message type; see [`codec`] for the
//! per-type field tables.
//!
//! # Hardware note on cell voltages
//!
//! With CellMate-K / CellMate-J units (one per cell) each unit presents as a
//! separate node, so `volt_min == volt_max == cell voltage`. A CellMate K9
//! board presents as one node whose min/max span all cells on the board;
//! firmware ≥ 2.15 instead exposes each K9 cell as its own node in the
//! node-status-array message.

mod codec;
mod constants;
mod error;
mod status;
mod types;

pub use codec::*;
pub use constants::*;
pub use error::*;
pub use status::*;
pub use types::*;
