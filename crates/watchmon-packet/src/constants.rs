//! Protocol constants
//!
//! Header markers, message-type codes, and minimum frame lengths for the
//! WatchMon UDP broadcast protocol. Offsets elsewhere in this crate count
//! from the start of the full frame, including the 8-byte header, unless
//! noted as payload-relative.

// ============================================================================
// Header
// ============================================================================

/// First byte of every frame (`:`).
pub const HEADER_START: u8 = 0x3A;
/// Fourth byte of every frame (`,`).
pub const HEADER_SEP: u8 = 0x2C;
/// Header length in bytes.
pub const HEADER_LEN: usize = 8;

// ============================================================================
// Message Types
// ============================================================================

/// Per-node full info (52 bytes, 300 ms).
pub const MSG_NODE_FULL_INFO: u16 = 0x4232;
/// All nodes in one frame (variable length, 300 ms). Preferred source for
/// per-cell voltages on firmware ≥ 2.15.
pub const MSG_NODE_STATUS_ARRAY: u16 = 0x415A;
/// Pack-level cell statistics (48 bytes, 300 ms), firmware ≥ 2.15.
pub const MSG_CELL_STATS: u16 = 0x3E33;
/// Legacy alias of [`MSG_CELL_STATS`] sent by firmware ≤ 1.0.29. Identical
/// field layout.
pub const MSG_CELL_STATS_LEGACY: u16 = 0x3E5A;
/// SOC, relays and contactors (62+ bytes, older firmware).
pub const MSG_STATUS_FAST: u16 = 0x3F33;
/// Shunt voltage/current/power/SOC (50 bytes, 300 ms), firmware ≥ 2.15.
pub const MSG_STATUS_SHUNT: u16 = 0x3F34;

// ============================================================================
// Minimum Frame Lengths
// ============================================================================

/// Minimum length of a node-full-info frame.
pub const MIN_LEN_NODE_FULL_INFO: usize = 52;
/// Minimum length of a node-status-array frame (header + 4-byte array
/// header). The full length depends on the declared node count.
pub const MIN_LEN_NODE_STATUS_ARRAY: usize = HEADER_LEN + 4;
/// Minimum length of a cell-stats frame (both message types).
pub const MIN_LEN_CELL_STATS: usize = 48;
/// Minimum length of a status-fast frame.
pub const MIN_LEN_STATUS_FAST: usize = 62;
/// Minimum length of a status-shunt frame.
pub const MIN_LEN_STATUS_SHUNT: usize = 50;

/// Size of one entry in the node-status-array payload.
pub const NODE_STATUS_ENTRY_LEN: usize = 11;

/// Largest frame the protocol can produce: a node-status-array carrying the
/// full 255 entries. Receive buffers must hold at least this much or large
/// arrays arrive truncated.
pub const MAX_FRAME_LEN: usize = MIN_LEN_NODE_STATUS_ARRAY + 255 * NODE_STATUS_ENTRY_LEN;
