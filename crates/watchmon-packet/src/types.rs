//! Decoded record types, one per message kind.
//!
//! Every numeric field carries an explicit physical unit fixed by the
//! protocol's scaling rules (millivolts, milliamps, watts, degrees Celsius,
//! percent, amp-hours), never a raw wire code. Status codes are kept as
//! their enum form; string rendering happens at the consumer boundary.

use crate::{NodeStatus, OpStatus, ShuntStatus};
use serde::{Deserialize, Serialize};

/// The 8-byte frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Message type code.
    pub msg_type: u16,
    /// System identifier of the broadcasting monitor.
    pub system_id: u16,
}

/// Per-node full info (one node per frame).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFullInfo {
    /// Node identifier.
    pub node_id: u8,
    /// Minimum cell voltage on this node, mV.
    pub volt_min_mv: i16,
    /// Maximum cell voltage on this node, mV.
    pub volt_max_mv: i16,
    /// Minimum cell temperature on this node, °C.
    pub temp_c: i32,
    /// Bypass resistor temperature, °C.
    pub bypass_temp_c: i32,
    /// Bypass (balancing) current, mA. Zero when not balancing.
    pub bypass_ma: i16,
    /// Node status.
    pub status: NodeStatus,
    /// Node has missed its reporting deadline.
    pub is_overdue: bool,
    /// Energy dissipated in the current bypass session, Ah.
    pub bypass_session_ah: f64,
}

impl NodeFullInfo {
    /// Whether the node is in any bypass phase.
    pub fn in_bypass(&self) -> bool {
        self.status.in_bypass()
    }
}

/// One entry of a node-status-array frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatusEntry {
    /// Node identifier.
    pub node_id: u8,
    /// Minimum cell voltage, mV.
    pub volt_min_mv: i16,
    /// Maximum cell voltage, mV.
    pub volt_max_mv: i16,
    /// Minimum cell temperature, °C.
    pub temp_min_c: i32,
    /// Maximum cell temperature, °C.
    pub temp_max_c: i32,
    /// Bypass current, mA.
    pub bypass_ma: i16,
    /// Node status.
    pub status: NodeStatus,
}

impl NodeStatusEntry {
    /// Whether the node is in any bypass phase.
    pub fn in_bypass(&self) -> bool {
        self.status.in_bypass()
    }
}

/// All nodes in one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatusArray {
    /// Total cell count in the system.
    pub cells_in_system: u8,
    /// Per-node entries.
    pub nodes: Vec<NodeStatusEntry>,
}

/// Pack-level cell statistics, aggregated across all nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellStats {
    /// Minimum cell voltage, mV.
    pub volt_min_mv: i16,
    /// Maximum cell voltage, mV.
    pub volt_max_mv: i16,
    /// Average cell voltage, mV.
    pub volt_avg_mv: i16,
    /// Minimum cell temperature, °C.
    pub temp_min_c: i32,
    /// Maximum cell temperature, °C.
    pub temp_max_c: i32,
    /// Average cell temperature, °C.
    pub temp_avg_c: i32,
    /// Minimum bypass current across balancing cells, mA.
    pub bypass_min_ma: i16,
    /// Peak bypass current across balancing cells, mA.
    pub bypass_max_ma: i16,
    /// Number of cells actively balancing.
    pub bypass_count: u8,
    /// Cells with monitor comms failures.
    pub cells_overdue: u8,
    /// Cells currently responding.
    pub cells_active: u8,
    /// Total cell count in the system.
    pub cells_in_system: u8,
    /// Smallest per-cell bypass session energy, Ah.
    pub bypass_session_min_ah: f64,
    /// Largest per-cell bypass session energy, Ah.
    pub bypass_session_max_ah: f64,
}

/// Shunt telemetry: current, voltage, power and both SOC estimates.
///
/// Positive current and power mean charging, negative discharging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShunt {
    /// Operational status derived from the shunt-current sign (the frame's
    /// nominal status byte is unreliable; see
    /// [`OpStatus::from_shunt_current_ma`]).
    pub status: OpStatus,
    /// Monitor's coarse voltage-derived SOC estimate, percent.
    pub soc_pct: f64,
    /// Coulomb-counted SOC from the shunt, percent.
    pub shunt_soc_pct: f64,
    /// Pack voltage at the shunt, mV.
    pub shunt_mv: i32,
    /// Shunt current, mA.
    pub shunt_ma: f64,
    /// Shunt power, W.
    pub shunt_w: f64,
    /// Relay outputs 1–3. Offsets are provisional; observed all zero on real
    /// hardware so far.
    pub relay_1: bool,
    pub relay_2: bool,
    pub relay_3: bool,
}

/// Combined fast status: SOC, system status, shunt status, relays and
/// contactors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusFast {
    /// System operational status.
    pub status: OpStatus,
    /// Monitor's coarse voltage-derived SOC estimate, percent.
    pub soc_pct: f64,
    /// Shunt status.
    pub shunt_status: ShuntStatus,
    /// Expansion battery bank enabled.
    pub expansion_battery: bool,
    /// Relay outputs 1–4.
    pub relay_1: bool,
    pub relay_2: bool,
    pub relay_3: bool,
    pub relay_4: bool,
    /// Battery contactor closed.
    pub battery_contactor: bool,
    /// Load contactor closed.
    pub load_contactor: bool,
}

/// A decoded frame body, tagged by message kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// Per-node full info.
    NodeFullInfo(NodeFullInfo),
    /// All nodes in one frame.
    NodeStatusArray(NodeStatusArray),
    /// Pack-level cell statistics (current or legacy message type).
    CellStats(CellStats),
    /// Shunt telemetry.
    StatusShunt(StatusShunt),
    /// Combined fast status.
    StatusFast(StatusFast),
}
