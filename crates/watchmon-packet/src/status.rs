//! Status-code tables.
//!
//! The protocol reports several small-integer status codes. Each is modelled
//! as an enum with an `Unknown` variant carrying the raw code, so a firmware
//! revision introducing a new code never fails decoding. Display rendering
//! (including the `Unknown(<code>)` form) is deferred to the boundary that
//! needs a string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shunt-current deadband for deriving [`OpStatus`] in the status-shunt
/// frame, in milliamps. The boundary is exclusive: exactly ±50 mA is idle.
pub const SHUNT_IDLE_DEADBAND_MA: f64 = 50.0;

// ============================================================================
// System Operational Status
// ============================================================================

/// System-wide operational status (status-fast frame, byte 23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpStatus {
    /// No recent data from the monitor.
    Timeout,
    /// Pack neither charging nor discharging.
    Idle,
    /// Pack charging.
    Charging,
    /// Pack discharging.
    Discharging,
    /// Pack full.
    Full,
    /// Pack empty.
    Empty,
    /// Critical condition pending.
    CriticalPending,
    /// Critical condition, outputs offline.
    CriticalOffline,
    /// Code not in the table for this firmware.
    Unknown(u8),
}

impl From<u8> for OpStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => OpStatus::Timeout,
            1 => OpStatus::Idle,
            2 => OpStatus::Charging,
            3 => OpStatus::Discharging,
            4 => OpStatus::Full,
            5 => OpStatus::Empty,
            7 => OpStatus::CriticalPending,
            8 => OpStatus::CriticalOffline,
            other => OpStatus::Unknown(other),
        }
    }
}

impl From<OpStatus> for u8 {
    fn from(value: OpStatus) -> Self {
        match value {
            OpStatus::Timeout => 0,
            OpStatus::Idle => 1,
            OpStatus::Charging => 2,
            OpStatus::Discharging => 3,
            OpStatus::Full => 4,
            OpStatus::Empty => 5,
            OpStatus::CriticalPending => 7,
            OpStatus::CriticalOffline => 8,
            OpStatus::Unknown(v) => v,
        }
    }
}

impl fmt::Display for OpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpStatus::Timeout => write!(f, "Timeout"),
            OpStatus::Idle => write!(f, "Idle"),
            OpStatus::Charging => write!(f, "Charging"),
            OpStatus::Discharging => write!(f, "Discharging"),
            OpStatus::Full => write!(f, "Full"),
            OpStatus::Empty => write!(f, "Empty"),
            OpStatus::CriticalPending => write!(f, "CriticalPending"),
            OpStatus::CriticalOffline => write!(f, "CriticalOffline"),
            OpStatus::Unknown(v) => write!(f, "Unknown({})", v),
        }
    }
}

impl OpStatus {
    /// Derive the operational status from the shunt-current sign.
    ///
    /// The status-shunt frame nominally carries a status byte at offset 25,
    /// but it is unreliable on observed hardware and must not be used. The
    /// current direction is the confirmed source: below −50 mA the pack is
    /// discharging, above +50 mA charging, anything within the deadband
    /// (inclusive of ±50 mA exactly) is idle.
    pub fn from_shunt_current_ma(shunt_ma: f64) -> Self {
        if shunt_ma < -SHUNT_IDLE_DEADBAND_MA {
            OpStatus::Discharging
        } else if shunt_ma > SHUNT_IDLE_DEADBAND_MA {
            OpStatus::Charging
        } else {
            OpStatus::Idle
        }
    }
}

// ============================================================================
// Per-Node Status
// ============================================================================

/// Per-node (cell monitor) status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    /// No status reported.
    None,
    /// Cell voltage above the high limit.
    HighVolt,
    /// Cell temperature above the high limit.
    HighTemp,
    /// Cell within limits.
    Ok,
    /// Cell voltage below the low limit.
    LowVolt,
    /// Cell bypassing (balancing).
    InBypass,
    /// Bypass session starting.
    InitialBypass,
    /// Bypass session finishing.
    FinalBypass,
    /// Code not in the table for this firmware.
    Unknown(u8),
}

impl From<u8> for NodeStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => NodeStatus::None,
            1 => NodeStatus::HighVolt,
            2 => NodeStatus::HighTemp,
            3 => NodeStatus::Ok,
            5 => NodeStatus::LowVolt,
            7 => NodeStatus::InBypass,
            8 => NodeStatus::InitialBypass,
            9 => NodeStatus::FinalBypass,
            other => NodeStatus::Unknown(other),
        }
    }
}

impl From<NodeStatus> for u8 {
    fn from(value: NodeStatus) -> Self {
        match value {
            NodeStatus::None => 0,
            NodeStatus::HighVolt => 1,
            NodeStatus::HighTemp => 2,
            NodeStatus::Ok => 3,
            NodeStatus::LowVolt => 5,
            NodeStatus::InBypass => 7,
            NodeStatus::InitialBypass => 8,
            NodeStatus::FinalBypass => 9,
            NodeStatus::Unknown(v) => v,
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStatus::None => write!(f, "None"),
            NodeStatus::HighVolt => write!(f, "HighVolt"),
            NodeStatus::HighTemp => write!(f, "HighTemp"),
            NodeStatus::Ok => write!(f, "Ok"),
            NodeStatus::LowVolt => write!(f, "LowVolt"),
            NodeStatus::InBypass => write!(f, "InBypass"),
            NodeStatus::InitialBypass => write!(f, "InitialBypass"),
            NodeStatus::FinalBypass => write!(f, "FinalBypass"),
            NodeStatus::Unknown(v) => write!(f, "Unknown({})", v),
        }
    }
}

impl NodeStatus {
    /// Whether the node is in any bypass phase (codes 7, 8, 9).
    pub fn in_bypass(&self) -> bool {
        matches!(
            self,
            NodeStatus::InBypass | NodeStatus::InitialBypass | NodeStatus::FinalBypass
        )
    }
}

// ============================================================================
// Shunt Status
// ============================================================================

/// Shunt status (status-fast frame, byte 43). Note the code assignment
/// differs from [`OpStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShuntStatus {
    /// No recent data from the shunt.
    Timeout,
    /// Current flowing out of the pack.
    Discharging,
    /// No significant current.
    Idle,
    /// Current flowing into the pack.
    Charging,
    /// Code not in the table for this firmware.
    Unknown(u8),
}

impl From<u8> for ShuntStatus {
    fn from(value: u8) -> Self {
        match value {
            0 => ShuntStatus::Timeout,
            1 => ShuntStatus::Discharging,
            2 => ShuntStatus::Idle,
            4 => ShuntStatus::Charging,
            other => ShuntStatus::Unknown(other),
        }
    }
}

impl From<ShuntStatus> for u8 {
    fn from(value: ShuntStatus) -> Self {
        match value {
            ShuntStatus::Timeout => 0,
            ShuntStatus::Discharging => 1,
            ShuntStatus::Idle => 2,
            ShuntStatus::Charging => 4,
            ShuntStatus::Unknown(v) => v,
        }
    }
}

impl fmt::Display for ShuntStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShuntStatus::Timeout => write!(f, "Timeout"),
            ShuntStatus::Discharging => write!(f, "Discharging"),
            ShuntStatus::Idle => write!(f, "Idle"),
            ShuntStatus::Charging => write!(f, "Charging"),
            ShuntStatus::Unknown(v) => write!(f, "Unknown({})", v),
        }
    }
}
