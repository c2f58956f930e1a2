//! Canonical telemetry state.
//!
//! A single owned mapping from field name to the most recently decoded value
//! for that field. Every successful decode merges into it with
//! overwrite-per-key semantics; keys are never removed, so a field stays at
//! its last value until a later frame updates it. The periodic publisher
//! reads point-in-time snapshots, never the live map.

use crate::project;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use watchmon_packet::{CellStats, NodeFullInfo, NodeStatusArray, StatusFast, StatusShunt};

/// A scalar state value: number, boolean, or string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer quantity (voltages in mV, currents in mA, counts).
    Int(i64),
    /// Fractional quantity (SOC percent, session Ah, shunt readings).
    Float(f64),
    /// Flag (relays, contactors, bypass).
    Bool(bool),
    /// Rendered status name.
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// A point-in-time copy of the canonical state.
pub type StateSnapshot = HashMap<String, FieldValue>;

/// The canonical state aggregator.
///
/// Owns the mapping behind a single mutex. Any number of aggregators can be
/// constructed; there is no ambient global state.
#[derive(Debug, Default)]
pub struct StateAggregator {
    state: Mutex<StateSnapshot>,
}

impl StateAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        StateAggregator::default()
    }

    /// Merge key/value pairs into the state. Later writes always win; there
    /// is no versioning or conflict detection.
    pub fn merge(&self, updates: impl IntoIterator<Item = (String, FieldValue)>) {
        let mut state = self.state.lock();
        state.extend(updates);
    }

    /// Take a consistent point-in-time copy of the state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.lock().clone()
    }

    /// Look up a single field's current value.
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        self.state.lock().get(key).cloned()
    }

    /// Number of keys currently set.
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    /// Whether no frame has merged anything yet.
    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    // ------------------------------------------------------------------
    // Per-message merges

    /// Merge a node-full-info record under its `cell_{id}_` prefix and
    /// republish the nodes-online count.
    pub fn apply_node_full_info(&self, info: &NodeFullInfo, nodes_online: usize) {
        let mut updates = project::node_full_info_fields(info);
        updates.push(("nodes_online".to_string(), nodes_online.into()));
        self.merge(updates);
    }

    /// Merge every entry of a node-status-array record and republish the
    /// nodes-online count.
    pub fn apply_node_status_array(&self, array: &NodeStatusArray, nodes_online: usize) {
        let mut updates = Vec::with_capacity(array.nodes.len() * 5 + 1);
        for entry in &array.nodes {
            updates.extend(project::node_status_entry_fields(entry));
        }
        updates.push(("nodes_online".to_string(), nodes_online.into()));
        self.merge(updates);
    }

    /// Merge a cell-stats record, plus the two merge-time derived fields:
    /// `volt_spread` (volt_max − volt_min) and `balancing_active`
    /// (bypass_count > 0). These are aggregation policy, not protocol facts,
    /// and always reflect the latest frame only.
    pub fn apply_cell_stats(&self, stats: &CellStats) {
        let mut updates = project::cell_stats_fields(stats);
        let spread = stats.volt_max_mv as i64 - stats.volt_min_mv as i64;
        updates.push(("volt_spread".to_string(), spread.into()));
        updates.push((
            "balancing_active".to_string(),
            (stats.bypass_count > 0).into(),
        ));
        self.merge(updates);
    }

    /// Merge a status-shunt record.
    pub fn apply_status_shunt(&self, shunt: &StatusShunt) {
        self.merge(project::status_shunt_fields(shunt));
    }

    /// Merge a status-fast record.
    pub fn apply_status_fast(&self, fast: &StatusFast) {
        self.merge(project::status_fast_fields(fast));
    }
}
