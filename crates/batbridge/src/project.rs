//! Projection of typed records into flat key/value pairs.
//!
//! Pack-level records map to plain keys; node-scoped records are expanded
//! under a `cell_{id}_` prefix so that any number of nodes contribute
//! independent keys without collision. Status enums are rendered to their
//! display names here; this is the boundary that needs strings.
//!
//! All functions are pure; the merge itself lives in
//! [`StateAggregator`](crate::state::StateAggregator).

use crate::state::FieldValue;
use watchmon_packet::{
    CellStats, NodeFullInfo, NodeStatusEntry, StatusFast, StatusShunt,
};

/// Namespace a per-node field by its numeric node id.
pub fn node_key(node_id: u8, field: &str) -> String {
    format!("cell_{}_{}", node_id, field)
}

/// Expand a node-full-info record into namespaced pairs.
///
/// A single `volt` key is published from `volt_min`: with one node per cell,
/// volt_min == volt_max == that cell's voltage. The bypass session energy is
/// decoded in amp-hours, so its key carries the `_ah` suffix.
pub fn node_full_info_fields(info: &NodeFullInfo) -> Vec<(String, FieldValue)> {
    let n = info.node_id;
    vec![
        (node_key(n, "volt"), info.volt_min_mv.into()),
        (node_key(n, "temp_c"), info.temp_c.into()),
        (node_key(n, "bypass_temp_c"), info.bypass_temp_c.into()),
        (node_key(n, "bypass_ma"), info.bypass_ma.into()),
        (node_key(n, "bypass_ah"), info.bypass_session_ah.into()),
        (node_key(n, "op_status_name"), info.status.to_string().into()),
        (node_key(n, "in_bypass"), info.in_bypass().into()),
        (node_key(n, "is_overdue"), info.is_overdue.into()),
    ]
}

/// Expand one node-status-array entry into namespaced pairs.
pub fn node_status_entry_fields(entry: &NodeStatusEntry) -> Vec<(String, FieldValue)> {
    let n = entry.node_id;
    vec![
        (node_key(n, "volt"), entry.volt_min_mv.into()),
        (node_key(n, "temp_c"), entry.temp_min_c.into()),
        (node_key(n, "bypass_ma"), entry.bypass_ma.into()),
        (node_key(n, "op_status_name"), entry.status.to_string().into()),
        (node_key(n, "in_bypass"), entry.in_bypass().into()),
    ]
}

/// Project a cell-stats record. Derived fields (`volt_spread`,
/// `balancing_active`) are added at merge time, not here.
pub fn cell_stats_fields(stats: &CellStats) -> Vec<(String, FieldValue)> {
    vec![
        ("volt_min".to_string(), stats.volt_min_mv.into()),
        ("volt_max".to_string(), stats.volt_max_mv.into()),
        ("volt_avg".to_string(), stats.volt_avg_mv.into()),
        ("temp_min_c".to_string(), stats.temp_min_c.into()),
        ("temp_max_c".to_string(), stats.temp_max_c.into()),
        ("temp_avg_c".to_string(), stats.temp_avg_c.into()),
        ("min_bypass_ma".to_string(), stats.bypass_min_ma.into()),
        ("max_bypass_ma".to_string(), stats.bypass_max_ma.into()),
        ("bypass_count".to_string(), stats.bypass_count.into()),
        ("cells_overdue".to_string(), stats.cells_overdue.into()),
        ("cells_active".to_string(), stats.cells_active.into()),
        ("cells_in_system".to_string(), stats.cells_in_system.into()),
        (
            "min_bypass_session_ah".to_string(),
            stats.bypass_session_min_ah.into(),
        ),
        (
            "max_bypass_session_ah".to_string(),
            stats.bypass_session_max_ah.into(),
        ),
    ]
}

/// Project a status-shunt record.
pub fn status_shunt_fields(shunt: &StatusShunt) -> Vec<(String, FieldValue)> {
    vec![
        ("op_status".to_string(), u8::from(shunt.status).into()),
        ("op_status_name".to_string(), shunt.status.to_string().into()),
        ("soc_pct".to_string(), shunt.soc_pct.into()),
        ("shunt_soc_pct".to_string(), shunt.shunt_soc_pct.into()),
        ("shunt_volt_mv".to_string(), shunt.shunt_mv.into()),
        ("shunt_ma".to_string(), shunt.shunt_ma.into()),
        ("shunt_watt".to_string(), shunt.shunt_w.into()),
        ("relay_1".to_string(), shunt.relay_1.into()),
        ("relay_2".to_string(), shunt.relay_2.into()),
        ("relay_3".to_string(), shunt.relay_3.into()),
    ]
}

/// Project a status-fast record.
pub fn status_fast_fields(fast: &StatusFast) -> Vec<(String, FieldValue)> {
    vec![
        ("op_status".to_string(), u8::from(fast.status).into()),
        ("op_status_name".to_string(), fast.status.to_string().into()),
        ("soc_pct".to_string(), fast.soc_pct.into()),
        ("shunt_status".to_string(), u8::from(fast.shunt_status).into()),
        (
            "shunt_status_name".to_string(),
            fast.shunt_status.to_string().into(),
        ),
        (
            "expansion_battery_on".to_string(),
            fast.expansion_battery.into(),
        ),
        ("relay_1".to_string(), fast.relay_1.into()),
        ("relay_2".to_string(), fast.relay_2.into()),
        ("relay_3".to_string(), fast.relay_3.into()),
        ("relay_4".to_string(), fast.relay_4.into()),
        ("contactor_batt".to_string(), fast.battery_contactor.into()),
        ("load_contactor".to_string(), fast.load_contactor.into()),
    ]
}
