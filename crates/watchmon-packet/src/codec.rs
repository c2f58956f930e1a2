//! Frame decoding.
//!
//! One decoder per message type, each enforcing that type's minimum frame
//! length before reading any field, then extracting fields at fixed byte
//! offsets and applying the documented unit scaling. Offsets count from the
//! start of the full frame (including the 8-byte header) unless noted as
//! payload-relative.
//!
//! Decoding is a pure function of the input bytes: identical frames always
//! produce identical records.

use crate::{
    CellStats, FrameError, Header, Message, NodeFullInfo, NodeStatus, NodeStatusArray,
    NodeStatusEntry, OpStatus, ShuntStatus, StatusFast, StatusShunt, HEADER_LEN, HEADER_SEP,
    HEADER_START, MIN_LEN_CELL_STATS, MIN_LEN_NODE_FULL_INFO, MIN_LEN_NODE_STATUS_ARRAY,
    MIN_LEN_STATUS_FAST, MIN_LEN_STATUS_SHUNT, MSG_CELL_STATS, MSG_CELL_STATS_LEGACY,
    MSG_NODE_FULL_INFO, MSG_NODE_STATUS_ARRAY, MSG_STATUS_FAST, MSG_STATUS_SHUNT,
    NODE_STATUS_ENTRY_LEN,
};

// ============================================================================
// Field Extraction Helpers
// ============================================================================

/// Read a little-endian i16 at `offset`. Caller has already bounds-checked.
fn i16_le(data: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read a little-endian u16 at `offset`. Caller has already bounds-checked.
fn u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read a little-endian f32 at `offset`. Caller has already bounds-checked.
fn f32_le(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Temperature bytes are offset by 40 °C on the wire.
fn temp_c(raw: u8) -> i32 {
    raw as i32 - 40
}

/// SOC bytes use the scaling `(raw * 0.5) - 5`, so raw 10 = 0 % and
/// raw 200 = 95 %.
fn soc_pct(raw: u8) -> f64 {
    round_to(raw as f64 * 0.5 - 5.0, 1)
}

/// Round to `decimals` decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// ============================================================================
// Header
// ============================================================================

/// Parse the 8-byte frame header.
///
/// Fails if the buffer is shorter than 8 bytes or either marker byte is
/// wrong. No side effects.
pub fn parse_header(data: &[u8]) -> Result<Header, FrameError> {
    if data.len() < HEADER_LEN {
        return Err(FrameError::invalid_header(format!(
            "frame too short for header: {} bytes",
            data.len()
        )));
    }
    if data[0] != HEADER_START {
        return Err(FrameError::invalid_header(format!(
            "bad start marker: 0x{:02X}",
            data[0]
        )));
    }
    if data[3] != HEADER_SEP {
        return Err(FrameError::invalid_header(format!(
            "bad separator marker: 0x{:02X}",
            data[3]
        )));
    }
    Ok(Header {
        msg_type: u16_le(data, 1),
        system_id: u16_le(data, 4),
    })
}

// ============================================================================
// Per-Type Decoders
// ============================================================================

/// Decode a node-full-info frame (52 bytes).
///
/// | Offset | Field                                       |
/// |--------|---------------------------------------------|
/// | 8      | node id                                     |
/// | 10     | volt_min (i16 le, mV)                       |
/// | 12     | volt_max (i16 le, mV)                       |
/// | 14     | min cell temp (raw − 40 = °C)               |
/// | 15     | bypass resistor temp (raw − 40 = °C)        |
/// | 16     | bypass current (i16 le, mA)                 |
/// | 20     | node status code                            |
/// | 21     | overdue flag                                |
/// | 47     | bypass session energy (f32 le, Ah)          |
pub fn decode_node_full_info(data: &[u8]) -> Result<NodeFullInfo, FrameError> {
    if data.len() < MIN_LEN_NODE_FULL_INFO {
        return Err(FrameError::TooShort {
            msg_type: MSG_NODE_FULL_INFO,
            len: data.len(),
            min: MIN_LEN_NODE_FULL_INFO,
        });
    }
    Ok(NodeFullInfo {
        node_id: data[8],
        volt_min_mv: i16_le(data, 10),
        volt_max_mv: i16_le(data, 12),
        temp_c: temp_c(data[14]),
        bypass_temp_c: temp_c(data[15]),
        bypass_ma: i16_le(data, 16),
        status: NodeStatus::from(data[20]),
        is_overdue: data[21] != 0,
        bypass_session_ah: round_to(f32_le(data, 47) as f64, 2),
    })
}

/// Decode a node-status-array frame (all nodes in one frame).
///
/// Payload layout (payload-relative, after the 8-byte header):
///
/// | Offset          | Field                               |
/// |-----------------|-------------------------------------|
/// | 0               | sequence counter (unused)           |
/// | 1               | cells_in_system                     |
/// | 3               | node_count                          |
/// | 4 + n*11 + 0    | node id                             |
/// | 4 + n*11 + 1    | per-node sequence (unused)          |
/// | 4 + n*11 + 2    | volt_min (i16 le, mV)               |
/// | 4 + n*11 + 4    | volt_max (i16 le, mV)               |
/// | 4 + n*11 + 6    | temp_min (raw − 40 = °C)            |
/// | 4 + n*11 + 7    | temp_max (raw − 40 = °C)            |
/// | 4 + n*11 + 8    | bypass current (i16 le, mA)         |
/// | 4 + n*11 + 10   | node status code                    |
///
/// The whole record is rejected if the payload cannot hold the declared
/// entry count; no partial array is ever returned.
pub fn decode_node_status_array(data: &[u8]) -> Result<NodeStatusArray, FrameError> {
    if data.len() < MIN_LEN_NODE_STATUS_ARRAY {
        return Err(FrameError::TooShort {
            msg_type: MSG_NODE_STATUS_ARRAY,
            len: data.len(),
            min: MIN_LEN_NODE_STATUS_ARRAY,
        });
    }

    let payload = &data[HEADER_LEN..];
    let cells_in_system = payload[1];
    let node_count = payload[3] as usize;

    let needed = 4 + node_count * NODE_STATUS_ENTRY_LEN;
    if payload.len() < needed {
        return Err(FrameError::TruncatedArray {
            count: node_count,
            needed,
            len: payload.len(),
        });
    }

    let mut nodes = Vec::with_capacity(node_count);
    for i in 0..node_count {
        let base = 4 + i * NODE_STATUS_ENTRY_LEN;
        nodes.push(NodeStatusEntry {
            node_id: payload[base],
            volt_min_mv: i16_le(payload, base + 2),
            volt_max_mv: i16_le(payload, base + 4),
            temp_min_c: temp_c(payload[base + 6]),
            temp_max_c: temp_c(payload[base + 7]),
            bypass_ma: i16_le(payload, base + 8),
            status: NodeStatus::from(payload[base + 10]),
        });
    }

    Ok(NodeStatusArray {
        cells_in_system,
        nodes,
    })
}

/// Decode a cell-stats frame (48 bytes). The current and legacy message
/// types share this layout; `msg_type` is only used for error reporting.
///
/// | Offset | Field                                          |
/// |--------|------------------------------------------------|
/// | 8      | volt_min (i16 le, mV)                          |
/// | 10     | volt_max (i16 le, mV)                          |
/// | 14     | temp_min (raw − 40 = °C)                       |
/// | 15     | temp_max (raw − 40 = °C)                       |
/// | 18     | min bypass current (i16 le, mA)                |
/// | 20     | max bypass current (i16 le, mA)                |
/// | 28     | volt_avg (i16 le, mV)                          |
/// | 30     | temp_avg (raw − 40 = °C)                       |
/// | 33     | cells actively balancing                       |
/// | 34     | cells overdue                                  |
/// | 35     | cells active                                   |
/// | 36     | cells in system                                |
/// | 38     | min bypass session (f32 le, Ah)                |
/// | 42     | max bypass session (f32 le, Ah)                |
pub fn decode_cell_stats(data: &[u8], msg_type: u16) -> Result<CellStats, FrameError> {
    if data.len() < MIN_LEN_CELL_STATS {
        return Err(FrameError::TooShort {
            msg_type,
            len: data.len(),
            min: MIN_LEN_CELL_STATS,
        });
    }
    Ok(CellStats {
        volt_min_mv: i16_le(data, 8),
        volt_max_mv: i16_le(data, 10),
        volt_avg_mv: i16_le(data, 28),
        temp_min_c: temp_c(data[14]),
        temp_max_c: temp_c(data[15]),
        temp_avg_c: temp_c(data[30]),
        bypass_min_ma: i16_le(data, 18),
        bypass_max_ma: i16_le(data, 20),
        bypass_count: data[33],
        cells_overdue: data[34],
        cells_active: data[35],
        cells_in_system: data[36],
        bypass_session_min_ah: round_to(f32_le(data, 38) as f64, 3),
        bypass_session_max_ah: round_to(f32_le(data, 42) as f64, 3),
    })
}

/// Decode a status-shunt frame (50 bytes).
///
/// | Offset | Field                                            |
/// |--------|--------------------------------------------------|
/// | 12     | shunt voltage (i16 le, 1/100 V → ×10 = mV)       |
/// | 14     | shunt current (f32 le, mA; + charge, − discharge)|
/// | 18     | shunt power (f32 le, W; same sign convention)    |
/// | 22     | coulomb-counted SOC (i16 le, 1/100 %)            |
/// | 24     | monitor SOC ((raw × 0.5) − 5 = %)                |
/// | 39–41  | relays 1–3 (provisional, observed all zero)      |
///
/// Byte 25 nominally carries an operational-status code but is unreliable;
/// status is derived from the shunt-current sign instead.
pub fn decode_status_shunt(data: &[u8]) -> Result<StatusShunt, FrameError> {
    if data.len() < MIN_LEN_STATUS_SHUNT {
        return Err(FrameError::TooShort {
            msg_type: MSG_STATUS_SHUNT,
            len: data.len(),
            min: MIN_LEN_STATUS_SHUNT,
        });
    }
    let shunt_ma = round_to(f32_le(data, 14) as f64, 1);
    Ok(StatusShunt {
        status: OpStatus::from_shunt_current_ma(shunt_ma),
        soc_pct: soc_pct(data[24]),
        shunt_soc_pct: round_to(i16_le(data, 22) as f64 / 100.0, 2),
        shunt_mv: i16_le(data, 12) as i32 * 10,
        shunt_ma,
        shunt_w: round_to(f32_le(data, 18) as f64, 1),
        relay_1: data[39] != 0,
        relay_2: data[40] != 0,
        relay_3: data[41] != 0,
    })
}

/// Decode a status-fast frame (62+ bytes).
///
/// | Offset | Field                                   |
/// |--------|-----------------------------------------|
/// | 23     | operational status code                 |
/// | 32     | SOC ((raw × 0.5) − 5 = %)               |
/// | 43     | shunt status code                       |
/// | 46     | expansion battery flag                  |
/// | 50–53  | relays 1–4                              |
/// | 60     | battery contactor                       |
/// | 61     | load contactor                          |
pub fn decode_status_fast(data: &[u8]) -> Result<StatusFast, FrameError> {
    if data.len() < MIN_LEN_STATUS_FAST {
        return Err(FrameError::TooShort {
            msg_type: MSG_STATUS_FAST,
            len: data.len(),
            min: MIN_LEN_STATUS_FAST,
        });
    }
    Ok(StatusFast {
        status: OpStatus::from(data[23]),
        soc_pct: soc_pct(data[32]),
        shunt_status: ShuntStatus::from(data[43]),
        expansion_battery: data[46] != 0,
        relay_1: data[50] != 0,
        relay_2: data[51] != 0,
        relay_3: data[52] != 0,
        relay_4: data[53] != 0,
        battery_contactor: data[60] != 0,
        load_contactor: data[61] != 0,
    })
}

// ============================================================================
// Dispatch
// ============================================================================

/// Decode a complete frame: validate the header, then route to the decoder
/// for its message type.
///
/// Returns `Ok(None)` for message types this crate does not decode; that is
/// expected protocol evolution, not an error.
pub fn decode_frame(data: &[u8]) -> Result<Option<(Header, Message)>, FrameError> {
    let header = parse_header(data)?;
    let message = match header.msg_type {
        MSG_NODE_FULL_INFO => Some(Message::NodeFullInfo(decode_node_full_info(data)?)),
        MSG_NODE_STATUS_ARRAY => Some(Message::NodeStatusArray(decode_node_status_array(data)?)),
        MSG_CELL_STATS | MSG_CELL_STATS_LEGACY => Some(Message::CellStats(decode_cell_stats(
            data,
            header.msg_type,
        )?)),
        MSG_STATUS_SHUNT => Some(Message::StatusShunt(decode_status_shunt(data)?)),
        MSG_STATUS_FAST => Some(Message::StatusFast(decode_status_fast(data)?)),
        other => {
            log::debug!("Ignoring unknown message type 0x{:04X}", other);
            None
        }
    };
    Ok(message.map(|m| (header, m)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a zero-filled frame of `len` bytes with a valid header carrying
    /// `msg_type` and system id 7.
    fn frame(msg_type: u16, len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        data[0] = HEADER_START;
        data[1..3].copy_from_slice(&msg_type.to_le_bytes());
        data[3] = HEADER_SEP;
        data[4..6].copy_from_slice(&7u16.to_le_bytes());
        data
    }

    fn put_i16(data: &mut [u8], offset: usize, value: i16) {
        data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_f32(data: &mut [u8], offset: usize, value: f32) {
        data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    // ========================================================================
    // Header
    // ========================================================================

    #[test]
    fn test_parse_header() {
        let data = frame(MSG_CELL_STATS, 8);
        let header = parse_header(&data).expect("valid header");
        assert_eq!(header.msg_type, MSG_CELL_STATS);
        assert_eq!(header.system_id, 7);
    }

    #[test]
    fn test_parse_header_rejects_short_buffer() {
        for len in 0..8 {
            assert!(parse_header(&vec![HEADER_START; len]).is_err());
        }
    }

    #[test]
    fn test_parse_header_rejects_bad_markers() {
        let mut data = frame(MSG_CELL_STATS, 8);
        data[0] = 0x00;
        assert!(parse_header(&data).is_err());

        let mut data = frame(MSG_CELL_STATS, 8);
        data[3] = 0x00;
        assert!(parse_header(&data).is_err());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let mut data = frame(MSG_CELL_STATS, 48);
        put_i16(&mut data, 8, 3201);
        put_i16(&mut data, 10, 3355);
        let a = decode_cell_stats(&data, MSG_CELL_STATS).unwrap();
        let b = decode_cell_stats(&data, MSG_CELL_STATS).unwrap();
        assert_eq!(a, b);
    }

    // ========================================================================
    // Node Full Info
    // ========================================================================

    #[test]
    fn test_decode_node_full_info() {
        let mut data = frame(MSG_NODE_FULL_INFO, 52);
        data[8] = 3; // node id
        put_i16(&mut data, 10, 3310);
        put_i16(&mut data, 12, 3312);
        data[14] = 65; // 25 °C
        data[15] = 72; // 32 °C
        put_i16(&mut data, 16, -450);
        data[20] = 7; // InBypass
        data[21] = 0;
        put_f32(&mut data, 47, 1.2345);

        let info = decode_node_full_info(&data).expect("decode");
        assert_eq!(info.node_id, 3);
        assert_eq!(info.volt_min_mv, 3310);
        assert_eq!(info.volt_max_mv, 3312);
        assert_eq!(info.temp_c, 25);
        assert_eq!(info.bypass_temp_c, 32);
        assert_eq!(info.bypass_ma, -450);
        assert_eq!(info.status, NodeStatus::InBypass);
        assert!(!info.is_overdue);
        assert_eq!(info.bypass_session_ah, 1.23);
    }

    #[test]
    fn test_node_full_info_initial_bypass() {
        let mut data = frame(MSG_NODE_FULL_INFO, 52);
        data[20] = 8;
        let info = decode_node_full_info(&data).expect("decode");
        assert_eq!(info.status.to_string(), "InitialBypass");
        assert!(info.in_bypass());
    }

    #[test]
    fn test_node_full_info_overdue_flag() {
        let mut data = frame(MSG_NODE_FULL_INFO, 52);
        data[21] = 1;
        assert!(decode_node_full_info(&data).unwrap().is_overdue);
    }

    #[test]
    fn test_node_full_info_too_short() {
        let data = frame(MSG_NODE_FULL_INFO, 51);
        assert!(matches!(
            decode_node_full_info(&data),
            Err(FrameError::TooShort { min: 52, .. })
        ));
    }

    // ========================================================================
    // Node Status Array
    // ========================================================================

    /// Build an array frame with the given entries as (node_id, volt_mv,
    /// status) triples.
    fn array_frame(entries: &[(u8, i16, u8)]) -> Vec<u8> {
        let mut data = frame(MSG_NODE_STATUS_ARRAY, 12 + entries.len() * 11);
        data[9] = entries.len() as u8; // cells_in_system (payload[1])
        data[11] = entries.len() as u8; // node_count (payload[3])
        for (i, &(id, mv, status)) in entries.iter().enumerate() {
            let base = 12 + i * 11;
            data[base] = id;
            put_i16(&mut data, base + 2, mv);
            put_i16(&mut data, base + 4, mv);
            data[base + 6] = 63; // 23 °C
            data[base + 7] = 64;
            data[base + 10] = status;
        }
        data
    }

    #[test]
    fn test_decode_node_status_array() {
        let data = array_frame(&[(1, 3290, 3), (2, 3301, 7)]);
        let array = decode_node_status_array(&data).expect("decode");
        assert_eq!(array.cells_in_system, 2);
        assert_eq!(array.nodes.len(), 2);
        assert_eq!(array.nodes[0].node_id, 1);
        assert_eq!(array.nodes[0].volt_min_mv, 3290);
        assert_eq!(array.nodes[0].temp_min_c, 23);
        assert_eq!(array.nodes[0].temp_max_c, 24);
        assert!(!array.nodes[0].in_bypass());
        assert_eq!(array.nodes[1].status, NodeStatus::InBypass);
        assert!(array.nodes[1].in_bypass());
    }

    #[test]
    fn test_node_status_array_at_full_capacity() {
        // 255 entries is the largest frame the protocol can produce; it must
        // decode whole and match the advertised maximum frame length.
        let entries: Vec<(u8, i16, u8)> = (1..=255u16)
            .map(|id| (id as u8, 3300, 3))
            .collect();
        let data = array_frame(&entries);
        assert_eq!(data.len(), crate::MAX_FRAME_LEN);

        let array = decode_node_status_array(&data).expect("decode");
        assert_eq!(array.nodes.len(), 255);
        assert_eq!(array.nodes[254].node_id, 255);
        assert_eq!(array.nodes[254].volt_min_mv, 3300);
    }

    #[test]
    fn test_node_status_array_rejects_truncated_entries() {
        // Declares 3 entries but carries bytes for 2: must fail cleanly,
        // never read out of bounds, and never return a partial array.
        let mut data = array_frame(&[(1, 3290, 3), (2, 3301, 3)]);
        data[11] = 3;
        assert!(matches!(
            decode_node_status_array(&data),
            Err(FrameError::TruncatedArray {
                count: 3,
                needed: 37,
                ..
            })
        ));
    }

    #[test]
    fn test_node_status_array_too_short_for_array_header() {
        let data = frame(MSG_NODE_STATUS_ARRAY, 11);
        assert!(decode_node_status_array(&data).is_err());
    }

    #[test]
    fn test_node_status_array_empty() {
        let data = array_frame(&[]);
        let array = decode_node_status_array(&data).expect("decode");
        assert!(array.nodes.is_empty());
    }

    // ========================================================================
    // Cell Stats
    // ========================================================================

    fn cell_stats_frame() -> Vec<u8> {
        let mut data = frame(MSG_CELL_STATS, 48);
        put_i16(&mut data, 8, 3280);
        put_i16(&mut data, 10, 3345);
        data[14] = 58; // 18 °C
        data[15] = 69; // 29 °C
        put_i16(&mut data, 18, 120);
        put_i16(&mut data, 20, 900);
        put_i16(&mut data, 28, 3310);
        data[30] = 63; // 23 °C
        data[33] = 2;
        data[34] = 0;
        data[35] = 8;
        data[36] = 8;
        put_f32(&mut data, 38, 0.0015);
        put_f32(&mut data, 42, 0.7266);
        data
    }

    #[test]
    fn test_decode_cell_stats() {
        let stats = decode_cell_stats(&cell_stats_frame(), MSG_CELL_STATS).expect("decode");
        assert_eq!(stats.volt_min_mv, 3280);
        assert_eq!(stats.volt_max_mv, 3345);
        assert_eq!(stats.volt_avg_mv, 3310);
        assert_eq!(stats.temp_min_c, 18);
        assert_eq!(stats.temp_max_c, 29);
        assert_eq!(stats.temp_avg_c, 23);
        assert_eq!(stats.bypass_min_ma, 120);
        assert_eq!(stats.bypass_max_ma, 900);
        assert_eq!(stats.bypass_count, 2);
        assert_eq!(stats.cells_overdue, 0);
        assert_eq!(stats.cells_active, 8);
        assert_eq!(stats.cells_in_system, 8);
        assert_eq!(stats.bypass_session_min_ah, 0.002);
        assert_eq!(stats.bypass_session_max_ah, 0.727);
    }

    #[test]
    fn test_cell_stats_too_short() {
        let data = frame(MSG_CELL_STATS, 47);
        assert!(decode_cell_stats(&data, MSG_CELL_STATS).is_err());
    }

    #[test]
    fn test_legacy_cell_stats_routes_to_same_decoder() {
        let mut data = cell_stats_frame();
        data[1..3].copy_from_slice(&MSG_CELL_STATS_LEGACY.to_le_bytes());
        let (header, message) = decode_frame(&data).expect("decode").expect("known type");
        assert_eq!(header.msg_type, MSG_CELL_STATS_LEGACY);
        match message {
            Message::CellStats(stats) => assert_eq!(stats.volt_min_mv, 3280),
            other => panic!("expected CellStats, got {:?}", other),
        }
    }

    // ========================================================================
    // Status Shunt
    // ========================================================================

    fn shunt_frame(current_ma: f32) -> Vec<u8> {
        let mut data = frame(MSG_STATUS_SHUNT, 50);
        put_i16(&mut data, 12, 2654); // 26.54 V
        put_f32(&mut data, 14, current_ma);
        put_f32(&mut data, 18, 136.27);
        put_i16(&mut data, 22, 8450); // 84.50 %
        data[24] = 180; // 85.0 %
        data[25] = 0xEE; // nominal status byte, must be ignored
        data
    }

    #[test]
    fn test_decode_status_shunt() {
        let shunt = decode_status_shunt(&shunt_frame(5132.8)).expect("decode");
        assert_eq!(shunt.shunt_mv, 26540);
        assert_eq!(shunt.shunt_ma, 5132.8);
        assert_eq!(shunt.shunt_w, 136.3);
        assert_eq!(shunt.shunt_soc_pct, 84.5);
        assert_eq!(shunt.soc_pct, 85.0);
        assert_eq!(shunt.status, OpStatus::Charging);
        assert!(!shunt.relay_1 && !shunt.relay_2 && !shunt.relay_3);
    }

    #[test]
    fn test_status_shunt_ignores_status_byte() {
        // Byte 25 is 0xEE in the fixture; status must still come from the
        // current sign.
        let shunt = decode_status_shunt(&shunt_frame(0.0)).expect("decode");
        assert_eq!(shunt.status, OpStatus::Idle);
    }

    #[test]
    fn test_status_shunt_deadband_boundaries() {
        assert_eq!(
            decode_status_shunt(&shunt_frame(-50.0)).unwrap().status,
            OpStatus::Idle
        );
        assert_eq!(
            decode_status_shunt(&shunt_frame(50.0)).unwrap().status,
            OpStatus::Idle
        );
        assert_eq!(
            decode_status_shunt(&shunt_frame(-51.0)).unwrap().status,
            OpStatus::Discharging
        );
        assert_eq!(
            decode_status_shunt(&shunt_frame(51.0)).unwrap().status,
            OpStatus::Charging
        );
    }

    #[test]
    fn test_status_shunt_negative_power() {
        let mut data = shunt_frame(-2210.4);
        put_f32(&mut data, 18, -58.66);
        let shunt = decode_status_shunt(&data).expect("decode");
        assert_eq!(shunt.status, OpStatus::Discharging);
        assert_eq!(shunt.shunt_w, -58.7);
    }

    #[test]
    fn test_status_shunt_too_short() {
        let data = frame(MSG_STATUS_SHUNT, 49);
        assert!(decode_status_shunt(&data).is_err());
    }

    // ========================================================================
    // Status Fast
    // ========================================================================

    #[test]
    fn test_decode_status_fast() {
        let mut data = frame(MSG_STATUS_FAST, 62);
        data[23] = 2; // Charging
        data[32] = 200; // 95.0 %
        data[43] = 4; // shunt Charging
        data[46] = 1;
        data[50] = 1;
        data[53] = 1;
        data[60] = 1;

        let fast = decode_status_fast(&data).expect("decode");
        assert_eq!(fast.status, OpStatus::Charging);
        assert_eq!(fast.soc_pct, 95.0);
        assert_eq!(fast.shunt_status, ShuntStatus::Charging);
        assert!(fast.expansion_battery);
        assert!(fast.relay_1 && !fast.relay_2 && !fast.relay_3 && fast.relay_4);
        assert!(fast.battery_contactor);
        assert!(!fast.load_contactor);
    }

    #[test]
    fn test_status_fast_soc_scaling() {
        let mut data = frame(MSG_STATUS_FAST, 62);
        data[32] = 10;
        assert_eq!(decode_status_fast(&data).unwrap().soc_pct, 0.0);
        data[32] = 200;
        assert_eq!(decode_status_fast(&data).unwrap().soc_pct, 95.0);
    }

    #[test]
    fn test_status_fast_unknown_codes_do_not_fail() {
        let mut data = frame(MSG_STATUS_FAST, 62);
        data[23] = 99;
        data[43] = 17;
        let fast = decode_status_fast(&data).expect("decode");
        assert_eq!(fast.status.to_string(), "Unknown(99)");
        assert_eq!(fast.shunt_status.to_string(), "Unknown(17)");
    }

    #[test]
    fn test_status_fast_too_short() {
        let data = frame(MSG_STATUS_FAST, 61);
        assert!(decode_status_fast(&data).is_err());
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    #[test]
    fn test_decode_frame_unknown_type_is_skipped() {
        let data = frame(0x5432, 64);
        assert!(decode_frame(&data).expect("not an error").is_none());
    }

    #[test]
    fn test_decode_frame_invalid_header() {
        assert!(decode_frame(&[0u8; 64]).is_err());
    }

    #[test]
    fn test_decode_frame_routes_by_type() {
        let mut data = frame(MSG_NODE_FULL_INFO, 52);
        data[8] = 5;
        let (header, message) = decode_frame(&data).expect("decode").expect("known type");
        assert_eq!(header.msg_type, MSG_NODE_FULL_INFO);
        assert!(matches!(message, Message::NodeFullInfo(ref n) if n.node_id == 5));
    }
}
