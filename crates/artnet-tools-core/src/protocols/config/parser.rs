use super::error::ConfigError;
use super::layout;
use super::payload::{ApSettings, ConfigPayload, Station, StationList, UniverseShift};
use super::reader::ConfigReader;
use crate::protocols::artnet::layout as artnet_layout;

/// Decode a configuration datagram as the receiver firmware reads it.
///
/// Returns `Ok(None)` when the buffer is not an Art-Net frame or carries
/// another opcode (for example ArtDMX).
pub fn parse_config_payload(buf: &[u8]) -> Result<Option<ConfigPayload>, ConfigError> {
    if !buf.starts_with(artnet_layout::ARTNET_ID) {
        return Ok(None);
    }
    if buf.len() < layout::BODY_OFFSET {
        return Err(ConfigError::TooShort {
            needed: layout::BODY_OFFSET,
            actual: buf.len(),
        });
    }

    let marker = &buf[layout::MARKER_RANGE];
    let opcode = u16::from_le_bytes([marker[0], marker[1]]);
    let body = &buf[layout::BODY_OFFSET..];
    let payload = match opcode {
        layout::OP_STATION_LIST => ConfigPayload::StationList(parse_station_list(body)?),
        layout::OP_ACCESS_POINT => ConfigPayload::AccessPoint(parse_ap_settings(body)?),
        layout::OP_DMX_SETTINGS => ConfigPayload::UniverseShift(parse_dmx_settings(body)?),
        _ => return Ok(None),
    };
    Ok(Some(payload))
}

/// Pairs are read until an empty SSID (the first byte of the end marker) or
/// the end of the body.
fn parse_station_list(body: &[u8]) -> Result<StationList, ConfigError> {
    let mut reader = ConfigReader::new(body);
    let mut stations = Vec::new();
    while !reader.at_end() && reader.peek_u8() != Some(0) {
        let ssid = reader.read_cstr("station ssid")?;
        let password = reader.read_cstr("station password")?;
        stations.push(Station { ssid, password });
    }
    StationList::new(stations)
}

fn parse_ap_settings(body: &[u8]) -> Result<ApSettings, ConfigError> {
    let mut reader = ConfigReader::new(body);
    reader.require_len(layout::AP_MIN_BODY_LEN)?;
    let always_on = reader.read_u8()? != 0;
    let ssid = reader.read_cstr("ap ssid")?;
    if ssid.is_empty() {
        return Err(ConfigError::EmptySsid);
    }
    let password = reader.read_cstr("ap password")?;
    Ok(ApSettings::from_wire(ssid, password, always_on))
}

fn parse_dmx_settings(body: &[u8]) -> Result<UniverseShift, ConfigError> {
    let mut reader = ConfigReader::new(body);
    reader.require_len(layout::DMX_SETTINGS_BODY_LEN)?;
    let universe = reader.read_u16_le()?;
    let shift = reader.read_u16_le()?;
    Ok(UniverseShift { universe, shift })
}
