use serde::Serialize;

use super::error::ConfigError;
use super::layout;
use crate::protocols::common::writer::FrameWriter;

/// One Wi-Fi network the receiver may join. An empty password means an
/// open network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub ssid: String,
    pub password: String,
}

/// Non-empty, ordered list of stations; the receiver tries them in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationList {
    stations: Vec<Station>,
}

impl StationList {
    pub fn new(stations: Vec<Station>) -> Result<Self, ConfigError> {
        if stations.is_empty() {
            return Err(ConfigError::EmptyStationList);
        }
        if stations.iter().any(|station| station.ssid.is_empty()) {
            return Err(ConfigError::EmptySsid);
        }
        Ok(Self { stations })
    }

    /// Builds the list from a flat `ssid1 password1 ssid2 password2 ...`
    /// argument sequence.
    pub fn from_flat_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        if args.is_empty() {
            return Err(ConfigError::EmptyStationList);
        }
        if args.len() % 2 != 0 {
            return Err(ConfigError::UnpairedStation { count: args.len() });
        }
        let stations = args
            .chunks_exact(2)
            .map(|pair| Station {
                ssid: pair[0].as_ref().to_string(),
                password: pair[1].as_ref().to_string(),
            })
            .collect();
        Self::new(stations)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }
}

/// Settings for the receiver's own access point.
///
/// `#` characters in the SSID are a template: the receiver replaces them with
/// its chip id in hex, filled right to left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApSettings {
    ssid: String,
    password: String,
    always_on: bool,
}

impl ApSettings {
    /// Validates the password: empty (open AP) or at least 8 characters.
    pub fn new(
        ssid: impl Into<String>,
        password: impl Into<String>,
        always_on: bool,
    ) -> Result<Self, ConfigError> {
        let ssid = ssid.into();
        let password = password.into();
        if ssid.is_empty() {
            return Err(ConfigError::EmptySsid);
        }
        let chars = password.chars().count();
        if chars > 0 && chars < layout::AP_PASSWORD_MIN_CHARS {
            return Err(ConfigError::PasswordTooShort {
                min: layout::AP_PASSWORD_MIN_CHARS,
                actual: chars,
            });
        }
        Ok(Self {
            ssid,
            password,
            always_on,
        })
    }

    pub(crate) fn from_wire(ssid: String, password: String, always_on: bool) -> Self {
        Self {
            ssid,
            password,
            always_on,
        }
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Keep the access point up even while connected as a station.
    pub fn always_on(&self) -> bool {
        self.always_on
    }
}

/// Universe to listen on and the DMX start address within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniverseShift {
    pub universe: u16,
    pub shift: u16,
}

/// Configuration command understood by the receiver firmware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigPayload {
    StationList(StationList),
    AccessPoint(ApSettings),
    UniverseShift(UniverseShift),
}

impl ConfigPayload {
    pub fn opcode(&self) -> u16 {
        match self {
            ConfigPayload::StationList(_) => layout::OP_STATION_LIST,
            ConfigPayload::AccessPoint(_) => layout::OP_ACCESS_POINT,
            ConfigPayload::UniverseShift(_) => layout::OP_DMX_SETTINGS,
        }
    }

    /// Marker followed by the body, without the Art-Net signature.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = FrameWriter::new(self.body_len_hint() + layout::MARKER_LEN);
        writer.write_u16_le(self.opcode());
        self.write_body(&mut writer);
        writer.finish()
    }

    /// Complete datagram: signature, marker and body.
    pub fn to_frame(&self) -> Vec<u8> {
        let mut writer =
            FrameWriter::with_opcode(self.opcode(), self.body_len_hint() + layout::BODY_OFFSET);
        self.write_body(&mut writer);
        writer.finish()
    }

    fn write_body(&self, writer: &mut FrameWriter) {
        match self {
            ConfigPayload::StationList(list) => {
                for station in list.stations() {
                    writer.write_cstr(&station.ssid);
                    writer.write_cstr(&station.password);
                }
                writer.write_bytes(layout::STATION_LIST_END);
            }
            ConfigPayload::AccessPoint(ap) => {
                writer.write_u8(u8::from(ap.always_on));
                writer.write_cstr(&ap.ssid);
                writer.write_cstr(&ap.password);
            }
            ConfigPayload::UniverseShift(settings) => {
                writer.write_u16_le(settings.universe);
                writer.write_u16_le(settings.shift);
            }
        }
    }

    fn body_len_hint(&self) -> usize {
        match self {
            ConfigPayload::StationList(list) => {
                list.stations()
                    .iter()
                    .map(|s| s.ssid.len() + s.password.len() + 2)
                    .sum::<usize>()
                    + layout::STATION_LIST_END.len()
            }
            ConfigPayload::AccessPoint(ap) => 3 + ap.ssid.len() + ap.password.len(),
            ConfigPayload::UniverseShift(_) => layout::DMX_SETTINGS_BODY_LEN,
        }
    }
}
