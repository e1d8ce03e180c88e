//! Vendor configuration sub-protocol for ESP-based Art-Net receivers.
//!
//! Three commands share the Art-Net signature but skip the standard header:
//! station list (`23 f8`), access point (`24 f8`) and DMX universe/shift
//! (`25 f8`). Encoders produce the exact bytes the receiver firmware expects;
//! `parse_config_payload` reads them back with the firmware's rules.

pub mod error;
pub mod layout;
pub mod parser;
pub mod payload;
pub mod reader;
pub mod writer;

pub use parser::parse_config_payload;
pub use payload::{ApSettings, ConfigPayload, Station, StationList, UniverseShift};
pub use writer::{encode_ap_settings, encode_station_list, encode_universe_shift};
