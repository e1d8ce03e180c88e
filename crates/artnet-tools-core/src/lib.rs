//! Art-Net tooling core: frame codec, vendor configuration codec, effect
//! payloads and endpoint selection.
//!
//! The library is byte-oriented and side-effect free apart from the system
//! interface enumerator in [`endpoint::system`]. Sockets, timing and argument
//! parsing belong to the binary, which builds the immutable configuration
//! values defined here before any network I/O.
//!
//! Wire conventions:
//! - Art-Net header: signature `Art-Net\0`, little-endian opcode and universe,
//!   big-endian protocol version and length.
//! - Vendor configuration frames: signature plus a vendor opcode and body, no
//!   standard header.
//!
//! # Examples
//! ```
//! use artnet_tools_core::{decode_frame_header, encode_dmx_frame};
//!
//! let frame = encode_dmx_frame(7, &[1, 2, 3])?;
//! let decoded = decode_frame_header(&frame)?;
//! assert_eq!(decoded.header.universe, 7);
//! assert_eq!(&decoded.payload[..3], &[1, 2, 3]);
//! # Ok::<(), artnet_tools_core::ArtNetError>(())
//! ```

pub mod color;
pub mod effects;
pub mod endpoint;
pub mod protocols;

pub use color::{ColorError, Rgb, color_from_hex, hsv_to_rgb_bytes};
pub use effects::{EffectConfig, EffectError, EffectMode, RainbowParams, build_payload};
pub use endpoint::{
    Endpoint, EndpointError, InterfaceAddress, InterfaceInfo, InterfaceSource, SystemInterfaces,
    resolve_endpoint, select_endpoint,
};
pub use protocols::artnet::error::ArtNetError;
pub use protocols::artnet::layout::{ARTDMX_OPCODE, ARTNET_PORT, DMX_MAX_SLOTS};
pub use protocols::artnet::{
    Frame, FrameHeader, SequenceFilter, decode_frame_header, encode_dmx_frame, parse_artdmx,
};
pub use protocols::config::error::ConfigError;
pub use protocols::config::{
    ApSettings, ConfigPayload, Station, StationList, UniverseShift, encode_ap_settings,
    encode_station_list, encode_universe_shift, parse_config_payload,
};
