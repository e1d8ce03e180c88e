pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";

pub const OP_CODE_RANGE: std::ops::Range<usize> = 8..10;
pub const PROTOCOL_VERSION_RANGE: std::ops::Range<usize> = 10..12;
pub const SEQUENCE_OFFSET: usize = 12;
pub const PHYSICAL_OFFSET: usize = 13;
pub const UNIVERSE_RANGE: std::ops::Range<usize> = 14..16;
pub const LENGTH_RANGE: std::ops::Range<usize> = 16..18;
pub const DMX_DATA_OFFSET: usize = 18;
pub const DMX_MAX_SLOTS: usize = 512;

pub const ARTDMX_OPCODE: u16 = 0x5000;
pub const PROTOCOL_VERSION: u16 = 0x000e;

/// Default UDP port for Art-Net traffic.
pub const ARTNET_PORT: u16 = 6454;
