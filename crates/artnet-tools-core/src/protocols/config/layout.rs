//! Vendor configuration frames: the Art-Net signature followed directly by a
//! vendor opcode (little-endian, so `0xf823` goes out as `23 f8`) and a body.
//! There is no standard header.

use std::ops::Range;

pub const OP_STATION_LIST: u16 = 0xf823;
pub const OP_ACCESS_POINT: u16 = 0xf824;
pub const OP_DMX_SETTINGS: u16 = 0xf825;

pub const MARKER_LEN: usize = 2;
pub const MARKER_RANGE: Range<usize> = 8..10;
pub const BODY_OFFSET: usize = 10;

/// Three NUL bytes close the station list.
pub const STATION_LIST_END: &[u8; 3] = b"\0\0\0";

pub const AP_MIN_BODY_LEN: usize = 3;
pub const AP_PASSWORD_MIN_CHARS: usize = 8;

pub const DMX_SETTINGS_BODY_LEN: usize = 4;
