//! Art-Net frame codec.
//!
//! Encodes full-universe ArtDMX frames and decodes the 18-byte header of any
//! Art-Net frame. Decoding only requires the signature and header length;
//! `parse_artdmx` adds the receiver-side checks (opcode, protocol version 14,
//! declared length fits the data). Byte offsets live in `layout`, safe reads in
//! `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod sequence;
pub mod writer;

pub use parser::{Frame, FrameHeader, decode_frame_header, parse_artdmx};
pub use sequence::SequenceFilter;
pub use writer::encode_dmx_frame;
