use std::fmt;

use serde::Serialize;

use super::error::ArtNetError;
use super::layout;
use super::reader::ArtNetReader;
use crate::protocols::common::hex::hex_string;

/// Fixed 18-byte Art-Net header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameHeader {
    pub opcode: u16,
    pub protocol_version: u16,
    pub sequence: u8,
    pub physical: u8,
    pub universe: u16,
    /// Declared payload length; not checked against the received data.
    pub length: u16,
}

/// A decoded frame: header plus whatever bytes followed it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub header: FrameHeader,
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Payload as space-separated hex bytes.
    pub fn payload_hex(&self) -> String {
        hex_string(self.payload)
    }
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        write!(
            f,
            "o{:x} v{} s{} p{} u{} l{} || {}",
            h.opcode,
            h.protocol_version,
            h.sequence,
            h.physical,
            h.universe,
            h.length,
            self.payload_hex()
        )
    }
}

/// Decode the Art-Net header of `buf`.
///
/// Fails when the buffer is shorter than the header or the signature does not
/// match. The opcode is not interpreted, and the remainder is returned as-is.
pub fn decode_frame_header(buf: &[u8]) -> Result<Frame<'_>, ArtNetError> {
    let reader = ArtNetReader::new(buf);
    reader.require_len(layout::DMX_DATA_OFFSET)?;

    if reader.read_signature()? != layout::ARTNET_ID {
        return Err(ArtNetError::InvalidSignature);
    }

    let header = FrameHeader {
        opcode: reader.read_u16_le(layout::OP_CODE_RANGE.clone())?,
        protocol_version: reader.read_u16_be(layout::PROTOCOL_VERSION_RANGE.clone())?,
        sequence: reader.read_u8(layout::SEQUENCE_OFFSET)?,
        physical: reader.read_u8(layout::PHYSICAL_OFFSET)?,
        universe: reader.read_u16_le(layout::UNIVERSE_RANGE.clone())?,
        length: reader.read_u16_be(layout::LENGTH_RANGE.clone())?,
    };
    let payload = reader.read_rest(layout::DMX_DATA_OFFSET)?;

    Ok(Frame { header, payload })
}

/// Decode an ArtDMX frame the way a receiver applies it.
///
/// Returns `Ok(None)` for frames with another opcode. For ArtDMX frames the
/// protocol version must be 14 and the declared length must fit in the
/// received data; the returned payload is trimmed to the declared length.
pub fn parse_artdmx(buf: &[u8]) -> Result<Option<Frame<'_>>, ArtNetError> {
    let frame = decode_frame_header(buf)?;
    if frame.header.opcode != layout::ARTDMX_OPCODE {
        return Ok(None);
    }
    if frame.header.protocol_version != layout::PROTOCOL_VERSION {
        return Err(ArtNetError::UnsupportedProtocolVersion {
            version: frame.header.protocol_version,
        });
    }

    let length = frame.header.length;
    let data = frame
        .payload
        .get(..length as usize)
        .ok_or(ArtNetError::InvalidLength {
            length,
            available: frame.payload.len(),
        })?;

    Ok(Some(Frame {
        header: frame.header,
        payload: data,
    }))
}

#[cfg(test)]
mod tests {
    use super::{decode_frame_header, parse_artdmx};
    use crate::protocols::artnet::error::ArtNetError;
    use crate::protocols::artnet::layout;

    fn raw_frame(opcode: u16, version: u16, length: u16, data: &[u8]) -> Vec<u8> {
        let mut payload = vec![0u8; layout::DMX_DATA_OFFSET];
        payload[..layout::ARTNET_ID.len()].copy_from_slice(layout::ARTNET_ID);
        payload[layout::OP_CODE_RANGE.clone()].copy_from_slice(&opcode.to_le_bytes());
        payload[layout::PROTOCOL_VERSION_RANGE.clone()].copy_from_slice(&version.to_be_bytes());
        payload[layout::SEQUENCE_OFFSET] = 0x12;
        payload[layout::PHYSICAL_OFFSET] = 0x03;
        payload[layout::UNIVERSE_RANGE.clone()].copy_from_slice(&0x0201u16.to_le_bytes());
        payload[layout::LENGTH_RANGE.clone()].copy_from_slice(&length.to_be_bytes());
        payload.extend_from_slice(data);
        payload
    }

    #[test]
    fn decode_header_fields() {
        let buf = raw_frame(layout::ARTDMX_OPCODE, 14, 4, &[1, 2, 3, 4]);
        let frame = decode_frame_header(&buf).unwrap();
        assert_eq!(frame.header.opcode, 0x5000);
        assert_eq!(frame.header.protocol_version, 14);
        assert_eq!(frame.header.sequence, 0x12);
        assert_eq!(frame.header.physical, 0x03);
        assert_eq!(frame.header.universe, 0x0201);
        assert_eq!(frame.header.length, 4);
        assert_eq!(frame.payload, &[1, 2, 3, 4]);
    }

    #[test]
    fn decode_does_not_check_declared_length() {
        let buf = raw_frame(layout::ARTDMX_OPCODE, 14, 512, &[9]);
        let frame = decode_frame_header(&buf).unwrap();
        assert_eq!(frame.header.length, 512);
        assert_eq!(frame.payload, &[9]);
    }

    #[test]
    fn decode_header_only_frame_has_empty_payload() {
        let buf = raw_frame(0x2000, 14, 0, &[]);
        let frame = decode_frame_header(&buf).unwrap();
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn decode_short_buffer() {
        let buf = vec![0u8; layout::DMX_DATA_OFFSET - 1];
        let err = decode_frame_header(&buf).unwrap_err();
        assert!(err.to_string().contains("payload too short"));
    }

    #[test]
    fn decode_bad_signature() {
        let mut buf = raw_frame(layout::ARTDMX_OPCODE, 14, 0, &[]);
        buf[0] = b'a';
        assert_eq!(
            decode_frame_header(&buf).unwrap_err(),
            ArtNetError::InvalidSignature
        );
    }

    #[test]
    fn display_matches_print_format() {
        let buf = raw_frame(layout::ARTDMX_OPCODE, 14, 2, &[0x0a, 0xff]);
        let frame = decode_frame_header(&buf).unwrap();
        assert_eq!(frame.to_string(), "o5000 v14 s18 p3 u513 l2 || 0a ff");
    }

    #[test]
    fn artdmx_trims_to_declared_length() {
        let buf = raw_frame(layout::ARTDMX_OPCODE, 14, 2, &[1, 2, 3, 4]);
        let frame = parse_artdmx(&buf).unwrap().unwrap();
        assert_eq!(frame.payload, &[1, 2]);
    }

    #[test]
    fn artdmx_ignores_other_opcodes() {
        let buf = raw_frame(0xf825, 14, 0, &[]);
        assert!(parse_artdmx(&buf).unwrap().is_none());
    }

    #[test]
    fn artdmx_rejects_protocol_mismatch() {
        let buf = raw_frame(layout::ARTDMX_OPCODE, 13, 0, &[]);
        assert_eq!(
            parse_artdmx(&buf).unwrap_err(),
            ArtNetError::UnsupportedProtocolVersion { version: 13 }
        );
    }

    #[test]
    fn artdmx_rejects_length_beyond_data() {
        let buf = raw_frame(layout::ARTDMX_OPCODE, 14, 3, &[1, 2]);
        let err = parse_artdmx(&buf).unwrap_err();
        assert!(err.to_string().contains("invalid ArtDMX length"));
    }
}
