use super::error::ArtNetError;
use super::layout;
use crate::protocols::common::writer::FrameWriter;

/// Encode an ArtDMX frame for `universe`.
///
/// The payload is zero-padded to a full 512-slot universe, and the declared
/// length is always 512. Payloads longer than 512 bytes are rejected.
///
/// # Examples
/// ```
/// use artnet_tools_core::encode_dmx_frame;
///
/// let frame = encode_dmx_frame(1, &[255, 0, 0])?;
/// assert_eq!(frame.len(), 18 + 512);
/// assert_eq!(&frame[..8], b"Art-Net\0");
/// # Ok::<(), artnet_tools_core::ArtNetError>(())
/// ```
pub fn encode_dmx_frame(universe: u16, payload: &[u8]) -> Result<Vec<u8>, ArtNetError> {
    if payload.len() > layout::DMX_MAX_SLOTS {
        return Err(ArtNetError::PayloadTooLong {
            length: payload.len(),
            max: layout::DMX_MAX_SLOTS,
        });
    }

    let mut writer = FrameWriter::with_opcode(
        layout::ARTDMX_OPCODE,
        layout::DMX_DATA_OFFSET + layout::DMX_MAX_SLOTS,
    );
    writer.write_u16_be(layout::PROTOCOL_VERSION);
    writer.write_u8(0); // sequence: tracking disabled
    writer.write_u8(0); // physical
    writer.write_u16_le(universe);
    writer.write_u16_be(layout::DMX_MAX_SLOTS as u16);
    writer.write_bytes(payload);
    writer.write_zeros(layout::DMX_MAX_SLOTS - payload.len());
    Ok(writer.finish())
}
