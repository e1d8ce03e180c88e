use super::error::ArtNetError;
use super::layout;

pub struct ArtNetReader<'a> {
    payload: &'a [u8],
}

impl<'a> ArtNetReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ArtNetError> {
        if self.payload.len() < needed {
            return Err(ArtNetError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> Result<u16, ArtNetError> {
        let bytes = self.read_pair(range)?;
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, ArtNetError> {
        let bytes = self.read_pair(range)?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ArtNetError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(ArtNetError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], ArtNetError> {
        self.payload
            .get(range.clone())
            .ok_or(ArtNetError::TooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    /// Everything from `offset` to the end of the buffer.
    pub fn read_rest(&self, offset: usize) -> Result<&'a [u8], ArtNetError> {
        self.payload.get(offset..).ok_or(ArtNetError::TooShort {
            needed: offset,
            actual: self.payload.len(),
        })
    }

    pub fn read_signature(&self) -> Result<&'a [u8], ArtNetError> {
        self.read_slice(0..layout::ARTNET_ID.len())
    }

    fn read_pair(&self, range: std::ops::Range<usize>) -> Result<[u8; 2], ArtNetError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(ArtNetError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok([bytes[0], bytes[1]])
    }
}

#[cfg(test)]
mod tests {
    use super::ArtNetReader;
    use crate::protocols::artnet::error::ArtNetError;

    #[test]
    fn reads_both_endiannesses() {
        let data = [0x34, 0x12];
        let reader = ArtNetReader::new(&data);
        assert_eq!(reader.read_u16_le(0..2).unwrap(), 0x1234);
        assert_eq!(reader.read_u16_be(0..2).unwrap(), 0x3412);
    }

    #[test]
    fn read_past_end_reports_needed_len() {
        let data = [0u8; 3];
        let reader = ArtNetReader::new(&data);
        let err = reader.read_slice(2..5).unwrap_err();
        assert_eq!(
            err,
            ArtNetError::TooShort {
                needed: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn read_rest_at_end_is_empty() {
        let data = [1u8, 2, 3];
        let reader = ArtNetReader::new(&data);
        assert!(reader.read_rest(3).unwrap().is_empty());
        assert!(reader.read_rest(4).is_err());
    }
}
