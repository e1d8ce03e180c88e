use super::error::ConfigError;

/// Cursor over a configuration body.
pub struct ConfigReader<'a> {
    body: &'a [u8],
    pos: usize,
}

impl<'a> ConfigReader<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body, pos: 0 }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ConfigError> {
        if self.body.len() < needed {
            return Err(ConfigError::TooShort {
                needed,
                actual: self.body.len(),
            });
        }
        Ok(())
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.body.len()
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.body.get(self.pos).copied()
    }

    pub fn read_u8(&mut self) -> Result<u8, ConfigError> {
        let value = self.peek_u8().ok_or(ConfigError::TooShort {
            needed: self.pos + 1,
            actual: self.body.len(),
        })?;
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ConfigError> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Reads up to the next NUL byte and consumes the terminator.
    pub fn read_cstr(&mut self, field: &'static str) -> Result<String, ConfigError> {
        let rest = &self.body[self.pos.min(self.body.len())..];
        let end = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(ConfigError::MissingTerminator { field })?;
        let value = std::str::from_utf8(&rest[..end])
            .map_err(|_| ConfigError::InvalidUtf8 { field })?
            .to_string();
        self.pos += end + 1;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigReader;
    use crate::protocols::config::error::ConfigError;

    #[test]
    fn read_cstr_consumes_terminator() {
        let mut reader = ConfigReader::new(b"ab\0cd\0");
        assert_eq!(reader.read_cstr("first").unwrap(), "ab");
        assert_eq!(reader.read_cstr("second").unwrap(), "cd");
        assert!(reader.at_end());
    }

    #[test]
    fn read_cstr_without_terminator() {
        let mut reader = ConfigReader::new(b"abc");
        assert_eq!(
            reader.read_cstr("ssid").unwrap_err(),
            ConfigError::MissingTerminator { field: "ssid" }
        );
    }

    #[test]
    fn read_cstr_rejects_invalid_utf8() {
        let mut reader = ConfigReader::new(&[0xff, 0xfe, 0x00]);
        assert_eq!(
            reader.read_cstr("password").unwrap_err(),
            ConfigError::InvalidUtf8 { field: "password" }
        );
    }

    #[test]
    fn read_u16_le_past_end() {
        let mut reader = ConfigReader::new(&[0x01]);
        assert!(matches!(
            reader.read_u16_le(),
            Err(ConfigError::TooShort { .. })
        ));
    }
}
