use super::error::ConfigError;
use super::payload::{ApSettings, ConfigPayload, Station, StationList, UniverseShift};

/// Station-list body: marker `23 f8`, then `ssid\0password\0` per station,
/// then three NUL bytes.
///
/// # Examples
/// ```
/// use artnet_tools_core::encode_station_list;
///
/// let bytes = encode_station_list(&[("home", "secret99")])?;
/// assert_eq!(bytes, b"\x23\xf8home\0secret99\0\0\0\0".to_vec());
/// # Ok::<(), artnet_tools_core::ConfigError>(())
/// ```
pub fn encode_station_list<S, P>(pairs: &[(S, P)]) -> Result<Vec<u8>, ConfigError>
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    let stations = pairs
        .iter()
        .map(|(ssid, password)| Station {
            ssid: ssid.as_ref().to_string(),
            password: password.as_ref().to_string(),
        })
        .collect();
    let list = StationList::new(stations)?;
    Ok(ConfigPayload::StationList(list).encode())
}

/// Access-point body: marker `24 f8`, always-on flag, `ssid\0`, `password\0`.
///
/// A password of 1 to 7 characters is rejected; an empty one configures an
/// open access point.
pub fn encode_ap_settings(
    ssid: &str,
    password: &str,
    always_on: bool,
) -> Result<Vec<u8>, ConfigError> {
    let ap = ApSettings::new(ssid, password, always_on)?;
    Ok(ConfigPayload::AccessPoint(ap).encode())
}

/// DMX settings body: marker `25 f8`, universe and shift, both little-endian.
pub fn encode_universe_shift(universe: u16, shift: u16) -> Vec<u8> {
    ConfigPayload::UniverseShift(UniverseShift { universe, shift }).encode()
}

#[cfg(test)]
mod tests {
    use super::{encode_ap_settings, encode_station_list, encode_universe_shift};
    use crate::protocols::config::error::ConfigError;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn station_list_layout() {
        let bytes = encode_station_list(&[("ssid1", "password1"), ("ssid2", "")]).unwrap();
        assert_eq!(
            bytes,
            b"\x23\xf8ssid1\0password1\0ssid2\0\0\0\0\0".to_vec()
        );
        assert!(bytes.ends_with(b"\0\0\0"));
        assert!(contains(&bytes, b"ssid1\x00"));
        assert!(contains(&bytes, b"ssid2\x00"));
    }

    #[test]
    fn station_list_empty() {
        let pairs: [(&str, &str); 0] = [];
        assert_eq!(
            encode_station_list(&pairs).unwrap_err(),
            ConfigError::EmptyStationList
        );
    }

    #[test]
    fn ap_settings_layout() {
        let bytes = encode_ap_settings("esp-##", "longpassword", true).unwrap();
        assert_eq!(bytes, b"\x24\xf8\x01esp-##\0longpassword\0".to_vec());
    }

    #[test]
    fn ap_settings_open() {
        let bytes = encode_ap_settings("esp", "", false).unwrap();
        assert_eq!(bytes, b"\x24\xf8\x00esp\0\0".to_vec());
    }

    #[test]
    fn ap_settings_short_password() {
        let err = encode_ap_settings("esp", "short", false).unwrap_err();
        assert_eq!(err, ConfigError::PasswordTooShort { min: 8, actual: 5 });
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn universe_shift_layout() {
        assert_eq!(
            encode_universe_shift(0x0201, 7),
            vec![0x25, 0xf8, 0x01, 0x02, 0x07, 0x00]
        );
    }
}
