//! Colour helpers for building DMX pixel data.

use thiserror::Error;

/// Raw `[red, green, blue]` channel bytes.
pub type Rgb = [u8; 3];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex colour '{input}'")]
    Format { input: String },
}

/// Parse `#RRGGBB` / `RRGGBB` into channel bytes.
///
/// Any number of hex digits is accepted as long as the value fits in 32 bits;
/// only the low 24 bits are kept, so `"1ff0000"` is red.
///
/// # Examples
/// ```
/// use artnet_tools_core::color_from_hex;
///
/// assert_eq!(color_from_hex("#880000")?, [0x88, 0x00, 0x00]);
/// # Ok::<(), artnet_tools_core::ColorError>(())
/// ```
pub fn color_from_hex(s: &str) -> Result<Rgb, ColorError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    let invalid = || ColorError::Format {
        input: s.to_string(),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    let [_, r, g, b] = value.to_be_bytes();
    Ok([r, g, b])
}

/// HSV to RGB with hue in degrees and saturation/value in percent.
///
/// Channels are scaled to 0..=255 and rounded half to even.
pub fn hsv_to_rgb_bytes(h: f64, s: f64, v: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let v = (v / 100.0).clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    [to_channel(r), to_channel(g), to_channel(b)]
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{ColorError, color_from_hex, hsv_to_rgb_bytes};

    #[test]
    fn hex_with_and_without_hash() {
        assert_eq!(color_from_hex("#880000").unwrap(), [0x88, 0x00, 0x00]);
        assert_eq!(color_from_hex("00ff7f").unwrap(), [0x00, 0xff, 0x7f]);
    }

    #[test]
    fn hex_short_values_are_left_padded() {
        assert_eq!(color_from_hex("ff").unwrap(), [0x00, 0x00, 0xff]);
    }

    #[test]
    fn hex_high_byte_is_dropped() {
        assert_eq!(color_from_hex("#12345678").unwrap(), [0x34, 0x56, 0x78]);
    }

    #[test]
    fn hex_rejects_garbage() {
        for input in ["", "#", "#zz0000", "+ff", "12 34", "1ffffffff"] {
            assert_eq!(
                color_from_hex(input).unwrap_err(),
                ColorError::Format {
                    input: input.to_string()
                },
                "input {input:?}"
            );
        }
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb_bytes(0.0, 100.0, 100.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb_bytes(120.0, 100.0, 100.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb_bytes(240.0, 100.0, 100.0), [0, 0, 255]);
    }

    #[test]
    fn hsv_half_value_rounds_to_even() {
        // 0.5 * 255 = 127.5
        assert_eq!(hsv_to_rgb_bytes(0.0, 100.0, 50.0), [128, 0, 0]);
    }

    #[test]
    fn hsv_zero_saturation_is_grey() {
        assert_eq!(hsv_to_rgb_bytes(200.0, 0.0, 100.0), [255, 255, 255]);
        assert_eq!(hsv_to_rgb_bytes(200.0, 0.0, 0.0), [0, 0, 0]);
    }

    #[test]
    fn hsv_hue_wraps() {
        assert_eq!(
            hsv_to_rgb_bytes(360.0, 100.0, 100.0),
            hsv_to_rgb_bytes(0.0, 100.0, 100.0)
        );
        assert_eq!(
            hsv_to_rgb_bytes(-120.0, 100.0, 100.0),
            hsv_to_rgb_bytes(240.0, 100.0, 100.0)
        );
    }

    #[test]
    fn hsv_exact_sectors() {
        assert_eq!(hsv_to_rgb_bytes(180.0, 100.0, 100.0), [0, 255, 255]);
        // hue 90: f = 0.5, q = 0.5
        assert_eq!(hsv_to_rgb_bytes(90.0, 100.0, 100.0), [128, 255, 0]);
    }
}
