use std::str::FromStr;

use palette::{FromColor, LinSrgba, Srgb, Srgba};
use thiserror::Error;

use crate::scene::ColorLinPremul;

/// A style color string that is neither a hex literal nor a known color name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color `{0}` (expected #rgb, #rrggbb, #rrggbbaa or a CSS color name)")]
pub struct ColorParseError(pub String);

// sRGB → Linear premultiplied conversions, kept out of scene.rs for separation of concerns.
impl ColorLinPremul {
    /// Convenience alias matching Color::rgba(...) widely used in UI code.
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from sRGB u8 RGBA array (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        let s = Srgba::new(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Parse a CSS-like color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a named color (`white`).
    pub fn from_css(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(ColorParseError(value.to_string()));
            }
            if hex.len() == 8 {
                let alpha = u8::from_str_radix(&hex[6..], 16)
                    .map_err(|_| ColorParseError(value.to_string()))?;
                let rgb = Srgb::<u8>::from_str(&hex[..6])
                    .map_err(|_| ColorParseError(value.to_string()))?;
                return Ok(Self::from_srgba_u8([rgb.red, rgb.green, rgb.blue, alpha]));
            }
            let rgb = Srgb::<u8>::from_str(trimmed).map_err(|_| ColorParseError(value.to_string()))?;
            return Ok(Self::from_srgba_u8([rgb.red, rgb.green, rgb.blue, 255]));
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower == "transparent" {
            return Ok(Self::default());
        }
        palette::named::from_str(&lower)
            .map(|rgb| Self::from_srgba_u8([rgb.red, rgb.green, rgb.blue, 255]))
            .ok_or_else(|| ColorParseError(value.to_string()))
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        // Unpremultiply
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        // Convert linear to sRGB
        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(
            ColorLinPremul::from_css("#ccc").unwrap().to_srgba_u8(),
            [0xcc, 0xcc, 0xcc, 255]
        );
        assert_eq!(
            ColorLinPremul::from_css("#1e88e5").unwrap().to_srgba_u8(),
            [0x1e, 0x88, 0xe5, 255]
        );
        assert_eq!(
            ColorLinPremul::from_css("#00000080").unwrap().to_srgba_u8()[3],
            0x80
        );
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(
            ColorLinPremul::from_css("White").unwrap().to_srgba_u8(),
            [255, 255, 255, 255]
        );
        assert_eq!(ColorLinPremul::from_css("transparent").unwrap().a, 0.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(ColorLinPremul::from_css("#ggg").is_err());
        assert!(ColorLinPremul::from_css("not-a-color").is_err());
        assert!(ColorLinPremul::from_css("").is_err());
    }

    #[test]
    fn rejects_non_ascii_hex_without_panicking() {
        // Multi-byte chars at 3, 6 and 8 byte lengths.
        for input in ["#éa", "#ééé", "#ééééa0"] {
            assert_eq!(
                ColorLinPremul::from_css(input),
                Err(ColorParseError(input.to_string()))
            );
        }
    }
}
