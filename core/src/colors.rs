//! Color reference resolution
//!
//! Hosts refer to colors either by palette name (`white`, `darker_gray`, ...)
//! or by hex literal. Hex follows the `#AARRGGBB` ordering for 8 digits.

use shimmer_types::{Color, palette};

use crate::error::ColorError;

/// Resolve a color reference to RGBA
pub fn resolve_color(reference: &str) -> Result<Color, ColorError> {
    let reference = reference.trim();
    if let Some(hex) = reference.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::MalformedHex {
            value: reference.to_string(),
        });
    }
    palette::by_name(reference).ok_or_else(|| ColorError::UnknownName {
        name: reference.to_string(),
    })
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(2)?, byte(4)?, byte(6)?, byte(0)?]),
        _ => None,
    }
}

/// Scale a color's alpha channel by `alpha / 255`
pub fn with_alpha(color: Color, alpha: u8) -> Color {
    let a = (color[3] as u32 * alpha as u32 + 127) / 255;
    [color[0], color[1], color[2], a as u8]
}

/// Format as `#AARRGGBB`
pub fn to_hex(color: Color) -> String {
    format!(
        "#{:02X}{:02X}{:02X}{:02X}",
        color[3], color[0], color[1], color[2]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_and_hex() {
        assert_eq!(resolve_color("white"), Ok(palette::WHITE));
        assert_eq!(resolve_color("darker_gray"), Ok([170, 170, 170, 255]));
        assert_eq!(resolve_color("#FF8000"), Ok([255, 128, 0, 255]));
        assert_eq!(resolve_color("#40ffffff"), Ok([255, 255, 255, 64]));
    }

    #[test]
    fn rejects_bad_references() {
        assert_eq!(
            resolve_color("chartreuse-ish"),
            Err(ColorError::UnknownName {
                name: "chartreuse-ish".to_string()
            })
        );
        assert!(matches!(
            resolve_color("#12345"),
            Err(ColorError::MalformedHex { .. })
        ));
        assert!(matches!(
            resolve_color("#GG0000"),
            Err(ColorError::MalformedHex { .. })
        ));
    }

    #[test]
    fn alpha_scaling() {
        assert_eq!(with_alpha(palette::WHITE, 0x40), [255, 255, 255, 64]);
        assert_eq!(with_alpha(palette::TRANSPARENT, 0x40), [0, 0, 0, 0]);
        assert_eq!(with_alpha([1, 2, 3, 128], 255), [1, 2, 3, 128]);
    }

    #[test]
    fn hex_round_trip_format() {
        assert_eq!(to_hex([255, 128, 0, 64]), "#40FF8000");
    }
}
