//! RGB colors and hex parsing.

use crate::error::RibbonError;

/// Linear RGB color with components in [0, 1].
pub type Color = [f32; 3];

/// Neutral gray used when a palette is empty.
pub const FALLBACK_COLOR: Color = [0.5, 0.5, 0.5];

/// Parse a hex color such as `"7F1637"`, `"#047878"` or `"#fb3"`.
///
/// # Errors
///
/// Returns [`RibbonError::InvalidColor`] if the string is not 3 or 6 hex
/// digits (after an optional leading `#`).
pub fn parse_hex_color(value: &str) -> Result<Color, RibbonError> {
    let invalid = || RibbonError::InvalidColor(value.to_owned());
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| -> Result<f32, RibbonError> {
        u8::from_str_radix(s, 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| invalid())
    };

    match hex.len() {
        6 => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        3 => {
            let doubled: String =
                hex.chars().flat_map(|c| [c, c]).collect();
            Ok([
                channel(&doubled[0..2])?,
                channel(&doubled[2..4])?,
                channel(&doubled[4..6])?,
            ])
        }
        _ => Err(invalid()),
    }
}

/// Format a color back into a 6-digit uppercase hex string.
#[must_use]
pub fn to_hex(color: Color) -> String {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "{:02X}{:02X}{:02X}",
        byte(color[0]),
        byte(color[1]),
        byte(color[2])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = parse_hex_color("7F1637").unwrap();
        assert!((c[0] - 127.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 22.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 55.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn parses_short_hex_with_hash() {
        let c = parse_hex_color("#fff").unwrap();
        assert_eq!(c, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_hex_color("zz1637"),
            Err(RibbonError::InvalidColor(_))
        ));
        assert!(parse_hex_color("12345").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn hex_round_trip_through_formatter() {
        for hex in ["7F1637", "047878", "FFB733", "F57336", "C22121"] {
            assert_eq!(to_hex(parse_hex_color(hex).unwrap()), hex);
        }
    }
}
