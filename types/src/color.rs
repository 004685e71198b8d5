//! Color helpers: hex parsing, the scenario palette, banded gradients and
//! the comparison pattern fill.
//!
//! Everything here is deterministic. Identical inputs always produce the
//! identical output sequence, so repeated renders agree byte-for-byte.

use crate::model::{PatternFill, SeriesFill};

/// Default hues assigned to scenarios in creation order.
pub const SCENARIO_COLORS: [&str; 4] = ["#3e6df5", "#12b886", "#f59f00", "#9c36b5"];

/// Dot color of the comparison cross-hatch pattern.
pub const COMPARE_PATTERN_COLOR: &str = "#ffffff";

const PATTERN_TILE: u32 = 6;

/// How far the last band of a gradient is mixed toward white.
const BAND_SPREAD: f64 = 0.7;

/// Parse a hex color string (e.g. "#ff0000") to RGB bytes.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Format RGB bytes as a lowercase hex string.
pub fn color_to_hex(color: &[u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Produce `count` colors forming an ordered band anchored at `base`:
/// element 0 is `base` verbatim, later elements mix linearly toward white
/// in equal steps. Used to give each item within one scenario's series a
/// distinguishable-but-related shade.
///
/// A base color that fails to parse repeats unchanged, so the output length
/// is always exactly `count`.
pub fn banded_gradient(base: &str, count: usize) -> Vec<String> {
    let Some(rgb) = parse_hex_color(base) else {
        return vec![base.to_string(); count];
    };
    (0..count)
        .map(|step| {
            if step == 0 {
                return base.to_string();
            }
            let t = BAND_SPREAD * step as f64 / count as f64;
            let mixed = [
                mix_toward_white(rgb[0], t),
                mix_toward_white(rgb[1], t),
                mix_toward_white(rgb[2], t),
            ];
            color_to_hex(&mixed)
        })
        .collect()
}

fn mix_toward_white(channel: u8, t: f64) -> u8 {
    let c = channel as f64;
    (c + (255.0 - c) * t).round() as u8
}

/// Cross-hatch pattern fill (diagonal dot pattern) parameterized by the
/// given solid color as background. Substituted for the solid fill to mark
/// a comparison scenario's rendering without introducing a second hue.
pub fn comparison_pattern_fill(background: &str) -> SeriesFill {
    SeriesFill::Pattern(PatternFill {
        background: background.to_string(),
        dot_color: COMPARE_PATTERN_COLOR.to_string(),
        width: PATTERN_TILE,
        height: PATTERN_TILE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#ff0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("12b886"), Some([0x12, 0xb8, 0x86]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(color_to_hex(&[0x3e, 0x6d, 0xf5]), "#3e6df5");
    }

    #[test]
    fn single_band_is_the_base_color() {
        assert_eq!(banded_gradient("#3e6df5", 1), vec!["#3e6df5".to_string()]);
    }

    #[test]
    fn gradient_has_exact_length_and_is_deterministic() {
        let first = banded_gradient("#12b886", 5);
        let second = banded_gradient("#12b886", 5);
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        // Later bands are strictly lighter than the base.
        let base = parse_hex_color(&first[0]).unwrap();
        let last = parse_hex_color(&first[4]).unwrap();
        assert!(last[0] > base[0]);
    }

    #[test]
    fn unparseable_base_still_yields_count_entries() {
        let bands = banded_gradient("teal", 3);
        assert_eq!(bands, vec!["teal"; 3]);
    }

    #[test]
    fn pattern_fill_keeps_background() {
        let fill = comparison_pattern_fill("#f59f00");
        assert_eq!(fill.background(), "#f59f00");
        assert!(fill.is_pattern());
    }
}
