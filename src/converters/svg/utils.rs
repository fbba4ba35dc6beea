//! Utility functions for SVG generation: escaping and number formatting.

// --- Text Escaping ---

/// Escapes XML special characters for SVG text content and single- or double-quoted attributes.
pub fn escape_svg_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// --- Number Formatting ---

/// Formats a coordinate as a whole number of px, rounding half to even.
pub fn format_px(value: f64) -> String {
    format!("{}", value.round_ties_even() as i64)
}

/// Rounds half to even, as used for line heights.
pub fn round_px(value: f64) -> u32 {
    value.round_ties_even().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_svg_text() {
        assert_eq!(escape_svg_text("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape_svg_text("<b>"), "&lt;b&gt;");
        assert_eq!(
            escape_svg_text(r#""Open Sans", 'x'"#),
            "&quot;Open Sans&quot;, &#x27;x&#x27;"
        );
        assert_eq!(escape_svg_text("café"), "café");
    }

    #[test]
    fn test_format_px_rounds_half_to_even() {
        assert_eq!(format_px(90.0), "90");
        assert_eq!(format_px(90.5), "90");
        assert_eq!(format_px(91.5), "92");
        assert_eq!(format_px(29.6), "30");
    }

    #[test]
    fn test_round_px() {
        assert_eq!(round_px(34.0 * 1.18), 40);
        assert_eq!(round_px(40.0 * 1.18), 47);
    }
}
