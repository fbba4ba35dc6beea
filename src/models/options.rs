use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Default canvas edge in px.
pub const DEFAULT_SIZE: u32 = 180;
pub const DEFAULT_PADDING: u32 = 10;
pub const DEFAULT_FONT_SIZE: u32 = 34;
pub const DEFAULT_MAX_FONT_SIZE: u32 = 40;
pub const DEFAULT_MIN_FONT_SIZE: u32 = 16;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_FONT_WEIGHT: u16 = 700;
pub const DEFAULT_MAX_LINES: usize = 4;

/// How the font size of the avatar text is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FontSizing {
    /// Keep the font size constant. Long lines are condensed with `textLength`.
    Fixed { size: u32 },
    /// Start at `max` and shrink one px at a time until the lines fit vertically
    /// or `min` is reached.
    Fit { max: u32, min: u32 },
}

impl Default for FontSizing {
    fn default() -> Self {
        FontSizing::Fixed {
            size: DEFAULT_FONT_SIZE,
        }
    }
}

impl FontSizing {
    /// Shrink-to-fit between the default bounds (40 down to 16 px).
    pub fn fit() -> Self {
        FontSizing::Fit {
            max: DEFAULT_MAX_FONT_SIZE,
            min: DEFAULT_MIN_FONT_SIZE,
        }
    }

    /// The largest font size this sizing mode may produce.
    pub fn largest(&self) -> u32 {
        match *self {
            FontSizing::Fixed { size } => size,
            FontSizing::Fit { max, .. } => max,
        }
    }
}

/// Everything needed to render one text avatar.
///
/// Built once per call and never mutated by the generator. Unset fields fall back to
/// the defaults above when deserialized from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SvgTextOptions {
    /// The displayed text. Must contain at least one non-whitespace character.
    pub text: String,
    /// Canvas width in px.
    pub width: u32,
    /// Canvas height in px.
    pub height: u32,
    /// Inner padding on every side, in px.
    pub padding: u32,
    pub font_sizing: FontSizing,
    /// CSS font family list, e.g. `"Open Sans", sans-serif`.
    pub font_family: String,
    /// CSS numeric font weight (1..=1000).
    pub font_weight: u16,
    /// Explicit background, `#rrggbb` or `hsl(h, s%, l%)`. Used verbatim when set.
    pub bg_color: Option<String>,
    /// Explicit text color, `#rrggbb` only.
    pub text_color: Option<String>,
    /// Seeds the background hue when `bg_color` is unset. Falls back to `text`.
    pub seed: Option<String>,
    /// Lines beyond this count are dropped.
    pub max_lines: usize,
    /// Wrap width in characters. Estimated from the font size and canvas width when unset.
    pub max_chars_per_line: Option<usize>,
    /// Adds a subtle drop shadow under the text.
    pub use_shadow: bool,
}

impl Default for SvgTextOptions {
    fn default() -> Self {
        SvgTextOptions {
            text: String::new(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            padding: DEFAULT_PADDING,
            font_sizing: FontSizing::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT,
            bg_color: None,
            text_color: None,
            seed: None,
            max_lines: DEFAULT_MAX_LINES,
            max_chars_per_line: None,
            use_shadow: true,
        }
    }
}

impl SvgTextOptions {
    pub fn new(text: impl Into<String>) -> Self {
        SvgTextOptions {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Parses options from JSON. Missing fields take their defaults; values are not
    /// validated until generation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Square canvas of `size` px.
    pub fn with_size(mut self, size: u32) -> Self {
        self.width = size;
        self.height = size;
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_font_sizing(mut self, font_sizing: FontSizing) -> Self {
        self.font_sizing = font_sizing;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_font_weight(mut self, font_weight: u16) -> Self {
        self.font_weight = font_weight;
        self
    }

    pub fn with_bg_color(mut self, bg_color: impl Into<String>) -> Self {
        self.bg_color = Some(bg_color.into());
        self
    }

    pub fn with_text_color(mut self, text_color: impl Into<String>) -> Self {
        self.text_color = Some(text_color.into());
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_max_chars_per_line(mut self, max_chars_per_line: usize) -> Self {
        self.max_chars_per_line = Some(max_chars_per_line);
        self
    }

    pub fn with_shadow(mut self, use_shadow: bool) -> Self {
        self.use_shadow = use_shadow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_applies_defaults() {
        let options = SvgTextOptions::from_json(r#"{"text": "Hello", "seed": "abc"}"#).unwrap();
        assert_eq!(options.text, "Hello");
        assert_eq!(options.seed.as_deref(), Some("abc"));
        assert_eq!(options.width, DEFAULT_SIZE);
        assert_eq!(options.height, DEFAULT_SIZE);
        assert_eq!(options.font_sizing, FontSizing::Fixed { size: 34 });
        assert_eq!(options.font_family, "sans-serif");
        assert!(options.use_shadow);
        assert_eq!(options.max_chars_per_line, None);
    }

    #[test]
    fn test_from_json_font_sizing_modes() {
        let options = SvgTextOptions::from_json(
            r#"{"text": "Hi", "font_sizing": {"mode": "fit", "max": 40, "min": 16}}"#,
        )
        .unwrap();
        assert_eq!(options.font_sizing, FontSizing::Fit { max: 40, min: 16 });
        assert_eq!(options.font_sizing.largest(), 40);
    }

    #[test]
    fn test_from_json_rejects_malformed_documents() {
        assert!(matches!(
            SvgTextOptions::from_json(r#"{"text": 12}"#),
            Err(crate::errors::AvatarError::JsonDeserialization(_))
        ));
        assert!(SvgTextOptions::from_json("not json").is_err());
    }

    #[test]
    fn test_serialized_options_load_back() {
        let options = SvgTextOptions::new("Ada Lovelace")
            .with_dimensions(240, 120)
            .with_font_sizing(FontSizing::fit())
            .with_font_family("'DejaVu Sans', serif")
            .with_bg_color("hsl(210, 60%, 45%)")
            .with_text_color("#ffffff")
            .with_max_lines(2)
            .with_max_chars_per_line(12);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains(r#""font_sizing":{"mode":"fit","max":40,"min":16}"#), "{json}");
        assert_eq!(SvgTextOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_builder_chain() {
        let options = SvgTextOptions::new("Hi")
            .with_size(64)
            .with_padding(4)
            .with_seed("s")
            .with_max_chars_per_line(8)
            .with_shadow(false);
        assert_eq!((options.width, options.height), (64, 64));
        assert_eq!(options.padding, 4);
        assert_eq!(options.max_chars_per_line, Some(8));
        assert!(!options.use_shadow);
    }
}
