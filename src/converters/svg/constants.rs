//! Defines constants used throughout SVG avatar generation.

// Seeded backgrounds: saturation spans 40..=70 %, lightness is fixed.
pub const SEED_SATURATION_MIN: f64 = 40.0;
pub const SEED_SATURATION_MAX: f64 = 70.0;
pub const SEED_LIGHTNESS: f64 = 45.0;

// Lightness values tried when the background has to adapt to a forced text color.
pub const FORCED_TEXT_BG_LIGHTNESS_MIN: u32 = 10;
pub const FORCED_TEXT_BG_LIGHTNESS_MAX: u32 = 90;
pub const FORCED_TEXT_BG_LIGHTNESS_STEP: usize = 5;

// WCAG AA threshold for normal text.
pub const MIN_READABLE_CONTRAST: f64 = 4.5;

// Layout
/// Upper bound for any font size, fixed or fit.
pub const MAX_FONT_SIZE: u32 = 4096;
pub const LINE_HEIGHT_FACTOR: f64 = 1.18;
/// Average glyph advance as a fraction of the font size, used to estimate characters per line.
pub const AVG_GLYPH_WIDTH_EM: f64 = 0.5;
/// Lines shorter than this are never stretched with `textLength`.
pub const MIN_CONDENSED_LINE_CHARS: usize = 6;

pub const XML_HEADER: &str = "<?xml version='1.0' encoding='UTF-8'?>";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const SHADOW_FILTER_ID: &str = "tshadow";
pub const SHADOW_DEFS: &str = "<defs>\
<filter id='tshadow' x='-20%' y='-20%' width='140%' height='140%'>\
<feDropShadow dx='0' dy='1' stdDeviation='1.2' flood-opacity='0.35'/>\
</filter>\
</defs>";
