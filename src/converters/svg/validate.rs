//! Checks `SvgTextOptions` before any color or layout work happens.
//!
//! Validation stops at the first violated constraint and reports the offending field.

use super::constants::MAX_FONT_SIZE;
use crate::errors::{AvatarError, Result};
use crate::models::colors::{Color, Rgb};
use crate::models::options::{FontSizing, SvgTextOptions};

/// Options that passed validation, with colors already parsed.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedOptions<'a> {
    pub text: &'a str,
    pub bg_color: Option<Color>,
    pub text_color: Option<Rgb>,
    pub seed: Option<&'a str>,
}

pub(crate) fn validate_options(options: &SvgTextOptions) -> Result<ValidatedOptions<'_>> {
    let text = options.text.trim();
    if text.is_empty() {
        return Err(AvatarError::invalid(
            "text",
            "text must contain at least one non-whitespace character",
        ));
    }
    reject_non_xml_chars("text", text)?;

    validate_canvas(options)?;
    validate_font_sizing(&options.font_sizing)?;

    if !(1..=1000).contains(&options.font_weight) {
        return Err(AvatarError::invalid(
            "font_weight",
            format!("expected 1..=1000, got {}", options.font_weight),
        ));
    }
    validate_font_family(&options.font_family)?;

    if options.max_lines == 0 {
        return Err(AvatarError::invalid("max_lines", "must be at least 1"));
    }
    if options.max_chars_per_line == Some(0) {
        return Err(AvatarError::invalid(
            "max_chars_per_line",
            "must be at least 1",
        ));
    }

    let bg_color = options
        .bg_color
        .as_deref()
        .map(|bg| Color::parse(bg, "bg_color"))
        .transpose()?;
    let text_color = options
        .text_color
        .as_deref()
        .map(|fg| Color::parse_hex(fg, "text_color"))
        .transpose()?;

    let seed = options.seed.as_deref();
    if seed == Some("") {
        return Err(AvatarError::invalid("seed", "seed must not be empty"));
    }

    Ok(ValidatedOptions {
        text,
        bg_color,
        text_color,
        seed,
    })
}

fn validate_canvas(options: &SvgTextOptions) -> Result<()> {
    if options.width == 0 {
        return Err(AvatarError::invalid("width", "must be a positive number of px"));
    }
    if options.height == 0 {
        return Err(AvatarError::invalid("height", "must be a positive number of px"));
    }
    let double_padding = u64::from(options.padding) * 2;
    if double_padding >= u64::from(options.width.min(options.height)) {
        return Err(AvatarError::invalid(
            "padding",
            format!(
                "padding {} leaves no room inside a {}x{} canvas",
                options.padding, options.width, options.height
            ),
        ));
    }
    Ok(())
}

fn validate_font_sizing(sizing: &FontSizing) -> Result<()> {
    if sizing.largest() > MAX_FONT_SIZE {
        return Err(AvatarError::invalid(
            "font_sizing",
            format!(
                "font size {} exceeds the limit of {MAX_FONT_SIZE} px",
                sizing.largest()
            ),
        ));
    }
    match *sizing {
        FontSizing::Fixed { size } if size == 0 => {
            Err(AvatarError::invalid("font_sizing", "font size must be positive"))
        }
        FontSizing::Fit { min, .. } if min == 0 => Err(AvatarError::invalid(
            "font_sizing",
            "minimum font size must be positive",
        )),
        FontSizing::Fit { max, min } if min > max => Err(AvatarError::invalid(
            "font_sizing",
            format!("minimum font size {min} exceeds maximum {max}"),
        )),
        _ => Ok(()),
    }
}

/// Accepts a CSS family list where each entry is either quoted or a bare identifier.
/// Bare names containing spaces (`Open Sans`) are rejected; they must be quoted.
fn validate_font_family(family: &str) -> Result<()> {
    if family.trim().is_empty() {
        return Err(AvatarError::invalid("font_family", "must not be empty"));
    }
    reject_non_xml_chars("font_family", family)?;
    for entry in family.split(',').map(str::trim) {
        if !is_quoted_family(entry) && !is_bare_family(entry) {
            return Err(AvatarError::invalid(
                "font_family",
                format!("invalid family {entry:?}; quote names that contain spaces"),
            ));
        }
    }
    Ok(())
}

/// Rejects characters XML 1.0 cannot carry, escaped or not.
fn reject_non_xml_chars(field: &'static str, value: &str) -> Result<()> {
    match value.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(AvatarError::invalid(
            field,
            format!("character U+{:04X} is not allowed in XML", u32::from(c)),
        )),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | ' '..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

fn is_quoted_family(entry: &str) -> bool {
    ['"', '\''].into_iter().any(|quote| {
        entry
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
            .is_some_and(|inner| !inner.trim().is_empty() && !inner.contains(quote))
    })
}

fn is_bare_family(entry: &str) -> bool {
    !entry.is_empty()
        && entry
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
