//! Renders short texts as self-contained SVG "text avatars".
//!
//! This module provides the main entry point `generate_text_svg` and organizes
//! the pipeline into submodules:
//!
//! *   `validate` rejects malformed options before any work is done.
//! *   `palette` holds the color math (HSL/RGB, WCAG contrast, seeded hues).
//! *   `layout` wraps the text and places the lines.
//! *   `structure` writes the SVG markup.
//!
//! The output is deterministic: the same options always produce the same bytes.

// Declare the submodules
mod constants;
pub mod layout;
pub mod palette;
mod structure;
mod utils;
mod validate;

pub use layout::{plan_layout, split_text_for_svg, LayoutPlan, Line};
pub use palette::{
    best_bg_for_forced_text, contrast_ratio, hsl_from_seed, hsl_to_rgb, pick_text_color_for_bg,
    pick_text_color_for_bg_str, relative_luminance, rgb_to_hsl,
};
pub use utils::escape_svg_text;

use log::debug;

use crate::errors::Result;
use crate::models::colors::Color;
use crate::models::options::SvgTextOptions;
use structure::{render_document, ResolvedColors};
use validate::{validate_options, ValidatedOptions};

/// Generates the SVG document for `options`.
///
/// Colors are resolved as follows:
/// 1. An explicit `bg_color` is used as given. Otherwise the background is derived from
///    `seed`, or from the text itself when no seed is set.
/// 2. An explicit `text_color` is used as given. If the background was derived, it is then
///    re-lit to contrast with that forced text color (hue and saturation are kept).
/// 3. Without an explicit `text_color`, white or near-black is picked for contrast.
///
/// # Errors
/// Returns `AvatarError::InvalidInput` naming the first invalid option. No partial
/// output is produced.
pub fn generate_text_svg(options: &SvgTextOptions) -> Result<String> {
    let validated = validate_options(options)?;
    let colors = resolve_colors(&validated)?;
    debug!(
        "Resolved colors: background {}, text {}",
        colors.background, colors.text
    );

    let plan = plan_layout(validated.text, options);
    render_document(options, colors, &plan)
}

fn resolve_colors(validated: &ValidatedOptions<'_>) -> Result<ResolvedColors> {
    let background = match validated.bg_color {
        Some(explicit) => explicit,
        None => {
            let seed = validated.seed.unwrap_or(validated.text);
            let seeded = hsl_from_seed(seed)?;
            match validated.text_color {
                Some(forced) => Color::Hsl(best_bg_for_forced_text(forced, seeded)),
                None => Color::Hsl(seeded),
            }
        }
    };

    let text = validated
        .text_color
        .unwrap_or_else(|| pick_text_color_for_bg(background.to_rgb()));

    Ok(ResolvedColors { background, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AvatarError;
    use crate::models::options::FontSizing;

    const HEADER: &str = "<?xml version='1.0' encoding='UTF-8'?>\
<svg width='180' height='180' viewBox='0 0 180 180' xmlns='http://www.w3.org/2000/svg'>";
    const SHADOW: &str = "<defs>\
<filter id='tshadow' x='-20%' y='-20%' width='140%' height='140%'>\
<feDropShadow dx='0' dy='1' stdDeviation='1.2' flood-opacity='0.35'/>\
</filter>\
</defs>";

    fn text_node(fill: &str, y: u32, condensed: bool, shadow: bool, content: &str) -> String {
        format!(
            "<text fill='{fill}' font-size='34' font-weight='700' text-anchor='middle' \
             dominant-baseline='middle' font-family='sans-serif' x='90' y='{y}'{}{}>\
             {content}</text>",
            if condensed { " textLength='160' lengthAdjust='spacingAndGlyphs'" } else { "" },
            if shadow { " filter='url(#tshadow)'" } else { "" },
        )
    }

    fn reference(options: SvgTextOptions) -> SvgTextOptions {
        options.with_size(180).with_max_chars_per_line(16)
    }

    fn rect_fill(svg: &str) -> &str {
        let start = svg.find("<rect width='180' height='180' fill='").unwrap() + 37;
        let end = start + svg[start..].find('\'').unwrap();
        &svg[start..end]
    }

    #[test]
    fn test_seeded_single_line() {
        let options = reference(SvgTextOptions::new("Hello World").with_seed("hello-1"));
        let svg = generate_text_svg(&options).unwrap();
        let expected = format!(
            "{HEADER}{SHADOW}<rect width='180' height='180' fill='hsl(181, 46%, 45%)'/>{}</svg>",
            text_node("#111111", 90, true, true, "Hello World")
        );
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_explicit_hsl_background() {
        let svg = generate_text_svg(&reference(
            SvgTextOptions::new("Hello World").with_bg_color("hsl(210, 60%, 45%)"),
        ))
        .unwrap();
        let expected = format!(
            "{HEADER}{SHADOW}<rect width='180' height='180' fill='hsl(210, 60%, 45%)'/>{}</svg>",
            text_node("#ffffff", 90, true, true, "Hello World")
        );
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_explicit_background_and_text_colors() {
        let svg = generate_text_svg(&reference(
            SvgTextOptions::new("Hello World")
                .with_bg_color("#112233")
                .with_text_color("#ffff00"),
        ))
        .unwrap();
        let expected = format!(
            "{HEADER}{SHADOW}<rect width='180' height='180' fill='#112233'/>{}</svg>",
            text_node("#ffff00", 90, true, true, "Hello World")
        );
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_multiline() {
        let options = SvgTextOptions::new("Banc Solaire Ultra 12")
            .with_seed("banc-12")
            .with_max_lines(4)
            .with_max_chars_per_line(10);
        let svg = generate_text_svg(&options).unwrap();
        let expected = format!(
            "{HEADER}{SHADOW}<rect width='180' height='180' fill='hsl(316, 60%, 45%)'/>\
             {}{}{}</svg>",
            text_node("#ffffff", 50, false, true, "Banc"),
            text_node("#ffffff", 90, true, true, "Solaire"),
            text_node("#ffffff", 130, true, true, "Ultra 12"),
        );
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_fit_font_sizing() {
        let options = SvgTextOptions::new("This is a longer text that may need resizing")
            .with_seed("long-1")
            .with_font_sizing(FontSizing::Fit { max: 40, min: 16 })
            .with_max_lines(4)
            .with_max_chars_per_line(14);
        let svg = generate_text_svg(&options).unwrap();
        let expected = format!(
            "{HEADER}{SHADOW}<rect width='180' height='180' fill='hsl(102, 54%, 45%)'/>\
             {}{}{}{}</svg>",
            text_node("#111111", 30, true, true, "This is a"),
            text_node("#111111", 70, true, true, "longer text"),
            text_node("#111111", 110, true, true, "that may need"),
            text_node("#111111", 150, true, true, "resizing"),
        );
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_without_shadow() {
        let svg = generate_text_svg(&reference(
            SvgTextOptions::new("No shadow")
                .with_seed("shadow-off")
                .with_shadow(false),
        ))
        .unwrap();
        let expected = format!(
            "{HEADER}<rect width='180' height='180' fill='hsl(157, 68%, 45%)'/>{}</svg>",
            text_node("#111111", 90, true, false, "No shadow")
        );
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_rejects_invalid_options() {
        let cases = [
            (SvgTextOptions::new("").with_seed("x"), "text"),
            (SvgTextOptions::new("   \n\t").with_seed("x"), "text"),
            (SvgTextOptions::new("Hello").with_bg_color("notacolor"), "bg_color"),
            (SvgTextOptions::new("Hello").with_bg_color("rgb(1,2,3)"), "bg_color"),
            (SvgTextOptions::new("Hello").with_bg_color("#123"), "bg_color"),
            (SvgTextOptions::new("Hello").with_bg_color("hsl(10, 120%, 40%)"), "bg_color"),
            (
                SvgTextOptions::new("Hello")
                    .with_bg_color("#112233")
                    .with_text_color("yellow"),
                "text_color",
            ),
            (SvgTextOptions::new("Hello").with_seed("x").with_padding(90), "padding"),
            (SvgTextOptions::new("Hello").with_seed("x").with_size(0), "width"),
            (SvgTextOptions::new("Hello").with_seed("x").with_font_weight(0), "font_weight"),
            (SvgTextOptions::new("Hello").with_seed("x").with_font_family(""), "font_family"),
            (
                SvgTextOptions::new("Hello").with_seed("x").with_font_family("Open Sans"),
                "font_family",
            ),
            (SvgTextOptions::new("A\u{1}B\u{0}").with_seed("x"), "text"),
            (
                SvgTextOptions::new("Hello").with_seed("x").with_font_family("\"A\u{7}B\""),
                "font_family",
            ),
            (
                SvgTextOptions::new("Hello").with_seed("x").with_font_sizing(FontSizing::Fit {
                    max: 2_000_000_000,
                    min: 1,
                }),
                "font_sizing",
            ),
            (SvgTextOptions::new("Hello").with_bg_color("hsl(360, 50%, 50%)"), "bg_color"),
        ];
        for (options, field) in cases {
            match generate_text_svg(&options) {
                Err(AvatarError::InvalidInput { field: actual, .. }) => {
                    assert_eq!(actual, field, "{options:?}")
                }
                other => panic!("expected InvalidInput for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_escapes_font_family_and_text() {
        let svg = generate_text_svg(
            &SvgTextOptions::new("R&D <team>")
                .with_seed("x")
                .with_font_family("\"Open Sans\", sans-serif"),
        )
        .unwrap();
        assert!(svg.contains("font-family='&quot;Open Sans&quot;, sans-serif'"));
        assert!(svg.contains(">R&amp;D</text>"));
        assert!(svg.contains(">&lt;team&gt;</text>"));

        let options = SvgTextOptions::new("Hello")
            .with_seed("x")
            .with_font_family("serif");
        let svg = generate_text_svg(&options).unwrap();
        assert!(svg.contains("font-family='serif'"));
    }

    #[test]
    fn test_long_word_is_hard_split_into_several_lines() {
        let svg = generate_text_svg(
            &SvgTextOptions::new("SUPERCALIFRAGILISTICEXPIALIDOCIOUS")
                .with_seed("longword")
                .with_max_lines(4)
                .with_max_chars_per_line(8),
        )
        .unwrap();
        assert_eq!(svg.matches("<text ").count(), 4);
        assert!(svg.contains(">SUPERCAL</text>"));
    }

    #[test]
    fn test_short_line_is_not_condensed() {
        let svg =
            generate_text_svg(&reference(SvgTextOptions::new("Hi").with_seed("short"))).unwrap();
        assert!(svg.contains(">Hi</text>"));
        assert!(!svg.contains("textLength="));
    }

    #[test]
    fn test_output_is_deterministic() {
        let options = SvgTextOptions::new("Same").with_seed("same-seed");
        assert_eq!(
            generate_text_svg(&options).unwrap(),
            generate_text_svg(&options).unwrap()
        );
    }

    #[test]
    fn test_text_seeds_background_when_seed_missing() {
        let by_text = generate_text_svg(&SvgTextOptions::new("Hello")).unwrap();
        let by_seed =
            generate_text_svg(&SvgTextOptions::new("Hello").with_seed("Hello")).unwrap();
        assert_eq!(by_text, by_seed);
        assert_eq!(rect_fill(&by_text), "hsl(76, 42%, 45%)");
    }

    #[test]
    fn test_forced_text_color_adapts_seeded_background() {
        let plain =
            generate_text_svg(&SvgTextOptions::new("Hello World").with_seed("forced-text-2"))
                .unwrap();
        let forced = generate_text_svg(
            &SvgTextOptions::new("Hello World")
                .with_seed("forced-text-2")
                .with_text_color("#ffffff"),
        )
        .unwrap();
        assert!(forced.contains("fill='#ffffff'"));
        assert_eq!(rect_fill(&plain), "hsl(55, 58%, 45%)");
        assert_eq!(rect_fill(&forced), "hsl(55, 58%, 10%)");

        let dark = generate_text_svg(
            &SvgTextOptions::new("Hello World")
                .with_seed("forced-text-3")
                .with_text_color("#111111"),
        )
        .unwrap();
        assert!(dark.contains("fill='#111111'"));
        assert_eq!(rect_fill(&dark), "hsl(296, 67%, 90%)");
    }

    #[test]
    fn test_forced_text_color_keeps_explicit_background() {
        let svg = generate_text_svg(
            &SvgTextOptions::new("Hello World")
                .with_bg_color("hsl(210, 60%, 45%)")
                .with_text_color("#ffffff"),
        )
        .unwrap();
        assert_eq!(rect_fill(&svg), "hsl(210, 60%, 45%)");
        assert!(svg.contains("fill='#ffffff'"));
    }

    #[test]
    fn test_rectangular_canvas() {
        let svg = generate_text_svg(
            &SvgTextOptions::new("Wide")
                .with_seed("wide")
                .with_dimensions(320, 120),
        )
        .unwrap();
        assert!(svg.contains("<svg width='320' height='120' viewBox='0 0 320 120'"));
        assert!(svg.contains("<rect width='320' height='120' fill='"));
        assert!(svg.contains("x='160' y='60'"));
    }
}
