//! Serializes resolved colors and a layout plan into the SVG document.

use super::{
    constants::*,
    layout::LayoutPlan,
    utils::{escape_svg_text, format_px},
};
use crate::errors::Result;
use crate::models::colors::{Color, Rgb};
use crate::models::options::SvgTextOptions;
use std::fmt::Write;

/// Colors chosen for one avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedColors {
    pub background: Color,
    pub text: Rgb,
}

/// Writes the complete document: XML header, `<svg>` root, optional shadow filter,
/// background `<rect>` and one `<text>` per line.
pub(crate) fn render_document(
    options: &SvgTextOptions,
    colors: ResolvedColors,
    plan: &LayoutPlan,
) -> Result<String> {
    let (width, height) = (options.width, options.height);
    let mut svg = String::with_capacity(512 + plan.lines.len() * 256);

    svg.push_str(XML_HEADER);
    write!(
        svg,
        "<svg width='{width}' height='{height}' viewBox='0 0 {width} {height}' \
         xmlns='{SVG_NAMESPACE}'>"
    )?;
    if options.use_shadow {
        svg.push_str(SHADOW_DEFS);
    }
    write!(
        svg,
        "<rect width='{width}' height='{height}' fill='{}'/>",
        colors.background
    )?;

    for (line, baseline) in plan.lines.iter().zip(&plan.baselines) {
        write_text_line(&mut svg, options, colors.text, plan, line.as_str(), *baseline)?;
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn write_text_line(
    svg: &mut String,
    options: &SvgTextOptions,
    fill: Rgb,
    plan: &LayoutPlan,
    line: &str,
    baseline: f64,
) -> Result<()> {
    write!(
        svg,
        "<text fill='{fill}' font-size='{}' font-weight='{}' text-anchor='middle' \
         dominant-baseline='middle' font-family='{}' x='{}' y='{}'",
        plan.font_size,
        options.font_weight,
        escape_svg_text(&options.font_family),
        format_px(f64::from(options.width) / 2.0),
        format_px(baseline),
    )?;

    // Long lines are squeezed into the content box; short ones would look stretched.
    let condense_from = MIN_CONDENSED_LINE_CHARS.max(plan.max_chars_per_line / 2);
    if line.chars().count() >= condense_from {
        let content_width = options
            .width
            .saturating_sub(options.padding.saturating_mul(2));
        write!(
            svg,
            " textLength='{content_width}' lengthAdjust='spacingAndGlyphs'"
        )?;
    }
    if options.use_shadow {
        write!(svg, " filter='url(#{SHADOW_FILTER_ID})'")?;
    }

    write!(svg, ">{}</text>", escape_svg_text(line))?;
    Ok(())
}
