//! Line breaking and vertical placement of avatar text.

use log::{debug, warn};
use std::fmt;

use super::constants::*;
use super::utils::round_px;
use crate::models::options::{FontSizing, SvgTextOptions};

/// One wrapped row of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(String);

impl Line {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values, the unit used for wrapping.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Greedy word wrap.
///
/// Whitespace runs collapse to single spaces. Words are packed while the line stays within
/// `max_chars_per_line` characters; a word longer than the limit on its own is cut into
/// limit-sized chunks. Blank input yields a single empty line. A limit of 0 is treated as 1.
pub fn split_text_for_svg(text: &str, max_chars_per_line: usize) -> Vec<Line> {
    let max = max_chars_per_line.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max {
            if !current.is_empty() {
                lines.push(Line(std::mem::take(&mut current)));
                current_len = 0;
            }
            lines.extend(hard_split(word, max));
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(Line(std::mem::replace(&mut current, word.to_string())));
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(Line(current));
    }
    if lines.is_empty() {
        lines.push(Line(String::new()));
    }
    lines
}

fn hard_split(word: &str, max: usize) -> Vec<Line> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max)
        .map(|chunk| Line(chunk.iter().collect()))
        .collect()
}

/// Estimates how many characters fit on a line of `content_width` px at `font_size`.
pub fn estimate_max_chars(content_width: u32, font_size: u32) -> usize {
    let glyph_width = f64::from(font_size.max(1)) * AVG_GLYPH_WIDTH_EM;
    ((f64::from(content_width) / glyph_width).floor() as usize).max(1)
}

pub fn line_height_for(font_size: u32) -> u32 {
    round_px(f64::from(font_size) * LINE_HEIGHT_FACTOR)
}

/// Final placement of the text block.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub lines: Vec<Line>,
    pub font_size: u32,
    pub line_height: u32,
    /// Wrap width actually used, explicit or estimated.
    pub max_chars_per_line: usize,
    /// Vertical centre of each line, in px from the top of the canvas.
    pub baselines: Vec<f64>,
}

/// Wraps `text` and positions the lines as a vertically centred block.
///
/// Lines past `max_lines` are dropped, then the font size is chosen, then trailing lines
/// that still overflow the content box are dropped (at least one line always remains).
pub fn plan_layout(text: &str, options: &SvgTextOptions) -> LayoutPlan {
    let content_width = options.width.saturating_sub(options.padding.saturating_mul(2));
    let content_height = options.height.saturating_sub(options.padding.saturating_mul(2));

    let max_chars_per_line = options
        .max_chars_per_line
        .unwrap_or_else(|| estimate_max_chars(content_width, options.font_sizing.largest()));

    let mut lines = split_text_for_svg(text, max_chars_per_line);
    if lines.len() > options.max_lines {
        warn!(
            "Text wraps to {} lines, keeping the first {}",
            lines.len(),
            options.max_lines
        );
        lines.truncate(options.max_lines);
    }

    let font_size = pick_font_size(options.font_sizing, lines.len(), content_height);
    let line_height = line_height_for(font_size);

    let fitting = lines_fitting(line_height, content_height);
    if lines.len() > fitting {
        warn!(
            "Only {} of {} lines fit in {} px at line height {}",
            fitting,
            lines.len(),
            content_height,
            line_height
        );
        lines.truncate(fitting);
    }

    let total_height = f64::from(line_height) * lines.len() as f64;
    let start = f64::from(options.height) / 2.0 - total_height / 2.0 + f64::from(line_height) / 2.0;
    let baselines = (0..lines.len())
        .map(|i| start + i as f64 * f64::from(line_height))
        .collect();

    debug!(
        "Layout: {} line(s), font size {}, line height {}, {} chars per line",
        lines.len(),
        font_size,
        line_height,
        max_chars_per_line
    );

    LayoutPlan {
        lines,
        font_size,
        line_height,
        max_chars_per_line,
        baselines,
    }
}

fn pick_font_size(sizing: FontSizing, line_count: usize, content_height: u32) -> u32 {
    match sizing {
        FontSizing::Fixed { size } => size,
        FontSizing::Fit { max, min } => {
            let mut size = max;
            while size > min {
                let block_height =
                    (line_count as u64).saturating_mul(u64::from(line_height_for(size)));
                if block_height <= u64::from(content_height) {
                    break;
                }
                size -= 1;
            }
            size
        }
    }
}

/// Number of lines that fit vertically, never less than one.
fn lines_fitting(line_height: u32, content_height: u32) -> usize {
    if line_height == 0 {
        return usize::MAX;
    }
    ((content_height / line_height) as usize).max(1)
}
