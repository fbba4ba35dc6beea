//! Color math for avatars: HSL/RGB conversion, WCAG luminance and contrast,
//! seed-derived backgrounds and contrast-driven color picking.

use log::{debug, warn};
use sha2::{Digest, Sha512};

use super::constants::*;
use crate::errors::{AvatarError, Result};
use crate::models::colors::{Color, Hsl, Rgb};

/// Converts HSL (h in degrees, s/l in percent) to 8-bit sRGB.
///
/// Hue wraps at 360; saturation and lightness are clamped to 0..=100.
/// Channels are rounded half to even.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

/// Converts 8-bit sRGB to HSL. Hue is in [0, 360), saturation and lightness in percent.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h * 60.0, s * 100.0, l * 100.0)
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.x relative luminance, 0.0 (black) to 1.0 (white).
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * srgb_to_linear(rgb.r)
        + 0.7152 * srgb_to_linear(rgb.g)
        + 0.0722 * srgb_to_linear(rgb.b)
}

/// WCAG contrast ratio, in [1.0, 21.0]. Argument order does not matter.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Derives a stable background color from `seed`.
///
/// The first two bytes of the SHA-512 digest pick the hue and the saturation
/// (40..=70 %); lightness is always 45 %. Hue and saturation are whole numbers.
pub fn hsl_from_seed(seed: &str) -> Result<Hsl> {
    if seed.is_empty() {
        return Err(AvatarError::invalid("seed", "seed must not be empty"));
    }
    let digest = Sha512::digest(seed.as_bytes());

    let hue = (f64::from(digest[0]) * 360.0 / 255.0)
        .round_ties_even()
        .rem_euclid(360.0);
    let saturation = (f64::from(digest[1])
        * ((SEED_SATURATION_MAX - SEED_SATURATION_MIN) / 255.0)
        + SEED_SATURATION_MIN)
        .round_ties_even();

    Ok(Hsl::new(hue, saturation, SEED_LIGHTNESS))
}

/// Picks white or near-black text, whichever contrasts more with `bg`. Ties go to white.
pub fn pick_text_color_for_bg(bg: Rgb) -> Rgb {
    let on_white = contrast_ratio(bg, Rgb::WHITE);
    let on_dark = contrast_ratio(bg, Rgb::DARK);
    let (picked, ratio) = if on_white >= on_dark {
        (Rgb::WHITE, on_white)
    } else {
        (Rgb::DARK, on_dark)
    };
    if ratio < MIN_READABLE_CONTRAST {
        debug!(
            "Best text color {} on {} only reaches contrast {:.2}",
            picked, bg, ratio
        );
    }
    picked
}

/// Same as [`pick_text_color_for_bg`], for a background given as `#rrggbb` or `hsl(...)`.
pub fn pick_text_color_for_bg_str(bg: &str) -> Result<Rgb> {
    let bg = Color::parse(bg, "bg_color")?;
    Ok(pick_text_color_for_bg(bg.to_rgb()))
}

/// Finds a background for a caller-forced text color.
///
/// Hue and saturation of `base` are kept; lightness is searched over 10..=90 % in steps
/// of 5, skipping the base lightness. The candidate with the highest contrast wins;
/// ties go to the lightness closest to the base.
pub fn best_bg_for_forced_text(text: Rgb, base: Hsl) -> Hsl {
    let mut best = base;
    let mut best_ratio = f64::NEG_INFINITY;

    for lightness in (FORCED_TEXT_BG_LIGHTNESS_MIN..=FORCED_TEXT_BG_LIGHTNESS_MAX)
        .step_by(FORCED_TEXT_BG_LIGHTNESS_STEP)
        .map(f64::from)
    {
        if lightness == base.l {
            continue;
        }
        let candidate = base.with_lightness(lightness);
        let ratio = contrast_ratio(hsl_to_rgb(candidate), text);
        let closer = (lightness - base.l).abs() < (best.l - base.l).abs();
        if ratio > best_ratio || (ratio == best_ratio && closer) {
            best = candidate;
            best_ratio = ratio;
        }
    }

    if best_ratio < MIN_READABLE_CONTRAST {
        warn!(
            "Forced text color {} reaches only contrast {:.2} on the adapted background {}",
            text, best_ratio, best
        );
    }
    best
}
