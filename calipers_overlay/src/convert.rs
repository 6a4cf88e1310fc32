// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display conversion helpers: pixel values and color text.

use alloc::string::{String, ToString};

/// Dimensions of the visible area, in CSS pixels.
///
/// Consumed by the default pixel conversion, panel placement, and ruler
/// extents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Formats a raw pixel value for display.
///
/// The value is scaled by the ratio of the viewport width to `base_width`
/// (so a design-width base renders design units), rounded to one decimal
/// with a trailing `.0` stripped, and suffixed with `px`.
///
/// ```
/// use calipers_overlay::format_px;
///
/// assert_eq!(format_px(80.0, 375.0, 375.0), "80px");
/// assert_eq!(format_px(80.0, 375.0, 750.0), "160px");
/// assert_eq!(format_px(10.25, 375.0, 375.0), "10.2px");
/// ```
pub fn format_px(px: f64, viewport_width: f64, base_width: f64) -> String {
    let scaled = px / (viewport_width / base_width);
    let mut text = alloc::format!("{scaled:.1}");
    if let Some(stripped) = text.strip_suffix(".0") {
        text = stripped.to_string();
    }
    text.push_str("px");
    text
}

/// Parses a `"12px"`-style computed value into a raw pixel number.
///
/// Returns `None` for non-pixel tokens (percentages, keywords), which
/// callers pass through unconverted.
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").parse().ok()
}

/// Converts an `rgb(…)` / `rgba(…)` computed color into the display form
/// `#rrggbb A%`.
///
/// A missing alpha component renders as `0%`; an explicit alpha renders as
/// `alpha × 100` percent. Returns `None` when the value does not parse as a
/// component list, so callers can fall back to the raw text.
///
/// ```
/// use calipers_overlay::rgba_to_hex;
///
/// assert_eq!(rgba_to_hex("rgb(255, 255, 255)").as_deref(), Some("#ffffff 0%"));
/// assert_eq!(rgba_to_hex("rgba(0, 0, 0, 0.5)").as_deref(), Some("#000000 50%"));
/// ```
pub fn rgba_to_hex(value: &str) -> Option<String> {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | 'r' | 'g' | 'b' | 'a') && !c.is_whitespace())
        .collect();

    let mut components = [0.0_f64; 4];
    let mut count = 0;
    for part in digits.split(',') {
        if count == 4 {
            return None;
        }
        components[count] = part.parse().ok()?;
        count += 1;
    }
    if count < 3 {
        return None;
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "channel values are clamped into u8 range before the cast"
    )]
    let channel = |v: f64| -> u8 { v.clamp(0.0, 255.0) as u8 };

    // Three components means no alpha was specified; that renders as 0%.
    let alpha = if count == 4 { components[3] } else { 0.0 };
    Some(alloc::format!(
        "#{:02x}{:02x}{:02x} {}%",
        channel(components[0]),
        channel(components[1]),
        channel(components[2]),
        alpha * 100.0
    ))
}
