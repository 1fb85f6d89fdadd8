//! Resolution of free-form slide background descriptors.
//!
//! Slides store their background as the string the editor renders, either a
//! solid color (`#FFFFFF`) or a CSS gradient
//! (`linear-gradient(135deg, #1e293b 0%, #0f172a 100%)`).

use super::color::RGBColor;
use memchr::memchr_iter;

/// Background used when a descriptor carries no recognizable color.
pub const DEFAULT_BACKGROUND: RGBColor = RGBColor::new(0x1E, 0x29, 0x3B);

/// Find the first `#RRGGBB` token in a string.
pub fn first_hex_token(s: &str) -> Option<RGBColor> {
    let bytes = s.as_bytes();
    memchr_iter(b'#', bytes).find_map(|pos| {
        let digits = bytes.get(pos + 1..pos + 7)?;
        if digits.iter().all(u8::is_ascii_hexdigit) {
            // Slicing is safe: the six bytes are ASCII hex digits.
            RGBColor::from_hex(&s[pos + 1..pos + 7])
        } else {
            None
        }
    })
}

/// Resolve a background descriptor to a single solid color.
///
/// Gradients collapse to their first color stop. Solid descriptors use the
/// first six-digit token, then the whole string as a (possibly short) hex
/// color. Anything else falls back to [`DEFAULT_BACKGROUND`].
///
/// # Examples
///
/// ```
/// use slidecraft::common::style::{resolve_background, DEFAULT_BACKGROUND};
/// use slidecraft::common::RGBColor;
///
/// let bg = resolve_background("linear-gradient(135deg, #1e293b 0%, #0f172a 100%)");
/// assert_eq!(bg, RGBColor::new(0x1e, 0x29, 0x3b));
/// assert_eq!(resolve_background("#FFFFFF"), RGBColor::WHITE);
/// assert_eq!(resolve_background("transparent"), DEFAULT_BACKGROUND);
/// ```
pub fn resolve_background(descriptor: &str) -> RGBColor {
    if descriptor.contains("gradient") {
        return first_hex_token(descriptor).unwrap_or(DEFAULT_BACKGROUND);
    }

    first_hex_token(descriptor)
        .or_else(|| RGBColor::from_hex(descriptor))
        .unwrap_or(DEFAULT_BACKGROUND)
}

/// A color stop of a parsed linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position from 0.0 to 1.0
    pub position: f64,
    pub color: RGBColor,
}

/// A CSS `linear-gradient(...)` reduced to what DrawingML can express.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// CSS angle in degrees (0 points up, 90 points right).
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Parse a `linear-gradient(...)` descriptor with hex color stops.
    ///
    /// Returns `None` for other descriptors or when fewer than two stops can
    /// be read. Stops without a position are spread evenly.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let body = descriptor.trim().strip_prefix("linear-gradient(")?;
        let body = body.strip_suffix(')').unwrap_or(body);

        let mut angle = 180.0;
        let mut raw_stops: Vec<(RGBColor, Option<f64>)> = Vec::new();

        for (i, arg) in body.split(',').map(str::trim).enumerate() {
            if i == 0
                && let Some(deg) = arg.strip_suffix("deg")
            {
                angle = deg.trim().parse().ok()?;
                continue;
            }

            let mut parts = arg.split_whitespace();
            let Some(color) = parts.next().and_then(RGBColor::from_hex) else {
                continue;
            };
            let position = parts
                .next()
                .and_then(|p| p.strip_suffix('%'))
                .and_then(|p| p.parse::<f64>().ok())
                .map(|p| (p / 100.0).clamp(0.0, 1.0));
            raw_stops.push((color, position));
        }

        if raw_stops.len() < 2 {
            return None;
        }

        let last = (raw_stops.len() - 1) as f64;
        let stops = raw_stops
            .into_iter()
            .enumerate()
            .map(|(i, (color, position))| GradientStop {
                position: position.unwrap_or(i as f64 / last),
                color,
            })
            .collect();

        Some(Self { angle, stops })
    }

    /// The DrawingML `lin ang` value: 0 runs left to right, clockwise, in 1/60000 degree.
    pub fn drawingml_angle(&self) -> i64 {
        ((self.angle - 90.0).rem_euclid(360.0) * 60_000.0).round() as i64
    }
}
