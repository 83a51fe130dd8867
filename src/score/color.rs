use serde::Serialize;
use std::fmt;

use super::Score;

/// An sRGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// `#rrggbb`, lowercase, no alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Neutral color for units without a usable score.
const UNKNOWN_COLOR: Color = Color::new(30, 30, 30);

/// Engagement-score grading bands. Evaluated top-down, first match wins
/// (`score >= threshold`). The thresholds and colors are the published
/// grading scale and must not be derived or tuned.
const BANDS: [(f64, Color); 10] = [
    (67.0, Color::new(225, 21, 13)),
    (61.0, Color::new(230, 157, 104)),
    (58.0, Color::new(230, 157, 104)),
    (55.0, Color::new(230, 190, 104)),
    (52.0, Color::new(230, 190, 104)),
    (48.0, Color::new(230, 190, 104)),
    (45.0, Color::new(156, 221, 220)),
    (42.0, Color::new(156, 221, 220)),
    (39.0, Color::new(156, 221, 220)),
    (33.0, Color::new(104, 180, 221)),
];

/// Everything below the last threshold.
const FLOOR_COLOR: Color = Color::new(104, 180, 221);

/// Map a score to its grading-band color.
pub fn score_color(score: Score) -> Color {
    let Score::Known(value) = score else {
        return UNKNOWN_COLOR;
    };
    for (threshold, color) in BANDS {
        if value >= threshold {
            return color;
        }
    }
    FLOOR_COLOR
}
