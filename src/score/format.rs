use regex::Regex;
use std::sync::OnceLock;

use super::Score;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").unwrap())
}

/// Clean a free-form score cell into a numeric score.
///
/// The first substring of digits (with an optional decimal part) wins;
/// missing cells, non-numeric text and NaN-like inputs all resolve to
/// [`Score::Unknown`]. Never fails on malformed input.
pub fn parse_score(raw: Option<&str>) -> Score {
    let Some(text) = raw else {
        return Score::Unknown;
    };
    match number_pattern().find(text) {
        Some(found) => found
            .as_str()
            .parse::<f64>()
            .map(Score::Known)
            .unwrap_or(Score::Unknown),
        None => Score::Unknown,
    }
}
