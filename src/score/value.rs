use serde::Serialize;
use std::fmt;

/// An engagement score: a survey metric per organizational unit, or
/// `Unknown` when the source text carried no usable number.
///
/// `Unknown` is an expected state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Score {
    Known(f64),
    Unknown,
}

impl Score {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Score::Known(value) => Some(*value),
            Score::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Score::Unknown)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Known(value) => write!(f, "{}", value),
            Score::Unknown => write!(f, "n/a"),
        }
    }
}
