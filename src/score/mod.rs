//! Engagement-score sheet loading and grading

mod color;
mod format;
mod loader;
mod value;

pub use color::{score_color, Color};
pub use format::parse_score;
pub use loader::{load_score_table, ScoreRecord, ScoreSource};
pub use value::Score;
