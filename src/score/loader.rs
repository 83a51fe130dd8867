use encoding_rs::SHIFT_JIS;
use serde::Serialize;
use std::path::PathBuf;

use super::{parse_score, score_color, Color, Score};
use crate::pipeline::PipelineError;

/// Required score-sheet columns.
const COL_SYMBOL: &str = "属性記号";
const COL_UNIT_NO: &str = "属性No";
const COL_NAME: &str = "属性名";
const COL_RESPONDENTS: &str = "回答者数";
const COL_SCORE: &str = "ES";

/// One organizational unit as loaded from the engagement-score sheet.
///
/// Created once per surviving row and immutable afterward.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    /// Symbol plus numeric suffix zero-padded to three digits, e.g. `A007`
    pub unit_id: String,
    pub display_name: String,
    /// Survey respondent headcount; zero when the cell held no number
    pub respondent_count: u32,
    pub score: Score,
    pub color: Color,
}

/// Score sheet input: a file on disk or an uploaded in-memory body.
#[derive(Debug, Clone)]
pub enum ScoreSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Load and grade the engagement-score sheet.
///
/// The sheet is Shift_JIS-encoded delimited text. A required column
/// missing from the header aborts the load; a row missing any required
/// field is dropped entirely.
pub fn load_score_table(source: &ScoreSource) -> Result<Vec<ScoreRecord>, PipelineError> {
    let raw = match source {
        ScoreSource::Path(path) => std::fs::read(path)?,
        ScoreSource::Bytes(bytes) => bytes.clone(),
    };
    let (decoded, _, _) = SHIFT_JIS.decode(&raw);

    let mut reader = csv::Reader::from_reader(decoded.as_bytes());
    let headers = reader.headers()?.clone();
    let resolve = |name: &str| -> Result<usize, PipelineError> {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    };
    let symbol_col = resolve(COL_SYMBOL)?;
    let unit_no_col = resolve(COL_UNIT_NO)?;
    let name_col = resolve(COL_NAME)?;
    let respondents_col = resolve(COL_RESPONDENTS)?;
    let score_col = resolve(COL_SCORE)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |col: usize| {
            row.get(col)
                .map(str::trim)
                .filter(|text| !text.is_empty())
        };
        // Strict drop policy: every required field must be present.
        let (Some(symbol), Some(unit_no), Some(name), Some(respondents), Some(score_text)) = (
            field(symbol_col),
            field(unit_no_col),
            field(name_col),
            field(respondents_col),
            field(score_col),
        ) else {
            continue;
        };
        // The numeric suffix must itself be a number for the id to exist.
        let Score::Known(suffix) = parse_score(Some(unit_no)) else {
            continue;
        };

        let score = parse_score(Some(score_text));
        records.push(ScoreRecord {
            unit_id: format!("{}{:03}", symbol, suffix.round() as u32),
            display_name: name.to_string(),
            respondent_count: match parse_score(Some(respondents)) {
                Score::Known(count) => count.round() as u32,
                Score::Unknown => 0,
            },
            score,
            color: score_color(score),
        });
    }
    Ok(records)
}
