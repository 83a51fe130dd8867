use regex::Regex;
use std::sync::OnceLock;

use super::RawTable;
use crate::config::PipelineConfig;
use crate::network::UnitCode;
use crate::pipeline::PipelineError;

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Z]\d{3}").unwrap())
}

/// One reporting path through the hierarchy, outermost level first.
///
/// Levels are addressed by position; out-of-range access is a named
/// error, never a panic.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyRow(Vec<UnitCode>);

impl HierarchyRow {
    pub fn new(codes: Vec<UnitCode>) -> Self {
        HierarchyRow(codes)
    }

    /// Bounds-checked positional access.
    pub fn level(&self, index: usize) -> Result<&UnitCode, PipelineError> {
        self.0.get(index).ok_or(PipelineError::LevelOutOfRange {
            index,
            depth: self.0.len(),
        })
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn codes(&self) -> &[UnitCode] {
        &self.0
    }
}

/// The formatted hierarchy table: rows of unit codes, columns by depth.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeTable {
    rows: Vec<HierarchyRow>,
}

impl CodeTable {
    pub fn new(rows: Vec<HierarchyRow>) -> Self {
        CodeTable { rows }
    }

    pub fn rows(&self) -> &[HierarchyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalize the raw hierarchy table into unit-code rows.
///
/// Each column is forward-filled (merged-cell sheets write a parent
/// label once and imply it below), cells carrying the not-applicable
/// marker or the excluded root code are blanked, rows still missing a
/// level are dropped, and every surviving cell must yield a unit code.
pub fn format_org_tree(
    table: &RawTable,
    config: &PipelineConfig,
) -> Result<CodeTable, PipelineError> {
    let width = table.headers.len();

    // Forward-fill runs on the raw text, before exclusion: a sentinel
    // cell propagates as itself and must not inherit the value above.
    let mut last: Vec<Option<String>> = vec![None; width];
    let mut filled: Vec<Vec<Option<String>>> = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut out = Vec::with_capacity(width);
        for col in 0..width {
            let cell = row.get(col).cloned().flatten().or_else(|| last[col].clone());
            last[col] = cell.clone();
            out.push(cell);
        }
        filled.push(out);
    }

    let mut rows = Vec::new();
    for (row_index, row) in filled.into_iter().enumerate() {
        let survivors: Option<Vec<String>> = row
            .into_iter()
            .map(|cell| cell.filter(|text| !is_excluded(text, config)))
            .collect();
        // A row missing any level carries no complete reporting path.
        let Some(texts) = survivors else {
            continue;
        };

        let mut codes = Vec::with_capacity(width);
        for (column, text) in texts.iter().enumerate() {
            let code = code_pattern()
                .find(text)
                .map(|found| UnitCode::new(found.as_str()))
                .ok_or_else(|| PipelineError::CodeNotFound {
                    row: row_index,
                    column,
                    cell: text.clone(),
                })?;
            codes.push(code);
        }
        rows.push(HierarchyRow::new(codes));
    }
    Ok(CodeTable::new(rows))
}

fn is_excluded(text: &str, config: &PipelineConfig) -> bool {
    if text.contains(&config.not_applicable_marker) {
        return true;
    }
    match &config.excluded_root {
        Some(root) => text.contains(root.as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[Option<&str>]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.map(str::to_string)).collect())
                .collect(),
        }
    }

    fn codes(row: &HierarchyRow) -> Vec<&str> {
        row.codes().iter().map(|c| c.as_str()).collect()
    }

    #[test]
    fn test_forward_fill() {
        let table = raw(
            &["部", "課"],
            &[
                &[Some("営業 X001"), Some("一課 B001")],
                &[None, Some("二課 B002")],
                &[None, Some("三課 B003")],
                &[Some("企画 Y001"), Some("四課 B004")],
            ],
        );
        let formatted = format_org_tree(&table, &PipelineConfig::default()).unwrap();

        let first_column: Vec<&str> = formatted
            .rows()
            .iter()
            .map(|row| row.level(0).unwrap().as_str())
            .collect();
        assert_eq!(first_column, vec!["X001", "X001", "X001", "Y001"]);
    }

    #[test]
    fn test_code_extraction_from_surrounding_text() {
        let table = raw(&["部"], &[&[Some("第一営業部（A123）")]]);
        let formatted = format_org_tree(&table, &PipelineConfig::default()).unwrap();

        assert_eq!(codes(&formatted.rows()[0]), vec!["A123"]);
    }

    #[test]
    fn test_not_applicable_rows_dropped() {
        let table = raw(
            &["部", "課"],
            &[
                &[Some("該当なし"), Some("該当なし")],
                &[Some("営業 A001"), Some("一課 B001")],
            ],
        );
        let formatted = format_org_tree(&table, &PipelineConfig::default()).unwrap();

        assert_eq!(formatted.len(), 1);
        assert_eq!(codes(&formatted.rows()[0]), vec!["A001", "B001"]);
    }

    #[test]
    fn test_excluded_root_drops_row() {
        let table = raw(
            &["部", "課"],
            &[
                &[Some("全社 E001"), Some("一課 B001")],
                &[Some("営業 A001"), Some("二課 B002")],
            ],
        );
        let formatted = format_org_tree(&table, &PipelineConfig::default()).unwrap();

        assert_eq!(formatted.len(), 1);
        assert_eq!(codes(&formatted.rows()[0]), vec!["A001", "B002"]);
    }

    #[test]
    fn test_leading_missing_cells_drop_row() {
        // Nothing above to fill from, so the first row stays incomplete.
        let table = raw(
            &["部", "課"],
            &[
                &[None, Some("一課 B001")],
                &[Some("営業 A001"), Some("二課 B002")],
            ],
        );
        let formatted = format_org_tree(&table, &PipelineConfig::default()).unwrap();

        assert_eq!(formatted.len(), 1);
        assert_eq!(codes(&formatted.rows()[0]), vec!["A001", "B002"]);
    }

    #[test]
    fn test_cell_without_code_is_an_error() {
        let table = raw(&["部", "課"], &[&[Some("営業 A001"), Some("コード無し")]]);
        let result = format_org_tree(&table, &PipelineConfig::default());

        match result {
            Err(PipelineError::CodeNotFound { row, column, cell }) => {
                assert_eq!(row, 0);
                assert_eq!(column, 1);
                assert_eq!(cell, "コード無し");
            }
            other => panic!("expected CodeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_lowercase_or_short_codes_do_not_match() {
        let table = raw(&["部"], &[&[Some("a123 B12")]]);
        let result = format_org_tree(&table, &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::CodeNotFound { .. })));
    }

    #[test]
    fn test_level_out_of_range_is_named_error() {
        let row = HierarchyRow::new(vec![UnitCode::new("A001")]);
        assert!(row.level(0).is_ok());
        match row.level(3) {
            Err(PipelineError::LevelOutOfRange { index, depth }) => {
                assert_eq!(index, 3);
                assert_eq!(depth, 1);
            }
            other => panic!("expected LevelOutOfRange, got {:?}", other),
        }
    }
}
