use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::Cursor;
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::pipeline::PipelineError;

/// Hierarchy workbook input: a file on disk or an uploaded in-memory body.
#[derive(Debug, Clone)]
pub enum HierarchySource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Rectangular view of the hierarchy sheet after header promotion.
///
/// Headers are what the sheet claims; missing cells stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Read the designated worksheet into a raw cell table.
///
/// Skips the configured number of leading non-data rows, promotes the
/// next row to column headers and drops any column whose header is
/// empty.
pub fn load_org_tree(
    source: &HierarchySource,
    config: &PipelineConfig,
) -> Result<RawTable, PipelineError> {
    let grid = match source {
        HierarchySource::Path(path) => {
            let mut workbook = open_workbook_auto(path)?;
            read_sheet(&mut workbook, &config.sheet_name)?
        }
        HierarchySource::Bytes(bytes) => {
            let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.clone()))?;
            read_sheet(&mut workbook, &config.sheet_name)?
        }
    };
    Ok(shape_table(grid, config.header_skip_rows))
}

fn read_sheet<RS: std::io::Read + std::io::Seek>(
    workbook: &mut Sheets<RS>,
    sheet_name: &str,
) -> Result<Vec<Vec<Option<String>>>, PipelineError> {
    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(PipelineError::SheetNotFound(sheet_name.to_string()));
    }
    let range = workbook.worksheet_range(sheet_name)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => {
            let text = other.to_string();
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
    }
}

/// Promote the first post-skip row to headers and drop unnamed columns.
pub fn shape_table(grid: Vec<Vec<Option<String>>>, skip_rows: usize) -> RawTable {
    let mut remaining = grid.into_iter().skip(skip_rows);
    let Some(header_row) = remaining.next() else {
        return RawTable::default();
    };
    let kept: Vec<(usize, String)> = header_row
        .into_iter()
        .enumerate()
        .filter_map(|(index, header)| header.map(|h| (index, h)))
        .collect();
    let rows = remaining
        .map(|row| {
            kept.iter()
                .map(|(index, _)| row.get(*index).cloned().flatten())
                .collect()
        })
        .collect();
    RawTable {
        headers: kept.into_iter().map(|(_, header)| header).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(row: &[Option<&str>]) -> Vec<Option<String>> {
        row.iter().map(|c| c.map(str::to_string)).collect()
    }

    #[test]
    fn test_header_promotion_after_skip() {
        let grid = vec![
            cells(&[Some("title banner")]),
            cells(&[Some("部"), Some("課")]),
            cells(&[Some("A001"), Some("B002")]),
        ];
        let table = shape_table(grid, 1);

        assert_eq!(table.headers, vec!["部", "課"]);
        assert_eq!(table.rows, vec![cells(&[Some("A001"), Some("B002")])]);
    }

    #[test]
    fn test_unnamed_columns_dropped() {
        let grid = vec![
            cells(&[Some("部"), None, Some("課")]),
            cells(&[Some("A001"), Some("stray"), Some("B002")]),
        ];
        let table = shape_table(grid, 0);

        assert_eq!(table.headers, vec!["部", "課"]);
        assert_eq!(table.rows, vec![cells(&[Some("A001"), Some("B002")])]);
    }

    #[test]
    fn test_short_rows_padded_with_missing() {
        let grid = vec![
            cells(&[Some("部"), Some("課")]),
            cells(&[Some("A001")]),
        ];
        let table = shape_table(grid, 0);

        assert_eq!(table.rows, vec![cells(&[Some("A001"), None])]);
    }

    #[test]
    fn test_skip_beyond_grid_yields_empty_table() {
        let grid = vec![cells(&[Some("部")])];
        let table = shape_table(grid, 7);

        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
