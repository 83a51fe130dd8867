//! Pipeline configuration

use std::path::PathBuf;

/// Configuration for one derivation run.
///
/// Every path and marker the pipeline depends on is an explicit option
/// here; the entry point receives this object instead of reading
/// module-level globals.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Score sheet read by the view route when no upload has happened yet
    pub score_source: Option<PathBuf>,

    /// Hierarchy workbook read by the view route when no upload has happened yet
    pub hierarchy_source: Option<PathBuf>,

    /// Worksheet holding the hierarchy table
    pub sheet_name: String,

    /// Leading non-data rows to skip before the header row
    pub header_skip_rows: usize,

    /// Directory rendered images are written into
    pub output_dir: PathBuf,

    /// Graphviz font family; missing fonts fall back to the default with a warning
    pub font_family: Option<String>,

    /// Marker for hierarchy cells with no organizational meaning
    pub not_applicable_marker: String,

    /// Root unit code excluded from both rows and edges
    pub excluded_root: Option<String>,

    /// Reproduce the legacy column bound that skipped the innermost
    /// parent/child pair of every row
    pub legacy_column_bound: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            score_source: None,
            hierarchy_source: None,
            sheet_name: "★属性表示制限シート★".to_string(),
            header_skip_rows: 7,
            output_dir: PathBuf::from("images"),
            font_family: None,
            not_applicable_marker: "該当なし".to_string(),
            excluded_root: Some("E001".to_string()),
            legacy_column_bound: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.header_skip_rows, 7);
        assert_eq!(config.excluded_root.as_deref(), Some("E001"));
        assert!(!config.legacy_column_bound);
        assert!(config.score_source.is_none());
    }
}
