//! Pipeline orchestration and error taxonomy
//!
//! One invocation processes one score sheet and one hierarchy workbook,
//! start to finish, single-threaded. Errors propagate uncaught to the
//! caller; the boundary turns them into user-facing messages.

use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::network::Network;
use crate::orgtree::{format_org_tree, load_org_tree, HierarchySource};
use crate::render::{GraphAssembler, GraphvizRenderer, Renderer};
use crate::score::{load_score_table, ScoreSource};

/// Errors raised while deriving or rendering the organization graph.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required column is absent from the score-sheet header. Fatal:
    /// no partial output is produced.
    #[error("required column `{0}` missing from score sheet")]
    MissingColumn(String),

    #[error("worksheet `{0}` not found in hierarchy workbook")]
    SheetNotFound(String),

    /// A surviving hierarchy cell yielded no unit code. Letting such a
    /// row through would corrupt downstream edges, so the sheet fails.
    #[error("no unit code in hierarchy cell `{cell}` (data row {row}, column {column})")]
    CodeNotFound {
        row: usize,
        column: usize,
        cell: String,
    },

    #[error("hierarchy level {index} out of range for a path of depth {depth}")]
    LevelOutOfRange { index: usize, depth: usize },

    #[error("score sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("hierarchy workbook: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("graphviz: {0}")]
    Render(String),
}

/// Run the full derivation with the default Graphviz backend.
///
/// Returns the path of the rendered image; each invocation writes to a
/// fresh file under `output_dir` so concurrent requests never clobber
/// each other.
pub fn run(
    config: &PipelineConfig,
    score: &ScoreSource,
    hierarchy: &HierarchySource,
) -> Result<PathBuf, PipelineError> {
    run_with_renderer(config, score, hierarchy, &GraphvizRenderer::default())
}

/// Same as [`run`] with an explicit drawing backend.
pub fn run_with_renderer(
    config: &PipelineConfig,
    score: &ScoreSource,
    hierarchy: &HierarchySource,
    renderer: &dyn Renderer,
) -> Result<PathBuf, PipelineError> {
    let records = load_score_table(score)?;
    let raw_tree = load_org_tree(hierarchy, config)?;
    let table = format_org_tree(&raw_tree, config)?;
    let network = Network::from_table(&table, config)?;

    std::fs::create_dir_all(&config.output_dir)?;
    let output = config.output_dir.join(format!("{}.png", Uuid::new_v4()));
    let assembler = GraphAssembler::new(config.font_family.as_deref());
    assembler.render(&records, &network, renderer, &output)?;

    info!(
        units = records.len(),
        edges = network.len(),
        image = %output.display(),
        "derivation complete"
    );
    Ok(output)
}
