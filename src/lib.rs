//! orgviz — engagement-score organization chart
//!
//! Ingests two tabular sources — an employee engagement-score sheet and
//! a hierarchical "who reports to whom" spreadsheet — and derives a
//! graph suitable for rendering: nodes are organizational units
//! annotated with headcount and a color-coded engagement score, edges
//! encode reporting relationships. Layout and rasterization are
//! delegated to the external Graphviz `dot` tool.
//!
//! # Architecture
//!
//! Data flows strictly left to right; every stage owns its output and
//! nothing is mutated after the stage that created it returns:
//!
//! ```text
//! score CSV ───► score::loader ─────► Vec<ScoreRecord> ──┐
//!                                                        ├─► render ─► PNG
//! hierarchy ──► orgtree::loader ──► orgtree::format ─────┤
//!   workbook        RawTable           CodeTable ─► network::Network
//! ```
//!
//! ## Example
//!
//! ```rust
//! use orgviz::score::{parse_score, score_color, Score};
//!
//! let score = parse_score(Some("87.5点"));
//! assert_eq!(score, Score::Known(87.5));
//! assert_eq!(score_color(score).to_hex(), "#e1150d");
//!
//! assert!(parse_score(Some("不明")).is_unknown());
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod http;
pub mod network;
pub mod orgtree;
pub mod pipeline;
pub mod render;
pub mod score;

// Re-export main types for convenience
pub use config::PipelineConfig;
pub use network::{Edge, Network, UnitCode};
pub use orgtree::{CodeTable, HierarchyRow, HierarchySource, RawTable};
pub use pipeline::{run, run_with_renderer, PipelineError};
pub use render::{GraphAssembler, GraphvizRenderer, Renderer};
pub use score::{parse_score, score_color, Color, Score, ScoreRecord, ScoreSource};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
