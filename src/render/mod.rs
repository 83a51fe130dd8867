//! Graph assembly and drawing
//!
//! Combines the score table and the reporting network into a renderable
//! node/edge set, emits Graphviz DOT and delegates rasterization to an
//! external backend.

mod dot;
mod label;

pub use dot::{GraphvizRenderer, Renderer};
pub use label::{node_label, LEADER_PLACEHOLDER};

use std::fmt::Write as _;
use std::path::Path;
use tracing::warn;

use crate::network::Network;
use crate::pipeline::PipelineError;
use crate::score::ScoreRecord;

/// Fallback Graphviz font family.
const DEFAULT_FONT: &str = "Helvetica";

/// Where the deployment keeps its fonts; used only to detect a missing
/// configured font early.
const FONT_DIR: &str = "/usr/share/fonts/truetype";

/// Assembles the node/edge set and hands it to a [`Renderer`].
///
/// Edges may reference unit codes absent from the score table; Graphviz
/// then draws an unlabeled node. That is a visual gap, not an error.
pub struct GraphAssembler {
    font: String,
}

impl GraphAssembler {
    /// A configured font that is not installed falls back to
    /// [`DEFAULT_FONT`] with a warning instead of failing startup.
    pub fn new(font_family: Option<&str>) -> Self {
        let font = match font_family {
            Some(name) => {
                if Path::new(FONT_DIR).join(name).exists() {
                    name.to_string()
                } else {
                    warn!(
                        font = name,
                        fallback = DEFAULT_FONT,
                        "configured font not found under {}, falling back",
                        FONT_DIR
                    );
                    DEFAULT_FONT.to_string()
                }
            }
            None => DEFAULT_FONT.to_string(),
        };
        GraphAssembler { font }
    }

    /// Emit the DOT source for the combined node/edge set.
    pub fn to_dot(&self, records: &[ScoreRecord], network: &Network) -> String {
        let mut dot = String::new();
        dot.push_str("graph {\n");
        let _ = writeln!(dot, "    graph [charset=\"UTF-8\", fontname=\"{}\"];", self.font);
        let _ = writeln!(
            dot,
            "    node [shape=note, color=azure4, fontname=\"{}\"];",
            self.font
        );
        let _ = writeln!(dot, "    edge [color=azure4, fontname=\"{}\"];", self.font);
        for edge in network {
            let _ = writeln!(dot, "    \"{}\" -- \"{}\";", edge.parent, edge.child);
        }
        for record in records {
            let _ = writeln!(
                dot,
                "    \"{}\" [style=filled, fillcolor=gray100, fontcolor=black, label={}];",
                record.unit_id,
                node_label(record)
            );
        }
        dot.push_str("}\n");
        dot
    }

    /// Render the assembled graph to a PNG at `output`.
    pub fn render(
        &self,
        records: &[ScoreRecord],
        network: &Network,
        renderer: &dyn Renderer,
        output: &Path,
    ) -> Result<(), PipelineError> {
        renderer.render_png(&self.to_dot(records, network), output)
    }
}
