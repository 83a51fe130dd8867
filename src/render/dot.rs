use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::pipeline::PipelineError;

/// Drawing backend seam. The pipeline only produces DOT; turning it
/// into pixels is delegated here.
pub trait Renderer {
    fn render_png(&self, dot: &str, output: &Path) -> Result<(), PipelineError>;
}

/// Renders DOT by invoking the external Graphviz `dot` binary.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: String,
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        GraphvizRenderer {
            program: program.into(),
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        GraphvizRenderer::new("dot")
    }
}

impl Renderer for GraphvizRenderer {
    fn render_png(&self, dot: &str, output: &Path) -> Result<(), PipelineError> {
        let mut child = Command::new(&self.program)
            .arg("-Tpng")
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PipelineError::Render(format!("failed to spawn `{}`: {}", self.program, e)))?;

        {
            let Some(stdin) = child.stdin.as_mut() else {
                return Err(PipelineError::Render("no stdin handle on child".to_string()));
            };
            stdin.write_all(dot.as_bytes())?;
        }
        // Drop stdin so the child sees EOF before we wait.
        drop(child.stdin.take());

        let finished = child.wait_with_output()?;
        if !finished.status.success() {
            return Err(PipelineError::Render(
                String::from_utf8_lossy(&finished.stderr).to_string(),
            ));
        }
        Ok(())
    }
}
