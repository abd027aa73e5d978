//! Mermaid flowchart output
//!
//! Produces a fenced `mermaid` block that GitHub, GitLab and other Markdown
//! viewers render in place.

use super::{FleetGraph, GraphRenderer, NodeKind};
use crate::core::cancel::CancelToken;
use crate::core::error::RenderError;
use std::fmt::Write;

/// Generator for Mermaid flowchart syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer;

impl MermaidRenderer {
    /// Create a new Mermaid renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Prefix graph ids so they never collide with Mermaid keywords
    fn node_id(id: &str) -> String {
        format!("n{id}")
    }

    /// Escape a label for a quoted Mermaid node text
    fn label(text: &str) -> String {
        text.replace('"', "#quot;").replace('\n', "<br/>")
    }

    /// Node shape per source table: aircraft boxes, family rounded, alias stadium
    const fn brackets(kind: NodeKind) -> (&'static str, &'static str) {
        match kind {
            NodeKind::Aircraft => ("[", "]"),
            NodeKind::Family => ("(", ")"),
            NodeKind::Alias => ("([", "])"),
        }
    }
}

impl GraphRenderer for MermaidRenderer {
    fn render(&self, graph: &FleetGraph, cancel: &CancelToken) -> Result<String, RenderError> {
        let mut output = String::from("```mermaid\nflowchart LR\n");

        for node in graph.nodes() {
            cancel.check()?;
            let (open, close) = Self::brackets(node.kind);
            let _ = writeln!(
                output,
                "    {}{open}\"{}\"{close}",
                Self::node_id(&node.id),
                Self::label(&node.label)
            );
        }

        output.push('\n');

        for edge in graph.edges() {
            cancel.check()?;
            let _ = writeln!(
                output,
                "    {} --> {}",
                Self::node_id(&edge.from),
                Self::node_id(&edge.to)
            );
        }

        output.push_str("```\n");
        Ok(output)
    }
}
