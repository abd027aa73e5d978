//! Graphviz DOT output

use super::{FleetGraph, GraphRenderer};
use crate::core::cancel::CancelToken;
use crate::core::error::RenderError;
use std::fmt::Write;

/// Writes the graph as a `digraph` with box nodes, laid out left to right
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl DotRenderer {
    /// Create a new DOT renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Quote `text` as a DOT string; newlines become `\n` escapes
    fn quote(text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('"');
        for c in text.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                _ => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

impl GraphRenderer for DotRenderer {
    fn render(&self, graph: &FleetGraph, cancel: &CancelToken) -> Result<String, RenderError> {
        let mut output = String::from("digraph fleet {\n    rankdir=LR;\n    node [shape=box];\n\n");

        for node in graph.nodes() {
            cancel.check()?;
            let _ = writeln!(
                output,
                "    {} [label={}];",
                Self::quote(&node.id),
                Self::quote(&node.label)
            );
        }

        output.push('\n');

        for edge in graph.edges() {
            cancel.check()?;
            let _ = writeln!(
                output,
                "    {} -> {} [id={}];",
                Self::quote(&edge.from),
                Self::quote(&edge.to),
                Self::quote(&edge.id)
            );
        }

        output.push_str("}\n");
        Ok(output)
    }
}
