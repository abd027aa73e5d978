//! Directed graph of the fleet tables and its renderers
//!
//! [`build_graph`] turns a [`Fleet`](crate::core::models::Fleet) into a
//! [`FleetGraph`]: one node per table row and one edge per non-empty reference.
//! A [`GraphFormat`] picks the renderer that turns the graph into file content.

pub mod builder;
pub mod dot;
pub mod mermaid;
pub mod svg;

pub use builder::build_graph;
pub use dot::DotRenderer;
pub use mermaid::MermaidRenderer;
pub use svg::SvgRenderer;

use crate::core::cancel::CancelToken;
use crate::core::error::RenderError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Sequential id source shared by nodes and edges of one graph
///
/// Ids start at 1 and are written in lowercase hexadecimal.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    last: u64,
}

impl IdGen {
    /// A generator whose first id is `1`
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Next unused id
    pub fn next_id(&mut self) -> String {
        self.last += 1;
        format!("{:x}", self.last)
    }
}

/// Which table a node was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An aircraft type row
    Aircraft,
    /// A family row
    Family,
    /// An alias row
    Alias,
}

/// A labelled graph node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Unique id within the graph
    pub id: String,
    /// Source table
    pub kind: NodeKind,
    /// Multi-line label (`\n` separated)
    pub label: String,
}

/// A directed edge from a referencing row to the row it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Unique id within the graph
    pub id: String,
    /// Source node id
    pub from: String,
    /// Target node id
    pub to: String,
}

/// Node and edge description handed to a renderer
///
/// Layout direction is always left to right.
#[derive(Debug, Clone, Default)]
pub struct FleetGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    node_index: HashMap<String, usize>,
}

impl FleetGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unlabelled node and return its id
    pub fn create_node(&mut self, ids: &mut IdGen, kind: NodeKind) -> String {
        let id = ids.next_id();
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(GraphNode {
            id: id.clone(),
            kind,
            label: String::new(),
        });
        id
    }

    /// Replace the label of node `id`; returns `false` when there is no such node
    pub fn set_label(&mut self, id: &str, label: String) -> bool {
        match self.node_index.get(id) {
            Some(&idx) => {
                self.nodes[idx].label = label;
                true
            }
            None => false,
        }
    }

    /// Add an edge `from -> to` and return its id
    pub fn create_edge(&mut self, ids: &mut IdGen, from: &str, to: &str) -> String {
        let id = ids.next_id();
        self.edges.push(GraphEdge {
            id: id.clone(),
            from: from.to_string(),
            to: to.to_string(),
        });
        id
    }

    /// Nodes in creation order
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in creation order
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Look up a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Turns a [`FleetGraph`] into the content of an output file
pub trait GraphRenderer {
    /// Render `graph`, giving up with [`RenderError::Cancelled`] once `cancel` fires
    ///
    /// # Errors
    /// Returns a [`RenderError`] when the backend fails or rendering is cancelled.
    fn render(&self, graph: &FleetGraph, cancel: &CancelToken) -> Result<String, RenderError>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// SVG image laid out by `layout-rs`
    #[default]
    Svg,
    /// Graphviz DOT source
    Dot,
    /// Mermaid flowchart in a Markdown code fence
    Mermaid,
}

impl GraphFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Dot => "dot",
            Self::Mermaid => "md",
        }
    }

    /// Renderer for this format
    #[must_use]
    pub fn renderer(&self) -> Box<dyn GraphRenderer> {
        match self {
            Self::Svg => Box::new(SvgRenderer::new()),
            Self::Dot => Box::new(DotRenderer::new()),
            Self::Mermaid => Box::new(MermaidRenderer::new()),
        }
    }
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "dot" | "gv" | "graphviz" => Ok(Self::Dot),
            "mermaid" | "mmd" | "md" => Ok(Self::Mermaid),
            _ => Err(format!("Unknown graph format: {s}")),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Dot => write!(f, "dot"),
            Self::Mermaid => write!(f, "mermaid"),
        }
    }
}
