//! SVG output through the `layout-rs` layout engine

use super::{FleetGraph, GraphRenderer};
use crate::core::cancel::CancelToken;
use crate::core::error::RenderError;
use layout::backends::svg::SVGWriter;
use layout::core::base::Orientation;
use layout::core::geometry::Point;
use layout::core::style::StyleAttr;
use layout::std_shapes::shapes::{Arrow, Element, ShapeKind};
use layout::topo::layout::VisualGraph;
use std::collections::HashMap;

/// Font size `StyleAttr::simple` draws with
const FONT_SIZE: f64 = 15.0;
/// Average glyph width relative to the font size
const GLYPH_WIDTH: f64 = 0.6;
/// Space between label and box border
const PADDING: f64 = 12.0;
/// Document written for a graph without nodes
const EMPTY_SVG: &str =
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"0\" height=\"0\" viewBox=\"0 0 0 0\"></svg>\n";

/// Lays the graph out left to right and draws it as SVG
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    /// Create a new SVG renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Box size that fits every line of `label`
    fn box_size(label: &str) -> Point {
        let lines = label.lines().count().max(1);
        let widest = label.lines().map(|l| l.chars().count()).max().unwrap_or(0);

        #[allow(clippy::cast_precision_loss)]
        let (width, height) = (
            (widest as f64).mul_add(FONT_SIZE * GLYPH_WIDTH, 2.0 * PADDING),
            (lines as f64).mul_add(FONT_SIZE * 1.2, 2.0 * PADDING),
        );
        Point::new(width, height)
    }
}

impl GraphRenderer for SvgRenderer {
    fn render(&self, graph: &FleetGraph, cancel: &CancelToken) -> Result<String, RenderError> {
        cancel.check()?;
        // layout-rs cannot place an empty graph
        if graph.node_count() == 0 {
            return Ok(EMPTY_SVG.to_string());
        }

        let orientation = Orientation::LeftToRight;
        let mut visual = VisualGraph::new(orientation);
        let mut handles = HashMap::with_capacity(graph.node_count());

        for node in graph.nodes() {
            cancel.check()?;
            let element = Element::create(
                ShapeKind::new_box(&node.label),
                StyleAttr::simple(),
                orientation,
                Self::box_size(&node.label),
            );
            handles.insert(node.id.as_str(), visual.add_node(element));
        }

        for edge in graph.edges() {
            cancel.check()?;
            let (Some(&from), Some(&to)) = (
                handles.get(edge.from.as_str()),
                handles.get(edge.to.as_str()),
            ) else {
                return Err(RenderError::Backend(format!(
                    "edge {} connects unknown nodes {} -> {}",
                    edge.id, edge.from, edge.to
                )));
            };
            visual.add_edge(Arrow::simple(""), from, to);
        }

        cancel.check()?;
        let mut writer = SVGWriter::new();
        visual.do_it(false, false, false, &mut writer);
        cancel.check()?;

        Ok(writer.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{IdGen, NodeKind};

    fn two_node_graph() -> FleetGraph {
        let mut ids = IdGen::new();
        let mut graph = FleetGraph::new();
        let alias = graph.create_node(&mut ids, NodeKind::Alias);
        graph.set_label(&alias, "Alias\nIATA: 32A".to_string());
        let aircraft = graph.create_node(&mut ids, NodeKind::Aircraft);
        graph.set_label(&aircraft, "Aircraft\nAirbus A320\nIATA: 320\nICAO: A320".to_string());
        graph.create_edge(&mut ids, &alias, &aircraft);
        graph
    }

    #[test]
    fn test_svg_document() {
        let svg = SvgRenderer::new()
            .render(&two_node_graph(), &CancelToken::new())
            .unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Airbus A320"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_box_size_grows_with_label() {
        let small = SvgRenderer::box_size("Alias\nIATA: 32A");
        let large = SvgRenderer::box_size("Aircraft\nDe Havilland Canada Dash 8-400\nIATA: DH4\nICAO: DH8D");
        assert!(large.x > small.x);
        assert!(large.y > small.y);
    }

    #[test]
    fn test_unknown_edge_endpoint() {
        let mut ids = IdGen::new();
        let mut graph = FleetGraph::new();
        let node = graph.create_node(&mut ids, NodeKind::Alias);
        graph.create_edge(&mut ids, &node, "ff");

        let err = SvgRenderer::new()
            .render(&graph, &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::Backend(_)));
    }

    #[test]
    fn test_empty_graph_is_empty_document() {
        let svg = SvgRenderer::new()
            .render(&FleetGraph::new(), &CancelToken::new())
            .unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_cancelled() {
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(
            SvgRenderer::new().render(&two_node_graph(), &cancel),
            Err(RenderError::Cancelled)
        ));
    }
}
