//! Builds the fleet graph from typed records

use super::{FleetGraph, IdGen, NodeKind};
use crate::core::cancel::CancelToken;
use crate::core::error::RenderError;
use crate::core::models::{AliasTarget, Fleet};
use crate::warn;
use std::collections::HashMap;

/// Build the graph for `fleet`
///
/// Nodes come first for aircraft types, then families, then aliases; each
/// alias is followed by its edge to the target. Aircraft → family edges and
/// family → parent edges are added last. References to unknown ids are
/// skipped with a warning. When an id repeats, references resolve to the
/// last row with that id; each row's own edges still start at its own node.
///
/// # Errors
/// Returns [`RenderError::Cancelled`] when `cancel` fires during construction.
pub fn build_graph(fleet: &Fleet, cancel: &CancelToken) -> Result<FleetGraph, RenderError> {
    let mut graph = FleetGraph::new();
    let mut ids = IdGen::new();

    let mut aircraft_rows = Vec::with_capacity(fleet.aircraft.len());
    let mut family_rows = Vec::with_capacity(fleet.families.len());

    for aircraft in &fleet.aircraft {
        cancel.check()?;
        let node = graph.create_node(&mut ids, NodeKind::Aircraft);
        graph.set_label(&node, aircraft.label());
        aircraft_rows.push(node);
    }

    for family in &fleet.families {
        cancel.check()?;
        let node = graph.create_node(&mut ids, NodeKind::Family);
        graph.set_label(&node, family.label());
        family_rows.push(node);
    }

    let aircraft_nodes: HashMap<&str, &String> = fleet
        .aircraft
        .iter()
        .map(|a| a.id.as_str())
        .zip(&aircraft_rows)
        .collect();
    let family_nodes: HashMap<&str, &String> = fleet
        .families
        .iter()
        .map(|f| f.id.as_str())
        .zip(&family_rows)
        .collect();

    for alias in &fleet.aliases {
        cancel.check()?;
        let node = graph.create_node(&mut ids, NodeKind::Alias);
        graph.set_label(&node, alias.label());

        let target = match alias.target() {
            Some(AliasTarget::Aircraft(id)) => aircraft_nodes.get(id.as_str()),
            Some(AliasTarget::Family(id)) => family_nodes.get(id.as_str()),
            None => None,
        };
        match target {
            Some(&target) => {
                graph.create_edge(&mut ids, &node, target);
            }
            None => warn!("Alias {} has no resolvable target", alias.alias),
        }
    }

    for (aircraft, node) in fleet.aircraft.iter().zip(&aircraft_rows) {
        let Some(family_id) = aircraft.family_id.as_deref() else {
            continue;
        };
        cancel.check()?;
        match family_nodes.get(family_id) {
            Some(&family) => {
                graph.create_edge(&mut ids, node, family);
            }
            None => warn!(
                "Aircraft type {} references unknown family {family_id}",
                aircraft.id
            ),
        }
    }

    for (family, node) in fleet.families.iter().zip(&family_rows) {
        let Some(parent_id) = family.parent_family.as_deref() else {
            continue;
        };
        cancel.check()?;
        match family_nodes.get(parent_id) {
            Some(&parent) => {
                graph.create_edge(&mut ids, node, parent);
            }
            None => warn!(
                "Family {} references unknown parent family {parent_id}",
                family.id
            ),
        }
    }

    Ok(graph)
}
