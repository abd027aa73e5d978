//! Integrity and graph tests over the compiled-in tables

use fleet_graph::core::cancel::CancelToken;
use fleet_graph::core::export::{export_graph, render_dataset, ExportOptions};
use fleet_graph::core::graph::{build_graph, GraphFormat, NodeKind};
use fleet_graph::core::integrity::{
    check_dataset, check_exactly_one, check_references, check_unique, KeySpec,
};
use fleet_graph::core::models::{AliasTarget, Fleet};
use fleet_graph::core::tables::{columns, Dataset, Table};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn embedded_fleet() -> Fleet {
    Fleet::load(&Dataset::embedded()).expect("embedded tables should load")
}

#[test]
fn primary_keys_are_unique() {
    let dataset = Dataset::embedded();
    for table in Table::ALL {
        check_unique(&dataset, &[KeySpec::required(table, table.key_column())])
            .unwrap_or_else(|e| panic!("{table}: {e}"));
    }
}

#[test]
fn iata_codes_are_unique_across_tables() {
    check_unique(
        &Dataset::embedded(),
        &[
            KeySpec::required(Table::AircraftTypes, columns::IATA),
            KeySpec::required(Table::Aliases, columns::ALIAS),
            KeySpec::optional(Table::Families, columns::IATA),
        ],
    )
    .unwrap();
}

#[test]
fn aliases_name_exactly_one_target() {
    check_exactly_one(
        &Dataset::embedded(),
        Table::Aliases,
        columns::AIRCRAFT_TYPE,
        columns::AIRCRAFT_FAMILY,
    )
    .unwrap();
}

#[test]
fn references_resolve() {
    check_references(&Dataset::embedded()).unwrap();
}

#[test]
fn full_check_passes() {
    check_dataset(&Dataset::embedded()).unwrap();
}

#[test]
fn embedded_tables_load() {
    let fleet = embedded_fleet();

    assert_eq!(fleet.aircraft.len(), 34);
    assert_eq!(fleet.families.len(), 17);
    assert_eq!(fleet.aliases.len(), 15);
    assert_eq!(fleet.row_count(), 66);

    let a320 = fleet.aircraft.iter().find(|a| a.id == "3").unwrap();
    assert_eq!(a320.name, "Airbus A320");
    assert_eq!(a320.icao, "A320");

    let neo = fleet.families.iter().find(|f| f.id == "2").unwrap();
    assert_eq!(neo.iata, None);
    assert_eq!(neo.parent_family.as_deref(), Some("1"));

    let members: Vec<&str> = fleet
        .aircraft
        .iter()
        .filter(|a| a.family_id.as_deref() == Some("1"))
        .map(|a| a.iata.as_str())
        .collect();
    assert_eq!(members, vec!["318", "319", "320", "321"]);

    assert_eq!(
        fleet.aliases[0].target(),
        Some(AliasTarget::Aircraft("3".to_string()))
    );
}

#[test]
fn quoted_family_name_is_unquoted() {
    let fleet = embedded_fleet();
    assert!(fleet.families.iter().any(|f| f.name == "ATR 42/72"));
}

#[test]
fn graph_has_one_node_per_row_and_one_edge_per_reference() {
    let fleet = embedded_fleet();
    let graph = build_graph(&fleet, &CancelToken::new()).unwrap();

    assert_eq!(graph.node_count(), fleet.row_count());

    let references = fleet.aliases.len()
        + fleet.aircraft.iter().filter(|a| a.family_id.is_some()).count()
        + fleet.families.iter().filter(|f| f.parent_family.is_some()).count();
    assert_eq!(graph.edge_count(), references);
    assert_eq!(graph.edge_count(), 52);

    let mut ids = HashSet::new();
    for id in graph
        .nodes()
        .iter()
        .map(|n| &n.id)
        .chain(graph.edges().iter().map(|e| &e.id))
    {
        assert!(u64::from_str_radix(id, 16).is_ok(), "{id} is not hex");
        assert!(ids.insert(id.clone()), "duplicate id {id}");
    }

    let aliases = graph
        .nodes()
        .iter()
        .filter(|n| n.kind == NodeKind::Alias)
        .count();
    assert_eq!(aliases, 15);
}

#[test]
fn every_edge_connects_existing_nodes() {
    let graph = build_graph(&embedded_fleet(), &CancelToken::new()).unwrap();
    for edge in graph.edges() {
        assert!(graph.node(&edge.from).is_some(), "edge {} from", edge.id);
        assert!(graph.node(&edge.to).is_some(), "edge {} to", edge.id);
    }
}

#[test]
fn renders_every_format() {
    for format in [GraphFormat::Svg, GraphFormat::Dot, GraphFormat::Mermaid] {
        let options = ExportOptions {
            format,
            validate: true,
        };
        let (content, summary) =
            render_dataset(&Dataset::embedded(), options, &CancelToken::new()).unwrap();

        assert!(!content.is_empty(), "{format} output is empty");
        assert_eq!(summary.nodes, 66);
        assert_eq!(summary.edges, 52);
    }
}

#[test]
fn export_writes_svg_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.svg");

    let summary = export_graph(
        &Dataset::embedded(),
        ExportOptions::default(),
        &path,
        &CancelToken::new(),
    )
    .unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Boeing 737 MAX"));
    assert_eq!(svg.len(), summary.bytes);
}
