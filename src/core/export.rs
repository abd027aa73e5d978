//! End-to-end export: load the tables, check them, build the graph, write the file

use crate::core::cancel::CancelToken;
use crate::core::error::{Error, RenderError};
use crate::core::graph::{build_graph, GraphFormat};
use crate::core::integrity::check_dataset;
use crate::core::models::Fleet;
use crate::core::tables::Dataset;
use crate::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Options for one export run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Output format
    pub format: GraphFormat,
    /// Run the integrity checks before building the graph
    pub validate: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: GraphFormat::Svg,
            validate: true,
        }
    }
}

/// Counts describing a finished export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Aircraft type rows
    pub aircraft: usize,
    /// Family rows
    pub families: usize,
    /// Alias rows
    pub aliases: usize,
    /// Nodes in the rendered graph
    pub nodes: usize,
    /// Edges in the rendered graph
    pub edges: usize,
    /// Bytes written
    pub bytes: usize,
}

/// Render `dataset` to an in-memory document
///
/// Returns the rendered content with a summary whose `bytes` is the content
/// length.
///
/// # Errors
/// Returns the first load, integrity or render failure.
pub fn render_dataset(
    dataset: &Dataset<'_>,
    options: ExportOptions,
    cancel: &CancelToken,
) -> Result<(String, ExportSummary), Error> {
    if options.validate {
        check_dataset(dataset)?;
        debug!("Dataset passed integrity checks");
    }

    let fleet = Fleet::load(dataset)?;
    info!(
        "Loaded {} aircraft types, {} families, {} aliases",
        fleet.aircraft.len(),
        fleet.families.len(),
        fleet.aliases.len()
    );

    let graph = build_graph(&fleet, cancel)?;
    debug!(
        "Built graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let content = options.format.renderer().render(&graph, cancel)?;

    let summary = ExportSummary {
        aircraft: fleet.aircraft.len(),
        families: fleet.families.len(),
        aliases: fleet.aliases.len(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        bytes: content.len(),
    };
    Ok((content, summary))
}

/// Render `dataset` and write it to `output_path`, replacing any existing file
///
/// The document is rendered completely before the file is created, so a
/// failed or cancelled run leaves no new output behind.
///
/// # Errors
/// Returns the first load, integrity, render or write failure.
pub fn export_graph<P: AsRef<Path>>(
    dataset: &Dataset<'_>,
    options: ExportOptions,
    output_path: P,
    cancel: &CancelToken,
) -> Result<ExportSummary, Error> {
    let (content, summary) = render_dataset(dataset, options, cancel)?;
    cancel.check()?;
    write_output(output_path.as_ref(), &content).map_err(RenderError::from)?;
    info!("Wrote {} bytes to {}", summary.bytes, output_path.as_ref().display());
    Ok(summary)
}

fn write_output(path: &Path, content: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}
