//! Render command handler
//!
//! Builds the graph from the compiled-in tables and writes it to the
//! configured output file.

use super::CommandError;
use fleet_graph::config::Config;
use fleet_graph::core::cancel::CancelToken;
use fleet_graph::core::export::{export_graph, ExportOptions};
use fleet_graph::core::graph::GraphFormat;
use fleet_graph::core::tables::Dataset;
use fleet_graph::{info, verbose};
use std::path::{Path, PathBuf};

/// Run the render command.
///
/// # Arguments
/// * `config` - Resolved configuration providing the default output and format
/// * `output` - Output path from `-o`, wins over config `output`
/// * `format` - Format name from `-f`, wins over config `format`
/// * `no_check` - Skip the integrity checks
/// * `cancel` - Cancelled by the signal handler
pub fn run(
    config: &Config,
    output: Option<&Path>,
    format: Option<&str>,
    no_check: bool,
    cancel: &CancelToken,
) -> Result<(), CommandError> {
    let (format, output_path) = resolve_target(config, output, format)?;

    info!("Rendering {format} graph to {}", output_path.display());
    verbose!("Output: {}", output_path.display());

    let options = ExportOptions {
        format,
        validate: !no_check,
    };
    let summary = export_graph(&Dataset::embedded(), options, &output_path, cancel)?;

    verbose!(
        "Tables: {} aircraft types, {} families, {} aliases",
        summary.aircraft,
        summary.families,
        summary.aliases
    );
    println!(
        "✓ Graph written: {} ({} nodes, {} edges)",
        output_path.display(),
        summary.nodes,
        summary.edges
    );
    Ok(())
}

/// Pick format and output: flags first, then config, then `graph.<extension>`
fn resolve_target(
    config: &Config,
    output: Option<&Path>,
    format: Option<&str>,
) -> Result<(GraphFormat, PathBuf), CommandError> {
    let format = match format {
        Some(name) => name.parse::<GraphFormat>().map_err(CommandError::Message)?,
        None => config.format,
    };
    let output = output.map_or_else(|| config.output_path(format), Path::to_path_buf);
    Ok((format, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_graph::config::ConfigLayer;

    fn default_config() -> Config {
        Config::resolve(&[&ConfigLayer::defaults()]).unwrap()
    }

    #[test]
    fn test_format_flag_picks_extension() {
        let config = default_config();

        let (format, path) = resolve_target(&config, None, Some("dot")).unwrap();
        assert_eq!(format, GraphFormat::Dot);
        assert_eq!(path, PathBuf::from("graph.dot"));

        let (_, path) = resolve_target(&config, None, Some("mermaid")).unwrap();
        assert_eq!(path, PathBuf::from("graph.md"));

        let (format, path) = resolve_target(&config, None, None).unwrap();
        assert_eq!(format, GraphFormat::Svg);
        assert_eq!(path, PathBuf::from("graph.svg"));
    }

    #[test]
    fn test_flags_win_over_config() {
        let mut stored = ConfigLayer::default();
        stored.set(fleet_graph::config::ConfigKey::Output, "fleet.svg").unwrap();
        let config = Config::resolve(&[&ConfigLayer::defaults(), &stored]).unwrap();

        let (_, path) = resolve_target(&config, None, Some("dot")).unwrap();
        assert_eq!(path, PathBuf::from("fleet.svg"));

        let (_, path) = resolve_target(&config, Some(Path::new("cli.dot")), None).unwrap();
        assert_eq!(path, PathBuf::from("cli.dot"));
    }

    #[test]
    fn test_unknown_format_flag() {
        assert!(matches!(
            resolve_target(&default_config(), None, Some("png")),
            Err(CommandError::Message(_))
        ));
    }
}
