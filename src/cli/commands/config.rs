//! Config command handler
//!
//! `get` shows the defaults with the stored file on top. `set`, `unset` and
//! `reset` are the only operations that touch the file.

use super::CommandError;
use crate::args::ConfigSubcommand;
use fleet_graph::config::{Config, ConfigError, ConfigKey, ConfigLayer};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Dispatch config subcommands
///
/// `stored` is the result of reading `path`; edits refuse to run over a file
/// that could not be read.
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    stored: Result<ConfigLayer, ConfigError>,
    defaults: &ConfigLayer,
    path: &Path,
) -> Result<(), CommandError> {
    match subcommand {
        None => show(&stored.unwrap_or_default(), defaults, path, None),
        Some(ConfigSubcommand::Get { key }) => {
            show(&stored.unwrap_or_default(), defaults, path, key.as_deref())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            set(stored?, path, key.parse()?, &value)?;
            println!("✓ Set {key} = {value}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            unset(stored?, path, key.parse()?)?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(path),
    }
}

/// Print one value, or every value when `key` is `None`
fn show(
    stored: &ConfigLayer,
    defaults: &ConfigLayer,
    path: &Path,
    key: Option<&str>,
) -> Result<(), CommandError> {
    let config = Config::resolve(&[defaults, stored])?;
    match key {
        Some(key) => println!("{}", config.get(key.parse()?)),
        None => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
            println!("\nFile: {}", path.display());
        }
    }
    Ok(())
}

fn set(
    mut stored: ConfigLayer,
    path: &Path,
    key: ConfigKey,
    value: &str,
) -> Result<(), ConfigError> {
    stored.set(key, value)?;
    stored.write(path)
}

fn unset(mut stored: ConfigLayer, path: &Path, key: ConfigKey) -> Result<(), ConfigError> {
    stored.unset(key);
    stored.write(path)
}

/// Delete the config file after confirmation on stdin
fn reset(path: &Path) -> Result<(), CommandError> {
    if !path.exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        fs::remove_file(path).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_writes_only_the_changed_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fleetgraph").join("config.toml");

        set(ConfigLayer::default(), &path, ConfigKey::Format, "mermaid").unwrap();

        let stored = ConfigLayer::read(&path).unwrap();
        assert_eq!(stored.render.format.as_deref(), Some("mermaid"));
        assert_eq!(stored.logging, Default::default());
        assert!(!fs::read_to_string(&path).unwrap().contains("level"));
    }

    #[test]
    fn test_rejected_value_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let err = set(ConfigLayer::default(), &path, ConfigKey::Format, "png").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: ConfigKey::Format, .. }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_unset_drops_stored_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        set(ConfigLayer::default(), &path, ConfigKey::Output, "fleet.dot").unwrap();
        unset(ConfigLayer::read(&path).unwrap(), &path, ConfigKey::Output).unwrap();

        assert_eq!(ConfigLayer::read(&path).unwrap().render.output, None);
    }

    #[test]
    fn test_edits_refuse_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[render\n").unwrap();

        let stored = ConfigLayer::read(&path);
        let subcommand = Some(ConfigSubcommand::Set {
            key: "format".to_string(),
            value: "dot".to_string(),
        });
        let err = run(subcommand, stored, &ConfigLayer::defaults(), &path).unwrap_err();

        assert!(matches!(err, CommandError::Config(ConfigError::Parse { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[render\n");
    }
}
