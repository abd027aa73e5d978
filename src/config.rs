//! Layered configuration for `fleetgraph`
//!
//! A run's settings come from up to three [`ConfigLayer`]s, later layers
//! winning: the defaults compiled into the binary, the user's config file and
//! the `--config-*` flags. [`Config::resolve`] folds them into typed values.
//! Reading the user file never writes it; only `config set`/`unset` do.

use crate::core::graph::GraphFormat;
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[cfg(not(debug_assertions))]
const DEFAULT_LAYER: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const DEFAULT_LAYER: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Expanded to [`config_dir`] in path values
const DIR_VARIABLE: &str = "$FLEET_GRAPH";

/// Directory holding the user config file (`<platform config dir>/fleetgraph`)
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleetgraph")
}

/// User config file; `dconfig.toml` in debug builds so they don't share settings with release builds
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Configuration failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Config file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// The config file could not be written or removed
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Config file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The layer could not be turned into TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No such key
    #[error("unknown config key '{0}' (known keys: level, file, verbose, output, format)")]
    UnknownKey(String),

    /// The value does not fit the key
    #[error("invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        /// Key being set or resolved
        key: ConfigKey,
        /// Rejected value
        value: String,
        /// What was expected
        reason: String,
    },
}

/// Keys understood by `config get/set/unset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `logging.level`
    Level,
    /// `logging.file`
    File,
    /// `logging.verbose`
    Verbose,
    /// `render.output`
    Output,
    /// `render.format`
    Format,
}

impl ConfigKey {
    /// Every key, in display order
    pub const ALL: [Self; 5] = [
        Self::Level,
        Self::File,
        Self::Verbose,
        Self::Output,
        Self::Format,
    ];

    /// Name used on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::File => "file",
            Self::Verbose => "verbose",
            Self::Output => "output",
            Self::Format => "format",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// `[logging]` table of a layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingLayer {
    /// Runtime log level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Verbose output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

/// `[render]` table of a layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderLayer {
    /// Output file; unset means `graph.<extension>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Output format name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// One source of settings; unset values defer to earlier layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    /// Logging settings
    pub logging: LoggingLayer,
    /// Render settings
    pub render: RenderLayer,
}

impl ConfigLayer {
    /// The layer compiled into this build
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn defaults() -> Self {
        Self::from_toml(DEFAULT_LAYER).expect("Failed to parse compiled-in default configuration")
    }

    /// Parse a layer from TOML text
    ///
    /// # Errors
    /// Returns the TOML error for malformed text or unknown tables.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read the layer stored at `path`; a missing file is an empty layer
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Store this layer at `path`, creating its directory
    ///
    /// # Errors
    /// Returns [`ConfigError::Serialize`] or [`ConfigError::Write`].
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, text).map_err(write_err)
    }

    /// Set `key` after checking the value; an empty `file` or `output` clears it
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when the value doesn't fit the key.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        match key {
            ConfigKey::Level => {
                self.logging.level = Some(parse_level(value)?.as_str().to_string());
            }
            ConfigKey::File => self.logging.file = non_empty(value),
            ConfigKey::Verbose => self.logging.verbose = Some(parse_bool(key, value)?),
            ConfigKey::Output => self.render.output = non_empty(value),
            ConfigKey::Format => {
                self.render.format = Some(parse_format(value)?.to_string());
            }
        }
        Ok(())
    }

    /// Clear `key` so an earlier layer decides it
    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::Level => self.logging.level = None,
            ConfigKey::File => self.logging.file = None,
            ConfigKey::Verbose => self.logging.verbose = None,
            ConfigKey::Output => self.render.output = None,
            ConfigKey::Format => self.render.format = None,
        }
    }

    /// Copy every value set in `other` over this layer
    pub fn overlay(&mut self, other: &Self) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.logging.level, &other.logging.level);
        take(&mut self.logging.file, &other.logging.file);
        take(&mut self.logging.verbose, &other.logging.verbose);
        take(&mut self.render.output, &other.render.output);
        take(&mut self.render.format, &other.render.format);
    }
}

/// Settings for one run, resolved from the layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Runtime log level
    pub level: Level,
    /// Log file, when logging goes to a file
    pub log_file: Option<PathBuf>,
    /// Verbose output
    pub verbose: bool,
    /// Output file, when one is configured
    pub output: Option<PathBuf>,
    /// Output format
    pub format: GraphFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Warn,
            log_file: None,
            verbose: false,
            output: None,
            format: GraphFormat::default(),
        }
    }
}

impl Config {
    /// Fold `layers` in order and type-check the result
    ///
    /// Keys no layer sets keep their [`Default`] value.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a level or format a layer
    /// got wrong, typically from a hand-edited config file.
    pub fn resolve(layers: &[&ConfigLayer]) -> Result<Self, ConfigError> {
        let mut merged = ConfigLayer::default();
        for layer in layers {
            merged.overlay(layer);
        }

        let fallback = Self::default();
        Ok(Self {
            level: merged
                .logging
                .level
                .as_deref()
                .map_or(Ok(fallback.level), parse_level)?,
            log_file: merged.logging.file.as_deref().map(expand_path),
            verbose: merged.logging.verbose.unwrap_or(fallback.verbose),
            output: merged.render.output.as_deref().map(expand_path),
            format: merged
                .render
                .format
                .as_deref()
                .map_or(Ok(fallback.format), parse_format)?,
        })
    }

    /// Where a `format` render goes without `-o`: the configured output, else `graph.<extension>`
    #[must_use]
    pub fn output_path(&self, format: GraphFormat) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("graph.{}", format.extension())))
    }

    /// Value of `key` as `config get` prints it; unset paths print empty
    #[must_use]
    pub fn get(&self, key: ConfigKey) -> String {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        match key {
            ConfigKey::Level => self.level.to_string(),
            ConfigKey::File => path(&self.log_file),
            ConfigKey::Verbose => self.verbose.to_string(),
            ConfigKey::Output => path(&self.output),
            ConfigKey::Format => self.format.to_string(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in ConfigKey::ALL {
            writeln!(f, "  {key:<8} = {}", self.get(key))?;
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn expand_path(value: &str) -> PathBuf {
    if value.contains(DIR_VARIABLE) {
        PathBuf::from(value.replace(DIR_VARIABLE, &config_dir().to_string_lossy()))
    } else {
        PathBuf::from(value)
    }
}

fn invalid(key: ConfigKey, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_level(value: &str) -> Result<Level, ConfigError> {
    Level::parse(value)
        .ok_or_else(|| invalid(ConfigKey::Level, value, "expected error, warn, info or debug"))
}

fn parse_format(value: &str) -> Result<GraphFormat, ConfigError> {
    value
        .parse::<GraphFormat>()
        .map_err(|reason| invalid(ConfigKey::Format, value, reason))
}

fn parse_bool(key: ConfigKey, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}
