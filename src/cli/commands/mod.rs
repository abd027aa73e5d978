//! CLI command handlers for `fleetgraph`.
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod config;
pub mod render;

use fleet_graph::config::ConfigError;
use fleet_graph::Error;
use std::fmt;

/// Failure of a command that ends the process with a non-zero status
#[derive(Debug)]
pub enum CommandError {
    /// Bad input
    Message(String),
    /// Reading, validating or writing the config failed
    Config(ConfigError),
    /// Loading, checking or rendering failed
    Run(Error),
}

impl From<Error> for CommandError {
    fn from(err: Error) -> Self {
        Self::Run(err)
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => write!(f, "{msg}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Run(err) => write!(f, "{err}"),
        }
    }
}
