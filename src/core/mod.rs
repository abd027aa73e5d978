//! Core functionality: table loading, integrity checks, graph building and rendering

pub mod cancel;
pub mod error;
pub mod export;
pub mod graph;
pub mod integrity;
pub mod models;
pub mod tables;

/// Returns the current version of the `fleet-graph` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
