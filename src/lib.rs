//! Library for `fleet-graph`
//!
//! Loads the embedded aircraft type, family and alias tables, checks their
//! integrity and renders them as a directed graph.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::error::{Error, IntegrityError, LoadError, RenderError};
pub use crate::core::get_version;
