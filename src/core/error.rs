//! Error types for loading, validating and rendering the fleet tables

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Failure while reading one of the CSV tables
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input ended before a header line was read
    #[error("failed to read header of {table}: no header line")]
    MissingHeader {
        /// Table being read
        table: String,
    },

    /// The header line could not be parsed
    #[error("failed to read header of {table}: {source}")]
    Header {
        /// Table being read
        table: String,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// A data row could not be parsed; rows before it were already produced
    #[error("{table}: malformed row at line {line}: {source}")]
    Row {
        /// Table being read
        table: String,
        /// Data line number (1-based, header excluded)
        line: usize,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },
}

/// Which referenced table a set of dangling ids belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Ids expected in the aircraft types table
    Aircraft,
    /// Ids expected in the aircraft families table
    Family,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aircraft => write!(f, "aircraft"),
            Self::Family => write!(f, "family"),
        }
    }
}

/// A broken dataset invariant
#[derive(Debug, Error)]
pub enum IntegrityError {
    /// A required key column is empty
    #[error("{table}: {column} is empty in line {line}")]
    EmptyKey {
        /// Table holding the row
        table: String,
        /// Key column
        column: String,
        /// Offending data line
        line: usize,
    },

    /// A key value was already seen in this check
    #[error("{table}: duplicate {column} {value:?} in line {line}")]
    DuplicateKey {
        /// Table holding the row
        table: String,
        /// Key column
        column: String,
        /// Offending data line
        line: usize,
        /// The repeated value
        value: String,
    },

    /// Both mutually exclusive columns are set
    #[error("{table}: both {first} and {second} are set in line {line}")]
    BothReferences {
        /// Table holding the row
        table: String,
        /// First column of the pair
        first: String,
        /// Second column of the pair
        second: String,
        /// Offending data line
        line: usize,
    },

    /// Neither of two mutually exclusive columns is set
    #[error("{table}: neither {first} nor {second} is set in line {line}")]
    NoReference {
        /// Table holding the row
        table: String,
        /// First column of the pair
        first: String,
        /// Second column of the pair
        second: String,
        /// Offending data line
        line: usize,
    },

    /// Referenced ids that do not exist in their table
    #[error("missing expected {kind} ids: {}", join_ids(.ids))]
    MissingReferences {
        /// Table the ids should exist in
        kind: ReferenceKind,
        /// Every unmatched id, sorted
        ids: BTreeSet<String>,
    },

    /// A table could not be read during a check
    #[error(transparent)]
    Load(#[from] LoadError),
}

fn join_ids(ids: &BTreeSet<String>) -> String {
    ids.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Failure while building or rendering the graph
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout library rejected the graph description
    #[error("graph rendering failed: {0}")]
    Backend(String),

    /// An interrupt or termination signal arrived before rendering finished
    #[error("rendering cancelled")]
    Cancelled,

    /// The output file could not be written
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of a full load, check and render run
#[derive(Debug, Error)]
pub enum Error {
    /// Table loading failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Dataset validation failed
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Graph construction or rendering failed
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Error {
    /// Whether this error is the result of a cancellation signal
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Render(RenderError::Cancelled))
    }
}
