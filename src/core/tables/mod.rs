//! The three fleet reference tables and the reader that loads them

pub mod embedded;
pub mod reader;

pub use reader::{Completion, Row, Rows, TableReader};

use crate::core::error::LoadError;
use std::fmt;

/// Column names shared by the reference tables
pub mod columns {
    /// Primary key of aircraft types and families
    pub const ID: &str = "id";
    /// Display name
    pub const NAME: &str = "name";
    /// IATA code
    pub const IATA: &str = "iata";
    /// ICAO code (aircraft types only)
    pub const ICAO: &str = "icao";
    /// Aircraft type's family reference
    pub const FAMILY_ID: &str = "family_id";
    /// Family's parent family reference
    pub const PARENT_FAMILY: &str = "parent_family";
    /// Alias code, primary key of the alias table
    pub const ALIAS: &str = "alias";
    /// Alias target when it names an aircraft type
    pub const AIRCRAFT_TYPE: &str = "aircraft_type";
    /// Alias target when it names a family
    pub const AIRCRAFT_FAMILY: &str = "aircraft_family";
}

/// Identifies one of the reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// `aircraft_types.csv`
    AircraftTypes,
    /// `aircraft_families.csv`
    Families,
    /// `aircraft_aliases.csv`
    Aliases,
}

impl Table {
    /// All tables in load order
    pub const ALL: [Self; 3] = [Self::AircraftTypes, Self::Families, Self::Aliases];

    /// Name used in messages and errors
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AircraftTypes => "aircraft_types",
            Self::Families => "aircraft_families",
            Self::Aliases => "aircraft_aliases",
        }
    }

    /// Primary key column
    #[must_use]
    pub const fn key_column(self) -> &'static str {
        match self {
            Self::AircraftTypes | Self::Families => columns::ID,
            Self::Aliases => columns::ALIAS,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Source text for the three tables
///
/// Each call to [`Dataset::rows`] starts a fresh parse, so a table can be read
/// any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    /// Aircraft types CSV
    pub aircraft_types: &'a str,
    /// Aircraft families CSV
    pub families: &'a str,
    /// Aliases CSV
    pub aliases: &'a str,
}

impl Dataset<'static> {
    /// The tables compiled into the binary
    #[must_use]
    pub const fn embedded() -> Self {
        Self {
            aircraft_types: embedded::AIRCRAFT_TYPES,
            families: embedded::AIRCRAFT_FAMILIES,
            aliases: embedded::AIRCRAFT_ALIASES,
        }
    }
}

impl<'a> Dataset<'a> {
    /// Raw CSV text of `table`
    #[must_use]
    pub const fn text(&self, table: Table) -> &'a str {
        match table {
            Table::AircraftTypes => self.aircraft_types,
            Table::Families => self.families,
            Table::Aliases => self.aliases,
        }
    }

    /// Start a new pass over `table`
    ///
    /// # Errors
    /// Returns a [`LoadError`] when the header line cannot be read.
    pub fn rows(&self, table: Table) -> Result<Rows<&'a [u8]>, LoadError> {
        TableReader::from_text(table.name(), self.text(table))
    }
}

impl Default for Dataset<'static> {
    fn default() -> Self {
        Self::embedded()
    }
}
