//! Fleet model: the three reference tables loaded into typed records

use super::{AircraftType, Alias, Family};
use crate::core::error::LoadError;
use crate::core::tables::{Dataset, Row, Table};
use serde::Serialize;

/// All aircraft types, families and aliases in file order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Fleet {
    /// Aircraft types
    pub aircraft: Vec<AircraftType>,

    /// Families
    pub families: Vec<Family>,

    /// Aliases
    pub aliases: Vec<Alias>,
}

impl Fleet {
    /// Load every table of `dataset`
    ///
    /// # Errors
    /// Returns the first [`LoadError`] met in any table.
    pub fn load(dataset: &Dataset<'_>) -> Result<Self, LoadError> {
        let aircraft = load_table(dataset, Table::AircraftTypes, AircraftType::from_row)?;
        let families = load_table(dataset, Table::Families, Family::from_row)?;
        let aliases = load_table(dataset, Table::Aliases, Alias::from_row)?;
        Ok(Self {
            aircraft,
            families,
            aliases,
        })
    }

    /// Total number of rows across the three tables
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.aircraft.len() + self.families.len() + self.aliases.len()
    }
}

fn load_table<T>(
    dataset: &Dataset<'_>,
    table: Table,
    build: fn(&Row) -> T,
) -> Result<Vec<T>, LoadError> {
    dataset
        .rows(table)?
        .map(|item| item.map(|(_, row)| build(&row)))
        .collect()
}
