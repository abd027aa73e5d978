//! Aircraft type model

use crate::core::tables::{columns, Row};
use serde::{Deserialize, Serialize};

/// A concrete aircraft type (e.g., "Airbus A320")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftType {
    /// Primary key
    pub id: String,

    /// Display name
    pub name: String,

    /// IATA type code (e.g., "320")
    pub iata: String,

    /// ICAO type designator (e.g., "A320")
    pub icao: String,

    /// Id of the family this type belongs to
    pub family_id: Option<String>,
}

impl AircraftType {
    /// Build an aircraft type from a table row
    ///
    /// Missing columns read as empty; an empty `family_id` becomes `None`.
    #[must_use]
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.value(columns::ID).to_string(),
            name: row.value(columns::NAME).to_string(),
            iata: row.value(columns::IATA).to_string(),
            icao: row.value(columns::ICAO).to_string(),
            family_id: optional(row, columns::FAMILY_ID),
        }
    }

    /// Multi-line node label
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "Aircraft\n{}\nIATA: {}\nICAO: {}",
            self.name, self.iata, self.icao
        )
    }
}

/// Read `column` as `None` when empty or absent
pub(super) fn optional(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
