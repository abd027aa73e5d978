//! IATA alias model

use super::aircraft::optional;
use crate::core::tables::{columns, Row};
use serde::{Deserialize, Serialize};

/// What an alias points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasTarget {
    /// An aircraft type id
    Aircraft(String),
    /// A family id
    Family(String),
}

/// An alternate IATA code for one aircraft type or family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// The alternate code, primary key
    pub alias: String,

    /// Referenced aircraft type id
    pub aircraft_type: Option<String>,

    /// Referenced family id
    pub aircraft_family: Option<String>,
}

impl Alias {
    /// Build an alias from a table row
    #[must_use]
    pub fn from_row(row: &Row) -> Self {
        Self {
            alias: row.value(columns::ALIAS).to_string(),
            aircraft_type: optional(row, columns::AIRCRAFT_TYPE),
            aircraft_family: optional(row, columns::AIRCRAFT_FAMILY),
        }
    }

    /// The single target of this alias
    ///
    /// `None` when neither or both reference columns are set.
    #[must_use]
    pub fn target(&self) -> Option<AliasTarget> {
        match (&self.aircraft_type, &self.aircraft_family) {
            (Some(aircraft), None) => Some(AliasTarget::Aircraft(aircraft.clone())),
            (None, Some(family)) => Some(AliasTarget::Family(family.clone())),
            _ => None,
        }
    }

    /// Multi-line node label
    #[must_use]
    pub fn label(&self) -> String {
        format!("Alias\nIATA: {}", self.alias)
    }
}
