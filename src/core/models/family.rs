//! Aircraft family model

use super::aircraft::optional;
use crate::core::tables::{columns, Row};
use serde::{Deserialize, Serialize};

/// A grouping of aircraft types; families nest through `parent_family`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    /// Primary key
    pub id: String,

    /// Display name
    pub name: String,

    /// IATA group code, when the family has one
    pub iata: Option<String>,

    /// Id of the enclosing family
    pub parent_family: Option<String>,
}

impl Family {
    /// Build a family from a table row
    #[must_use]
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.value(columns::ID).to_string(),
            name: row.value(columns::NAME).to_string(),
            iata: optional(row, columns::IATA),
            parent_family: optional(row, columns::PARENT_FAMILY),
        }
    }

    /// Multi-line node label; an absent IATA code prints empty
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "Family\n{}\nIATA: {}",
            self.name,
            self.iata.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::TableReader;

    #[test]
    fn test_family_label_without_iata() {
        let (_, row) = TableReader::from_text("f", "id,name,iata,parent_family\n2,Airbus A320neo Family,,1\n")
            .unwrap()
            .next()
            .unwrap()
            .unwrap();

        let family = Family::from_row(&row);
        assert_eq!(family.iata, None);
        assert_eq!(family.parent_family.as_deref(), Some("1"));
        assert_eq!(family.label(), "Family\nAirbus A320neo Family\nIATA: ");
    }
}
