//! Referential-integrity checks over the reference tables
//!
//! Every check is a read-only pass over fresh parses of the tables and returns
//! the first violation it finds, except [`check_references`] which reports all
//! dangling ids of a kind at once.

use crate::core::error::{IntegrityError, ReferenceKind};
use crate::core::tables::{columns, Dataset, Table};
use crate::debug;
use std::collections::{BTreeSet, HashSet};

/// A key column taking part in a uniqueness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec<'a> {
    /// Table holding the column
    pub table: Table,
    /// Column whose values must be unique
    pub column: &'a str,
    /// Whether empty values are skipped instead of rejected
    pub allow_empty: bool,
}

impl<'a> KeySpec<'a> {
    /// A column that must be set on every row
    #[must_use]
    pub const fn required(table: Table, column: &'a str) -> Self {
        Self {
            table,
            column,
            allow_empty: false,
        }
    }

    /// A column that may be empty; set values still must be unique
    #[must_use]
    pub const fn optional(table: Table, column: &'a str) -> Self {
        Self {
            table,
            column,
            allow_empty: true,
        }
    }
}

/// Check that the values of all `specs` together contain no duplicates
///
/// Values are pooled into one set across every spec, so the same value in two
/// different columns is a duplicate too.
///
/// # Errors
/// Returns [`IntegrityError::EmptyKey`] for an empty value in a column not
/// marked `allow_empty`, [`IntegrityError::DuplicateKey`] for a repeated value,
/// or [`IntegrityError::Load`] when a table cannot be read.
pub fn check_unique(dataset: &Dataset<'_>, specs: &[KeySpec<'_>]) -> Result<(), IntegrityError> {
    let mut seen: HashSet<String> = HashSet::new();

    for spec in specs {
        for item in dataset.rows(spec.table)? {
            let (line, row) = item?;
            let value = row.value(spec.column);

            if value.is_empty() {
                if spec.allow_empty {
                    continue;
                }
                return Err(IntegrityError::EmptyKey {
                    table: spec.table.name().to_string(),
                    column: spec.column.to_string(),
                    line,
                });
            }

            if !seen.insert(value.to_string()) {
                return Err(IntegrityError::DuplicateKey {
                    table: spec.table.name().to_string(),
                    column: spec.column.to_string(),
                    line,
                    value: value.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Check that every row of `table` sets exactly one of `first` and `second`
///
/// # Errors
/// Returns [`IntegrityError::BothReferences`] or
/// [`IntegrityError::NoReference`] naming the first offending line.
pub fn check_exactly_one(
    dataset: &Dataset<'_>,
    table: Table,
    first: &str,
    second: &str,
) -> Result<(), IntegrityError> {
    for item in dataset.rows(table)? {
        let (line, row) = item?;

        match (row.is_set(first), row.is_set(second)) {
            (true, false) | (false, true) => {}
            (true, true) => {
                return Err(IntegrityError::BothReferences {
                    table: table.name().to_string(),
                    first: first.to_string(),
                    second: second.to_string(),
                    line,
                })
            }
            (false, false) => {
                return Err(IntegrityError::NoReference {
                    table: table.name().to_string(),
                    first: first.to_string(),
                    second: second.to_string(),
                    line,
                })
            }
        }
    }

    Ok(())
}

/// Check that every foreign key names an existing row
///
/// Aircraft references come from aliases; family references come from
/// aliases, aircraft types and families. Missing aircraft ids are reported
/// before missing family ids.
///
/// # Errors
/// Returns [`IntegrityError::MissingReferences`] with every unmatched id of
/// the first kind that has any.
pub fn check_references(dataset: &Dataset<'_>) -> Result<(), IntegrityError> {
    let mut expected_aircraft: BTreeSet<String> = BTreeSet::new();
    let mut expected_families: BTreeSet<String> = BTreeSet::new();

    for item in dataset.rows(Table::Aliases)? {
        let (_, row) = item?;
        insert_set(&mut expected_aircraft, row.value(columns::AIRCRAFT_TYPE));
        insert_set(&mut expected_families, row.value(columns::AIRCRAFT_FAMILY));
    }

    for item in dataset.rows(Table::AircraftTypes)? {
        let (_, row) = item?;
        insert_set(&mut expected_families, row.value(columns::FAMILY_ID));
        expected_aircraft.remove(row.value(columns::ID));
    }

    if !expected_aircraft.is_empty() {
        return Err(IntegrityError::MissingReferences {
            kind: ReferenceKind::Aircraft,
            ids: expected_aircraft,
        });
    }

    for item in dataset.rows(Table::Families)? {
        let (_, row) = item?;
        insert_set(&mut expected_families, row.value(columns::PARENT_FAMILY));
    }

    // Second pass: a parent may be declared after its children
    for item in dataset.rows(Table::Families)? {
        let (_, row) = item?;
        expected_families.remove(row.value(columns::ID));
    }

    if !expected_families.is_empty() {
        return Err(IntegrityError::MissingReferences {
            kind: ReferenceKind::Family,
            ids: expected_families,
        });
    }

    Ok(())
}

fn insert_set(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() {
        set.insert(value.to_string());
    }
}

/// Run every dataset invariant in order and stop at the first failure
///
/// 1. Primary keys of aliases, families and aircraft types
/// 2. Aircraft IATA codes, alias codes and family IATA codes as one set
/// 3. Each alias names exactly one target
/// 4. All references resolve
///
/// # Errors
/// Returns the first [`IntegrityError`] found.
pub fn check_dataset(dataset: &Dataset<'_>) -> Result<(), IntegrityError> {
    for table in [Table::Aliases, Table::Families, Table::AircraftTypes] {
        debug!("Checking primary key {}.{}", table, table.key_column());
        check_unique(dataset, &[KeySpec::required(table, table.key_column())])?;
    }

    debug!("Checking global IATA code set");
    check_unique(
        dataset,
        &[
            KeySpec::required(Table::AircraftTypes, columns::IATA),
            KeySpec::required(Table::Aliases, columns::ALIAS),
            KeySpec::optional(Table::Families, columns::IATA),
        ],
    )?;

    debug!("Checking alias targets");
    check_exactly_one(
        dataset,
        Table::Aliases,
        columns::AIRCRAFT_TYPE,
        columns::AIRCRAFT_FAMILY,
    )?;

    debug!("Checking references");
    check_references(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: &str = "id,name,iata,icao,family_id\n\
        1,Airbus A319,319,A319,1\n\
        2,Airbus A320,320,A320,1\n\
        3,Boeing 757-200,752,B752,\n";
    const FAMILIES: &str = "id,name,iata,parent_family\n\
        1,Airbus A320 Family,32S,2\n\
        2,Airbus Narrowbody,,\n";
    const ALIASES: &str = "alias,aircraft_type,aircraft_family\n\
        32A,2,\n\
        32X,,1\n";

    fn dataset() -> Dataset<'static> {
        Dataset {
            aircraft_types: TYPES,
            families: FAMILIES,
            aliases: ALIASES,
        }
    }

    #[test]
    fn test_valid_dataset_passes() {
        assert!(check_dataset(&dataset()).is_ok());
    }

    #[test]
    fn test_duplicate_primary_key() {
        let data = Dataset {
            aircraft_types: "id,name,iata,icao,family_id\n1,A,111,,\n2,B,222,,\n1,C,333,,\n",
            ..dataset()
        };
        let err = check_unique(&data, &[KeySpec::required(Table::AircraftTypes, "id")]).unwrap_err();
        assert!(matches!(
            err,
            IntegrityError::DuplicateKey { line: 3, ref value, .. } if value == "1"
        ));
    }

    #[test]
    fn test_empty_required_key() {
        let data = Dataset {
            aliases: "alias,aircraft_type,aircraft_family\n32A,2,\n,2,\n",
            ..dataset()
        };
        let err = check_unique(&data, &[KeySpec::required(Table::Aliases, "alias")]).unwrap_err();
        assert!(matches!(err, IntegrityError::EmptyKey { line: 2, .. }));
    }

    #[test]
    fn test_optional_key_skips_empty() {
        let specs = [KeySpec::optional(Table::Families, "iata")];
        assert!(check_unique(&dataset(), &specs).is_ok());
    }

    #[test]
    fn test_alias_colliding_with_aircraft_iata() {
        let data = Dataset {
            aliases: "alias,aircraft_type,aircraft_family\n320,2,\n",
            ..dataset()
        };
        let err = check_unique(
            &data,
            &[
                KeySpec::required(Table::AircraftTypes, columns::IATA),
                KeySpec::required(Table::Aliases, columns::ALIAS),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IntegrityError::DuplicateKey { ref table, line: 1, ref value, .. }
                if table == "aircraft_aliases" && value == "320"
        ));
    }

    #[test]
    fn test_family_iata_colliding_with_alias() {
        let data = Dataset {
            families: "id,name,iata,parent_family\n1,Airbus A320 Family,32A,\n2,Airbus Narrowbody,,\n",
            ..dataset()
        };
        let err = check_dataset(&data).unwrap_err();
        assert!(matches!(
            err,
            IntegrityError::DuplicateKey { ref table, ref column, .. }
                if table == "aircraft_families" && column == "iata"
        ));
    }

    #[test]
    fn test_alias_with_both_targets() {
        let data = Dataset {
            aliases: "alias,aircraft_type,aircraft_family\n32A,2,\n32X,2,1\n",
            ..dataset()
        };
        let err = check_exactly_one(&data, Table::Aliases, "aircraft_type", "aircraft_family")
            .unwrap_err();
        assert!(matches!(err, IntegrityError::BothReferences { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_alias_with_no_target() {
        let data = Dataset {
            aliases: "alias,aircraft_type,aircraft_family\n32A,,\n",
            ..dataset()
        };
        let err = check_exactly_one(&data, Table::Aliases, "aircraft_type", "aircraft_family")
            .unwrap_err();
        assert!(matches!(err, IntegrityError::NoReference { line: 1, .. }));
    }

    #[test]
    fn test_short_alias_row_has_no_target() {
        let data = Dataset {
            aliases: "alias,aircraft_type,aircraft_family\n32A\n",
            ..dataset()
        };
        let err = check_exactly_one(&data, Table::Aliases, "aircraft_type", "aircraft_family")
            .unwrap_err();
        assert!(matches!(err, IntegrityError::NoReference { line: 1, .. }));
    }

    #[test]
    fn test_unknown_family_id_is_reported() {
        let data = Dataset {
            aircraft_types: "id,name,iata,icao,family_id\n1,Airbus A319,319,A319,1\n2,Airbus A320,320,A320,42\n",
            ..dataset()
        };
        let err = check_references(&data).unwrap_err();
        match err {
            IntegrityError::MissingReferences { kind, ids } => {
                assert_eq!(kind, ReferenceKind::Family);
                assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["42"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_all_missing_ids_reported_together() {
        let data = Dataset {
            families: "id,name,iata,parent_family\n1,Airbus A320 Family,32S,7\n2,Airbus Narrowbody,,\n",
            aliases: "alias,aircraft_type,aircraft_family\n32A,2,\n32X,,9\n",
            ..dataset()
        };
        let err = check_references(&data).unwrap_err();
        match err {
            IntegrityError::MissingReferences { kind, ids } => {
                assert_eq!(kind, ReferenceKind::Family);
                assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["7", "9"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_aircraft_reported_first() {
        let data = Dataset {
            aliases: "alias,aircraft_type,aircraft_family\n32A,5,\n32X,,9\n",
            ..dataset()
        };
        let err = check_references(&data).unwrap_err();
        assert!(matches!(
            err,
            IntegrityError::MissingReferences { kind: ReferenceKind::Aircraft, .. }
        ));
        assert_eq!(err.to_string(), "missing expected aircraft ids: 5");
    }

    #[test]
    fn test_parent_declared_after_child() {
        // FAMILIES lists family 1 with parent 2 before family 2
        assert!(check_references(&dataset()).is_ok());
    }

    #[test]
    fn test_load_error_surfaces() {
        let data = Dataset {
            families: "",
            ..dataset()
        };
        let err = check_dataset(&data).unwrap_err();
        assert!(matches!(err, IntegrityError::Load(_)));
    }
}
