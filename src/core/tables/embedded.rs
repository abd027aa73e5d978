//! Reference tables compiled into the binary

/// Aircraft types: `id,name,iata,icao,family_id`
pub const AIRCRAFT_TYPES: &str = include_str!("../../../data/aircraft_types.csv");

/// Aircraft families: `id,name,iata,parent_family`
pub const AIRCRAFT_FAMILIES: &str = include_str!("../../../data/aircraft_families.csv");

/// IATA aliases: `alias,aircraft_type,aircraft_family`
pub const AIRCRAFT_ALIASES: &str = include_str!("../../../data/aircraft_aliases.csv");
