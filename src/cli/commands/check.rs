//! Check command handler

use super::CommandError;
use fleet_graph::core::integrity::check_dataset;
use fleet_graph::core::models::Fleet;
use fleet_graph::core::tables::{Dataset, Table};
use fleet_graph::{info, Error};

/// Run every integrity check on the compiled-in tables and print their sizes
pub fn run() -> Result<(), CommandError> {
    let dataset = Dataset::embedded();

    check_dataset(&dataset).map_err(Error::from)?;
    info!("Integrity checks passed");

    let fleet = Fleet::load(&dataset).map_err(Error::from)?;
    println!("✓ Integrity checks passed");
    for (table, rows) in [
        (Table::AircraftTypes, fleet.aircraft.len()),
        (Table::Families, fleet.families.len()),
        (Table::Aliases, fleet.aliases.len()),
    ] {
        println!("  {table}: {rows} rows");
    }
    println!("  total: {} rows", fleet.row_count());
    Ok(())
}
