//! Data models for the fleet reference tables

pub mod aircraft;
pub mod alias;
pub mod family;
pub mod fleet;

pub use aircraft::AircraftType;
pub use alias::{Alias, AliasTarget};
pub use family::Family;
pub use fleet::Fleet;
