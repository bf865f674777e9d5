// Pet Battle Schema - Shared type definitions
// This crate contains the closed enumerations and plain data records that are
// shared between the battle engine and its configuration tables. Every enum
// serializes to the string identifiers used by the game scripts.

// Re-export the main types
pub use element_types::*;
pub use move_types::*;
pub use moves::*;
pub use species::*;

pub mod element_types;
pub mod move_types;
pub mod moves;
pub mod species;
