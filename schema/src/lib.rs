// Pokemon Gauntlet Schema - Shared type definitions
// Elemental types, status conditions and the move data model used by the
// battle engine and its move catalog.

pub use battle_data::*;
pub use pokemon_types::*;

pub mod battle_data;
pub mod pokemon_types;
