//! Pokemon Gauntlet Battle Engine
//!
//! A turn-based battle engine for a single-player trainer gauntlet: pick six
//! Pokemon, beat the eight gym leaders, then take on the Elite Four. The core
//! is a synchronous phase machine ([`BattleSession`]); an async runner feeds it
//! timers and rosters for the terminal and MCP front ends.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod interface;
pub mod move_data;
pub mod player;
pub mod pokemon;
pub mod prefab_teams;
pub mod progress;
pub mod roster;
pub mod trainers;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{MoveData, MoveFlags, PokemonType, SecondaryEffect, StatusCondition};

// --- From this crate's modules (`src/`) ---

// The phase machine and its driver.
pub use battle::runner::{BattleInfo, PlayerCommand, SessionRunner};
pub use battle::session::{BattlePhase, BattleSession};
pub use battle::state::{BattleEvent, BattleState, EventBus, Side, TurnRng};

// Core runtime types for a battle.
pub use player::BattlePlayer;
pub use pokemon::PokemonInst;
pub use trainers::{Gauntlet, Trainer};

// Data access and sourcing.
pub use move_data::lookup_move;
pub use roster::{RosterRequest, RosterSource};

pub use config::{GauntletConfig, PacingConfig};
pub use errors::{CommandError, CommandResult, RosterError, SwitchError};
