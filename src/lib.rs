//! Pet Battle Engine
//!
//! A deterministic, turn-based battle simulator for collectible pets. Every
//! operation takes the current battle state, the configuration tables and a
//! random source, and returns a fresh state plus the events that narrate it.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod battle_data;
pub mod battler;
pub mod errors;
pub mod opponents;
pub mod progression;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    ElementType,
    Move,
    MoveCategory,
    MoveData,
    Rarity,
    Species,
    SpeciesData,
    StatusEffectData,
    StatusEffectKind,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::engine::{attempt_flee, execute_turn, initialize_battle};
pub use battle::state::{BattleEvent, BattlePhase, BattleState, TurnRng, Winner};

// Battlers and their configuration.
pub use battle_data::BattleData;
pub use battler::{create_battler, Battler, PetTraits};
pub use opponents::{generate_npc_opponent, Difficulty};

// End-of-battle reporting.
pub use progression::{get_battle_summary, BattleSummary};
