//! Random NPC opponents for wild encounters.

use crate::battle::state::TurnRng;
use crate::battle_data::BattleData;
use crate::battler::{clamp_level, create_battler, Battler};
use schema::Species;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::{debug, warn};

const LEGENDARY_CHANCE: f64 = 0.05;
/// Below this player level, legendaries only show up on hard.
const LEGENDARY_MIN_LEVEL: u8 = 10;

const NAME_PREFIXES: [&str; 10] = [
    "Chill", "Groovy", "Mellow", "Trippy", "Cosmic", "Dank", "Hazy", "Blazed", "Vibin", "Lifted",
];
const NAME_SUFFIXES: [&str; 10] = [
    "Dude", "Bro", "Homie", "Wanderer", "Tripper", "Dreamer", "Floater", "Chiller", "Seeker",
    "Spirit",
];

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Inclusive bounds of the opponent's level offset from the player.
    pub fn level_offset_range(self) -> (i32, i32) {
        match self {
            Difficulty::Easy => (-3, 0),
            Difficulty::Normal => (-1, 2),
            Difficulty::Hard => (1, 4),
        }
    }
}

/// Roll a random wild opponent scaled to the player's level.
///
/// Draws, in order: the legendary roll, the species index, the level offset,
/// the name prefix and the name suffix.
pub fn generate_npc_opponent(
    data: &BattleData,
    player_level: u8,
    difficulty: Difficulty,
    rng: &mut TurnRng,
) -> Battler {
    let legendary_eligible = difficulty == Difficulty::Hard || player_level >= LEGENDARY_MIN_LEVEL;
    let legendary = rng.chance(LEGENDARY_CHANCE, "legendary encounter") && legendary_eligible;

    let pool = species_pool(data, legendary);
    let index = rng.int_range(0, pool.len() as i32 - 1, "opponent species");
    let species = pool
        .get(index.max(0) as usize)
        .copied()
        .unwrap_or(Species::Cat);

    let (min_offset, max_offset) = difficulty.level_offset_range();
    let offset = rng.int_range(min_offset, max_offset, "opponent level");
    let level = clamp_level(player_level as i32 + offset);

    let prefix = NAME_PREFIXES[rng.int_range(0, NAME_PREFIXES.len() as i32 - 1, "name prefix") as usize];
    let suffix = NAME_SUFFIXES[rng.int_range(0, NAME_SUFFIXES.len() as i32 - 1, "name suffix") as usize];
    let name = format!("{prefix} {suffix}");

    debug!(%species, level, ?difficulty, legendary, %name, "generated opponent");
    create_battler(data, species, level, false, true, Some(&name), None)
}

/// Species to draw from, in table order. An empty legendary pool falls back to the
/// common pool, and an empty table to every known species.
fn species_pool(data: &BattleData, legendary: bool) -> Vec<Species> {
    let pick = |want_legendary: bool| -> Vec<Species> {
        data.species
            .iter()
            .filter(|(_, species_data)| species_data.is_legendary() == want_legendary)
            .map(|(species, _)| *species)
            .collect()
    };

    let pool = pick(legendary);
    if !pool.is_empty() {
        return pool;
    }
    if legendary {
        warn!("no legendary species configured, using the common pool");
        let common = pick(false);
        if !common.is_empty() {
            return common;
        }
    }
    warn!("species table is empty, drawing from every species");
    Species::iter().collect()
}
