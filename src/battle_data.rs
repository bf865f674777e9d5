//! Static battle configuration: the element chart, moves, status effects and
//! species tables.
//!
//! A `BattleData` value is built once and passed by reference into every engine
//! entry point, so tests and tools can run against alternate datasets.

mod builtin;

use crate::errors::{DataError, DataResult};
use schema::{
    ElementConfig, ElementType, Move, MoveData, Species, SpeciesData, StatusEffectData,
    StatusEffectKind, NEUTRAL,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{error, warn};

/// Moves handed to a species that has no usable moveset configured.
pub const DEFAULT_KIT: [Move; 4] = [Move::Tackle, Move::Scratch, Move::Glare, Move::Rest];

/// Element used for a species that has no configuration.
pub const DEFAULT_ELEMENT: ElementType = ElementType::Spirit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleData {
    pub elements: BTreeMap<ElementType, ElementConfig>,
    pub moves: BTreeMap<Move, MoveData>,
    pub status_effects: BTreeMap<StatusEffectKind, StatusEffectData>,
    pub species: BTreeMap<Species, SpeciesData>,
}

impl Default for BattleData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BattleData {
    /// The dataset shipped with the game.
    pub fn builtin() -> Self {
        Self {
            elements: builtin::elements(),
            moves: builtin::moves(),
            status_effects: builtin::status_effects(),
            species: builtin::species(),
        }
    }

    pub fn from_ron_str(content: &str) -> DataResult<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load a dataset from a RON file on disk.
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    pub fn to_ron_string(&self) -> DataResult<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn move_data(&self, move_: Move) -> Option<&MoveData> {
        self.moves.get(&move_)
    }

    pub fn status_data(&self, kind: StatusEffectKind) -> Option<&StatusEffectData> {
        self.status_effects.get(&kind)
    }

    pub fn species_data(&self, species: Species) -> Option<&SpeciesData> {
        self.species.get(&species)
    }

    /// Damage multiplier for an attack of element `attacking` against a defender of
    /// element `defending`: 1.5, 1.0 or 0.75.
    pub fn type_effectiveness(&self, attacking: ElementType, defending: ElementType) -> f64 {
        self.elements
            .get(&attacking)
            .map_or(NEUTRAL, |config| config.effectiveness_against(defending))
    }

    pub fn moves_by_element(&self, element: ElementType) -> Vec<&MoveData> {
        self.moves
            .values()
            .filter(|data| data.element == element)
            .collect()
    }

    pub fn element_for(&self, species: Species) -> ElementType {
        match self.species_data(species) {
            Some(data) => data.element,
            None => {
                warn!(%species, "missing element for species, defaulting to {}", DEFAULT_ELEMENT);
                DEFAULT_ELEMENT
            }
        }
    }

    /// Resolve the ordered moveset of a species. Never returns an empty list.
    pub fn moveset_for(&self, species: Species) -> Vec<MoveData> {
        let Some(data) = self.species_data(species) else {
            warn!(%species, "missing moveset for species, using defaults");
            return self.default_kit();
        };

        let moves: Vec<MoveData> = data
            .moveset
            .iter()
            .filter_map(|&move_| {
                let found = self.move_data(move_).cloned();
                if found.is_none() {
                    error!(%species, %move_, "move not found in move table");
                }
                found
            })
            .collect();

        if moves.is_empty() {
            error!(%species, "all moves invalid for species, using defaults");
            return self.default_kit();
        }
        moves
    }

    pub fn display_name_for(&self, species: Species) -> String {
        self.species_data(species)
            .map_or_else(|| species.key().to_string(), |data| data.name.clone())
    }

    /// The move an NPC falls back to once every move is out of PP.
    pub fn basic_attack(&self) -> MoveData {
        self.move_data(Move::Tackle)
            .cloned()
            .unwrap_or_else(builtin::tackle)
    }

    fn default_kit(&self) -> Vec<MoveData> {
        let kit: Vec<MoveData> = DEFAULT_KIT
            .iter()
            .filter_map(|&move_| self.move_data(move_).cloned())
            .collect();
        if kit.is_empty() {
            vec![self.basic_attack()]
        } else {
            kit
        }
    }
}
