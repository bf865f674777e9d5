use crate::{ElementType, Move};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Species {
    // VRM pets
    Cutephetta,
    Lovebug,
    Meep,
    Pizzalotl,
    Alienfella,
    Redfox,
    Griffin,
    Sparky,
    // GLB animals
    Cat,
    Dog,
    Wolf,
}

impl Species {
    /// The lowercase key of this species (`"redfox"`). Stat derivation hashes this key.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Vrm,
    Glb,
}

/// Per-species configuration: how the pet is named, what element it fights as,
/// which moves it brings and which model the renderer loads for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub element: ElementType,
    pub moveset: Vec<Move>,
    pub model_url: String,
    pub model_type: ModelType,
    pub rarity: Rarity,
}

impl SpeciesData {
    pub fn is_legendary(&self) -> bool {
        self.rarity == Rarity::Legendary
    }
}
