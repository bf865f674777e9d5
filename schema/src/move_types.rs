use crate::{ElementType, Move};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Which animation the renderer plays for a move. Not used by battle math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveAnimation {
    Attack,
    Special,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTarget {
    #[serde(rename = "self")]
    User,
    Enemy,
}

/// A status a move may inflict when it connects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusApplication {
    pub effect: StatusEffectKind,
    /// Probability in 0..=1.
    pub chance: f64,
    pub target: StatusTarget,
}

/// Immutable definition of a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: Move,
    pub name: String,
    pub description: String,
    pub category: MoveCategory,
    pub element: ElementType,
    /// 0 for pure status moves.
    pub power: u32,
    /// Percent, 0..=100.
    pub accuracy: u32,
    /// Base critical-hit chance, 0..=1.
    pub crit_rate: f64,
    /// Higher goes first.
    pub priority: i8,
    pub max_pp: u8,
    #[serde(default)]
    pub status_effect: Option<StatusApplication>,
    /// Percent of the user's max HP restored on use.
    #[serde(default)]
    pub healing: Option<u32>,
    /// Fraction of damage dealt taken back as self-damage.
    #[serde(default)]
    pub recoil: Option<f64>,
    pub animation: MoveAnimation,
    #[serde(default)]
    pub visual_effect: Option<String>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.power > 0
    }

    pub fn heals(&self) -> bool {
        self.healing.is_some_and(|percent| percent > 0)
    }

    pub fn inflicts_on(&self, target: StatusTarget) -> bool {
        self.status_effect
            .is_some_and(|application| application.target == target)
    }
}

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
pub enum StatusEffectKind {
    /// Fire damage each turn
    Burned,
    /// Slowed
    Soaked,
    /// Held in place
    Rooted,
    /// Reduced accuracy
    Dazed,
    /// Raised crit chance
    Enlightened,
    /// Heals each turn at the cost of attack
    Mellow,
    /// Raised defense
    Vibing,
    /// May skip the turn
    Stoned,
    /// Raised attack
    Blazed,
}

/// The stats a status effect can scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    Accuracy,
    CritRate,
}

/// Multiplicative modifiers; `0.1` means +10%. Missing entries are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatModifiers {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub accuracy: f64,
    pub crit_rate: f64,
}

impl StatModifiers {
    pub fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Accuracy => self.accuracy,
            StatKind::CritRate => self.crit_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectData {
    pub name: String,
    pub description: String,
    /// Turns the status lasts after being applied or refreshed.
    pub duration: u8,
    /// HP lost each turn; negative values heal.
    #[serde(default)]
    pub damage_per_turn: Option<i32>,
    #[serde(default)]
    pub stat_modifier: StatModifiers,
    /// Per-turn probability that the afflicted battler cannot act.
    #[serde(default)]
    pub skip_turn_chance: Option<f64>,
}
