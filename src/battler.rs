use crate::battle_data::BattleData;
use schema::{ElementType, Move, MoveData, Species, StatusEffectData, StatusEffectKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 50;

const BASE_ACCURACY: u32 = 100;
const BASE_CRIT_RATE: f64 = 0.05;

/// Largest share a single personality trait can move a stat by.
const TRAIT_INFLUENCE: f64 = 0.05;

/// Id of the battler on one side of a battle, such as `player_meep`. Ids only
/// depend on the inputs, so a seeded battle replays with identical events.
pub fn battler_id(is_player: bool, species: Species) -> String {
    let side = if is_player { "player" } else { "opponent" };
    format!("{side}_{species}")
}

pub fn clamp_level(level: i32) -> u8 {
    level.clamp(MIN_LEVEL as i32, MAX_LEVEL as i32) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattlerStats {
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Percent; 100 is the unmodified baseline.
    pub accuracy: u32,
    /// Fraction in 0..=1.
    pub crit_rate: f64,
}

/// Personality values a pet carries outside of battle, each in 1..=100.
/// A value of 50 leaves the associated stat unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetTraits {
    pub energy: u8,
    pub mood: u8,
    pub intelligence: u8,
    pub luck: u8,
    pub aggression: u8,
    pub resilience: u8,
}

impl Default for PetTraits {
    fn default() -> Self {
        Self {
            energy: 50,
            mood: 50,
            intelligence: 50,
            luck: 50,
            aggression: 50,
            resilience: 50,
        }
    }
}

/// Map a trait value to a modifier in [-5%, +5%].
fn trait_modifier(value: u8) -> f64 {
    let value = value.clamp(1, 100) as f64;
    (value - 50.0) / 50.0 * TRAIT_INFLUENCE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvolutionStage {
    Baby,
    Teen,
    Adult,
    Elder,
}

impl EvolutionStage {
    pub fn name(self) -> &'static str {
        match self {
            EvolutionStage::Baby => "Baby",
            EvolutionStage::Teen => "Teen",
            EvolutionStage::Adult => "Adult",
            EvolutionStage::Elder => "Elder",
        }
    }

    /// Percent bonus applied to hp, attack, defense and speed.
    pub fn stat_bonus(self) -> u32 {
        match self {
            EvolutionStage::Baby => 0,
            EvolutionStage::Teen => 5,
            EvolutionStage::Adult => 10,
            EvolutionStage::Elder => 15,
        }
    }
}

pub fn evolution_stage(level: u8) -> EvolutionStage {
    match level {
        45.. => EvolutionStage::Elder,
        30.. => EvolutionStage::Adult,
        15.. => EvolutionStage::Teen,
        _ => EvolutionStage::Baby,
    }
}

fn scale(stat: u32, factor: f64) -> u32 {
    (stat as f64 * factor).floor() as u32
}

/// Derive the base stats of a battler. Every species gets its own spread from a
/// hash of its key; level scales each stat linearly.
pub fn derive_base_stats(level: u8, species: Species, traits: Option<&PetTraits>) -> BattlerStats {
    let level = clamp_level(level as i32) as f64;
    let key = species.key().as_bytes();
    let hash = match (key.first(), key.last()) {
        (Some(&first), Some(&last)) => first as u32 + last as u32,
        _ => 0,
    };

    let mut hp = (40.0 + (hash % 20) as f64 + level * (5 + hash % 3) as f64).floor() as u32;
    let mut attack =
        (10.0 + (hash % 8) as f64 + level * (1.5 + (hash % 2) as f64 * 0.3)).floor() as u32;
    let mut defense = (8.0
        + ((hash * 3) % 6) as f64
        + level * (1.2 + ((hash * 2) % 2) as f64 * 0.2))
        .floor() as u32;
    let mut speed =
        (8.0 + ((hash * 7) % 10) as f64 + level * (1.0 + ((hash * 5) % 3) as f64 * 0.2)).floor()
            as u32;
    let mut accuracy = BASE_ACCURACY;
    let mut crit_rate = BASE_CRIT_RATE;

    if let Some(traits) = traits {
        speed = scale(speed, 1.0 + trait_modifier(traits.energy));
        accuracy = scale(accuracy, 1.0 + trait_modifier(traits.intelligence));
        // Additive and half weighted: at most +2.5% crit.
        crit_rate += trait_modifier(traits.luck) * 0.5;

        let aggression = trait_modifier(traits.aggression);
        attack = scale(attack, 1.0 + aggression);
        defense = scale(defense, 1.0 - aggression * 0.5);

        let resilience = trait_modifier(traits.resilience);
        defense = scale(defense, 1.0 + resilience);
        hp = scale(hp, 1.0 + resilience * 0.5);
    }

    let bonus = evolution_stage(level as u8).stat_bonus();
    if bonus > 0 {
        let factor = 1.0 + bonus as f64 / 100.0;
        hp = scale(hp, factor);
        attack = scale(attack, factor);
        defense = scale(defense, factor);
        speed = scale(speed, factor);
    }

    BattlerStats {
        max_hp: hp,
        hp,
        attack,
        defense,
        speed,
        accuracy,
        crit_rate,
    }
}

/// A move bound to one battler's remaining uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    #[serde(rename = "move")]
    pub data: MoveData,
    pub current_pp: u8,
}

impl MoveInstance {
    pub fn new(data: MoveData) -> Self {
        let current_pp = data.max_pp;
        Self { data, current_pp }
    }

    pub fn id(&self) -> Move {
        self.data.id
    }

    pub fn has_pp(&self) -> bool {
        self.current_pp > 0
    }

    /// Spend one use. PP never drops below zero.
    pub fn use_pp(&mut self) {
        self.current_pp = self.current_pp.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatus {
    #[serde(rename = "effect")]
    pub kind: StatusEffectKind,
    pub data: StatusEffectData,
    pub turns_remaining: u8,
}

/// One side of a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    pub id: String,
    pub name: String,
    pub species: Species,
    pub element: ElementType,
    pub level: u8,
    pub stats: BattlerStats,
    pub moves: Vec<MoveInstance>,
    pub active_statuses: Vec<ActiveStatus>,
    pub is_player: bool,
    pub is_npc: bool,
}

impl Battler {
    pub fn is_fainted(&self) -> bool {
        self.stats.hp == 0
    }

    /// Subtract HP, stopping at zero. Returns true if the battler fainted.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.stats.hp = self.stats.hp.saturating_sub(amount);
        self.is_fainted()
    }

    /// Restore HP up to the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.stats.hp = self.stats.hp.saturating_add(amount).min(self.stats.max_hp);
    }

    pub fn move_slot(&self, move_: Move) -> Option<usize> {
        self.moves.iter().position(|m| m.id() == move_)
    }

    pub fn has_status(&self, kind: StatusEffectKind) -> bool {
        self.active_statuses.iter().any(|s| s.kind == kind)
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.stats.max_hp == 0 {
            return 0.0;
        }
        self.stats.hp as f64 / self.stats.max_hp as f64
    }
}

/// Build a fresh battler for `species`. Missing configuration falls back to the
/// default element and move kit instead of failing.
pub fn create_battler(
    data: &BattleData,
    species: Species,
    level: u8,
    is_player: bool,
    is_npc: bool,
    name: Option<&str>,
    traits: Option<&PetTraits>,
) -> Battler {
    let level = clamp_level(level as i32);
    let id = battler_id(is_player, species);
    let name = match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => data.display_name_for(species),
    };
    let moves = data
        .moveset_for(species)
        .into_iter()
        .map(MoveInstance::new)
        .collect();

    debug!(%id, %species, level, "created battler");

    Battler {
        id,
        name,
        species,
        element: data.element_for(species),
        level,
        stats: derive_base_stats(level, species, traits),
        moves,
        active_statuses: Vec::new(),
        is_player,
        is_npc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_meep_level_ten_stats() {
        let stats = derive_base_stats(10, Species::Meep, None);
        assert_eq!(
            stats,
            BattlerStats {
                max_hp: 111,
                hp: 111,
                attack: 33,
                defense: 23,
                speed: 27,
                accuracy: 100,
                crit_rate: 0.05,
            }
        );
    }

    #[test]
    fn test_level_is_clamped() {
        assert_eq!(
            derive_base_stats(0, Species::Cat, None),
            derive_base_stats(1, Species::Cat, None)
        );
        assert_eq!(
            derive_base_stats(99, Species::Cat, None),
            derive_base_stats(50, Species::Cat, None)
        );
    }

    #[test]
    fn test_neutral_traits_change_nothing() {
        let plain = derive_base_stats(20, Species::Redfox, None);
        let neutral = derive_base_stats(20, Species::Redfox, Some(&PetTraits::default()));
        assert_eq!(plain, neutral);
    }

    #[test]
    fn test_maxed_traits_apply_five_percent() {
        // Level 10 meep, no evolution bonus: hp 111, atk 33, def 23, spd 27.
        let traits = PetTraits {
            energy: 100,
            mood: 100,
            intelligence: 100,
            luck: 100,
            aggression: 100,
            resilience: 100,
        };
        let stats = derive_base_stats(10, Species::Meep, Some(&traits));

        assert_eq!(stats.speed, 28); // floor(27 * 1.05)
        assert_eq!(stats.accuracy, 105);
        assert!((stats.crit_rate - 0.075).abs() < 1e-9);
        assert_eq!(stats.attack, 34); // floor(33 * 1.05)
        // floor(23 * 0.975) = 22, then floor(22 * 1.05) = 23
        assert_eq!(stats.defense, 23);
        assert_eq!(stats.max_hp, 113); // floor(111 * 1.025)
    }

    #[test]
    fn test_trait_values_are_clamped() {
        let low = PetTraits { energy: 0, ..Default::default() };
        let one = PetTraits { energy: 1, ..Default::default() };
        assert_eq!(
            derive_base_stats(10, Species::Meep, Some(&low)),
            derive_base_stats(10, Species::Meep, Some(&one))
        );
    }

    #[rstest]
    #[case(1, EvolutionStage::Baby)]
    #[case(14, EvolutionStage::Baby)]
    #[case(15, EvolutionStage::Teen)]
    #[case(29, EvolutionStage::Teen)]
    #[case(30, EvolutionStage::Adult)]
    #[case(45, EvolutionStage::Elder)]
    #[case(50, EvolutionStage::Elder)]
    fn test_evolution_stage_thresholds(#[case] level: u8, #[case] expected: EvolutionStage) {
        assert_eq!(evolution_stage(level), expected);
    }

    #[test]
    fn test_evolution_bonus_is_applied() {
        // Level 15 meep: hp 40+1+15*7 = 146, teen bonus 5% -> 153
        let stats = derive_base_stats(15, Species::Meep, None);
        assert_eq!(stats.max_hp, 153);
    }

    #[test]
    fn test_create_battler_resolves_configuration() {
        let data = BattleData::builtin();
        let battler = create_battler(&data, Species::Redfox, 12, true, false, None, None);

        assert_eq!(battler.name, "Red Fox");
        assert_eq!(battler.element, ElementType::Fire);
        assert_eq!(battler.level, 12);
        assert_eq!(battler.id, "player_redfox");
        assert!(battler.active_statuses.is_empty());
        let moves: Vec<Move> = battler.moves.iter().map(|m| m.id()).collect();
        assert_eq!(
            moves,
            vec![Move::Scratch, Move::EmberBlast, Move::BlazeUp, Move::InfernoRush]
        );
        assert!(battler.moves.iter().all(|m| m.current_pp == m.data.max_pp));
    }

    #[test]
    fn test_create_battler_custom_name() {
        let data = BattleData::builtin();
        let battler = create_battler(&data, Species::Cat, 60, false, true, Some("Chill Dude"), None);

        assert_eq!(battler.name, "Chill Dude");
        assert_eq!(battler.level, MAX_LEVEL);
        assert_eq!(battler.id, "opponent_cat");
    }

    #[test]
    fn test_ids_depend_only_on_side_and_species() {
        let data = BattleData::builtin();
        let first = create_battler(&data, Species::Meep, 10, true, false, None, None);
        let again = create_battler(&data, Species::Meep, 10, true, false, None, None);
        let foe = create_battler(&data, Species::Meep, 10, false, true, None, None);

        assert_eq!(first, again);
        assert_eq!(first.id, "player_meep");
        assert_ne!(first.id, foe.id);
    }

    #[test]
    fn test_damage_and_heal_stay_in_bounds() {
        let data = BattleData::builtin();
        let mut battler = create_battler(&data, Species::Dog, 10, true, false, None, None);
        let max_hp = battler.stats.max_hp;

        battler.heal(500);
        assert_eq!(battler.stats.hp, max_hp);
        assert!(!battler.take_damage(10));
        assert_eq!(battler.stats.hp, max_hp - 10);
        assert!(battler.take_damage(10_000));
        assert_eq!(battler.stats.hp, 0);
    }

    #[test]
    fn test_pp_never_underflows() {
        let data = BattleData::builtin();
        let mut instance = MoveInstance::new(data.basic_attack());
        instance.current_pp = 1;
        instance.use_pp();
        instance.use_pp();
        assert_eq!(instance.current_pp, 0);
        assert!(!instance.has_pp());
    }
}
