use crate::battle::state::{Effectiveness, TurnRng};
use crate::battle::stats::{
    effective_accuracy, effective_attack, effective_crit_rate, effective_defense, effective_speed,
};
use crate::battle_data::BattleData;
use crate::battler::Battler;
use schema::{MoveCategory, MoveData};

pub const MIN_DAMAGE: u32 = 1;
pub const STAB_BONUS: f64 = 1.2;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const SPECIAL_ATTACK_BONUS: f64 = 1.1;
pub const MAX_FLEE_CHANCE: f64 = 0.95;
const BASE_FLEE_CHANCE: f64 = 0.5;
const FLEE_SPEED_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u32,
    pub is_critical: bool,
    pub effectiveness: Effectiveness,
}

/// Roll the accuracy check: move accuracy times the attacker's effective accuracy,
/// both as percentages.
pub fn move_hits(attacker: &Battler, move_data: &MoveData, rng: &mut TurnRng) -> bool {
    let accuracy = move_data.accuracy as f64 * effective_accuracy(attacker) as f64 / 100.0;
    rng.chance(accuracy / 100.0, "accuracy")
}

/// Compute the damage of a connecting move. Consumes a crit roll then a variance roll.
pub fn calculate_damage(
    data: &BattleData,
    attacker: &Battler,
    defender: &Battler,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> DamageOutcome {
    let special_bonus = match move_data.category {
        MoveCategory::Special => SPECIAL_ATTACK_BONUS,
        MoveCategory::Physical | MoveCategory::Status => 1.0,
    };
    let attack = effective_attack(attacker) as f64 * special_bonus;
    let defense = effective_defense(defender) as f64;
    let level_factor = 2.0 * attacker.level as f64 / 5.0 + 2.0;

    let mut damage = level_factor * move_data.power as f64 * (attack / defense) / 50.0 + 2.0;

    let type_multiplier = data.type_effectiveness(move_data.element, defender.element);
    damage *= type_multiplier;

    if move_data.element == attacker.element {
        damage *= STAB_BONUS;
    }

    let crit_chance = effective_crit_rate(attacker) + move_data.crit_rate;
    let is_critical = rng.chance(crit_chance, "critical hit");
    if is_critical {
        damage *= CRIT_MULTIPLIER;
    }

    damage *= rng.range(0.85, 1.0, "damage variance");

    DamageOutcome {
        damage: (damage.floor() as u32).max(MIN_DAMAGE),
        is_critical,
        effectiveness: Effectiveness::from_multiplier(type_multiplier),
    }
}

/// Probability that the player escapes: grows with the speed ratio, from 0.5 up to 0.95.
pub fn flee_chance(player: &Battler, opponent: &Battler) -> f64 {
    let ratio = effective_speed(player) as f64 / effective_speed(opponent) as f64;
    (BASE_FLEE_CHANCE + ratio * FLEE_SPEED_WEIGHT).min(MAX_FLEE_CHANCE)
}
