use crate::battler::Battler;
use schema::StatKind;

/// Fold every active status modifier for `stat` over the battler's base value.
///
/// Integer stats are floored and never drop below 1. Crit rate stays a fraction
/// clamped to [0, 1].
pub fn effective_stat(battler: &Battler, stat: StatKind) -> f64 {
    let base = match stat {
        StatKind::Attack => battler.stats.attack as f64,
        StatKind::Defense => battler.stats.defense as f64,
        StatKind::Speed => battler.stats.speed as f64,
        StatKind::Accuracy => battler.stats.accuracy as f64,
        StatKind::CritRate => battler.stats.crit_rate,
    };

    let value = battler
        .active_statuses
        .iter()
        .fold(base, |value, status| {
            value * (1.0 + status.data.stat_modifier.get(stat))
        });

    match stat {
        StatKind::CritRate => value.clamp(0.0, 1.0),
        _ => value.floor().max(1.0),
    }
}

pub fn effective_attack(battler: &Battler) -> u32 {
    effective_stat(battler, StatKind::Attack) as u32
}

pub fn effective_defense(battler: &Battler) -> u32 {
    effective_stat(battler, StatKind::Defense) as u32
}

pub fn effective_speed(battler: &Battler) -> u32 {
    effective_stat(battler, StatKind::Speed) as u32
}

pub fn effective_accuracy(battler: &Battler) -> u32 {
    effective_stat(battler, StatKind::Accuracy) as u32
}

pub fn effective_crit_rate(battler: &Battler) -> f64 {
    effective_stat(battler, StatKind::CritRate)
}
