use crate::battle::state::{BattleEvent, EventBus, TurnRng};
use crate::battle_data::BattleData;
use crate::battler::{ActiveStatus, Battler};
use schema::StatusEffectKind;
use tracing::error;

/// Attach a status to `target`. An already active status of the same kind has its
/// duration reset instead of stacking, and no event is emitted for the refresh.
pub fn apply_status(
    data: &BattleData,
    target: &mut Battler,
    kind: StatusEffectKind,
    bus: &mut EventBus,
) {
    let Some(status_data) = data.status_data(kind) else {
        error!(status = ?kind, "status effect missing from status table");
        return;
    };

    if let Some(existing) = target.active_statuses.iter_mut().find(|s| s.kind == kind) {
        existing.turns_remaining = status_data.duration;
        return;
    }

    bus.push(BattleEvent::status_applied(target, kind, &status_data.name));
    target.active_statuses.push(ActiveStatus {
        kind,
        data: status_data.clone(),
        turns_remaining: status_data.duration,
    });
}

/// Run the start-of-turn effects of every active status on `battler`: HP drain or
/// regeneration, skip-turn rolls, then countdown and expiry.
///
/// Returns whether the battler may act this turn.
pub fn tick_statuses(battler: &mut Battler, bus: &mut EventBus, rng: &mut TurnRng) -> bool {
    let mut can_act = true;
    let mut statuses = std::mem::take(&mut battler.active_statuses);

    for status in &mut statuses {
        let name = status.data.name.as_str();

        match status.data.damage_per_turn {
            Some(amount) if amount > 0 => {
                let amount = amount.unsigned_abs();
                battler.take_damage(amount);
                bus.push(BattleEvent::status_damage(battler, status.kind, name, amount));
            }
            Some(amount) if amount < 0 => {
                let amount = amount.unsigned_abs();
                battler.heal(amount);
                bus.push(BattleEvent::status_healing(battler, status.kind, name, amount));
            }
            _ => {}
        }

        if let Some(skip_chance) = status.data.skip_turn_chance.filter(|&p| p > 0.0) {
            if rng.chance(skip_chance, "status skip turn") {
                can_act = false;
                bus.push(BattleEvent::status_skip(battler, status.kind, name));
            }
        }

        status.turns_remaining = status.turns_remaining.saturating_sub(1);
    }

    for expired in statuses.iter().filter(|s| s.turns_remaining == 0) {
        bus.push(BattleEvent::status_removed(battler, expired.kind, &expired.data.name));
    }
    statuses.retain(|s| s.turns_remaining > 0);
    battler.active_statuses = statuses;

    can_act
}
