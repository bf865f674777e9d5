use crate::battle::ai::{MoveChoice, MoveSelector, ScoringAI};
use crate::battle::calculators::{calculate_damage, flee_chance, move_hits};
use crate::battle::conditions::{apply_status, tick_statuses};
use crate::battle::state::{
    BattleEvent, BattlePhase, BattleState, EventBus, Side, TurnRng, Winner,
};
use crate::battle::stats::effective_speed;
use crate::battle_data::BattleData;
use crate::battler::{battler_id, Battler};
use crate::errors::ActionError;
use schema::{Move, MoveData, StatusTarget};
use tracing::{debug, error};

/// Start a battle. Both battlers enter with no active statuses; fleeing is only
/// possible against NPCs.
///
/// Ids are stamped from each side and species so the two battlers can always be
/// told apart in events, and the same inputs always produce the same state.
pub fn initialize_battle(player: Battler, opponent: Battler) -> BattleState {
    let player = Battler {
        id: battler_id(true, player.species),
        active_statuses: Vec::new(),
        ..player
    };
    let opponent = Battler {
        id: battler_id(false, opponent.species),
        active_statuses: Vec::new(),
        ..opponent
    };
    let id = format!("battle_{}_vs_{}", player.species, opponent.species);
    debug!(battle = %id, player = %player.name, opponent = %opponent.name, "battle initialized");

    BattleState {
        id,
        events: vec![BattleEvent::battle_start(&opponent)],
        can_flee: opponent.is_npc,
        player,
        opponent,
        turn: 1,
        phase: BattlePhase::Intro,
        winner: None,
    }
}

/// Resolve one full turn with the player using `player_move` and the opponent
/// driven by the default [`ScoringAI`].
pub fn execute_turn(
    data: &BattleData,
    state: &BattleState,
    player_move: Move,
    rng: &mut TurnRng,
) -> BattleState {
    execute_turn_with(data, state, player_move, &ScoringAI, rng)
}

/// Resolve one full turn: validate the player's choice, pick the opponent's move,
/// tick statuses, then let both battlers act in priority/speed order.
///
/// Rejected input leaves the battlers untouched and returns a single `move_select`
/// event. The input state is never modified.
pub fn execute_turn_with(
    data: &BattleData,
    state: &BattleState,
    player_move: Move,
    selector: &dyn MoveSelector,
    rng: &mut TurnRng,
) -> BattleState {
    let player_slot = match validate_turn(state, player_move) {
        Ok(slot) => slot,
        Err(err) => {
            if err == ActionError::OpponentHasNoMoves {
                error!(battle = %state.id, "opponent has no moves");
            }
            return state.with_diagnostic(BattleEvent::move_select(err));
        }
    };

    let mut next = BattleState {
        events: Vec::new(),
        phase: BattlePhase::Execute,
        ..state.clone()
    };
    let mut bus = EventBus::new();

    let opponent_choice = selector.select_move(data, &next.opponent, &next.player, rng);
    bus.push(BattleEvent::turn_start(next.turn));

    let player_can_act = tick_statuses(&mut next.player, &mut bus, rng);
    let opponent_can_act = tick_statuses(&mut next.opponent, &mut bus, rng);

    if next.player.is_fainted() {
        return finish(next, bus, Side::Player);
    }
    if next.opponent.is_fainted() {
        return finish(next, bus, Side::Opponent);
    }

    let player_choice = MoveChoice {
        slot: Some(player_slot),
        data: next.player.moves[player_slot].data.clone(),
    };
    let order = determine_action_order(
        &next.player,
        &next.opponent,
        &player_choice.data,
        &opponent_choice.data,
        rng,
    );

    for side in order {
        let (can_act, choice) = match side {
            Side::Player => (player_can_act, &player_choice),
            Side::Opponent => (opponent_can_act, &opponent_choice),
        };
        let (attacker, defender) = next.split_mut(side);
        if !can_act || attacker.is_fainted() {
            continue;
        }

        if let Some(slot) = choice.slot {
            attacker.moves[slot].use_pp();
        }
        execute_move(data, attacker, defender, &choice.data, &mut bus, rng);

        if let Some(fainted) = fainted_side(&next, side) {
            return finish(next, bus, fainted);
        }
    }

    debug!(battle = %next.id, turn = next.turn, "turn resolved");
    BattleState {
        turn: next.turn + 1,
        phase: BattlePhase::Select,
        events: bus.into_events(),
        ..next
    }
}

fn validate_turn(state: &BattleState, player_move: Move) -> Result<usize, ActionError> {
    if state.is_over() {
        return Err(ActionError::BattleOver);
    }
    let slot = state
        .player
        .move_slot(player_move)
        .ok_or(ActionError::MoveNotKnown(player_move))?;
    if !state.player.moves[slot].has_pp() {
        return Err(ActionError::NoPpRemaining(player_move));
    }
    if state.opponent.moves.is_empty() {
        return Err(ActionError::OpponentHasNoMoves);
    }
    Ok(slot)
}

/// Try to run away from the battle.
pub fn attempt_flee(data: &BattleData, state: &BattleState, rng: &mut TurnRng) -> BattleState {
    attempt_flee_with(data, state, &ScoringAI, rng)
}

/// Try to run away. A failed attempt gives the opponent one free move against the
/// player and advances the turn counter. Status effects do not tick.
pub fn attempt_flee_with(
    data: &BattleData,
    state: &BattleState,
    selector: &dyn MoveSelector,
    rng: &mut TurnRng,
) -> BattleState {
    if state.is_over() {
        return state.with_diagnostic(BattleEvent::move_select(ActionError::BattleOver));
    }
    if !state.can_flee {
        return state.with_diagnostic(BattleEvent::flee_blocked());
    }

    if rng.chance(flee_chance(&state.player, &state.opponent), "flee") {
        debug!(battle = %state.id, "player fled");
        return BattleState {
            phase: BattlePhase::End,
            ..state.with_diagnostic(BattleEvent::flee_success())
        };
    }

    let mut next = BattleState {
        events: Vec::new(),
        ..state.clone()
    };
    let mut bus = EventBus::new();
    bus.push(BattleEvent::flee_failed());

    if !next.opponent.moves.is_empty() {
        let choice = selector.select_move(data, &next.opponent, &next.player, rng);
        let (opponent, player) = next.split_mut(Side::Opponent);
        if let Some(slot) = choice.slot {
            opponent.moves[slot].use_pp();
        }
        execute_move(data, opponent, player, &choice.data, &mut bus, rng);

        if let Some(fainted) = fainted_side(&next, Side::Opponent) {
            return finish(next, bus, fainted);
        }
    }

    BattleState {
        turn: next.turn + 1,
        phase: BattlePhase::Select,
        events: bus.into_events(),
        ..next
    }
}

/// Order the two battlers for this turn: higher move priority first, then higher
/// effective speed, then a coin flip.
pub fn determine_action_order(
    player: &Battler,
    opponent: &Battler,
    player_move: &MoveData,
    opponent_move: &MoveData,
    rng: &mut TurnRng,
) -> [Side; 2] {
    const PLAYER_FIRST: [Side; 2] = [Side::Player, Side::Opponent];
    const OPPONENT_FIRST: [Side; 2] = [Side::Opponent, Side::Player];

    if player_move.priority != opponent_move.priority {
        return if player_move.priority > opponent_move.priority {
            PLAYER_FIRST
        } else {
            OPPONENT_FIRST
        };
    }

    let player_speed = effective_speed(player);
    let opponent_speed = effective_speed(opponent);
    if player_speed != opponent_speed {
        return if player_speed > opponent_speed {
            PLAYER_FIRST
        } else {
            OPPONENT_FIRST
        };
    }

    if rng.chance(0.5, "speed tie") {
        PLAYER_FIRST
    } else {
        OPPONENT_FIRST
    }
}

/// Carry out one move: accuracy check, damage and recoil, healing, then the
/// status roll. PP is the caller's responsibility.
pub fn execute_move(
    data: &BattleData,
    attacker: &mut Battler,
    defender: &mut Battler,
    move_data: &MoveData,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) {
    bus.push(BattleEvent::move_execute(attacker, defender, move_data.id, &move_data.name));

    if !move_hits(attacker, move_data, rng) {
        bus.push(BattleEvent::miss(attacker, move_data.id));
        return;
    }

    if move_data.is_damaging() {
        let outcome = calculate_damage(data, attacker, defender, move_data, rng);
        defender.take_damage(outcome.damage);

        bus.push(BattleEvent::damage_dealt(
            attacker,
            defender,
            outcome.damage,
            outcome.is_critical,
            outcome.effectiveness,
        ));
        if outcome.is_critical {
            bus.push(BattleEvent::critical(attacker));
        }
        if let Some(event) = BattleEvent::effectiveness(outcome.effectiveness) {
            bus.push(event);
        }

        if let Some(fraction) = move_data.recoil.filter(|&f| f > 0.0) {
            let recoil = (outcome.damage as f64 * fraction).floor() as u32;
            attacker.take_damage(recoil);
            bus.push(BattleEvent::recoil(attacker, recoil));
        }
    }

    if let Some(percent) = move_data.healing.filter(|&p| p > 0) {
        let amount = (attacker.stats.max_hp as f64 * percent as f64 / 100.0).floor() as u32;
        attacker.heal(amount);
        bus.push(BattleEvent::heal(attacker, amount));
    }

    if let Some(application) = move_data.status_effect {
        if rng.chance(application.chance, "status effect") {
            let target = match application.target {
                StatusTarget::User => attacker,
                StatusTarget::Enemy => defender,
            };
            apply_status(data, target, application.effect, bus);
        }
    }
}

/// After `attacker_side` moved: the defender is checked first, then the attacker
/// (recoil can knock out the user).
fn fainted_side(state: &BattleState, attacker_side: Side) -> Option<Side> {
    let defender_side = attacker_side.other();
    if state.battler(defender_side).is_fainted() {
        Some(defender_side)
    } else if state.battler(attacker_side).is_fainted() {
        Some(attacker_side)
    } else {
        None
    }
}

/// End the battle because the battler on `fainted` is out.
fn finish(state: BattleState, mut bus: EventBus, fainted: Side) -> BattleState {
    bus.push(BattleEvent::faint(state.battler(fainted)));
    let winner = fainted.other().as_winner();
    bus.push(match winner {
        Winner::Player => BattleEvent::victory(),
        Winner::Opponent => BattleEvent::defeat(),
    });
    debug!(battle = %state.id, ?winner, turn = state.turn, "battle over");

    BattleState {
        phase: BattlePhase::End,
        winner: Some(winner),
        events: bus.into_events(),
        ..state
    }
}
