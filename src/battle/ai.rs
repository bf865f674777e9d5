//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::TurnRng;
use crate::battle_data::BattleData;
use crate::battler::Battler;
use ordered_float::OrderedFloat;
use schema::{MoveData, StatusTarget};
use tracing::{debug, warn};

/// The move an AI settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveChoice {
    /// Index into the battler's move list, or `None` for the basic-attack fallback,
    /// which costs no PP.
    pub slot: Option<usize>,
    pub data: MoveData,
}

/// A trait for any system that can pick a move for an NPC battler.
pub trait MoveSelector {
    fn select_move(
        &self,
        data: &BattleData,
        npc: &Battler,
        opponent: &Battler,
        rng: &mut TurnRng,
    ) -> MoveChoice;
}

/// Heuristic selector: favors effective, powerful moves, heals when low, opens
/// with status moves and adds a little noise for variety.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringAI;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    /// Score every move that still has PP, in move-list order. Draws one noise
    /// value per candidate.
    pub fn score_moves(
        &self,
        data: &BattleData,
        npc: &Battler,
        opponent: &Battler,
        rng: &mut TurnRng,
    ) -> Vec<(usize, OrderedFloat<f64>)> {
        npc.moves
            .iter()
            .enumerate()
            .filter(|(_, instance)| instance.has_pp())
            .map(|(slot, instance)| {
                let move_data = &instance.data;
                let mut score = data.type_effectiveness(move_data.element, opponent.element) * 30.0
                    + move_data.power as f64 * 0.5;

                if npc.hp_fraction() < 0.4 && move_data.heals() {
                    score += 50.0;
                }
                if move_data.inflicts_on(StatusTarget::Enemy) && opponent.active_statuses.is_empty() {
                    score += 20.0;
                }
                if move_data.inflicts_on(StatusTarget::User) && npc.hp_fraction() > 0.6 {
                    score += 15.0;
                }

                // Prefer moves with more PP left.
                if move_data.max_pp > 0 {
                    score += instance.current_pp as f64 / move_data.max_pp as f64 * 5.0;
                }

                score += rng.range(-10.0, 10.0, "ai noise");
                (slot, OrderedFloat(score))
            })
            .collect()
    }
}

impl MoveSelector for ScoringAI {
    fn select_move(
        &self,
        data: &BattleData,
        npc: &Battler,
        opponent: &Battler,
        rng: &mut TurnRng,
    ) -> MoveChoice {
        let scores = self.score_moves(data, npc, opponent, rng);

        // Ties keep the earliest move in the list.
        let best = scores
            .into_iter()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best });

        match best {
            Some((slot, score)) => {
                let data = npc.moves[slot].data.clone();
                debug!(npc = %npc.name, move_ = %data.id, score = score.0, "ai selected move");
                MoveChoice {
                    slot: Some(slot),
                    data,
                }
            }
            None => {
                warn!(npc = %npc.name, "no PP left, falling back to basic attack");
                MoveChoice {
                    slot: None,
                    data: data.basic_attack(),
                }
            }
        }
    }
}
