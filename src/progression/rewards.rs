use crate::battle::state::{BattleEvent, BattleEventKind, BattleState, Winner};
use crate::battler::Battler;
use serde::{Deserialize, Serialize};

// Constants for reward calculations
const BASE_XP: f64 = 75.0;
const BASE_COINS: f64 = 15.0;
const XP_LEVEL_STEP: f64 = 0.1;
const XP_BONUS_MIN: f64 = -0.5;
const XP_BONUS_MAX: f64 = 1.5;
const COIN_LEVEL_STEP: f64 = 0.15;
const COIN_BONUS_MIN: f64 = -0.3;
const COIN_BONUS_MAX: f64 = 2.0;
const CONSOLATION_FRACTION: f64 = 0.2;

/// Calculator for experience and coin rewards based on the level gap between
/// winner and loser.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardCalculator;

impl RewardCalculator {
    /// Experience for beating `loser`.
    /// Formula: floor(75 × loser level × (1 + clamp(0.1 × level gap, -0.5, 1.5)))
    pub fn xp_reward(&self, winner: &Battler, loser: &Battler) -> u32 {
        self.scaled(
            BASE_XP,
            loser.level,
            self.level_gap(winner, loser) * XP_LEVEL_STEP,
            XP_BONUS_MIN,
            XP_BONUS_MAX,
        )
    }

    /// Coins for beating `loser`. Tougher opponents pay out more steeply than XP.
    /// Formula: floor(15 × loser level × (1 + clamp(0.15 × level gap, -0.3, 2.0)))
    pub fn coin_reward(&self, winner: &Battler, loser: &Battler) -> u32 {
        self.scaled(
            BASE_COINS,
            loser.level,
            self.level_gap(winner, loser) * COIN_LEVEL_STEP,
            COIN_BONUS_MIN,
            COIN_BONUS_MAX,
        )
    }

    /// Flat payout for a lost or abandoned battle.
    pub fn consolation_coins(&self) -> u32 {
        (BASE_COINS * CONSOLATION_FRACTION).floor() as u32
    }

    /// Loser level minus winner level; positive when the winner was the underdog.
    fn level_gap(&self, winner: &Battler, loser: &Battler) -> f64 {
        loser.level as f64 - winner.level as f64
    }

    fn scaled(&self, base: f64, level: u8, bonus: f64, min: f64, max: f64) -> u32 {
        let multiplier = 1.0 + bonus.clamp(min, max);
        (base * level as f64 * multiplier).floor() as u32
    }
}

/// End-of-battle report handed to the game layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub won: bool,
    pub xp_gained: u32,
    pub coins_gained: u32,
    pub opponent_name: String,
    pub opponent_level: u8,
    pub turns_played: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
}

/// Summarize a battle from the events carried by `state` itself.
pub fn get_battle_summary(state: &BattleState) -> BattleSummary {
    summarize(state, &state.events)
}

/// Summarize a battle from a caller-accumulated event stream. Each returned state
/// only carries the events of its own operation, so callers wanting whole-battle
/// damage totals keep the stream themselves.
pub fn summarize(state: &BattleState, events: &[BattleEvent]) -> BattleSummary {
    let calculator = RewardCalculator;
    let won = state.winner == Some(Winner::Player);
    let player_id = state.player.id.as_str();

    let (damage_dealt, damage_taken) =
        events
            .iter()
            .fold((0u32, 0u32), |(dealt, taken), event| match &event.kind {
                BattleEventKind::DamageDealt {
                    battler_id,
                    target_id,
                    damage,
                    ..
                } => {
                    if battler_id == player_id && target_id != player_id {
                        (dealt.saturating_add(*damage), taken)
                    } else if target_id == player_id {
                        (dealt, taken.saturating_add(*damage))
                    } else {
                        (dealt, taken)
                    }
                }
                _ => (dealt, taken),
            });

    BattleSummary {
        won,
        xp_gained: if won {
            calculator.xp_reward(&state.player, &state.opponent)
        } else {
            0
        },
        coins_gained: if won {
            calculator.coin_reward(&state.player, &state.opponent)
        } else {
            calculator.consolation_coins()
        },
        opponent_name: state.opponent.name.clone(),
        opponent_level: state.opponent.level,
        turns_played: state.turn,
        damage_dealt,
        damage_taken,
    }
}
