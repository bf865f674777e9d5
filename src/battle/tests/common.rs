use crate::battle::state::{BattlePhase, BattleState, TurnRng};
use crate::battle_data::BattleData;
use crate::battler::{battler_id, create_battler, ActiveStatus, Battler, MoveInstance};
use schema::{Move, Species, StatusEffectKind};

/// A builder for creating test battlers with common defaults.
///
/// # Example
/// ```
/// let meep = TestBattlerBuilder::new(Species::Meep, 10)
///     .with_moves(vec![Move::Tackle])
///     .with_status(StatusEffectKind::Burned)
///     .build();
/// ```
pub struct TestBattlerBuilder {
    species: Species,
    level: u8,
    name: Option<String>,
    moves: Option<Vec<Move>>,
    statuses: Vec<StatusEffectKind>,
    current_hp: Option<u32>,
    is_npc: bool,
}

impl TestBattlerBuilder {
    pub fn new(species: Species, level: u8) -> Self {
        Self {
            species,
            level,
            name: None,
            moves: None,
            statuses: Vec::new(),
            current_hp: None,
            is_npc: false,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Replaces the species moveset. PP starts full.
    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Adds an active status at its full duration.
    pub fn with_status(mut self, status: StatusEffectKind) -> Self {
        self.statuses.push(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn npc(mut self) -> Self {
        self.is_npc = true;
        self
    }

    pub fn build(self) -> Battler {
        let data = BattleData::builtin();
        let mut battler = create_battler(
            &data,
            self.species,
            self.level,
            !self.is_npc,
            self.is_npc,
            self.name.as_deref(),
            None,
        );

        if let Some(moves) = self.moves {
            battler.moves = moves
                .into_iter()
                .map(|move_| match data.move_data(move_) {
                    Some(move_data) => MoveInstance::new(move_data.clone()),
                    None => panic!("No builtin data for {move_:?}"),
                })
                .collect();
        }

        for kind in self.statuses {
            let status_data = match data.status_data(kind) {
                Some(status_data) => status_data.clone(),
                None => panic!("No builtin data for {kind:?}"),
            };
            battler.active_statuses.push(ActiveStatus {
                kind,
                turns_remaining: status_data.duration,
                data: status_data,
            });
        }

        if let Some(hp) = self.current_hp {
            battler.stats.hp = hp.min(battler.stats.max_hp);
        }

        battler
    }
}

/// A scripted RNG that returns `value` for every draw.
pub fn constant_rng(value: f64) -> TurnRng {
    TurnRng::new_for_test(vec![value])
}

/// A battle already in the select phase, with statuses left as built. The opponent
/// is treated as an NPC, so fleeing is allowed, and gets an opponent id so mirror
/// matches can tell the sides apart.
pub fn create_test_battle(player: Battler, opponent: Battler) -> BattleState {
    let opponent = Battler {
        id: battler_id(false, opponent.species),
        is_player: false,
        is_npc: true,
        ..opponent
    };

    BattleState {
        id: "test_battle".to_string(),
        player,
        opponent,
        turn: 1,
        phase: BattlePhase::Select,
        events: Vec::new(),
        winner: None,
        can_flee: true,
    }
}

/// Counts events with the given tag.
pub fn count_tag(state: &BattleState, tag: &str) -> usize {
    state.events.iter().filter(|e| e.tag() == tag).count()
}
