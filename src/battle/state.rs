use crate::battler::Battler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{Move, StatusEffectKind};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BattlePhase {
    Intro,
    Select,
    Execute,
    End,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Opponent,
}

/// One of the two battlers in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// The result of the battle if the battler on this side is the one left standing.
    pub fn as_winner(self) -> Winner {
        match self {
            Side::Player => Winner::Player,
            Side::Opponent => Winner::Opponent,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effectiveness {
    Super,
    Normal,
    Weak,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier > 1.0 {
            Effectiveness::Super
        } else if multiplier < 1.0 {
            Effectiveness::Weak
        } else {
            Effectiveness::Normal
        }
    }
}

/// The tag and tag-specific fields of a battle event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEventKind {
    BattleStart,
    TurnStart {
        turn: u32,
    },
    /// Diagnostic for a rejected action.
    MoveSelect,
    MoveExecute {
        battler_id: String,
        target_id: String,
        move_id: Move,
    },
    DamageDealt {
        battler_id: String,
        target_id: String,
        damage: u32,
        #[serde(default)]
        is_critical: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        effectiveness: Option<Effectiveness>,
    },
    Heal {
        battler_id: String,
        healing: u32,
    },
    StatusApplied {
        battler_id: String,
        status: StatusEffectKind,
    },
    StatusRemoved {
        battler_id: String,
        status: StatusEffectKind,
    },
    StatusTick {
        battler_id: String,
        status: StatusEffectKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        damage: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        healing: Option<u32>,
    },
    Miss {
        battler_id: String,
        move_id: Move,
    },
    Critical {
        battler_id: String,
    },
    TypeEffective,
    TypeWeak,
    Faint {
        battler_id: String,
    },
    Victory,
    Defeat,
    FleeSuccess,
    FleeFail,
}

/// A narrated occurrence. `message` is ready to show to the player as is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleEvent {
    #[serde(flatten)]
    pub kind: BattleEventKind,
    pub message: String,
}

impl BattleEvent {
    pub fn new(kind: BattleEventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn battle_start(opponent: &Battler) -> Self {
        Self::new(
            BattleEventKind::BattleStart,
            format!("A wild {} appeared!", opponent.name),
        )
    }

    pub fn turn_start(turn: u32) -> Self {
        Self::new(BattleEventKind::TurnStart { turn }, format!("Turn {}", turn))
    }

    pub fn move_select(reason: impl std::fmt::Display) -> Self {
        Self::new(BattleEventKind::MoveSelect, reason.to_string())
    }

    pub fn move_execute(attacker: &Battler, defender: &Battler, move_id: Move, move_name: &str) -> Self {
        Self::new(
            BattleEventKind::MoveExecute {
                battler_id: attacker.id.clone(),
                target_id: defender.id.clone(),
                move_id,
            },
            format!("{} used {}!", attacker.name, move_name),
        )
    }

    pub fn miss(attacker: &Battler, move_id: Move) -> Self {
        Self::new(
            BattleEventKind::Miss {
                battler_id: attacker.id.clone(),
                move_id,
            },
            format!("{}'s attack missed!", attacker.name),
        )
    }

    pub fn damage_dealt(
        attacker: &Battler,
        defender: &Battler,
        damage: u32,
        is_critical: bool,
        effectiveness: Effectiveness,
    ) -> Self {
        Self::new(
            BattleEventKind::DamageDealt {
                battler_id: attacker.id.clone(),
                target_id: defender.id.clone(),
                damage,
                is_critical,
                effectiveness: Some(effectiveness),
            },
            format!("{} took {} damage!", defender.name, damage),
        )
    }

    /// Recoil is reported as damage the attacker deals to itself.
    pub fn recoil(attacker: &Battler, damage: u32) -> Self {
        Self::new(
            BattleEventKind::DamageDealt {
                battler_id: attacker.id.clone(),
                target_id: attacker.id.clone(),
                damage,
                is_critical: false,
                effectiveness: None,
            },
            format!("{} took {} recoil damage!", attacker.name, damage),
        )
    }

    pub fn critical(attacker: &Battler) -> Self {
        Self::new(
            BattleEventKind::Critical {
                battler_id: attacker.id.clone(),
            },
            "Critical hit!",
        )
    }

    /// The follow-up line for a super or not very effective hit; `None` when neutral.
    pub fn effectiveness(effectiveness: Effectiveness) -> Option<Self> {
        match effectiveness {
            Effectiveness::Super => Some(Self::new(
                BattleEventKind::TypeEffective,
                "It's super effective!",
            )),
            Effectiveness::Weak => Some(Self::new(
                BattleEventKind::TypeWeak,
                "It's not very effective...",
            )),
            Effectiveness::Normal => None,
        }
    }

    pub fn heal(battler: &Battler, healing: u32) -> Self {
        Self::new(
            BattleEventKind::Heal {
                battler_id: battler.id.clone(),
                healing,
            },
            format!("{} recovered {} HP!", battler.name, healing),
        )
    }

    pub fn status_applied(battler: &Battler, status: StatusEffectKind, status_name: &str) -> Self {
        Self::new(
            BattleEventKind::StatusApplied {
                battler_id: battler.id.clone(),
                status,
            },
            format!("{} is now {}!", battler.name, status_name.to_lowercase()),
        )
    }

    pub fn status_removed(battler: &Battler, status: StatusEffectKind, status_name: &str) -> Self {
        Self::new(
            BattleEventKind::StatusRemoved {
                battler_id: battler.id.clone(),
                status,
            },
            format!("{} is no longer {}.", battler.name, status_name.to_lowercase()),
        )
    }

    pub fn status_damage(battler: &Battler, status: StatusEffectKind, status_name: &str, damage: u32) -> Self {
        Self::new(
            BattleEventKind::StatusTick {
                battler_id: battler.id.clone(),
                status,
                damage: Some(damage),
                healing: None,
            },
            format!("{} took {} damage from {}!", battler.name, damage, status_name),
        )
    }

    pub fn status_healing(battler: &Battler, status: StatusEffectKind, status_name: &str, healing: u32) -> Self {
        Self::new(
            BattleEventKind::StatusTick {
                battler_id: battler.id.clone(),
                status,
                damage: None,
                healing: Some(healing),
            },
            format!("{} recovered {} HP from {}!", battler.name, healing, status_name),
        )
    }

    pub fn status_skip(battler: &Battler, status: StatusEffectKind, status_name: &str) -> Self {
        Self::new(
            BattleEventKind::StatusTick {
                battler_id: battler.id.clone(),
                status,
                damage: None,
                healing: None,
            },
            format!("{} is too {} to move!", battler.name, status_name.to_lowercase()),
        )
    }

    pub fn faint(battler: &Battler) -> Self {
        Self::new(
            BattleEventKind::Faint {
                battler_id: battler.id.clone(),
            },
            format!("{} fainted!", battler.name),
        )
    }

    pub fn victory() -> Self {
        Self::new(BattleEventKind::Victory, "You won the battle!")
    }

    pub fn defeat() -> Self {
        Self::new(BattleEventKind::Defeat, "You lost the battle!")
    }

    pub fn flee_success() -> Self {
        Self::new(BattleEventKind::FleeSuccess, "Got away safely!")
    }

    pub fn flee_blocked() -> Self {
        Self::new(BattleEventKind::FleeFail, "You can't escape from this battle!")
    }

    pub fn flee_failed() -> Self {
        Self::new(BattleEventKind::FleeFail, "Couldn't escape!")
    }

    /// The wire tag of this event, e.g. `"damage_dealt"`.
    pub fn tag(&self) -> &'static str {
        match self.kind {
            BattleEventKind::BattleStart => "battle_start",
            BattleEventKind::TurnStart { .. } => "turn_start",
            BattleEventKind::MoveSelect => "move_select",
            BattleEventKind::MoveExecute { .. } => "move_execute",
            BattleEventKind::DamageDealt { .. } => "damage_dealt",
            BattleEventKind::Heal { .. } => "heal",
            BattleEventKind::StatusApplied { .. } => "status_applied",
            BattleEventKind::StatusRemoved { .. } => "status_removed",
            BattleEventKind::StatusTick { .. } => "status_tick",
            BattleEventKind::Miss { .. } => "miss",
            BattleEventKind::Critical { .. } => "critical",
            BattleEventKind::TypeEffective => "type_effective",
            BattleEventKind::TypeWeak => "type_weak",
            BattleEventKind::Faint { .. } => "faint",
            BattleEventKind::Victory => "victory",
            BattleEventKind::Defeat => "defeat",
            BattleEventKind::FleeSuccess => "flee_success",
            BattleEventKind::FleeFail => "flee_fail",
        }
    }
}

/// Event bus for collecting the events of one battle operation.
///
/// ```rust,ignore
/// event_bus.print_debug();                               // Just print events
/// event_bus.print_debug_with_message("Turn 1 events:"); // With header message
/// event_bus.print_formatted();                           // Narrated messages
/// println!("{}", event_bus);                             // Display trait
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print the narrated message of every event.
    pub fn print_formatted(&self) {
        for event in &self.events {
            println!("  {}", event.message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  [{}] {}", event.tag(), event.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<f64>, index: usize },
    Seeded { rng: StdRng, seed: u64 },
}

/// The single source of randomness for the engine: a stream of uniform draws in [0, 1].
///
/// Tests script the stream; games use a seeded generator so every battle can be replayed.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Replay `outcomes` in order, starting over when they run out.
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        let outcomes = if outcomes.is_empty() { vec![0.5] } else { outcomes };
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded {
                rng: StdRng::seed_from_u64(seed),
                seed,
            },
        }
    }

    pub fn new_random() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// The seed of a seeded source, for replaying the battle later.
    pub fn seed(&self) -> Option<u64> {
        match self.source {
            RngSource::Seeded { seed, .. } => Some(seed),
            RngSource::Scripted { .. } => None,
        }
    }

    pub fn next_outcome(&mut self, reason: &str) -> f64 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                let outcome = outcomes[*index % outcomes.len()];
                *index += 1;
                outcome.clamp(0.0, 1.0)
            }
            RngSource::Seeded { rng, .. } => rng.random::<f64>(),
        };
        trace!(outcome, reason, "rng draw");
        outcome
    }

    /// Roll against probability `p`. Always consumes exactly one draw.
    pub fn chance(&mut self, p: f64, reason: &str) -> bool {
        let outcome = self.next_outcome(reason);
        p > 0.0 && outcome <= p
    }

    /// Uniform value in [min, max].
    pub fn range(&mut self, min: f64, max: f64, reason: &str) -> f64 {
        min + self.next_outcome(reason) * (max - min)
    }

    /// Uniform integer in [min, max], both ends inclusive.
    pub fn int_range(&mut self, min: i32, max: i32, reason: &str) -> i32 {
        if max <= min {
            self.next_outcome(reason);
            return min;
        }
        let span = (max - min + 1) as f64;
        let value = min + (self.next_outcome(reason) * span).floor() as i32;
        value.min(max)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub id: String,
    pub player: Battler,
    pub opponent: Battler,
    /// Starts at 1 and only ever grows.
    pub turn: u32,
    pub phase: BattlePhase,
    /// Events produced by the operation that returned this state. Not cumulative.
    pub events: Vec<BattleEvent>,
    pub winner: Option<Winner>,
    pub can_flee: bool,
}

impl BattleState {
    pub fn is_over(&self) -> bool {
        self.phase == BattlePhase::End
    }

    pub fn battler(&self, side: Side) -> &Battler {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Mutable access to the battler on `side` and to its foe, in that order.
    pub fn split_mut(&mut self, side: Side) -> (&mut Battler, &mut Battler) {
        match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    /// A copy of this state carrying only `event`, for rejected actions.
    pub fn with_diagnostic(&self, event: BattleEvent) -> BattleState {
        BattleState {
            events: vec![event],
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle_data::BattleData;
    use crate::battler::create_battler;
    use pretty_assertions::assert_eq;
    use schema::Species;

    #[test]
    fn test_scripted_rng_cycles() {
        let mut rng = TurnRng::new_for_test(vec![0.1, 0.9]);
        assert_eq!(rng.next_outcome("a"), 0.1);
        assert_eq!(rng.next_outcome("b"), 0.9);
        assert_eq!(rng.next_outcome("c"), 0.1);
        assert_eq!(TurnRng::new_for_test(vec![]).next_outcome("empty"), 0.5);
    }

    #[test]
    fn test_chance_boundaries() {
        let mut rng = TurnRng::new_for_test(vec![1.0]);
        assert!(rng.chance(1.0, "certain"));
        assert!(!rng.chance(0.95, "likely"));

        let mut rng = TurnRng::new_for_test(vec![0.0]);
        assert!(!rng.chance(0.0, "impossible"));
        assert!(rng.chance(0.01, "unlikely"));
    }

    #[test]
    fn test_ranges() {
        let mut rng = TurnRng::new_for_test(vec![1.0, 0.0, 0.5]);
        assert_eq!(rng.range(0.85, 1.0, "variance"), 1.0);
        assert_eq!(rng.int_range(-3, 0, "offset"), -3);
        assert_eq!(rng.int_range(0, 9, "index"), 5);
        // A draw of 1.0 stays inside the upper bound.
        assert_eq!(rng.int_range(0, 9, "index"), 9);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = TurnRng::from_seed(42);
        let mut b = TurnRng::from_seed(42);
        for _ in 0..20 {
            let draw = a.next_outcome("a");
            assert!((0.0..1.0).contains(&draw));
            assert_eq!(draw, b.next_outcome("b"));
        }
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn test_event_wire_format() {
        let data = BattleData::builtin();
        let attacker = create_battler(&data, Species::Meep, 10, true, false, Some("Meep"), None);
        let defender = create_battler(&data, Species::Redfox, 10, false, true, Some("Fox"), None);

        let event = BattleEvent::damage_dealt(&attacker, &defender, 12, false, Effectiveness::Weak);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "damage_dealt",
                "battler_id": attacker.id,
                "target_id": defender.id,
                "damage": 12,
                "is_critical": false,
                "effectiveness": "weak",
                "message": "Fox took 12 damage!",
            })
        );

        let parsed: BattleEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_unit_events_serialize_tag_and_message_only() {
        let json = serde_json::to_value(BattleEvent::victory()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "victory", "message": "You won the battle!" })
        );
    }

    #[test]
    fn test_status_messages() {
        let data = BattleData::builtin();
        let battler = create_battler(&data, Species::Cat, 5, true, false, Some("Tom"), None);

        assert_eq!(
            BattleEvent::status_applied(&battler, StatusEffectKind::Stoned, "Stoned").message,
            "Tom is now stoned!"
        );
        assert_eq!(
            BattleEvent::status_skip(&battler, StatusEffectKind::Stoned, "Stoned").message,
            "Tom is too stoned to move!"
        );
        assert_eq!(
            BattleEvent::status_damage(&battler, StatusEffectKind::Burned, "Burned", 8).message,
            "Tom took 8 damage from Burned!"
        );
        assert_eq!(
            BattleEvent::status_removed(&battler, StatusEffectKind::Dazed, "Dazed").message,
            "Tom is no longer dazed."
        );
    }

    #[test]
    fn test_event_bus_printing_methods() {
        let mut event_bus = EventBus::new();
        event_bus.push(BattleEvent::turn_start(3));
        event_bus.push(BattleEvent::defeat());

        assert!(!event_bus.is_empty());
        assert_eq!(event_bus.len(), 2);

        event_bus.print_debug();
        event_bus.print_debug_with_message("Test message:");
        event_bus.print_formatted();

        let display_output = format!("{}", event_bus);
        assert!(display_output.contains("[turn_start] Turn 3"));
        assert!(display_output.contains("[defeat] You lost the battle!"));
    }
}
