#[cfg(test)]
mod tests {
    use crate::battle::engine::attempt_flee;
    use crate::battle::state::{BattleEvent, BattlePhase, BattleState, Winner};
    use crate::battle::tests::common::{
        constant_rng, count_tag, create_test_battle, TestBattlerBuilder,
    };
    use crate::battle_data::BattleData;
    use pretty_assertions::assert_eq;
    use schema::{Move, Species, StatusEffectKind};

    fn meep_battle() -> BattleState {
        create_test_battle(
            TestBattlerBuilder::new(Species::Meep, 10)
                .with_moves(vec![Move::Tackle])
                .build(),
            TestBattlerBuilder::new(Species::Meep, 10)
                .with_moves(vec![Move::Tackle])
                .build(),
        )
    }

    #[test]
    fn test_blocked_flee_changes_nothing() {
        let data = BattleData::builtin();
        let mut state = meep_battle();
        state.can_flee = false;

        let next = attempt_flee(&data, &state, &mut constant_rng(0.0));

        assert_eq!(
            next,
            BattleState {
                events: vec![BattleEvent::flee_blocked()],
                ..state.clone()
            }
        );
        assert_eq!(next.events[0].tag(), "flee_fail");
    }

    #[test]
    fn test_successful_flee_ends_without_winner() {
        // Equal speed: flee chance 0.75.
        let data = BattleData::builtin();
        let state = meep_battle();

        let next = attempt_flee(&data, &state, &mut constant_rng(0.5));

        assert_eq!(next.phase, BattlePhase::End);
        assert_eq!(next.winner, None);
        assert_eq!(next.player, state.player);
        assert_eq!(next.turn, state.turn);
        assert_eq!(next.events.len(), 1);
        assert_eq!(next.events[0].message, "Got away safely!");
    }

    #[test]
    fn test_failed_flee_gives_opponent_a_free_hit() {
        // Arrange
        let data = BattleData::builtin();
        let state = meep_battle();

        // Act: a draw of 1.0 always fails the flee roll.
        let next = attempt_flee(&data, &state, &mut constant_rng(1.0));

        // Assert
        let tags: Vec<_> = next.events.iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["flee_fail", "move_execute", "damage_dealt"]);
        assert_eq!(next.events[0].message, "Couldn't escape!");
        assert_eq!(next.player.stats.hp, 101);
        assert_eq!(next.opponent.stats.hp, next.opponent.stats.max_hp);
        assert_eq!(next.opponent.moves[0].current_pp, 34);
        assert_eq!(next.turn, 2);
        assert_eq!(next.phase, BattlePhase::Select);
    }

    #[test]
    fn test_failed_flee_can_lose_the_battle() {
        let data = BattleData::builtin();
        let mut state = meep_battle();
        state.player.stats.hp = 5;

        let next = attempt_flee(&data, &state, &mut constant_rng(1.0));

        assert_eq!(next.phase, BattlePhase::End);
        assert_eq!(next.winner, Some(Winner::Opponent));
        assert_eq!(count_tag(&next, "faint"), 1);
        assert_eq!(count_tag(&next, "defeat"), 1);
    }

    #[test]
    fn test_failed_flee_does_not_tick_statuses() {
        let data = BattleData::builtin();
        let mut state = meep_battle();
        state.player = TestBattlerBuilder::new(Species::Meep, 10)
            .with_status(StatusEffectKind::Burned)
            .build();

        let next = attempt_flee(&data, &state, &mut constant_rng(1.0));

        assert_eq!(count_tag(&next, "status_tick"), 0);
        assert_eq!(next.player.active_statuses[0].turns_remaining, 3);
    }

    #[test]
    fn test_flee_after_battle_end_is_a_no_op() {
        let data = BattleData::builtin();
        let mut state = meep_battle();
        state.phase = BattlePhase::End;
        state.winner = Some(Winner::Player);

        let next = attempt_flee(&data, &state, &mut constant_rng(0.0));

        assert_eq!(next.winner, Some(Winner::Player));
        assert_eq!(next.player, state.player);
        assert_eq!(next.events.len(), 1);
        assert_eq!(next.events[0].tag(), "move_select");
    }
}
