#[cfg(test)]
mod tests {
    use crate::battle::engine::execute_turn;
    use crate::battle::state::{BattleEventKind, BattlePhase, Winner};
    use crate::battle::tests::common::{
        constant_rng, count_tag, create_test_battle, TestBattlerBuilder,
    };
    use crate::battle_data::BattleData;
    use pretty_assertions::assert_eq;
    use schema::{Move, Species, StatusEffectKind};

    #[test]
    fn test_burn_tick_knocks_out_opponent_before_moves() {
        // Arrange
        let data = BattleData::builtin();
        let player = TestBattlerBuilder::new(Species::Meep, 10).build();
        let opponent = TestBattlerBuilder::new(Species::Cat, 10)
            .with_status(StatusEffectKind::Burned)
            .with_hp(3)
            .build();
        let state = create_test_battle(player, opponent);

        // Act
        let next = execute_turn(&data, &state, Move::Tackle, &mut constant_rng(0.5));

        // Assert
        assert_eq!(next.phase, BattlePhase::End);
        assert_eq!(next.winner, Some(Winner::Player));
        assert_eq!(next.opponent.stats.hp, 0);
        assert_eq!(count_tag(&next, "move_execute"), 0);
        let tags: Vec<_> = next.events.iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec!["turn_start", "status_tick", "faint", "victory"]);
    }

    #[test]
    fn test_player_is_checked_first_when_both_burn_out() {
        let data = BattleData::builtin();
        let player = TestBattlerBuilder::new(Species::Meep, 10)
            .with_status(StatusEffectKind::Burned)
            .with_hp(2)
            .build();
        let opponent = TestBattlerBuilder::new(Species::Cat, 10)
            .with_status(StatusEffectKind::Burned)
            .with_hp(2)
            .build();
        let state = create_test_battle(player, opponent);

        let next = execute_turn(&data, &state, Move::Tackle, &mut constant_rng(0.5));

        assert_eq!(next.winner, Some(Winner::Opponent));
        assert_eq!(count_tag(&next, "defeat"), 1);
        assert_eq!(count_tag(&next, "status_tick"), 2);
    }

    #[test]
    fn test_stoned_player_loses_their_action() {
        // Arrange: a draw of 0.1 passes the 25% skip roll.
        let data = BattleData::builtin();
        let player = TestBattlerBuilder::new(Species::Meep, 10)
            .with_moves(vec![Move::Tackle])
            .with_status(StatusEffectKind::Stoned)
            .build();
        let opponent = TestBattlerBuilder::new(Species::Cat, 10)
            .with_moves(vec![Move::Tackle])
            .build();
        let state = create_test_battle(player, opponent);

        // Act
        let next = execute_turn(&data, &state, Move::Tackle, &mut constant_rng(0.1));

        // Assert: only the opponent moved, and the player kept their PP.
        let movers: Vec<_> = next
            .events
            .iter()
            .filter_map(|e| match &e.kind {
                BattleEventKind::MoveExecute { battler_id, .. } => Some(battler_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(movers, vec![next.opponent.id.as_str()]);
        assert_eq!(next.player.moves[0].current_pp, 35);
        assert_eq!(next.turn, 2);
    }

    #[test]
    fn test_status_expires_during_the_turn() {
        let data = BattleData::builtin();
        let mut player = TestBattlerBuilder::new(Species::Meep, 10)
            .named("Meep")
            .with_status(StatusEffectKind::Dazed)
            .build();
        player.active_statuses[0].turns_remaining = 1;
        let state = create_test_battle(player, TestBattlerBuilder::new(Species::Cat, 10).build());

        let next = execute_turn(&data, &state, Move::Tackle, &mut constant_rng(0.5));

        assert!(next.player.active_statuses.is_empty());
        assert_eq!(count_tag(&next, "status_removed"), 1);
        // The removal is reported before anyone moves.
        let removed = next.events.iter().position(|e| e.tag() == "status_removed");
        let first_move = next.events.iter().position(|e| e.tag() == "move_execute");
        assert!(removed < first_move);
    }

    #[test]
    fn test_inflicted_status_lands_on_the_target() {
        // Nature's bind always roots the enemy when it connects.
        let data = BattleData::builtin();
        let mut player = TestBattlerBuilder::new(Species::Meep, 10)
            .with_moves(vec![Move::NaturesBind])
            .build();
        player.stats.speed = 100;
        let opponent = TestBattlerBuilder::new(Species::Cat, 10)
            .named("Tom")
            .with_moves(vec![Move::Tackle])
            .build();
        let state = create_test_battle(player, opponent);

        let next = execute_turn(&data, &state, Move::NaturesBind, &mut constant_rng(0.5));

        assert!(next.opponent.has_status(StatusEffectKind::Rooted));
        assert_eq!(next.opponent.active_statuses[0].turns_remaining, 4);
        assert!(next
            .events
            .iter()
            .any(|e| e.tag() == "status_applied" && e.message == "Tom is now rooted!"));
        assert_eq!(count_tag(&next, "damage_dealt"), 1);
    }
}
