#[cfg(test)]
mod tests {
    use crate::battle::session::BattlePhase;
    use crate::battle::tests::common::{
        fragile_enemy, session_in_combat, start_battle, start_run, test_session, use_move,
        TestPokemonBuilder,
    };
    use crate::errors::{CommandError, RosterError};
    use crate::roster::{EnemyRoster, RosterRequest};
    use crate::trainers::Gauntlet;
    use pretty_assertions::assert_eq;
    use schema::{PokemonType, StatusCondition};

    #[test]
    fn test_team_selection_rules() {
        let mut session = test_session(Gauntlet::GymLeaders, vec![]);
        assert_eq!(session.phase(), BattlePhase::Selection);

        session.toggle_selection(25).expect("select");
        session.toggle_selection(25).expect("deselect");
        assert!(session.selection().is_empty());

        assert_eq!(
            session.toggle_selection(0),
            Err(CommandError::UnknownSpecies(0))
        );
        assert_eq!(
            session.toggle_selection(387),
            Err(CommandError::UnknownSpecies(387))
        );

        for id in [1, 2, 3, 4, 5] {
            session.toggle_selection(id).expect("select");
        }
        assert_eq!(
            session.begin_story(),
            Err(CommandError::IncompleteSelection {
                required: 6,
                selected: 5
            })
        );

        session.toggle_selection(386).expect("select");
        assert_eq!(
            session.toggle_selection(150),
            Err(CommandError::SelectionFull(6))
        );
        assert_eq!(session.selection(), &[1, 2, 3, 4, 5, 386]);
        assert_eq!(session.current_message(), "6/6 Pokemon chosen.");
    }

    #[test]
    fn test_commands_outside_their_phase_are_rejected() {
        let mut session = test_session(Gauntlet::GymLeaders, vec![]);
        let log_len = session.log().len();

        assert_eq!(
            session.select_move("pound"),
            Err(CommandError::WrongPhase {
                command: "select_move",
                phase: BattlePhase::Selection
            })
        );
        assert!(session.confirm_start_battle().is_err());
        assert!(session.advance_to_next_trainer().is_err());
        assert!(session.return_to_menu().is_err());
        assert!(session.open_fight_menu().is_err());

        assert_eq!(session.phase(), BattlePhase::Selection);
        assert_eq!(session.log().len(), log_len);
    }

    #[test]
    fn test_intro_requests_both_teams() {
        let mut session = test_session(Gauntlet::GymLeaders, vec![]);

        start_run(&mut session);

        assert_eq!(
            session.pending_roster_request(),
            Some(&RosterRequest {
                player_ids: Some(vec![1, 4, 7, 25, 133, 143]),
                enemy: EnemyRoster::ByType(PokemonType::Rock),
                count: 6,
            })
        );
        assert_eq!(session.current_message(), "Loading Brock's team...");
        assert!(session.toggle_selection(9).is_err());
    }

    #[test]
    fn test_battle_intro_sequence() {
        let session = session_in_combat(
            vec![TestPokemonBuilder::new("Pikachu").build()],
            vec![TestPokemonBuilder::new("Geodude").build()],
            vec![],
        );

        let tail: Vec<&str> = session
            .log()
            .iter()
            .rev()
            .take(5)
            .rev()
            .map(String::as_str)
            .collect();
        assert_eq!(
            tail,
            vec![
                "Brock wants to battle!",
                "Brock: \"My rock hard will crush you, little boy!\"",
                "Brock sent out Geodude!",
                "Go! Pikachu!",
                "What will Pikachu do?",
            ]
        );
    }

    #[test]
    fn test_roster_failure_waits_for_the_player() {
        let mut session = test_session(Gauntlet::GymLeaders, vec![]);
        start_run(&mut session);

        session
            .deliver_rosters(Err(RosterError::Empty))
            .expect("a failed delivery is still accepted");

        assert_eq!(session.phase(), BattlePhase::Loading);
        assert_eq!(session.current_message(), "Error loading battle.");
        assert_eq!(session.load_error(), Some("roster source returned no Pokemon"));
        assert!(session.pending_roster_request().is_none());
        assert!(session.pending_timer().is_none());
        assert_eq!(
            session.deliver_rosters(Err(RosterError::Empty)),
            Err(CommandError::NoPendingRoster)
        );

        session.return_to_menu().expect("back to menu");
        assert_eq!(session.phase(), BattlePhase::Selection);
        assert!(session.selection().is_empty());
        assert!(session.load_error().is_none());
    }

    #[test]
    fn test_missing_player_team_counts_as_failure() {
        let mut session = test_session(Gauntlet::GymLeaders, vec![]);
        start_run(&mut session);

        session
            .deliver_rosters(Ok(crate::roster::RosterDelivery {
                player: None,
                enemy: vec![fragile_enemy("Geodude")],
            }))
            .expect("delivery accepted");

        assert_eq!(session.phase(), BattlePhase::Loading);
        assert!(session.load_error().is_some());
    }

    #[test]
    fn test_trainer_defeat_heals_and_loads_next() {
        let mut session = session_in_combat(
            vec![TestPokemonBuilder::new("Pikachu")
                .with_hp(50)
                .with_status(StatusCondition::Poison)
                .build()],
            vec![fragile_enemy("Geodude")],
            vec![0.5],
        );

        use_move(&mut session, "pound");

        assert_eq!(session.phase(), BattlePhase::NextBattleTransition);
        assert_eq!(
            session.current_message(),
            "You defeated Brock! Your team is fully healed!"
        );
        assert!(session.log().contains(&"Geodude fainted!".to_string()));

        session.advance_to_next_trainer().expect("advance");

        let pikachu = session.player().active_pokemon().expect("active");
        assert_eq!(pikachu.current_hp(), pikachu.max_hp());
        assert_eq!(pikachu.status, None);
        // PP is not restored between battles.
        assert_eq!(pikachu.find_move("pound").map(|m| m.current_pp), Some(34));
        assert_eq!(session.trainer_index(), 1);
        assert_eq!(session.trainer().name, "Misty");
        assert_eq!(session.phase(), BattlePhase::Loading);
        assert_eq!(
            session.pending_roster_request(),
            Some(&RosterRequest {
                player_ids: None,
                enemy: EnemyRoster::ByType(PokemonType::Water),
                count: 6,
            })
        );
    }

    #[test]
    fn test_enemy_sends_out_replacement() {
        let mut session = session_in_combat(
            vec![TestPokemonBuilder::new("Pikachu").build()],
            vec![fragile_enemy("Geodude"), TestPokemonBuilder::new("Onix").build()],
            vec![0.5],
        );

        use_move(&mut session, "pound");

        assert_eq!(session.phase(), BattlePhase::CombatMenu);
        assert_eq!(session.enemy().active_pokemon_index(), 1);
        // Pikachu never left, but it is announced again after the replacement.
        let tail: Vec<&str> = session
            .log()
            .iter()
            .rev()
            .take(3)
            .rev()
            .map(String::as_str)
            .collect();
        assert_eq!(
            tail,
            vec!["Brock sent out Onix!", "Go! Pikachu!", "What will Pikachu do?"]
        );
    }

    #[test]
    fn test_clearing_the_gym_leaders_unlocks_the_elite_four() {
        let mut session = test_session(Gauntlet::GymLeaders, vec![0.5; 8]);
        start_run(&mut session);

        for index in 0..8 {
            let player = (index == 0).then(|| vec![TestPokemonBuilder::new("Pikachu").build()]);
            start_battle(&mut session, player, vec![fragile_enemy("Foe")]);
            use_move(&mut session, "pound");
            if index < 7 {
                assert_eq!(session.phase(), BattlePhase::NextBattleTransition);
                assert!(!session.take_unlock_signal());
                session.advance_to_next_trainer().expect("advance");
            }
        }

        assert_eq!(session.phase(), BattlePhase::Victory);
        assert_eq!(
            session.current_message(),
            "You defeated Giovanni! The Elite Four awaits..."
        );
        assert!(session.take_unlock_signal());
        assert!(!session.take_unlock_signal());

        session.return_to_menu().expect("back to menu");
        assert_eq!(session.phase(), BattlePhase::Selection);
        assert!(session.player().is_empty());
        assert_eq!(session.trainer_index(), 0);
    }

    #[test]
    fn test_elite_four_victory_does_not_unlock() {
        let mut session = test_session(Gauntlet::EliteFour, vec![0.5; 5]);
        start_run(&mut session);

        for index in 0..5 {
            if index == 4 {
                assert_eq!(
                    session.pending_roster_request().map(|r| r.enemy),
                    Some(EnemyRoster::Random)
                );
            }
            let player = (index == 0).then(|| vec![TestPokemonBuilder::new("Pikachu").build()]);
            start_battle(&mut session, player, vec![fragile_enemy("Foe")]);
            use_move(&mut session, "pound");
            if index < 4 {
                session.advance_to_next_trainer().expect("advance");
            }
        }

        assert_eq!(session.phase(), BattlePhase::Victory);
        assert_eq!(
            session.current_message(),
            "You defeated the Elite 4! You are a true Master!"
        );
        assert!(!session.take_unlock_signal());
    }

    #[test]
    fn test_defeat_and_return_to_menu() {
        let mut session = session_in_combat(
            vec![TestPokemonBuilder::new("Pikachu").with_hp(1).build()],
            vec![TestPokemonBuilder::new("Geodude").build()],
            vec![0.5, 0.0, 0.5],
        );
        assert!(session.return_to_menu().is_err());

        use_move(&mut session, "pound");

        assert_eq!(session.phase(), BattlePhase::Defeat);
        assert_eq!(session.current_message(), "You whited out...");
        assert!(session.open_fight_menu().is_err());

        session.return_to_menu().expect("back to menu");
        assert_eq!(session.phase(), BattlePhase::Selection);
        assert!(session.player().is_empty());
    }
}
