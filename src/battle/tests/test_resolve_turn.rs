#[cfg(test)]
mod tests {
    use crate::battle::calculators::{base_damage, damage_roll, final_damage};
    use crate::battle::engine::{resolve_round, RoundOutcome};
    use crate::battle::state::{BattleEvent, EventBus, Side, TurnRng};
    use crate::battle::tests::common::{create_test_battle, events_matching, TestPokemonBuilder};
    use crate::move_data::STRUGGLE;
    use pretty_assertions::assert_eq;

    fn pound_damage(roll: f64) -> u16 {
        final_damage(base_damage(100, 40, 100, 100), 1.5, 1.0, damage_roll(roll))
    }

    #[test]
    fn test_player_moves_first_then_enemy() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Pikachu").build(),
            TestPokemonBuilder::new("Geodude").build(),
        );
        let mut bus = EventBus::new();
        // Player damage roll, enemy move choice, enemy damage roll.
        let mut rng = TurnRng::new_for_test(vec![0.5, 0.0, 0.0]);

        let outcome = resolve_round(&mut state, "pound", &mut rng, &mut bus);

        assert_eq!(outcome, RoundOutcome::Continue);
        let users: Vec<Side> = bus
            .events()
            .iter()
            .filter_map(|event| match event {
                BattleEvent::MoveUsed { side, .. } => Some(*side),
                _ => None,
            })
            .collect();
        assert_eq!(users, vec![Side::Player, Side::Enemy]);

        let enemy = state.enemy.active_pokemon().expect("enemy active");
        let player = state.player.active_pokemon().expect("player active");
        assert_eq!(enemy.current_hp(), 160 - pound_damage(0.5));
        assert_eq!(player.current_hp(), 160 - pound_damage(0.0));
    }

    #[test]
    fn test_narration_lines_for_a_round() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Pikachu").build(),
            TestPokemonBuilder::new("Geodude").build(),
        );
        let mut bus = EventBus::new();
        let mut rng = TurnRng::new_for_test(vec![0.5, 0.0, 0.5]);

        resolve_round(&mut state, "pound", &mut rng, &mut bus);

        let damage = pound_damage(0.5);
        assert_eq!(
            bus.formatted_lines(),
            vec![
                "Pikachu used Pound!".to_string(),
                format!("It dealt {} damage!", damage),
                "Geodude used Pound!".to_string(),
                format!("It dealt {} damage!", damage),
            ]
        );
    }

    #[test]
    fn test_inaccurate_move_can_miss() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Snorlax").with_moves(vec!["slam"]).build(),
            TestPokemonBuilder::new("Geodude").build(),
        );
        let mut bus = EventBus::new();
        // Slam is 75% accurate: a 0.9 roll misses.
        let mut rng = TurnRng::new_for_test(vec![0.9, 0.0, 0.5]);

        resolve_round(&mut state, "slam", &mut rng, &mut bus);

        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::MoveMissed { attacker } if attacker == "Snorlax")));
        let enemy = state.enemy.active_pokemon().expect("enemy active");
        assert_eq!(enemy.current_hp(), enemy.max_hp());
        // PP is spent even on a miss.
        let slam = state.player.active_pokemon().and_then(|p| p.find_move("slam"));
        assert_eq!(slam.map(|m| m.current_pp), Some(19));
    }

    #[test]
    fn test_enemy_only_picks_moves_with_pp() {
        let mut enemy = TestPokemonBuilder::new("Geodude").build();
        // Moveset is pound, tackle, scratch, growl; leave only scratch usable.
        for instance in enemy.moves.iter_mut() {
            if instance.name != "scratch" {
                instance.current_pp = 0;
            }
        }
        let mut state = create_test_battle(TestPokemonBuilder::new("Pikachu").build(), enemy);
        let mut bus = EventBus::new();
        let mut rng = TurnRng::new_for_test(vec![0.5, 0.99, 0.5]);

        resolve_round(&mut state, "pound", &mut rng, &mut bus);

        let enemy_moves = events_matching(&bus, |e| {
            matches!(e, BattleEvent::MoveUsed { side: Side::Enemy, .. })
        });
        assert_eq!(
            enemy_moves,
            vec![&BattleEvent::MoveUsed {
                side: Side::Enemy,
                pokemon: "Geodude".to_string(),
                move_name: "Scratch".to_string(),
            }]
        );
    }

    #[test]
    fn test_struggle_when_every_move_is_empty() {
        let mut player = TestPokemonBuilder::new("Pikachu").build();
        for instance in player.moves.iter_mut() {
            instance.current_pp = 0;
        }
        let mut state = create_test_battle(player, TestPokemonBuilder::new("Geodude").build());
        let mut bus = EventBus::new();
        let mut rng = TurnRng::new_for_test(vec![0.5, 0.0, 0.5]);

        resolve_round(&mut state, "pound", &mut rng, &mut bus);

        assert_eq!(
            bus.events()[0],
            BattleEvent::NoMovesLeft {
                pokemon: "Pikachu".to_string()
            }
        );
        assert_eq!(
            bus.events()[1],
            BattleEvent::MoveUsed {
                side: Side::Player,
                pokemon: "Pikachu".to_string(),
                move_name: STRUGGLE.to_string(),
            }
        );
        let player = state.player.active_pokemon().expect("player active");
        assert!(player.moves.iter().all(|m| m.current_pp == 0));
        let enemy = state.enemy.active_pokemon().expect("enemy active");
        assert!(enemy.current_hp() < enemy.max_hp());
    }

    #[test]
    fn test_type_immunity_reports_no_effect() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Pikachu")
                .with_moves(vec!["thunderbolt"])
                .build(),
            TestPokemonBuilder::new("Diglett")
                .with_types(vec![schema::PokemonType::Ground])
                .build(),
        );
        let mut bus = EventBus::new();
        // Thunderbolt rolls damage (0 after immunity) and its paralysis chance.
        let mut rng = TurnRng::new_for_test(vec![0.5, 0.9, 0.0, 0.5]);

        resolve_round(&mut state, "thunderbolt", &mut rng, &mut bus);

        let lines = bus.formatted_lines();
        assert_eq!(lines[1], "It had no effect...");
        let enemy = state.enemy.active_pokemon().expect("enemy active");
        assert_eq!(enemy.current_hp(), enemy.max_hp());
        assert_eq!(enemy.status, None);
    }
}
