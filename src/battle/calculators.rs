use crate::battle::state::TurnRng;
use crate::pokemon::PokemonInst;
use schema::{effectiveness, MoveData, MoveFlags, StatusCondition};

pub const STAB_MULTIPLIER: f64 = 1.5;
pub const CRITICAL_MULTIPLIER: f64 = 1.5;
pub const HIGH_CRIT_CHANCE: f64 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub effectiveness: f64,
    pub critical: bool,
}

impl DamageOutcome {
    fn no_damage(effectiveness: f64) -> Self {
        DamageOutcome {
            damage: 0,
            effectiveness,
            critical: false,
        }
    }
}

/// Damage and type effectiveness of one hit.
///
/// Status moves always come back as `{0, 1.0}` and a move that reaches for a
/// defender hidden mid-charge whiffs as `{0, 0.0}` unless it is a charge move
/// itself. Neither case consumes a roll.
pub fn calculate_damage(
    attacker: &PokemonInst,
    defender: &PokemonInst,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> DamageOutcome {
    if move_data.is_status_move() {
        return DamageOutcome::no_damage(1.0);
    }

    if defender.volatiles.invulnerable && !move_data.has_flag(MoveFlags::CHARGE) {
        return DamageOutcome::no_damage(0.0);
    }

    let roll = damage_roll(rng.next_unit("Damage Roll"));
    let stab = if attacker.has_type(move_data.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let type_multiplier = effectiveness(move_data.move_type, &defender.types);

    let mut attack = attacker.stats.attack;
    if attacker.status == Some(StatusCondition::Burn) {
        attack /= 2;
    }

    let base = base_damage(attacker.level, move_data.power, attack, defender.stats.defense);
    let mut damage = final_damage(base, stab, type_multiplier, roll);

    let mut critical = false;
    if move_data.has_flag(MoveFlags::HIGH_CRIT) && rng.chance(HIGH_CRIT_CHANCE, "High Crit Check")
    {
        critical = true;
        damage = (damage as f64 * CRITICAL_MULTIPLIER).floor() as u16;
    }

    DamageOutcome {
        damage,
        effectiveness: type_multiplier,
        critical,
    }
}

/// Map a unit roll onto the 217/255 to 254/255 damage spread.
pub fn damage_roll(unit: f64) -> f64 {
    (217.0 + unit.clamp(0.0, 1.0) * 37.0) / 255.0
}

/// `((2 * level / 5 + 2) * power * (attack / defense)) / 50 + 2`, against unmodified defense.
pub fn base_damage(level: u8, power: u16, attack: u16, defense: u16) -> f64 {
    let level = level as f64;
    let ratio = attack as f64 / defense.max(1) as f64;
    ((2.0 * level / 5.0 + 2.0) * power as f64 * ratio) / 50.0 + 2.0
}

pub fn final_damage(base: f64, stab: f64, effectiveness: f64, roll: f64) -> u16 {
    let damage = (base * stab * effectiveness * roll).floor();
    damage.clamp(0.0, u16::MAX as f64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::TestPokemonBuilder;
    use crate::move_data::lookup_move;
    use schema::PokemonType;

    #[test]
    fn test_reference_damage_scenario() {
        // L100, 150 attack into 100 defense with a 90 power move, neutral, max roll.
        let base = base_damage(100, 90, 150, 100);
        assert_eq!(final_damage(base, 1.0, 1.0, 1.0), 115);
    }

    #[test]
    fn test_damage_roll_bounds() {
        assert!((damage_roll(0.0) - 217.0 / 255.0).abs() < f64::EPSILON);
        assert!((damage_roll(1.0) - 254.0 / 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_move_deals_nothing() {
        let attacker = TestPokemonBuilder::new("Jigglypuff").with_attack(500).build();
        let defender = TestPokemonBuilder::new("Onix").with_defense(5).build();
        // No rolls consumed.
        let mut rng = TurnRng::new_for_test(vec![]);

        let outcome = calculate_damage(&attacker, &defender, &lookup_move("growl"), &mut rng);

        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.effectiveness, 1.0);
    }

    #[test]
    fn test_invulnerable_defender_is_untouchable() {
        let attacker = TestPokemonBuilder::new("Pikachu").build();
        let mut defender = TestPokemonBuilder::new("Pidgeot").build();
        defender.volatiles.invulnerable = true;
        let mut rng = TurnRng::new_for_test(vec![]);

        let outcome = calculate_damage(&attacker, &defender, &lookup_move("thunderbolt"), &mut rng);
        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.effectiveness, 0.0);
    }

    #[test]
    fn test_charge_move_reaches_invulnerable_defender() {
        let attacker = TestPokemonBuilder::new("Pidgeot").with_types(vec![PokemonType::Normal]).build();
        let mut defender = TestPokemonBuilder::new("Dugtrio").build();
        defender.volatiles.invulnerable = true;
        let mut rng = TurnRng::new_for_test(vec![0.5]);

        let outcome = calculate_damage(&attacker, &defender, &lookup_move("fly"), &mut rng);
        assert!(outcome.damage > 0);
        assert_eq!(outcome.effectiveness, 1.0);
    }

    #[test]
    fn test_stab_effectiveness_and_burn() {
        let attacker = TestPokemonBuilder::new("Squirtle")
            .with_types(vec![PokemonType::Water])
            .with_attack(100)
            .build();
        let defender = TestPokemonBuilder::new("Charmander")
            .with_types(vec![PokemonType::Fire])
            .with_defense(100)
            .build();
        let surf = lookup_move("surf");

        let mut rng = TurnRng::new_for_test(vec![1.0]);
        let outcome = calculate_damage(&attacker, &defender, &surf, &mut rng);
        let base = base_damage(100, 95, 100, 100);
        let expected = final_damage(base, 1.5, 2.0, 254.0 / 255.0);
        assert_eq!(outcome.damage, expected);
        assert_eq!(outcome.effectiveness, 2.0);

        let mut burned = attacker.clone();
        burned.status = Some(StatusCondition::Burn);
        let mut rng = TurnRng::new_for_test(vec![1.0]);
        let outcome = calculate_damage(&burned, &defender, &surf, &mut rng);
        let base = base_damage(100, 95, 50, 100);
        assert_eq!(outcome.damage, final_damage(base, 1.5, 2.0, 254.0 / 255.0));
    }

    #[test]
    fn test_type_immunity_zeroes_damage() {
        let attacker = TestPokemonBuilder::new("Pikachu").build();
        let defender = TestPokemonBuilder::new("Diglett")
            .with_types(vec![PokemonType::Ground])
            .build();
        let mut rng = TurnRng::new_for_test(vec![0.5]);

        let outcome = calculate_damage(&attacker, &defender, &lookup_move("thunderbolt"), &mut rng);
        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.effectiveness, 0.0);
    }

    #[test]
    fn test_high_crit_multiplies_after_flooring() {
        let attacker = TestPokemonBuilder::new("Scyther").with_types(vec![PokemonType::Bug]).build();
        let defender = TestPokemonBuilder::new("Rhydon").with_types(vec![PokemonType::Ground]).build();
        let slash = lookup_move("slash");

        let mut no_crit = TurnRng::new_for_test(vec![0.5, 0.9]);
        let normal = calculate_damage(&attacker, &defender, &slash, &mut no_crit);
        assert!(!normal.critical);

        let mut crit = TurnRng::new_for_test(vec![0.5, 0.05]);
        let critical = calculate_damage(&attacker, &defender, &slash, &mut crit);
        assert!(critical.critical);
        assert_eq!(critical.damage, (normal.damage as f64 * 1.5).floor() as u16);
    }
}
