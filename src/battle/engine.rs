use crate::battle::calculators::calculate_damage;
use crate::battle::conditions::{apply_status_damage, check_action_preventing_conditions};
use crate::battle::state::{BattleEvent, BattleState, EventBus, Side, TurnRng};
use crate::move_data::{lookup_move, STRUGGLE};
use crate::pokemon::PokemonInst;
use schema::{MoveFlags, SecondaryEffect, StatusCondition};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CONFUSION_MIN_TURNS: u8 = 1;
pub const CONFUSION_MAX_TURNS: u8 = 4;
pub const SLEEP_MIN_TURNS: u8 = 2;
pub const SLEEP_MAX_TURNS: u8 = 4;

/// Where the battle goes once a round's narration has played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Both active Pokemon are still standing.
    Continue,
    /// The enemy's active Pokemon fainted; the trainer sends out this slot next.
    EnemyReplacement(usize),
    /// The enemy's last Pokemon fainted.
    TrainerDefeated,
    /// The player's active Pokemon fainted and a teammate can take over.
    PlayerMustSwitch,
    /// The player has nothing left to send out.
    PlayerDefeated,
}

/// Resolve a full round: the player's move, the enemy's reply, then end-of-round damage.
///
/// The player always acts first. A faint at any point ends the round early and
/// the returned outcome says who has to be replaced. If the player's active
/// Pokemon is mid-charge the stored move fires and `player_move` is ignored.
pub fn resolve_round(
    state: &mut BattleState,
    player_move: &str,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> RoundOutcome {
    debug!(player_move, "resolving round");
    if let Some(fainted) = take_turn(state, Side::Player, Some(player_move), rng, bus) {
        return faint_outcome(state, fainted, bus);
    }
    resolve_enemy_turn(state, rng, bus)
}

/// The enemy's half of a round followed by end-of-round damage.
/// Called on its own when the player spent the turn switching.
pub fn resolve_enemy_turn(
    state: &mut BattleState,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> RoundOutcome {
    if let Some(fainted) = take_turn(state, Side::Enemy, None, rng, bus) {
        return faint_outcome(state, fainted, bus);
    }
    end_of_round(state, bus)
}

/// Burn and poison damage, enemy first. The first faint halts the tick.
pub fn end_of_round(state: &mut BattleState, bus: &mut EventBus) -> RoundOutcome {
    for side in [Side::Enemy, Side::Player] {
        let Some(pokemon) = state.active_mut(side) else {
            continue;
        };
        if apply_status_damage(pokemon, bus) {
            return faint_outcome(state, side, bus);
        }
    }
    RoundOutcome::Continue
}

/// Announce the faint on `side` and decide who replaces it.
pub fn faint_outcome(state: &BattleState, side: Side, bus: &mut EventBus) -> RoundOutcome {
    let team = state.side(side);
    if let Some(fainted) = team.active_pokemon() {
        bus.push(BattleEvent::PokemonFainted {
            side,
            pokemon: fainted.name.clone(),
        });
    }

    let outcome = match side {
        Side::Enemy => match team.next_healthy_after(team.active_pokemon_index()) {
            Some(next) => RoundOutcome::EnemyReplacement(next),
            None => RoundOutcome::TrainerDefeated,
        },
        Side::Player => {
            if team.has_healthy_pokemon() {
                RoundOutcome::PlayerMustSwitch
            } else {
                RoundOutcome::PlayerDefeated
            }
        }
    };
    debug!(?side, ?outcome, "pokemon fainted");
    outcome
}

/// One side's action for the round. Returns the side whose active Pokemon fainted, if any.
fn take_turn(
    state: &mut BattleState,
    side: Side,
    chosen: Option<&str>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Option<Side> {
    let attacker = state.active_mut(side)?;
    if attacker.is_fainted() {
        return None;
    }

    // A charged move fires without passing the status gate.
    if let Some(stored) = attacker.volatiles.charging.take() {
        attacker.volatiles.invulnerable = false;
        if side == Side::Enemy {
            bus.push(BattleEvent::ChargeReleased {
                pokemon: attacker.name.clone(),
            });
        }
        return execute_move(state, side, &stored, true, rng, bus);
    }

    if check_action_preventing_conditions(attacker, rng, bus).is_some() {
        return attacker.is_fainted().then_some(side);
    }

    let move_name = if !attacker.has_usable_move() {
        bus.push(BattleEvent::NoMovesLeft {
            pokemon: attacker.name.clone(),
        });
        STRUGGLE.to_string()
    } else {
        match chosen {
            Some(name) => name.to_string(),
            None => choose_random_move(attacker, rng),
        }
    };

    execute_move(state, side, &move_name, false, rng, bus)
}

/// Uniform pick among the moves that still have PP. The caller has checked there is one.
fn choose_random_move(pokemon: &PokemonInst, rng: &mut TurnRng) -> String {
    let usable: Vec<&str> = pokemon.usable_moves().map(|m| m.name.as_str()).collect();
    let index = rng.pick_index(usable.len(), "Enemy Move Choice");
    usable
        .get(index)
        .map_or_else(|| STRUGGLE.to_string(), |name| name.to_string())
}

/// Execute `move_name` for `side` against the opposing active Pokemon.
///
/// `charged_release` marks the second turn of a two-turn move: the charge step
/// is skipped but PP is spent again. Returns the side that fainted from the hit.
pub fn execute_move(
    state: &mut BattleState,
    side: Side,
    move_name: &str,
    charged_release: bool,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Option<Side> {
    let (attacker, defender) = state.combatants_mut(side)?;
    let move_data = lookup_move(move_name);

    attacker.use_pp(move_name);
    bus.push(BattleEvent::MoveUsed {
        side,
        pokemon: attacker.name.clone(),
        move_name: move_data.name.to_string(),
    });

    if move_data.has_flag(MoveFlags::CHARGE) && !charged_release {
        attacker.volatiles.charging = Some(move_name.to_string());
        attacker.volatiles.invulnerable = true;
        bus.push(BattleEvent::ChargingUp {
            pokemon: attacker.name.clone(),
        });
        return None;
    }

    if move_data.accuracy < 100
        && rng.next_unit("Accuracy Check") * 100.0 > f64::from(move_data.accuracy)
    {
        bus.push(BattleEvent::MoveMissed {
            attacker: attacker.name.clone(),
        });
        return None;
    }

    let outcome = calculate_damage(attacker, defender, &move_data, rng);
    if outcome.damage == 0 && defender.volatiles.invulnerable {
        bus.push(BattleEvent::AttackWhiffed {
            defender: defender.name.clone(),
        });
        return None;
    }

    defender.take_damage(outcome.damage);
    bus.push(BattleEvent::AttackLanded {
        target: defender.name.clone(),
        damage: outcome.damage,
        effectiveness: outcome.effectiveness,
        remaining_hp: defender.current_hp(),
    });
    if outcome.critical {
        bus.push(BattleEvent::CriticalHit);
    }

    if outcome.damage > 0 && move_data.has_flag(MoveFlags::DRAIN) {
        let amount = attacker.heal(outcome.damage / 2);
        bus.push(BattleEvent::HealthDrained {
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            amount,
        });
    }

    if !defender.is_fainted() && defender.status.is_none() {
        apply_secondary_effect(defender, &move_data.effect, rng, bus);
    }

    defender.is_fainted().then_some(side.opponent())
}

/// Roll a move's secondary effect against a defender with no status.
fn apply_secondary_effect(
    defender: &mut PokemonInst,
    effect: &SecondaryEffect,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    match *effect {
        SecondaryEffect::None => {}
        SecondaryEffect::Confusion { chance } => {
            if rng.chance(chance, "Confusion Effect Chance")
                && defender.volatiles.confusion.is_none()
            {
                let turns =
                    rng.range_inclusive(CONFUSION_MIN_TURNS, CONFUSION_MAX_TURNS, "Confusion Duration");
                defender.volatiles.confusion = Some(turns);
                bus.push(BattleEvent::BecameConfused {
                    target: defender.name.clone(),
                });
            }
        }
        SecondaryEffect::Status { status, chance } => {
            if rng.chance(chance, "Status Effect Chance") {
                let sleep_turns = if status == StatusCondition::Sleep {
                    rng.range_inclusive(SLEEP_MIN_TURNS, SLEEP_MAX_TURNS, "Sleep Duration")
                } else {
                    0
                };
                defender.apply_status(status, sleep_turns);
                bus.push(BattleEvent::StatusApplied {
                    target: defender.name.clone(),
                    status,
                });
            }
        }
    }
}
