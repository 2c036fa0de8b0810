use crate::battle::state::{ActionFailureReason, BattleEvent, EventBus, TurnRng};
use crate::pokemon::PokemonInst;
use schema::StatusCondition;

pub const THAW_CHANCE: f64 = 0.2;
pub const CONFUSION_SELF_HIT_CHANCE: f64 = 0.5;
pub const FULL_PARALYSIS_CHANCE: f64 = 0.25;

/// Pre-move eligibility check.
///
/// Runs sleep, freeze, confusion and paralysis in that order and stops at the
/// first one that blocks. Waking up or thawing out does not block. A confusion
/// self-hit always blocks, even when it knocks the Pokemon out; the caller
/// checks for the faint.
pub fn check_action_preventing_conditions(
    pokemon: &mut PokemonInst,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> Option<ActionFailureReason> {
    let name = pokemon.name.clone();

    match pokemon.status {
        Some(StatusCondition::Sleep) => {
            if pokemon.volatiles.sleep_turns > 0 {
                pokemon.volatiles.sleep_turns -= 1;
                bus.push(BattleEvent::ActionFailed {
                    pokemon: name,
                    reason: ActionFailureReason::IsAsleep,
                });
                return Some(ActionFailureReason::IsAsleep);
            }
            pokemon.clear_status();
            bus.push(BattleEvent::StatusRemoved {
                target: name.clone(),
                status: StatusCondition::Sleep,
            });
        }
        Some(StatusCondition::Freeze) => {
            if rng.chance(THAW_CHANCE, "Thaw Check") {
                pokemon.clear_status();
                bus.push(BattleEvent::StatusRemoved {
                    target: name.clone(),
                    status: StatusCondition::Freeze,
                });
            } else {
                bus.push(BattleEvent::ActionFailed {
                    pokemon: name,
                    reason: ActionFailureReason::IsFrozen,
                });
                return Some(ActionFailureReason::IsFrozen);
            }
        }
        _ => {}
    }

    if let Some(turns) = pokemon.volatiles.confusion.filter(|&turns| turns > 0) {
        bus.push(BattleEvent::IsConfused {
            pokemon: name.clone(),
        });
        let hurt_itself = rng.chance(CONFUSION_SELF_HIT_CHANCE, "Confusion Self-Hit Check");
        if hurt_itself {
            let damage = confusion_self_damage(pokemon.max_hp());
            pokemon.take_damage(damage);
            bus.push(BattleEvent::ConfusionSelfHit {
                pokemon: name.clone(),
                damage,
            });
            bus.push(BattleEvent::ActionFailed {
                pokemon: name.clone(),
                reason: ActionFailureReason::HurtItselfInConfusion,
            });
        }
        tick_confusion(pokemon, turns, bus);
        if hurt_itself {
            return Some(ActionFailureReason::HurtItselfInConfusion);
        }
    }

    if pokemon.status == Some(StatusCondition::Paralysis)
        && rng.chance(FULL_PARALYSIS_CHANCE, "Full Paralysis Check")
    {
        bus.push(BattleEvent::ActionFailed {
            pokemon: name,
            reason: ActionFailureReason::IsParalyzed,
        });
        return Some(ActionFailureReason::IsParalyzed);
    }

    None
}

fn tick_confusion(pokemon: &mut PokemonInst, turns: u8, bus: &mut EventBus) {
    let remaining = turns - 1;
    if remaining > 0 {
        pokemon.volatiles.confusion = Some(remaining);
        return;
    }
    pokemon.volatiles.confusion = None;
    if !pokemon.is_fainted() {
        bus.push(BattleEvent::ConfusionEnded {
            pokemon: pokemon.name.clone(),
        });
    }
}

/// Self-inflicted confusion damage: an eighth of max HP.
pub fn confusion_self_damage(max_hp: u16) -> u16 {
    max_hp / 8
}

/// End-of-round damage for a persistent status, if it deals any.
/// Burn takes a sixteenth of max HP and poison an eighth, never less than 1.
pub fn status_damage_amount(status: StatusCondition, max_hp: u16) -> Option<u16> {
    match status {
        StatusCondition::Burn => Some((max_hp / 16).max(1)),
        StatusCondition::Poison => Some((max_hp / 8).max(1)),
        _ => None,
    }
}

/// Apply end-of-round burn or poison damage. Returns true if the Pokemon fainted from it.
pub fn apply_status_damage(pokemon: &mut PokemonInst, bus: &mut EventBus) -> bool {
    if pokemon.is_fainted() {
        return false;
    }
    let Some(status) = pokemon.status else {
        return false;
    };
    let Some(damage) = status_damage_amount(status, pokemon.max_hp()) else {
        return false;
    };

    let fainted = pokemon.take_damage(damage);
    bus.push(BattleEvent::StatusDamage {
        target: pokemon.name.clone(),
        status,
        damage,
        remaining_hp: pokemon.current_hp(),
    });
    fainted
}
