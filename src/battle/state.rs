use crate::player::BattlePlayer;
use crate::pokemon::PokemonInst;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::StatusCondition;
use serde::{Deserialize, Serialize};

/// One of the two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    HurtItselfInConfusion,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Move execution
    MoveUsed {
        side: Side,
        pokemon: String,
        move_name: String,
    },
    NoMovesLeft {
        pokemon: String,
    },
    ChargingUp {
        pokemon: String,
    },
    ChargeReleased {
        pokemon: String,
    },
    MoveMissed {
        attacker: String,
    },
    /// The defender was out of reach mid-charge.
    AttackWhiffed {
        defender: String,
    },
    AttackLanded {
        target: String,
        damage: u16,
        effectiveness: f64,
        remaining_hp: u16,
    },
    CriticalHit,
    HealthDrained {
        attacker: String,
        defender: String,
        amount: u16,
    },

    // Status
    StatusApplied {
        target: String,
        status: StatusCondition,
    },
    StatusRemoved {
        target: String,
        status: StatusCondition,
    },
    StatusDamage {
        target: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },
    BecameConfused {
        target: String,
    },
    IsConfused {
        pokemon: String,
    },
    ConfusionSelfHit {
        pokemon: String,
        damage: u16,
    },
    ConfusionEnded {
        pokemon: String,
    },
    ActionFailed {
        pokemon: String,
        reason: ActionFailureReason,
    },

    // Field
    PokemonFainted {
        side: Side,
        pokemon: String,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::MoveUsed {
                pokemon, move_name, ..
            } => Some(format!("{} used {}!", pokemon, move_name)),
            BattleEvent::NoMovesLeft { pokemon } => {
                Some(format!("{} has no moves left!", pokemon))
            }
            BattleEvent::ChargingUp { pokemon } => Some(format!("{} is charging up!", pokemon)),
            BattleEvent::ChargeReleased { pokemon } => {
                Some(format!("{} unleashes energy!", pokemon))
            }
            BattleEvent::MoveMissed { .. } => Some("But it missed!".to_string()),
            BattleEvent::AttackWhiffed { .. } => Some("It missed!".to_string()),
            BattleEvent::AttackLanded {
                damage,
                effectiveness,
                ..
            } => Some(Self::format_effectiveness(*damage, *effectiveness)),
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),
            BattleEvent::HealthDrained {
                attacker, defender, ..
            } => Some(format!("{} sucked health from {}!", attacker, defender)),

            BattleEvent::StatusApplied { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_applied(status)
            )),
            BattleEvent::StatusRemoved { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_removed(status)
            )),
            BattleEvent::StatusDamage { target, status, .. } => match status {
                StatusCondition::Burn => Some(format!("{} is hurt by its burn!", target)),
                StatusCondition::Poison => Some(format!("{} is hurt by poison!", target)),
                _ => None,
            },
            BattleEvent::BecameConfused { target } => {
                Some(format!("{} became confused!", target))
            }
            BattleEvent::IsConfused { pokemon } => Some(format!("{} is confused!", pokemon)),
            BattleEvent::ConfusionSelfHit { .. } => None, // Narrated by the ActionFailed that follows
            BattleEvent::ConfusionEnded { pokemon } => {
                Some(format!("{} snapped out of its confusion!", pokemon))
            }
            BattleEvent::ActionFailed { pokemon, reason } => Some(format!(
                "{} {}",
                pokemon,
                Self::format_action_failure_reason(reason)
            )),

            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted!", pokemon)),
        }
    }

    // --- Private Helper Functions ---

    fn format_effectiveness(damage: u16, effectiveness: f64) -> String {
        if effectiveness > 1.0 {
            "It's super effective!".to_string()
        } else if effectiveness == 0.0 {
            "It had no effect...".to_string()
        } else if effectiveness < 1.0 {
            "It's not very effective...".to_string()
        } else if damage == 0 {
            "It had no effect!".to_string()
        } else {
            format!("It dealt {} damage!", damage)
        }
    }

    fn format_status_applied(status: &StatusCondition) -> &'static str {
        match status {
            StatusCondition::Burn => "was burned!",
            StatusCondition::Poison => "was poisoned!",
            StatusCondition::Paralysis => "was paralyzed!",
            StatusCondition::Sleep => "was put to sleep!",
            StatusCondition::Freeze => "was frozen solid!",
        }
    }

    fn format_status_removed(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Sleep => "woke up!".to_string(),
            StatusCondition::Freeze => "thawed out!".to_string(),
            _ => format!("was cured of its {}!", status),
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> &'static str {
        match reason {
            ActionFailureReason::IsAsleep => "is fast asleep.",
            ActionFailureReason::IsFrozen => "is frozen solid!",
            ActionFailureReason::IsParalyzed => "is paralyzed! It can't move!",
            ActionFailureReason::HurtItselfInConfusion => "hurt itself in its confusion!",
        }
    }
}

/// Event bus for collecting the events of one round.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::trace!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Narrative lines for every non-silent event, in order.
    pub fn formatted_lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// The two teams facing each other in the current battle.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub player: BattlePlayer,
    pub enemy: BattlePlayer,
}

impl BattleState {
    pub fn new(player: BattlePlayer, enemy: BattlePlayer) -> Self {
        Self { player, enemy }
    }

    pub fn side(&self, side: Side) -> &BattlePlayer {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut BattlePlayer {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn active_mut(&mut self, side: Side) -> Option<&mut PokemonInst> {
        self.side_mut(side).active_pokemon_mut()
    }

    /// The attacking side's active Pokemon and its opponent, borrowed together.
    pub fn combatants_mut(
        &mut self,
        attacker: Side,
    ) -> Option<(&mut PokemonInst, &mut PokemonInst)> {
        let (attacking, defending) = match attacker {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        };
        Some((attacking.active_pokemon_mut()?, defending.active_pokemon_mut()?))
    }
}

/// Source of every random decision in a battle.
///
/// Rolls are unit values in `[0, 1)`. Tests script the exact sequence and the
/// scripted source panics, naming the roll, when it runs dry.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<f64>, index: usize },
    Live(StdRng),
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Live(StdRng::from_os_rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Live(StdRng::seed_from_u64(seed)),
        }
    }

    /// Next unit roll in `[0, 1)`.
    pub fn next_unit(&mut self, reason: &str) -> f64 {
        match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    // Add the reason to the panic message for better debugging!
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", outcome, reason);

                *index += 1;
                outcome
            }
            RngSource::Live(rng) => {
                let outcome = rng.random::<f64>();
                tracing::trace!(outcome, reason, "rng roll");
                outcome
            }
        }
    }

    /// True with the given probability.
    pub fn chance(&mut self, probability: f64, reason: &str) -> bool {
        self.next_unit(reason) < probability
    }

    /// Uniform integer in `low..=high`.
    pub fn range_inclusive(&mut self, low: u8, high: u8, reason: &str) -> u8 {
        let span = (high - low) as f64 + 1.0;
        let offset = (self.next_unit(reason) * span).floor() as u8;
        low + offset.min(high - low)
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let index = (self.next_unit(reason) * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}
