use crate::pokemon_types::PokemonType;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};

/// Persistent status. At most one is carried at a time and it survives switching.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusCondition {
    Burn,
    Poison,
    Paralysis,
    Sleep,
    Freeze,
}

bitflags! {
    /// Special handling a move asks of the turn resolver.
    #[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MoveFlags: u8 {
        /// Heals the user for half the damage dealt.
        const DRAIN     = 1 << 0;
        /// Two-turn move: charges (invulnerable) on the first turn, hits on the second.
        const CHARGE    = 1 << 1;
        const HIGH_CRIT = 1 << 2;
        /// Carried by the data but currently has no battle effect.
        const RECOIL    = 1 << 3;
    }
}

/// Optional effect rolled after a move connects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum SecondaryEffect {
    None,
    Status { status: StatusCondition, chance: f64 },
    Confusion { chance: f64 },
}

impl SecondaryEffect {
    /// Chance of the effect landing as a whole percentage (0-100).
    pub fn chance_percent(&self) -> u8 {
        let chance = match self {
            SecondaryEffect::None => 0.0,
            SecondaryEffect::Status { chance, .. } | SecondaryEffect::Confusion { chance } => {
                *chance
            }
        };
        (chance.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveData {
    pub name: Cow<'static, str>,
    /// 0 for status-only moves.
    pub power: u16,
    pub move_type: PokemonType,
    /// Percentage; 100 never misses.
    pub accuracy: u8,
    pub max_pp: u8,
    pub flags: MoveFlags,
    pub effect: SecondaryEffect,
}

impl MoveData {
    pub const fn new(
        name: &'static str,
        power: u16,
        move_type: PokemonType,
        accuracy: u8,
        max_pp: u8,
        flags: MoveFlags,
        effect: SecondaryEffect,
    ) -> Self {
        MoveData {
            name: Cow::Borrowed(name),
            power,
            move_type,
            accuracy,
            max_pp,
            flags,
            effect,
        }
    }

    pub fn is_status_move(&self) -> bool {
        self.power == 0
    }

    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.flags.contains(flag)
    }
}
