//! Static move catalog.
//!
//! Every move a combatant can know is looked up here by its kebab-case
//! identifier (`"thunder-shock"`). Lookups never fail: unknown names degrade
//! to a plain 50-power normal move carrying the requested name.

use phf::phf_map;
use schema::PokemonType::*;
use schema::{MoveData, MoveFlags, PokemonType, SecondaryEffect, StatusCondition};
use std::borrow::Cow;

/// Filler used when a combatant has no PP left on any move. Costs no PP.
pub const STRUGGLE: &str = "struggle";

/// Basic moves used to pad a moveset to four entries.
pub const FALLBACK_MOVES: [&str; 4] = ["tackle", "scratch", "pound", "growl"];

const fn status(status: StatusCondition, chance: f64) -> SecondaryEffect {
    SecondaryEffect::Status { status, chance }
}

static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    // Normal
    "tackle" => MoveData::new("Tackle", 35, Normal, 95, 35, MoveFlags::empty(), SecondaryEffect::None),
    "scratch" => MoveData::new("Scratch", 40, Normal, 100, 35, MoveFlags::empty(), SecondaryEffect::None),
    "pound" => MoveData::new("Pound", 40, Normal, 100, 35, MoveFlags::empty(), SecondaryEffect::None),
    "quick-attack" => MoveData::new("Quick Attack", 40, Normal, 100, 30, MoveFlags::empty(), SecondaryEffect::None),
    "slam" => MoveData::new("Slam", 80, Normal, 75, 20, MoveFlags::empty(), SecondaryEffect::None),
    "double-edge" => MoveData::new("Double-Edge", 120, Normal, 100, 15, MoveFlags::RECOIL, SecondaryEffect::None),
    "hyper-beam" => MoveData::new("Hyper Beam", 150, Normal, 90, 5, MoveFlags::empty(), SecondaryEffect::None),
    "body-slam" => MoveData::new("Body Slam", 85, Normal, 100, 15, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.3)),
    "tri-attack" => MoveData::new("Tri Attack", 80, Normal, 100, 10, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.2)),
    "strength" => MoveData::new("Strength", 80, Normal, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "slash" => MoveData::new("Slash", 70, Normal, 100, 20, MoveFlags::HIGH_CRIT, SecondaryEffect::None),
    "headbutt" => MoveData::new("Headbutt", 70, Normal, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "mega-kick" => MoveData::new("Mega Kick", 120, Normal, 75, 5, MoveFlags::empty(), SecondaryEffect::None),
    "mega-punch" => MoveData::new("Mega Punch", 80, Normal, 85, 20, MoveFlags::empty(), SecondaryEffect::None),
    "cut" => MoveData::new("Cut", 50, Normal, 95, 30, MoveFlags::empty(), SecondaryEffect::None),
    "take-down" => MoveData::new("Take Down", 90, Normal, 85, 20, MoveFlags::RECOIL, SecondaryEffect::None),
    "tail-whip" => MoveData::new("Tail Whip", 0, Normal, 100, 30, MoveFlags::empty(), SecondaryEffect::None),
    "growl" => MoveData::new("Growl", 0, Normal, 100, 40, MoveFlags::empty(), SecondaryEffect::None),
    "sing" => MoveData::new("Sing", 0, Normal, 55, 15, MoveFlags::empty(), status(StatusCondition::Sleep, 1.0)),

    // Fire
    "ember" => MoveData::new("Ember", 40, Fire, 100, 25, MoveFlags::empty(), status(StatusCondition::Burn, 0.1)),
    "flamethrower" => MoveData::new("Flamethrower", 90, Fire, 100, 15, MoveFlags::empty(), status(StatusCondition::Burn, 0.1)),
    "fire-blast" => MoveData::new("Fire Blast", 120, Fire, 85, 5, MoveFlags::empty(), status(StatusCondition::Burn, 0.1)),
    "fire-punch" => MoveData::new("Fire Punch", 75, Fire, 100, 15, MoveFlags::empty(), status(StatusCondition::Burn, 0.1)),
    "fire-spin" => MoveData::new("Fire Spin", 35, Fire, 85, 15, MoveFlags::empty(), SecondaryEffect::None),
    "heat-wave" => MoveData::new("Heat Wave", 100, Fire, 90, 10, MoveFlags::empty(), status(StatusCondition::Burn, 0.1)),
    "blaze-kick" => MoveData::new("Blaze Kick", 85, Fire, 90, 10, MoveFlags::HIGH_CRIT, status(StatusCondition::Burn, 0.1)),
    "eruption" => MoveData::new("Eruption", 150, Fire, 100, 5, MoveFlags::empty(), SecondaryEffect::None),

    // Water
    "water-gun" => MoveData::new("Water Gun", 40, Water, 100, 25, MoveFlags::empty(), SecondaryEffect::None),
    "hydro-pump" => MoveData::new("Hydro Pump", 120, Water, 80, 5, MoveFlags::empty(), SecondaryEffect::None),
    "surf" => MoveData::new("Surf", 95, Water, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "bubble-beam" => MoveData::new("Bubble Beam", 65, Water, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "bubble" => MoveData::new("Bubble", 20, Water, 100, 30, MoveFlags::empty(), SecondaryEffect::None),
    "waterfall" => MoveData::new("Waterfall", 80, Water, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "muddy-water" => MoveData::new("Muddy Water", 95, Water, 85, 10, MoveFlags::empty(), SecondaryEffect::None),
    "crabhammer" => MoveData::new("Crabhammer", 90, Water, 85, 10, MoveFlags::HIGH_CRIT, SecondaryEffect::None),

    // Grass
    "vine-whip" => MoveData::new("Vine Whip", 35, Grass, 100, 25, MoveFlags::empty(), SecondaryEffect::None),
    "solar-beam" => MoveData::new("Solar Beam", 120, Grass, 100, 10, MoveFlags::CHARGE, SecondaryEffect::None),
    "razor-leaf" => MoveData::new("Razor Leaf", 55, Grass, 95, 25, MoveFlags::HIGH_CRIT, SecondaryEffect::None),
    "absorb" => MoveData::new("Absorb", 20, Grass, 100, 25, MoveFlags::DRAIN, SecondaryEffect::None),
    "mega-drain" => MoveData::new("Mega Drain", 40, Grass, 100, 15, MoveFlags::DRAIN, SecondaryEffect::None),
    "giga-drain" => MoveData::new("Giga Drain", 75, Grass, 100, 10, MoveFlags::DRAIN, SecondaryEffect::None),
    "leaf-blade" => MoveData::new("Leaf Blade", 90, Grass, 100, 15, MoveFlags::HIGH_CRIT, SecondaryEffect::None),
    "petal-dance" => MoveData::new("Petal Dance", 70, Grass, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "magical-leaf" => MoveData::new("Magical Leaf", 60, Grass, 100, 20, MoveFlags::empty(), SecondaryEffect::None),

    // Electric
    "thunder-shock" => MoveData::new("Thunder Shock", 40, Electric, 100, 30, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.1)),
    "thunderbolt" => MoveData::new("Thunderbolt", 95, Electric, 100, 15, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.1)),
    "thunder" => MoveData::new("Thunder", 120, Electric, 70, 10, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.3)),
    "spark" => MoveData::new("Spark", 65, Electric, 100, 20, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.3)),
    "thunder-punch" => MoveData::new("Thunder Punch", 75, Electric, 100, 15, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.1)),
    "shock-wave" => MoveData::new("Shock Wave", 60, Electric, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "volt-tackle" => MoveData::new("Volt Tackle", 120, Electric, 100, 15, MoveFlags::RECOIL, status(StatusCondition::Paralysis, 0.1)),

    // Ice
    "ice-beam" => MoveData::new("Ice Beam", 95, Ice, 100, 10, MoveFlags::empty(), status(StatusCondition::Freeze, 0.1)),
    "blizzard" => MoveData::new("Blizzard", 120, Ice, 70, 5, MoveFlags::empty(), status(StatusCondition::Freeze, 0.1)),
    "aurora-beam" => MoveData::new("Aurora Beam", 65, Ice, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "ice-punch" => MoveData::new("Ice Punch", 75, Ice, 100, 15, MoveFlags::empty(), status(StatusCondition::Freeze, 0.1)),
    "powder-snow" => MoveData::new("Powder Snow", 40, Ice, 100, 25, MoveFlags::empty(), status(StatusCondition::Freeze, 0.1)),
    "icy-wind" => MoveData::new("Icy Wind", 55, Ice, 95, 15, MoveFlags::empty(), SecondaryEffect::None),

    // Fighting
    "karate-chop" => MoveData::new("Karate Chop", 50, Fighting, 100, 25, MoveFlags::HIGH_CRIT, SecondaryEffect::None),
    "mach-punch" => MoveData::new("Mach Punch", 40, Fighting, 100, 30, MoveFlags::empty(), SecondaryEffect::None),
    "double-kick" => MoveData::new("Double Kick", 30, Fighting, 100, 30, MoveFlags::empty(), SecondaryEffect::None),
    "jump-kick" => MoveData::new("Jump Kick", 85, Fighting, 95, 25, MoveFlags::empty(), SecondaryEffect::None),
    "submission" => MoveData::new("Submission", 80, Fighting, 80, 25, MoveFlags::RECOIL, SecondaryEffect::None),
    "cross-chop" => MoveData::new("Cross Chop", 100, Fighting, 80, 5, MoveFlags::HIGH_CRIT, SecondaryEffect::None),
    "brick-break" => MoveData::new("Brick Break", 75, Fighting, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "seismic-toss" => MoveData::new("Seismic Toss", 100, Fighting, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "sky-uppercut" => MoveData::new("Sky Uppercut", 85, Fighting, 90, 15, MoveFlags::empty(), SecondaryEffect::None),

    // Poison
    "acid" => MoveData::new("Acid", 40, Poison, 100, 30, MoveFlags::empty(), status(StatusCondition::Poison, 0.1)),
    "sludge" => MoveData::new("Sludge", 65, Poison, 100, 20, MoveFlags::empty(), status(StatusCondition::Poison, 0.3)),
    "sludge-bomb" => MoveData::new("Sludge Bomb", 90, Poison, 100, 10, MoveFlags::empty(), status(StatusCondition::Poison, 0.3)),
    "poison-sting" => MoveData::new("Poison Sting", 15, Poison, 100, 35, MoveFlags::empty(), status(StatusCondition::Poison, 0.3)),
    "smog" => MoveData::new("Smog", 20, Poison, 70, 20, MoveFlags::empty(), status(StatusCondition::Poison, 0.4)),
    "poison-fang" => MoveData::new("Poison Fang", 50, Poison, 100, 15, MoveFlags::empty(), status(StatusCondition::Poison, 0.5)),

    // Ground
    "earthquake" => MoveData::new("Earthquake", 100, Ground, 100, 10, MoveFlags::empty(), SecondaryEffect::None),
    "dig" => MoveData::new("Dig", 80, Ground, 100, 10, MoveFlags::CHARGE, SecondaryEffect::None),
    "mud-slap" => MoveData::new("Mud-Slap", 20, Ground, 100, 10, MoveFlags::empty(), SecondaryEffect::None),
    "mud-shot" => MoveData::new("Mud Shot", 55, Ground, 95, 15, MoveFlags::empty(), SecondaryEffect::None),
    "bonemerang" => MoveData::new("Bonemerang", 50, Ground, 90, 10, MoveFlags::empty(), SecondaryEffect::None),

    // Flying
    "peck" => MoveData::new("Peck", 35, Flying, 100, 35, MoveFlags::empty(), SecondaryEffect::None),
    "wing-attack" => MoveData::new("Wing Attack", 60, Flying, 100, 35, MoveFlags::empty(), SecondaryEffect::None),
    "fly" => MoveData::new("Fly", 90, Flying, 95, 15, MoveFlags::CHARGE, SecondaryEffect::None),
    "drill-peck" => MoveData::new("Drill Peck", 80, Flying, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "aerial-ace" => MoveData::new("Aerial Ace", 60, Flying, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "air-cutter" => MoveData::new("Air Cutter", 55, Flying, 95, 25, MoveFlags::empty(), SecondaryEffect::None),
    "gust" => MoveData::new("Gust", 40, Flying, 100, 35, MoveFlags::empty(), SecondaryEffect::None),

    // Psychic
    "confusion" => MoveData::new("Confusion", 50, Psychic, 100, 25, MoveFlags::empty(), SecondaryEffect::Confusion { chance: 0.1 }),
    "psychic" => MoveData::new("Psychic", 90, Psychic, 100, 10, MoveFlags::empty(), SecondaryEffect::None),
    "psybeam" => MoveData::new("Psybeam", 65, Psychic, 100, 20, MoveFlags::empty(), SecondaryEffect::Confusion { chance: 0.1 }),
    "extrasensory" => MoveData::new("Extrasensory", 80, Psychic, 100, 30, MoveFlags::empty(), SecondaryEffect::None),
    "psywave" => MoveData::new("Psywave", 1, Psychic, 80, 15, MoveFlags::empty(), SecondaryEffect::None),
    "future-sight" => MoveData::new("Future Sight", 80, Psychic, 100, 15, MoveFlags::empty(), SecondaryEffect::None),

    // Bug
    "leech-life" => MoveData::new("Leech Life", 20, Bug, 100, 15, MoveFlags::DRAIN, SecondaryEffect::None),
    "pin-missile" => MoveData::new("Pin Missile", 14, Bug, 85, 20, MoveFlags::empty(), SecondaryEffect::None),
    "twineedle" => MoveData::new("Twineedle", 25, Bug, 100, 20, MoveFlags::empty(), status(StatusCondition::Poison, 0.2)),
    "signal-beam" => MoveData::new("Signal Beam", 75, Bug, 100, 15, MoveFlags::empty(), SecondaryEffect::Confusion { chance: 0.1 }),
    "silver-wind" => MoveData::new("Silver Wind", 60, Bug, 100, 5, MoveFlags::empty(), SecondaryEffect::None),
    "megahorn" => MoveData::new("Megahorn", 120, Bug, 85, 10, MoveFlags::empty(), SecondaryEffect::None),

    // Rock
    "rock-throw" => MoveData::new("Rock Throw", 50, Rock, 90, 15, MoveFlags::empty(), SecondaryEffect::None),
    "rock-slide" => MoveData::new("Rock Slide", 75, Rock, 90, 10, MoveFlags::empty(), SecondaryEffect::None),
    "ancient-power" => MoveData::new("Ancient Power", 60, Rock, 100, 5, MoveFlags::empty(), SecondaryEffect::None),
    "rock-tomb" => MoveData::new("Rock Tomb", 50, Rock, 80, 10, MoveFlags::empty(), SecondaryEffect::None),
    "rollout" => MoveData::new("Rollout", 30, Rock, 90, 20, MoveFlags::empty(), SecondaryEffect::None),
    "rock-blast" => MoveData::new("Rock Blast", 25, Rock, 90, 10, MoveFlags::empty(), SecondaryEffect::None),

    // Ghost
    "lick" => MoveData::new("Lick", 20, Ghost, 100, 30, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.3)),
    "shadow-ball" => MoveData::new("Shadow Ball", 80, Ghost, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "shadow-punch" => MoveData::new("Shadow Punch", 60, Ghost, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "night-shade" => MoveData::new("Night Shade", 50, Ghost, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "astonish" => MoveData::new("Astonish", 30, Ghost, 100, 15, MoveFlags::empty(), SecondaryEffect::None),

    // Dragon
    "dragon-rage" => MoveData::new("Dragon Rage", 40, Dragon, 100, 10, MoveFlags::empty(), SecondaryEffect::None),
    "dragon-claw" => MoveData::new("Dragon Claw", 80, Dragon, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "dragon-breath" => MoveData::new("Dragon Breath", 60, Dragon, 100, 20, MoveFlags::empty(), status(StatusCondition::Paralysis, 0.3)),
    "outrage" => MoveData::new("Outrage", 90, Dragon, 100, 10, MoveFlags::empty(), SecondaryEffect::None),
    "twister" => MoveData::new("Twister", 40, Dragon, 100, 20, MoveFlags::empty(), SecondaryEffect::None),

    // Steel
    "metal-claw" => MoveData::new("Metal Claw", 50, Steel, 95, 35, MoveFlags::empty(), SecondaryEffect::None),
    "steel-wing" => MoveData::new("Steel Wing", 70, Steel, 90, 25, MoveFlags::empty(), SecondaryEffect::None),
    "iron-tail" => MoveData::new("Iron Tail", 100, Steel, 75, 15, MoveFlags::empty(), SecondaryEffect::None),
    "meteor-mash" => MoveData::new("Meteor Mash", 100, Steel, 85, 10, MoveFlags::empty(), SecondaryEffect::None),
    "doom-desire" => MoveData::new("Doom Desire", 120, Steel, 100, 5, MoveFlags::empty(), SecondaryEffect::None),

    // Dark
    "bite" => MoveData::new("Bite", 60, Dark, 100, 25, MoveFlags::empty(), SecondaryEffect::None),
    "crunch" => MoveData::new("Crunch", 80, Dark, 100, 15, MoveFlags::empty(), SecondaryEffect::None),
    "faint-attack" => MoveData::new("Faint Attack", 60, Dark, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "thief" => MoveData::new("Thief", 40, Dark, 100, 10, MoveFlags::empty(), SecondaryEffect::None),
    "pursuit" => MoveData::new("Pursuit", 40, Dark, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
    "knock-off" => MoveData::new("Knock Off", 20, Dark, 100, 20, MoveFlags::empty(), SecondaryEffect::None),
};

/// Resolve a move identifier to its combat data.
pub fn lookup_move(name: &str) -> MoveData {
    match MOVES.get(name) {
        Some(data) => data.clone(),
        None => default_move(name),
    }
}

/// True when the catalog has a real entry for this identifier.
pub fn is_known_move(name: &str) -> bool {
    MOVES.contains_key(name)
}

/// Power of a catalogued move, 0 for unknown identifiers.
pub fn move_power(name: &str) -> u16 {
    MOVES.get(name).map_or(0, |data| data.power)
}

fn default_move(name: &str) -> MoveData {
    MoveData {
        name: Cow::Owned(name.to_string()),
        power: 50,
        move_type: PokemonType::Normal,
        accuracy: 100,
        max_pp: 35,
        flags: MoveFlags::empty(),
        effect: SecondaryEffect::None,
    }
}
