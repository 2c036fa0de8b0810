//! Trainer profiles for the two gauntlets.

use schema::PokemonType;
use serde::{Deserialize, Serialize};

/// What a trainer's roster is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affinity {
    Type(PokemonType),
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trainer {
    pub name: &'static str,
    pub affinity: Affinity,
    pub badge: &'static str,
    pub taunt: &'static str,
    pub sprite: &'static str,
}

const SPRITE_ROOT: &str = "https://play.pokemonshowdown.com/sprites/trainers";

const fn trainer(
    name: &'static str,
    affinity: Affinity,
    badge: &'static str,
    taunt: &'static str,
    sprite: &'static str,
) -> Trainer {
    Trainer {
        name,
        affinity,
        badge,
        taunt,
        sprite,
    }
}

pub static GYM_LEADERS: [Trainer; 8] = [
    trainer("Brock", Affinity::Type(PokemonType::Rock), "Boulder Badge",
        "My rock hard will crush you, little boy!", "brock.png"),
    trainer("Misty", Affinity::Type(PokemonType::Water), "Cascade Badge",
        "Are you ready to cry? You little baby!", "misty.png"),
    trainer("Lt. Surge", Affinity::Type(PokemonType::Electric), "Thunder Badge",
        "Get out of my face, maggot!", "ltsurge.png"),
    trainer("Erika", Affinity::Type(PokemonType::Grass), "Rainbow Badge",
        "You're not welcome here, loser.", "erika.png"),
    trainer("Koga", Affinity::Type(PokemonType::Poison), "Soul Badge",
        "Prepare to suffer, you weakling!", "koga.png"),
    trainer("Sabrina", Affinity::Type(PokemonType::Psychic), "Marsh Badge",
        "I foresaw your defeat, idiot.", "sabrina.png"),
    trainer("Blaine", Affinity::Type(PokemonType::Fire), "Volcano Badge",
        "You're gonna get burned, punk!", "blaine.png"),
    trainer("Giovanni", Affinity::Type(PokemonType::Ground), "Earth Badge",
        "This is the end for you, trash!", "giovanni.png"),
];

pub static ELITE_FOUR: [Trainer; 5] = [
    trainer("Lorelei", Affinity::Type(PokemonType::Ice), "Elite 4 Member",
        "Freezing your pathetic team!", "lorelei.png"),
    trainer("Bruno", Affinity::Type(PokemonType::Fighting), "Elite 4 Member",
        "Hoo hah! I'll smash you!", "bruno.png"),
    trainer("Agatha", Affinity::Type(PokemonType::Ghost), "Elite 4 Member",
        "Show some respect to your elders, brat!", "agatha.png"),
    trainer("Lance", Affinity::Type(PokemonType::Dragon), "Elite 4 Member",
        "Dragons are superior, you are nothing!", "lance.png"),
    trainer("Champion Blue", Affinity::Random, "Champion Title",
        "Smell ya later, loser!", "blue.png"),
];

/// Which trainer sequence a session runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gauntlet {
    /// The eight gym leaders. Clearing it unlocks the Elite Four.
    GymLeaders,
    /// The capstone: four Elite Four members and the Champion.
    EliteFour,
}

impl Gauntlet {
    pub fn trainers(self) -> &'static [Trainer] {
        match self {
            Gauntlet::GymLeaders => &GYM_LEADERS,
            Gauntlet::EliteFour => &ELITE_FOUR,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Gauntlet::GymLeaders => "Story Mode",
            Gauntlet::EliteFour => "Elite Four",
        }
    }

    /// Whether finishing this sequence unlocks the capstone.
    pub fn unlocks_capstone(self) -> bool {
        self == Gauntlet::GymLeaders
    }

    pub fn intro_message(self) -> String {
        match self {
            Gauntlet::GymLeaders => format!(
                "Your journey begins! Defeat all {} Gym Leaders to earn your badges.",
                GYM_LEADERS.len()
            ),
            Gauntlet::EliteFour => {
                "The Elite Four await. Win every battle to become Champion!".to_string()
            }
        }
    }

    pub fn victory_message(self) -> String {
        match self {
            Gauntlet::GymLeaders => {
                let last = GYM_LEADERS[GYM_LEADERS.len() - 1].name;
                format!("You defeated {}! The Elite Four awaits...", last)
            }
            Gauntlet::EliteFour => "You defeated the Elite 4! You are a true Master!".to_string(),
        }
    }
}

impl Trainer {
    pub fn sprite_url(&self) -> String {
        format!("{}/{}", SPRITE_ROOT, self.sprite)
    }

    pub fn intro_line(&self) -> String {
        format!("{} wants to battle!", self.name)
    }

    pub fn taunt_line(&self) -> String {
        format!("{}: \"{}\"", self.name, self.taunt)
    }
}
