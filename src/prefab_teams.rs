//! Offline roster: a fixed table of Gen 1-3 species with their base stats and
//! a battle-ready moveset. Covers every gym and Elite Four type so the whole
//! gauntlet can be played without network access.

use crate::battle::state::TurnRng;
use crate::errors::RosterError;
use crate::pokemon::{PokemonInst, Stats};
use crate::roster::{is_supported_species, pick_distinct, RosterResult, RosterSource};
use async_trait::async_trait;
use schema::PokemonType;
use schema::PokemonType::*;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// A species as the offline table knows it.
#[derive(Debug, Clone, Copy)]
pub struct PrefabSpecies {
    pub id: u16,
    pub name: &'static str,
    pub types: &'static [PokemonType],
    pub base: Stats,
    pub moves: &'static [&'static str],
    /// Decimetres.
    pub height: u16,
}

const fn species(
    id: u16,
    name: &'static str,
    types: &'static [PokemonType],
    [hp, attack, defense, speed]: [u16; 4],
    moves: &'static [&'static str],
    height: u16,
) -> PrefabSpecies {
    PrefabSpecies {
        id,
        name,
        types,
        base: Stats {
            hp,
            attack,
            defense,
            speed,
        },
        moves,
        height,
    }
}

pub static PREFAB_SPECIES: &[PrefabSpecies] = &[
    species(3, "venusaur", &[Grass, Poison], [80, 82, 83, 80], &["solar-beam", "sludge-bomb", "giga-drain", "earthquake"], 20),
    species(6, "charizard", &[Fire, Flying], [78, 84, 78, 100], &["flamethrower", "fly", "dragon-claw", "slash"], 17),
    species(9, "blastoise", &[Water], [79, 83, 100, 78], &["hydro-pump", "ice-beam", "bite", "earthquake"], 16),
    species(18, "pidgeot", &[Normal, Flying], [83, 80, 75, 91], &["fly", "wing-attack", "quick-attack", "steel-wing"], 15),
    species(24, "arbok", &[Poison], [60, 85, 69, 80], &["sludge-bomb", "crunch", "poison-fang", "dig"], 35),
    species(25, "pikachu", &[Electric], [35, 55, 40, 90], &["thunderbolt", "quick-attack", "iron-tail", "thunder"], 4),
    species(26, "raichu", &[Electric], [60, 90, 55, 100], &["thunderbolt", "thunder-punch", "brick-break", "body-slam"], 8),
    species(28, "sandslash", &[Ground], [75, 100, 110, 65], &["earthquake", "slash", "rock-slide", "dig"], 10),
    species(31, "nidoqueen", &[Poison, Ground], [90, 82, 87, 76], &["earthquake", "sludge-bomb", "body-slam", "ice-beam"], 13),
    species(34, "nidoking", &[Poison, Ground], [81, 92, 77, 85], &["earthquake", "sludge-bomb", "megahorn", "thunderbolt"], 14),
    species(38, "ninetales", &[Fire], [73, 76, 75, 100], &["flamethrower", "fire-blast", "extrasensory", "quick-attack"], 11),
    species(45, "vileplume", &[Grass, Poison], [75, 80, 85, 50], &["petal-dance", "sludge-bomb", "giga-drain", "acid"], 12),
    species(51, "dugtrio", &[Ground], [35, 80, 50, 120], &["earthquake", "dig", "slash", "rock-slide"], 7),
    species(55, "golduck", &[Water], [80, 82, 78, 85], &["hydro-pump", "psychic", "ice-beam", "confusion"], 17),
    species(57, "primeape", &[Fighting], [65, 105, 60, 95], &["cross-chop", "karate-chop", "rock-slide", "thunder-punch"], 10),
    species(59, "arcanine", &[Fire], [90, 110, 80, 95], &["flamethrower", "fire-blast", "crunch", "body-slam"], 19),
    species(62, "poliwrath", &[Water, Fighting], [90, 85, 95, 70], &["hydro-pump", "submission", "ice-punch", "body-slam"], 13),
    species(65, "alakazam", &[Psychic], [55, 50, 45, 120], &["psychic", "psybeam", "fire-punch", "thunder-punch"], 15),
    species(68, "machamp", &[Fighting], [90, 130, 80, 55], &["cross-chop", "seismic-toss", "rock-slide", "earthquake"], 16),
    species(71, "victreebel", &[Grass, Poison], [80, 105, 65, 70], &["razor-leaf", "sludge-bomb", "solar-beam", "acid"], 17),
    species(73, "tentacruel", &[Water, Poison], [80, 70, 65, 100], &["surf", "sludge-bomb", "ice-beam", "poison-sting"], 16),
    species(76, "golem", &[Rock, Ground], [80, 120, 130, 45], &["earthquake", "rock-slide", "double-edge", "rock-blast"], 14),
    species(78, "rapidash", &[Fire], [65, 100, 70, 105], &["fire-blast", "flamethrower", "take-down", "quick-attack"], 17),
    species(80, "slowbro", &[Water, Psychic], [95, 75, 110, 30], &["surf", "psychic", "ice-beam", "headbutt"], 16),
    species(82, "magneton", &[Electric, Steel], [50, 60, 95, 70], &["thunderbolt", "thunder", "spark", "tri-attack"], 10),
    species(87, "dewgong", &[Water, Ice], [90, 70, 80, 70], &["ice-beam", "surf", "aurora-beam", "headbutt"], 17),
    species(89, "muk", &[Poison], [105, 105, 75, 50], &["sludge-bomb", "sludge", "fire-punch", "body-slam"], 12),
    species(91, "cloyster", &[Water, Ice], [50, 95, 180, 70], &["blizzard", "surf", "ice-beam", "aurora-beam"], 15),
    species(92, "gastly", &[Ghost, Poison], [30, 35, 30, 80], &["lick", "night-shade", "sludge", "astonish"], 13),
    species(93, "haunter", &[Ghost, Poison], [45, 50, 45, 95], &["shadow-ball", "night-shade", "sludge-bomb", "lick"], 16),
    species(94, "gengar", &[Ghost, Poison], [60, 65, 60, 110], &["shadow-ball", "sludge-bomb", "thunderbolt", "night-shade"], 15),
    species(95, "onix", &[Rock, Ground], [35, 45, 160, 70], &["rock-slide", "earthquake", "iron-tail", "rock-throw"], 88),
    species(97, "hypno", &[Psychic], [85, 73, 70, 67], &["psychic", "confusion", "headbutt", "fire-punch"], 16),
    species(101, "electrode", &[Electric], [60, 50, 70, 140], &["thunderbolt", "shock-wave", "spark", "tackle"], 12),
    species(105, "marowak", &[Ground], [60, 80, 110, 45], &["earthquake", "bonemerang", "rock-slide", "headbutt"], 10),
    species(106, "hitmonlee", &[Fighting], [50, 120, 53, 87], &["jump-kick", "mega-kick", "brick-break", "rock-slide"], 15),
    species(107, "hitmonchan", &[Fighting], [50, 105, 79, 76], &["sky-uppercut", "fire-punch", "ice-punch", "thunder-punch"], 14),
    species(110, "weezing", &[Poison], [65, 90, 120, 60], &["sludge-bomb", "smog", "fire-blast", "thunderbolt"], 12),
    species(112, "rhydon", &[Ground, Rock], [105, 130, 120, 40], &["earthquake", "rock-slide", "megahorn", "body-slam"], 19),
    species(114, "tangela", &[Grass], [65, 55, 115, 60], &["giga-drain", "vine-whip", "solar-beam", "body-slam"], 10),
    species(121, "starmie", &[Water, Psychic], [60, 75, 85, 115], &["surf", "psychic", "thunderbolt", "ice-beam"], 11),
    species(123, "scyther", &[Bug, Flying], [70, 110, 80, 105], &["slash", "wing-attack", "silver-wind", "quick-attack"], 15),
    species(124, "jynx", &[Ice, Psychic], [65, 50, 35, 95], &["ice-beam", "psychic", "blizzard", "sing"], 14),
    species(125, "electabuzz", &[Electric], [65, 83, 57, 105], &["thunderbolt", "thunder-punch", "psychic", "ice-punch"], 11),
    species(126, "magmar", &[Fire], [65, 95, 57, 93], &["fire-blast", "fire-punch", "thunder-punch", "smog"], 13),
    species(130, "gyarados", &[Water, Flying], [95, 125, 79, 81], &["hydro-pump", "earthquake", "dragon-rage", "bite"], 65),
    species(131, "lapras", &[Water, Ice], [130, 85, 80, 60], &["blizzard", "surf", "thunderbolt", "sing"], 25),
    species(135, "jolteon", &[Electric], [65, 65, 60, 130], &["thunderbolt", "thunder", "pin-missile", "double-kick"], 8),
    species(136, "flareon", &[Fire], [65, 130, 60, 65], &["fire-blast", "flamethrower", "bite", "quick-attack"], 9),
    species(139, "omastar", &[Rock, Water], [70, 60, 125, 55], &["surf", "ancient-power", "ice-beam", "rock-slide"], 10),
    species(141, "kabutops", &[Rock, Water], [60, 115, 105, 80], &["rock-slide", "surf", "slash", "ancient-power"], 13),
    species(142, "aerodactyl", &[Rock, Flying], [80, 105, 65, 130], &["rock-slide", "wing-attack", "crunch", "earthquake"], 18),
    species(143, "snorlax", &[Normal], [160, 110, 65, 30], &["body-slam", "earthquake", "shadow-ball", "hyper-beam"], 21),
    species(144, "articuno", &[Ice, Flying], [90, 85, 100, 85], &["blizzard", "ice-beam", "aerial-ace", "icy-wind"], 17),
    species(145, "zapdos", &[Electric, Flying], [90, 90, 85, 100], &["thunderbolt", "drill-peck", "thunder", "fly"], 16),
    species(146, "moltres", &[Fire, Flying], [90, 100, 90, 90], &["fire-blast", "flamethrower", "wing-attack", "heat-wave"], 20),
    species(148, "dragonair", &[Dragon], [61, 84, 65, 70], &["dragon-breath", "outrage", "thunderbolt", "slam"], 40),
    species(149, "dragonite", &[Dragon, Flying], [91, 134, 95, 80], &["outrage", "fly", "earthquake", "thunderbolt"], 22),
    species(150, "mewtwo", &[Psychic], [106, 110, 90, 130], &["psychic", "ice-beam", "thunderbolt", "flamethrower"], 20),
    species(157, "typhlosion", &[Fire], [78, 84, 78, 100], &["eruption", "flamethrower", "thunder-punch", "quick-attack"], 17),
    species(160, "feraligatr", &[Water], [85, 105, 100, 78], &["surf", "crunch", "ice-punch", "slash"], 23),
    species(169, "crobat", &[Poison, Flying], [85, 90, 80, 130], &["sludge-bomb", "aerial-ace", "bite", "leech-life"], 18),
    species(181, "ampharos", &[Electric], [90, 75, 75, 55], &["thunderbolt", "thunder-punch", "fire-punch", "signal-beam"], 14),
    species(182, "bellossom", &[Grass], [75, 80, 85, 50], &["petal-dance", "magical-leaf", "giga-drain", "solar-beam"], 4),
    species(185, "sudowoodo", &[Rock], [70, 100, 115, 30], &["rock-slide", "rock-throw", "brick-break", "headbutt"], 12),
    species(196, "espeon", &[Psychic], [65, 65, 60, 110], &["psychic", "confusion", "shadow-ball", "bite"], 9),
    species(200, "misdreavus", &[Ghost], [60, 60, 60, 85], &["shadow-ball", "psybeam", "thunderbolt", "astonish"], 7),
    species(214, "heracross", &[Bug, Fighting], [80, 125, 75, 85], &["megahorn", "brick-break", "rock-slide", "earthquake"], 15),
    species(215, "sneasel", &[Dark, Ice], [55, 95, 55, 115], &["crunch", "ice-punch", "faint-attack", "slash"], 9),
    species(221, "piloswine", &[Ice, Ground], [100, 100, 80, 50], &["earthquake", "blizzard", "ice-beam", "take-down"], 11),
    species(230, "kingdra", &[Water, Dragon], [75, 95, 95, 85], &["hydro-pump", "dragon-breath", "ice-beam", "twister"], 18),
    species(232, "donphan", &[Ground], [90, 120, 120, 50], &["earthquake", "rollout", "rock-slide", "body-slam"], 11),
    species(237, "hitmontop", &[Fighting], [50, 95, 95, 70], &["brick-break", "mach-punch", "rock-slide", "dig"], 14),
    species(248, "tyranitar", &[Rock, Dark], [100, 134, 110, 61], &["rock-slide", "crunch", "earthquake", "fire-blast"], 20),
    species(254, "sceptile", &[Grass], [70, 85, 65, 120], &["leaf-blade", "giga-drain", "dragon-claw", "aerial-ace"], 17),
    species(257, "blaziken", &[Fire, Fighting], [80, 120, 70, 80], &["blaze-kick", "sky-uppercut", "flamethrower", "rock-slide"], 19),
    species(260, "swampert", &[Water, Ground], [100, 110, 90, 60], &["earthquake", "surf", "ice-beam", "muddy-water"], 15),
    species(286, "breloom", &[Grass, Fighting], [60, 130, 80, 70], &["sky-uppercut", "giga-drain", "mach-punch", "headbutt"], 12),
    species(297, "hariyama", &[Fighting], [144, 120, 60, 50], &["cross-chop", "brick-break", "rock-slide", "earthquake"], 23),
    species(302, "sableye", &[Dark, Ghost], [50, 75, 75, 50], &["shadow-ball", "faint-attack", "night-shade", "astonish"], 5),
    species(306, "aggron", &[Steel, Rock], [70, 110, 180, 50], &["iron-tail", "rock-slide", "earthquake", "take-down"], 21),
    species(310, "manectric", &[Electric], [70, 75, 60, 105], &["thunderbolt", "thunder", "spark", "crunch"], 15),
    species(324, "torkoal", &[Fire], [70, 85, 140, 20], &["flamethrower", "fire-spin", "heat-wave", "body-slam"], 5),
    species(330, "flygon", &[Ground, Dragon], [80, 100, 80, 100], &["earthquake", "dragon-claw", "fire-blast", "rock-slide"], 20),
    species(334, "altaria", &[Dragon, Flying], [75, 70, 90, 80], &["dragon-breath", "aerial-ace", "flamethrower", "sing"], 11),
    species(337, "lunatone", &[Rock, Psychic], [70, 55, 65, 70], &["psychic", "rock-slide", "ice-beam", "confusion"], 10),
    species(338, "solrock", &[Rock, Psychic], [70, 95, 85, 70], &["rock-slide", "psychic", "earthquake", "fire-blast"], 12),
    species(350, "milotic", &[Water], [95, 60, 79, 81], &["surf", "ice-beam", "twister", "hydro-pump"], 62),
    species(354, "banette", &[Ghost], [64, 115, 65, 65], &["shadow-ball", "shadow-punch", "thunderbolt", "knock-off"], 11),
    species(356, "dusclops", &[Ghost], [40, 70, 130, 25], &["shadow-punch", "night-shade", "ice-beam", "astonish"], 16),
    species(362, "glalie", &[Ice], [80, 80, 80, 80], &["ice-beam", "blizzard", "crunch", "headbutt"], 15),
    species(365, "walrein", &[Ice, Water], [110, 80, 90, 65], &["blizzard", "surf", "ice-beam", "body-slam"], 14),
    species(373, "salamence", &[Dragon, Flying], [95, 135, 80, 100], &["dragon-claw", "fly", "earthquake", "crunch"], 15),
    species(376, "metagross", &[Steel, Psychic], [80, 135, 130, 70], &["meteor-mash", "psychic", "earthquake", "shadow-ball"], 16),
    species(384, "rayquaza", &[Dragon, Flying], [105, 150, 90, 95], &["outrage", "fly", "earthquake", "hyper-beam"], 70),
];

/// Look up a species in the offline table.
pub fn prefab_species(id: u16) -> Option<&'static PrefabSpecies> {
    PREFAB_SPECIES.iter().find(|entry| entry.id == id)
}

impl PrefabSpecies {
    pub fn to_pokemon(&self) -> PokemonInst {
        let mut pokemon = PokemonInst::new(
            self.id,
            self.name,
            &self.base,
            self.types.to_vec(),
            self.moves,
        );
        pokemon.height = self.height;
        pokemon
    }
}

/// [`RosterSource`] backed by [`PREFAB_SPECIES`].
pub struct PrefabRoster {
    rng: Mutex<TurnRng>,
}

impl PrefabRoster {
    pub fn new(rng: TurnRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Up to `count` distinct entries drawn uniformly from `candidates`.
    fn draw(&self, candidates: Vec<&'static PrefabSpecies>, count: usize) -> Vec<PokemonInst> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick_distinct(&mut rng, candidates, count)
            .into_iter()
            .map(PrefabSpecies::to_pokemon)
            .collect()
    }
}

#[async_trait]
impl RosterSource for PrefabRoster {
    async fn fetch_team_by_ids(&self, ids: &[u16]) -> RosterResult<Vec<PokemonInst>> {
        ids.iter()
            .map(|&id| match prefab_species(id) {
                Some(entry) => Ok(entry.to_pokemon()),
                None if !is_supported_species(id) => Err(RosterError::UnknownSpecies(id)),
                None => Err(RosterError::Malformed(format!(
                    "#{} is not in the offline roster",
                    id
                ))),
            })
            .collect()
    }

    async fn fetch_team_random(&self, count: usize) -> RosterResult<Vec<PokemonInst>> {
        let team = self.draw(PREFAB_SPECIES.iter().collect(), count);
        debug!(count = team.len(), "offline random team");
        Ok(team)
    }

    async fn fetch_team_by_type(
        &self,
        pokemon_type: PokemonType,
        count: usize,
    ) -> RosterResult<Vec<PokemonInst>> {
        let candidates: Vec<&'static PrefabSpecies> = PREFAB_SPECIES
            .iter()
            .filter(|entry| entry.types.contains(&pokemon_type))
            .collect();
        if candidates.is_empty() {
            return Err(RosterError::NoCandidates(pokemon_type));
        }
        let team = self.draw(candidates, count);
        debug!(%pokemon_type, count = team.len(), "offline typed team");
        Ok(team)
    }
}
