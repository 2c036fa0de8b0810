//! PokeAPI v2 client.
//!
//! Fetches species data over HTTP and turns it into level 100 combatants with
//! a Gen 3 level-up moveset drawn from the move catalog.

use crate::battle::state::TurnRng;
use crate::config::DEFAULT_POKEAPI_URL;
use crate::errors::RosterError;
use crate::move_data::{is_known_move, move_power};
use crate::pokemon::{PokemonInst, Stats, BATTLE_LEVEL};
use crate::roster::{
    is_supported_species, pick_distinct, RosterResult, RosterSource, MAX_SPECIES_ID,
};
use async_trait::async_trait;
use schema::PokemonType;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Version groups whose level-up learnsets decide a moveset.
const GEN3_VERSION_GROUPS: [&str; 3] = ["firered-leafgreen", "emerald", "ruby-sapphire"];
const LEVEL_UP: &str = "level-up";

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemon {
    pub id: u16,
    pub name: String,
    #[serde(default)]
    pub height: u16,
    pub stats: Vec<ApiStat>,
    pub types: Vec<ApiTypeSlot>,
    #[serde(default)]
    pub moves: Vec<ApiMoveEntry>,
    #[serde(default)]
    pub sprites: ApiSprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiStat {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMoveEntry {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<ApiVersionGroupDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiVersionGroupDetail {
    pub level_learned_at: u16,
    pub move_learn_method: NamedResource,
    pub version_group: NamedResource,
}

impl ApiVersionGroupDetail {
    fn is_gen3(&self) -> bool {
        GEN3_VERSION_GROUPS.contains(&self.version_group.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSprites {
    pub other: Option<ApiOtherSprites>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiOtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<ApiArtwork>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTypeListing {
    pub pokemon: Vec<ApiTypeMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTypeMember {
    pub pokemon: NamedResource,
}

/// Build a battle-ready combatant from a `/pokemon/{id}` payload.
pub fn format_pokemon(data: &ApiPokemon) -> RosterResult<PokemonInst> {
    let base_stat = |name: &str| {
        data.stats
            .iter()
            .find(|entry| entry.stat.name == name)
            .map(|entry| entry.base_stat)
            .ok_or_else(|| RosterError::Malformed(format!("{} has no {} stat", data.name, name)))
    };
    let base = Stats {
        hp: base_stat("hp")?,
        attack: base_stat("attack")?,
        defense: base_stat("defense")?,
        speed: base_stat("speed")?,
    };

    let types: Vec<PokemonType> = data
        .types
        .iter()
        .filter_map(|slot| match slot.kind.name.parse() {
            Ok(pokemon_type) => Some(pokemon_type),
            Err(_) => {
                warn!(pokemon = %data.name, kind = %slot.kind.name, "skipping unknown type");
                None
            }
        })
        .collect();
    if types.is_empty() {
        return Err(RosterError::Malformed(format!("{} has no known type", data.name)));
    }

    let moves = select_moves(data);
    let move_names: Vec<&str> = moves.iter().map(String::as_str).collect();

    let mut pokemon = PokemonInst::new(data.id, &data.name, &base, types, &move_names);
    pokemon.height = data.height;
    pokemon.sprites.artwork = data
        .sprites
        .other
        .as_ref()
        .and_then(|other| other.official_artwork.as_ref())
        .and_then(|artwork| artwork.front_default.clone());
    Ok(pokemon)
}

/// Up to four catalogued moves: Gen 3 level-up moves, latest first, then the
/// strongest of everything else the species can learn. Padding happens when the
/// combatant is built.
pub fn select_moves(data: &ApiPokemon) -> Vec<String> {
    let mut level_up: Vec<(&str, u16)> = data
        .moves
        .iter()
        .filter(|entry| is_known_move(&entry.move_ref.name))
        .filter(|entry| {
            entry.version_group_details.iter().any(|detail| {
                detail.is_gen3()
                    && detail.move_learn_method.name == LEVEL_UP
                    && detail.level_learned_at <= u16::from(BATTLE_LEVEL)
            })
        })
        .map(|entry| {
            let level = entry
                .version_group_details
                .iter()
                .find(|detail| detail.is_gen3())
                .map_or(0, |detail| detail.level_learned_at);
            (entry.move_ref.name.as_str(), level)
        })
        .collect();
    level_up.sort_by(|a, b| b.1.cmp(&a.1));

    let mut selected: Vec<String> = Vec::with_capacity(4);
    for (name, _) in level_up {
        if selected.len() == 4 {
            break;
        }
        if !selected.iter().any(|chosen| chosen == name) {
            selected.push(name.to_string());
        }
    }

    if selected.len() < 4 {
        let mut others: Vec<&str> = data
            .moves
            .iter()
            .map(|entry| entry.move_ref.name.as_str())
            .filter(|name| is_known_move(name))
            .collect();
        others.sort_by(|a, b| move_power(b).cmp(&move_power(a)));
        for name in others {
            if selected.len() == 4 {
                break;
            }
            if !selected.iter().any(|chosen| chosen == name) {
                selected.push(name.to_string());
            }
        }
    }

    selected
}

/// Species id from a resource url such as `.../pokemon/25/`.
pub fn species_id_from_url(url: &str) -> Option<u16> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

/// [`RosterSource`] backed by the live PokeAPI.
pub struct PokeApiRoster {
    client: reqwest::Client,
    base_url: String,
    rng: Mutex<TurnRng>,
}

impl PokeApiRoster {
    pub fn new(base_url: impl Into<String>, rng: TurnRng) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            rng: Mutex::new(rng),
        }
    }

    pub fn with_default_url(rng: TurnRng) -> Self {
        Self::new(DEFAULT_POKEAPI_URL, rng)
    }

    fn pick(&self, candidates: Vec<u16>, count: usize) -> Vec<u16> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick_distinct(&mut rng, candidates, count)
    }

    /// Fetch several species concurrently, keeping the requested order.
    async fn fetch_many(&self, ids: &[u16]) -> RosterResult<Vec<PokemonInst>> {
        if let Some(&bad) = ids.iter().find(|&&id| !is_supported_species(id)) {
            return Err(RosterError::UnknownSpecies(bad));
        }

        let mut tasks = JoinSet::new();
        for (index, &id) in ids.iter().enumerate() {
            let client = self.client.clone();
            let url = format!("{}/pokemon/{}", self.base_url, id);
            tasks.spawn(async move { (index, fetch_pokemon(&client, &url).await) });
        }

        let mut slots: Vec<Option<PokemonInst>> = vec![None; ids.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined
                .map_err(|err| RosterError::Malformed(format!("fetch task failed: {}", err)))?;
            slots[index] = Some(result?);
        }
        Ok(slots.into_iter().flatten().collect())
    }
}

async fn fetch_pokemon(client: &reqwest::Client, url: &str) -> RosterResult<PokemonInst> {
    debug!(%url, "fetching pokemon");
    let data: ApiPokemon = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    format_pokemon(&data)
}

#[async_trait]
impl RosterSource for PokeApiRoster {
    async fn fetch_team_by_ids(&self, ids: &[u16]) -> RosterResult<Vec<PokemonInst>> {
        self.fetch_many(ids).await
    }

    async fn fetch_team_random(&self, count: usize) -> RosterResult<Vec<PokemonInst>> {
        let ids = self.pick((1..=MAX_SPECIES_ID).collect(), count);
        self.fetch_many(&ids).await
    }

    async fn fetch_team_by_type(
        &self,
        pokemon_type: PokemonType,
        count: usize,
    ) -> RosterResult<Vec<PokemonInst>> {
        let url = format!("{}/type/{}", self.base_url, pokemon_type);
        debug!(%url, "fetching type listing");
        let listing: ApiTypeListing = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let candidates: Vec<u16> = listing
            .pokemon
            .iter()
            .filter_map(|member| species_id_from_url(&member.pokemon.url))
            .filter(|&id| is_supported_species(id))
            .collect();
        if candidates.is_empty() {
            return Err(RosterError::NoCandidates(pokemon_type));
        }

        let ids = self.pick(candidates, count);
        self.fetch_many(&ids).await
    }
}
