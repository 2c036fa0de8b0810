//! Asynchronous abstraction for sourcing teams.
//!
//! The session never fetches anything itself. When it needs teams it parks in
//! `Loading` with a [`RosterRequest`]; a driver hands that request to a
//! [`RosterSource`] through [`fulfill`] and delivers the result back.

pub mod pokeapi;

use crate::battle::state::TurnRng;
use crate::errors::RosterError;
use crate::pokemon::PokemonInst;
use crate::trainers::Affinity;
use async_trait::async_trait;
use schema::PokemonType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highest national dex number in play (Gen 1-3).
pub const MAX_SPECIES_ID: u16 = 386;

/// Pokemon per team.
pub const TEAM_SIZE: usize = 6;

pub type RosterResult<T> = Result<T, RosterError>;

pub fn is_supported_species(id: u16) -> bool {
    (1..=MAX_SPECIES_ID).contains(&id)
}

/// Up to `count` distinct items drawn uniformly from `candidates`.
pub fn pick_distinct<T>(rng: &mut TurnRng, mut candidates: Vec<T>, count: usize) -> Vec<T> {
    let mut picked = Vec::with_capacity(count.min(candidates.len()));
    while picked.len() < count && !candidates.is_empty() {
        let index = rng.pick_index(candidates.len(), "Roster Pick");
        picked.push(candidates.swap_remove(index));
    }
    picked
}

/// How the opposing trainer's team is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyRoster {
    ByType(PokemonType),
    Random,
}

impl From<Affinity> for EnemyRoster {
    fn from(affinity: Affinity) -> Self {
        match affinity {
            Affinity::Type(pokemon_type) => EnemyRoster::ByType(pokemon_type),
            Affinity::Random => EnemyRoster::Random,
        }
    }
}

/// Teams the session is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRequest {
    /// Species for the player's team; `None` once the team exists.
    pub player_ids: Option<Vec<u16>>,
    pub enemy: EnemyRoster,
    pub count: usize,
}

/// Teams fetched for a [`RosterRequest`].
#[derive(Debug, Clone)]
pub struct RosterDelivery {
    pub player: Option<Vec<PokemonInst>>,
    pub enemy: Vec<PokemonInst>,
}

/// Provider of ready-to-battle level 100 Pokemon.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// The given species in the given order.
    async fn fetch_team_by_ids(&self, ids: &[u16]) -> RosterResult<Vec<PokemonInst>>;

    /// `count` distinct random species.
    async fn fetch_team_random(&self, count: usize) -> RosterResult<Vec<PokemonInst>>;

    /// Up to `count` distinct random species of one type.
    async fn fetch_team_by_type(
        &self,
        pokemon_type: PokemonType,
        count: usize,
    ) -> RosterResult<Vec<PokemonInst>>;
}

/// Fetch everything a request asks for. Any failure fails the whole delivery.
pub async fn fulfill(
    source: &dyn RosterSource,
    request: &RosterRequest,
) -> RosterResult<RosterDelivery> {
    let player = match &request.player_ids {
        Some(ids) => {
            let team = source.fetch_team_by_ids(ids).await?;
            if team.is_empty() {
                return Err(RosterError::Empty);
            }
            Some(team)
        }
        None => None,
    };

    let enemy = match request.enemy {
        EnemyRoster::ByType(pokemon_type) => {
            source.fetch_team_by_type(pokemon_type, request.count).await?
        }
        EnemyRoster::Random => source.fetch_team_random(request.count).await?,
    };
    if enemy.is_empty() {
        return Err(RosterError::Empty);
    }

    debug!(
        player = player.as_ref().map(Vec::len),
        enemy = enemy.len(),
        "roster request fulfilled"
    );
    Ok(RosterDelivery { player, enemy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefab_teams::PrefabRoster;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
            .block_on(future)
    }

    #[test]
    fn test_affinity_to_enemy_roster() {
        assert_eq!(
            EnemyRoster::from(Affinity::Type(PokemonType::Rock)),
            EnemyRoster::ByType(PokemonType::Rock)
        );
        assert_eq!(EnemyRoster::from(Affinity::Random), EnemyRoster::Random);
    }

    #[test]
    fn test_pick_distinct() {
        let mut rng = TurnRng::new_for_test(vec![0.0, 0.0, 0.99]);
        let picked = pick_distinct(&mut rng, vec![10, 20, 30, 40], 3);
        // swap_remove moves the tail into the vacated slot
        assert_eq!(picked, vec![10, 40, 20]);

        let mut rng = TurnRng::new_for_test(vec![0.5, 0.5]);
        assert_eq!(pick_distinct(&mut rng, vec![1, 2], 6).len(), 2);
    }

    #[test]
    fn test_supported_species_range() {
        assert!(!is_supported_species(0));
        assert!(is_supported_species(1));
        assert!(is_supported_species(386));
        assert!(!is_supported_species(387));
    }

    #[test]
    fn test_fulfill_with_player_and_typed_enemy() {
        let source = PrefabRoster::new(TurnRng::from_seed(3));
        let request = RosterRequest {
            player_ids: Some(vec![25, 6, 9]),
            enemy: EnemyRoster::ByType(PokemonType::Rock),
            count: TEAM_SIZE,
        };

        let delivery = block_on(fulfill(&source, &request)).expect("offline roster");
        let player = delivery.player.expect("player team requested");
        let names: Vec<&str> = player.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pikachu", "Charizard", "Blastoise"]);
        assert!(!delivery.enemy.is_empty());
        assert!(delivery.enemy.len() <= TEAM_SIZE);
        assert!(delivery
            .enemy
            .iter()
            .all(|p| p.has_type(PokemonType::Rock)));
    }

    #[test]
    fn test_fulfill_enemy_only() {
        let source = PrefabRoster::new(TurnRng::from_seed(9));
        let request = RosterRequest {
            player_ids: None,
            enemy: EnemyRoster::Random,
            count: TEAM_SIZE,
        };

        let delivery = block_on(fulfill(&source, &request)).expect("offline roster");
        assert!(delivery.player.is_none());
        assert_eq!(delivery.enemy.len(), TEAM_SIZE);
    }

    #[test]
    fn test_fulfill_rejects_unknown_species() {
        let source = PrefabRoster::new(TurnRng::from_seed(1));
        let request = RosterRequest {
            player_ids: Some(vec![25, 999]),
            enemy: EnemyRoster::Random,
            count: TEAM_SIZE,
        };

        let result = block_on(fulfill(&source, &request));
        assert!(matches!(result, Err(RosterError::UnknownSpecies(999))));
    }
}
