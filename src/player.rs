use crate::errors::SwitchError;
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};

/// Largest team either side can field.
pub const MAX_TEAM_SIZE: usize = 6;

/// One side of the battle: an ordered team and the index of the Pokemon on the field.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattlePlayer {
    pub player_name: String,

    // Up to six Pokemon, in the order they were assembled.
    team: Vec<PokemonInst>,

    // The index into `team` of the Pokemon currently on the field.
    active_pokemon_index: usize,
}

impl BattlePlayer {
    pub fn new(player_name: impl Into<String>, team: Vec<PokemonInst>) -> Self {
        let mut team = team;
        team.truncate(MAX_TEAM_SIZE);
        BattlePlayer {
            player_name: player_name.into(),
            team,
            active_pokemon_index: 0,
        }
    }

    pub fn team(&self) -> &[PokemonInst] {
        &self.team
    }

    pub fn is_empty(&self) -> bool {
        self.team.is_empty()
    }

    pub fn active_pokemon_index(&self) -> usize {
        self.active_pokemon_index
    }

    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.team.get(self.active_pokemon_index)
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.team.get_mut(self.active_pokemon_index)
    }

    pub fn pokemon(&self, index: usize) -> Option<&PokemonInst> {
        self.team.get(index)
    }

    /// Swap in a freshly assembled team and put its first member on the field.
    pub fn replace_team(&mut self, team: Vec<PokemonInst>) {
        self.team = team;
        self.team.truncate(MAX_TEAM_SIZE);
        self.active_pokemon_index = 0;
    }

    /// Check that `index` names a healthy Pokemon that is not already out.
    pub fn validate_switch(&self, index: usize) -> Result<(), SwitchError> {
        let pokemon = self.team.get(index).ok_or(SwitchError::OutOfRange(index))?;
        if pokemon.is_fainted() {
            return Err(SwitchError::Fainted(pokemon.name.clone()));
        }
        if index == self.active_pokemon_index {
            return Err(SwitchError::AlreadyActive(pokemon.name.clone()));
        }
        Ok(())
    }

    /// Recall the active Pokemon and send out `index`. Volatiles reset on both sides of the swap.
    pub fn switch_pokemon(&mut self, index: usize) -> Result<(), SwitchError> {
        self.validate_switch(index)?;
        if let Some(outgoing) = self.active_pokemon_mut() {
            outgoing.clear_volatiles();
        }
        self.send_out(index);
        Ok(())
    }

    /// Put `index` on the field with cleared volatiles. Callers have already checked the slot.
    pub(crate) fn send_out(&mut self, index: usize) {
        if let Some(incoming) = self.team.get_mut(index) {
            incoming.clear_volatiles();
            self.active_pokemon_index = index;
        }
    }

    /// First Pokemon after `index` that can still battle.
    pub fn next_healthy_after(&self, index: usize) -> Option<usize> {
        self.team
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, pokemon)| !pokemon.is_fainted())
            .map(|(i, _)| i)
    }

    pub fn has_healthy_pokemon(&self) -> bool {
        self.team.iter().any(|pokemon| !pokemon.is_fainted())
    }

    pub fn healthy_count(&self) -> usize {
        self.team.iter().filter(|pokemon| !pokemon.is_fainted()).count()
    }

    /// Fully restore every team member and lead with the first slot again.
    pub fn heal_all(&mut self) {
        for pokemon in self.team.iter_mut() {
            pokemon.full_restore();
        }
        self.active_pokemon_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::Stats;
    use schema::{PokemonType, StatusCondition};

    fn mon(name: &str) -> PokemonInst {
        let base = Stats {
            hp: 50,
            attack: 50,
            defense: 50,
            speed: 50,
        };
        PokemonInst::new(1, name, &base, vec![PokemonType::Normal], &["tackle"])
    }

    fn team_of_three() -> BattlePlayer {
        BattlePlayer::new("Red", vec![mon("a"), mon("b"), mon("c")])
    }

    #[test]
    fn test_switch_validation() {
        let mut player = team_of_three();
        player.team[1].take_damage(999);

        assert_eq!(player.validate_switch(5), Err(SwitchError::OutOfRange(5)));
        assert_eq!(
            player.validate_switch(1),
            Err(SwitchError::Fainted("B".to_string()))
        );
        assert_eq!(
            player.validate_switch(0),
            Err(SwitchError::AlreadyActive("A".to_string()))
        );
        assert_eq!(player.validate_switch(2), Ok(()));
    }

    #[test]
    fn test_rejected_switch_mutates_nothing() {
        let mut player = team_of_three();
        player.team[0].volatiles.confusion = Some(2);

        assert!(player.switch_pokemon(0).is_err());
        assert_eq!(player.active_pokemon_index(), 0);
        assert_eq!(player.team[0].volatiles.confusion, Some(2));
    }

    #[test]
    fn test_switch_clears_volatiles_but_keeps_status() {
        let mut player = team_of_three();
        player.team[0].volatiles.charging = Some("dig".to_string());
        player.team[0].volatiles.invulnerable = true;
        player.team[0].apply_status(StatusCondition::Poison, 0);

        player.switch_pokemon(2).expect("switch should succeed");

        assert_eq!(player.active_pokemon_index(), 2);
        assert!(player.team[0].volatiles.is_clear());
        assert_eq!(player.team[0].status, Some(StatusCondition::Poison));
    }

    #[test]
    fn test_next_healthy_searches_forward_only() {
        let mut player = team_of_three();
        player.team[1].take_damage(999);
        assert_eq!(player.next_healthy_after(0), Some(2));
        assert_eq!(player.next_healthy_after(2), None);
        assert!(player.has_healthy_pokemon());
        assert_eq!(player.healthy_count(), 2);
    }

    #[test]
    fn test_heal_all_is_idempotent() {
        let mut player = team_of_three();
        player.team[0].take_damage(30);
        player.team[1].take_damage(999);
        player.team[2].apply_status(StatusCondition::Burn, 0);
        player.send_out(2);

        player.heal_all();
        let after_once: Vec<PokemonInst> = player.team().to_vec();
        player.heal_all();

        assert_eq!(player.team(), after_once.as_slice());
        for pokemon in player.team() {
            assert_eq!(pokemon.current_hp(), pokemon.max_hp());
            assert_eq!(pokemon.status, None);
            assert!(pokemon.volatiles.is_clear());
        }
        assert_eq!(player.active_pokemon_index(), 0);
    }
}
