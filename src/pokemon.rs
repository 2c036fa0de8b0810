use crate::move_data::{is_known_move, lookup_move, FALLBACK_MOVES, STRUGGLE};
use schema::{PokemonType, StatusCondition};
use serde::{Deserialize, Serialize};

/// Every combatant in the gauntlet battles at this level.
pub const BATTLE_LEVEL: u8 = 100;

const SPRITE_ROOT: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

impl Stats {
    /// Derive battle stats from species base stats.
    /// HP = floor(2 * Base * Level / 100) + Level + 10, others floor(2 * Base * Level / 100) + 5
    pub fn from_base(base: &Stats, level: u8) -> Stats {
        let level = level as u32;
        let scaled = |base: u16| (base as u32 * 2 * level) / 100;
        Stats {
            hp: (scaled(base.hp) + level + 10) as u16,
            attack: (scaled(base.attack) + 5) as u16,
            defense: (scaled(base.defense) + 5) as u16,
            speed: (scaled(base.speed) + 5) as u16,
        }
    }
}

/// Sprite references. Opaque to the battle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front: String,
    pub back: String,
    pub artwork: Option<String>,
}

impl Sprites {
    pub fn for_species(species_id: u16) -> Self {
        Sprites {
            front: format!("{}/other/showdown/{}.gif", SPRITE_ROOT, species_id),
            back: format!("{}/other/showdown/back/{}.gif", SPRITE_ROOT, species_id),
            artwork: None,
        }
    }
}

/// Battle modifiers that only last while the combatant stays on the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volatiles {
    /// Turns of confusion remaining.
    pub confusion: Option<u8>,
    /// Identifier of the two-turn move being charged.
    pub charging: Option<String>,
    pub invulnerable: bool,
    pub sleep_turns: u8,
}

impl Volatiles {
    pub fn is_clear(&self) -> bool {
        *self == Volatiles::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    /// Catalog identifier, e.g. `"thunder-shock"`.
    pub name: String,
    pub max_pp: u8,
    pub current_pp: u8,
}

impl MoveInstance {
    /// Create a move instance with full PP taken from the catalog.
    pub fn new(name: &str) -> Self {
        let max_pp = lookup_move(name).max_pp;
        MoveInstance {
            name: name.to_string(),
            max_pp,
            current_pp: max_pp,
        }
    }

    pub fn has_pp(&self) -> bool {
        self.current_pp > 0
    }

    /// Use the move (decrease PP)
    pub fn use_pp(&mut self) -> bool {
        if self.current_pp > 0 {
            self.current_pp -= 1;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub species_id: u16,
    pub name: String,
    pub level: u8,
    pub stats: Stats,
    pub types: Vec<PokemonType>,
    /// Decimetres.
    pub height: u16,
    pub sprites: Sprites,
    current_hp: u16,
    pub status: Option<StatusCondition>,
    pub volatiles: Volatiles,
    pub moves: [MoveInstance; 4],
}

impl PokemonInst {
    /// Create a level 100 combatant from species base stats.
    /// The moveset is padded with basic moves until it holds exactly four entries.
    pub fn new(
        species_id: u16,
        name: &str,
        base_stats: &Stats,
        types: Vec<PokemonType>,
        move_names: &[&str],
    ) -> Self {
        let stats = Stats::from_base(base_stats, BATTLE_LEVEL);

        PokemonInst {
            species_id,
            name: display_name(name),
            level: BATTLE_LEVEL,
            stats,
            types,
            height: 0,
            sprites: Sprites::for_species(species_id),
            current_hp: stats.hp,
            status: None,
            volatiles: Volatiles::default(),
            moves: build_moveset(move_names),
        }
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Set HP directly, clamped to `0..=max_hp`.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    /// Apply damage, flooring HP at zero. Returns true if the combatant fainted.
    pub fn take_damage(&mut self, amount: u16) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.is_fainted()
    }

    /// Restore HP up to the maximum. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp());
        self.current_hp - before
    }

    /// Full HP, no status, no volatiles. PP is left as it is.
    pub fn full_restore(&mut self) {
        self.current_hp = self.max_hp();
        self.status = None;
        self.clear_volatiles();
    }

    pub fn clear_volatiles(&mut self) {
        self.volatiles = Volatiles::default();
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    /// Set a persistent status. Sleep also starts its turn counter.
    pub fn apply_status(&mut self, status: StatusCondition, sleep_turns: u8) {
        self.status = Some(status);
        if status == StatusCondition::Sleep {
            self.volatiles.sleep_turns = sleep_turns;
        }
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.volatiles.sleep_turns = 0;
    }

    pub fn find_move(&self, name: &str) -> Option<&MoveInstance> {
        self.moves.iter().find(|m| m.name == name)
    }

    /// Deduct one PP from the named move. The struggle filler and unknown names cost nothing.
    pub fn use_pp(&mut self, name: &str) -> bool {
        if name == STRUGGLE {
            return true;
        }
        match self.moves.iter_mut().find(|m| m.name == name) {
            Some(instance) => instance.use_pp(),
            None => false,
        }
    }

    pub fn usable_moves(&self) -> impl Iterator<Item = &MoveInstance> {
        self.moves.iter().filter(|m| m.has_pp())
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(MoveInstance::has_pp)
    }
}

/// Capitalise the first letter of a species identifier ("pikachu" -> "Pikachu").
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn build_moveset(move_names: &[&str]) -> [MoveInstance; 4] {
    let mut selected: Vec<&str> = Vec::with_capacity(4);
    for &name in move_names {
        if selected.len() == 4 {
            break;
        }
        if !selected.contains(&name) {
            selected.push(name);
        }
    }
    for name in FALLBACK_MOVES {
        if selected.len() == 4 {
            break;
        }
        if is_known_move(name) && !selected.contains(&name) {
            selected.push(name);
        }
    }
    // Four distinct fallbacks guarantee at least four entries.
    std::array::from_fn(|i| MoveInstance::new(selected[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pikachu() -> PokemonInst {
        let base = Stats {
            hp: 35,
            attack: 55,
            defense: 40,
            speed: 90,
        };
        PokemonInst::new(
            25,
            "pikachu",
            &base,
            vec![PokemonType::Electric],
            &["thunderbolt", "quick-attack"],
        )
    }

    #[test]
    fn test_level_100_stats() {
        let pokemon = pikachu();
        assert_eq!(
            pokemon.stats,
            Stats {
                hp: 180,
                attack: 115,
                defense: 85,
                speed: 185
            }
        );
        assert_eq!(pokemon.current_hp(), 180);
        assert_eq!(pokemon.name, "Pikachu");
    }

    #[test]
    fn test_moveset_padded_with_fallbacks() {
        let pokemon = pikachu();
        let names: Vec<&str> = pokemon.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["thunderbolt", "quick-attack", "tackle", "scratch"]);
        assert_eq!(pokemon.moves[0].current_pp, 15);
    }

    #[test]
    fn test_duplicate_moves_are_skipped() {
        let base = Stats {
            hp: 50,
            attack: 50,
            defense: 50,
            speed: 50,
        };
        let pokemon = PokemonInst::new(1, "x", &base, vec![], &["tackle", "tackle", "growl"]);
        let names: Vec<&str> = pokemon.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["tackle", "growl", "scratch", "pound"]);
    }

    #[test]
    fn test_hp_stays_in_bounds() {
        let mut pokemon = pikachu();
        assert!(!pokemon.take_damage(100));
        assert_eq!(pokemon.current_hp(), 80);
        assert!(pokemon.take_damage(500));
        assert_eq!(pokemon.current_hp(), 0);

        let healed = pokemon.heal(1000);
        assert_eq!(healed, 180);
        assert_eq!(pokemon.current_hp(), pokemon.max_hp());

        pokemon.set_hp(9999);
        assert_eq!(pokemon.current_hp(), 180);
    }

    #[test]
    fn test_full_restore_clears_everything_but_pp() {
        let mut pokemon = pikachu();
        pokemon.take_damage(150);
        pokemon.apply_status(StatusCondition::Sleep, 3);
        pokemon.volatiles.confusion = Some(2);
        pokemon.volatiles.charging = Some("fly".to_string());
        pokemon.volatiles.invulnerable = true;
        pokemon.use_pp("thunderbolt");

        pokemon.full_restore();

        assert_eq!(pokemon.current_hp(), pokemon.max_hp());
        assert_eq!(pokemon.status, None);
        assert!(pokemon.volatiles.is_clear());
        assert_eq!(pokemon.moves[0].current_pp, 14);
    }

    #[test]
    fn test_pp_use() {
        let mut pokemon = pikachu();
        assert!(pokemon.use_pp("quick-attack"));
        assert_eq!(pokemon.find_move("quick-attack").map(|m| m.current_pp), Some(29));
        assert!(pokemon.use_pp(STRUGGLE));
        assert!(!pokemon.use_pp("surf"));

        for instance in pokemon.moves.iter_mut() {
            instance.current_pp = 0;
        }
        assert!(!pokemon.has_usable_move());
        assert!(!pokemon.use_pp("thunderbolt"));
        assert_eq!(pokemon.usable_moves().count(), 0);
    }
}
