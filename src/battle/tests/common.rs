use crate::battle::session::{BattlePhase, BattleSession};
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::config::PacingConfig;
use crate::player::BattlePlayer;
use crate::pokemon::{PokemonInst, Stats};
use crate::roster::RosterDelivery;
use crate::trainers::Gauntlet;
use schema::{PokemonType, StatusCondition};

/// A builder for creating test Pokemon with flat, predictable stats.
///
/// Stats are set directly rather than derived from base stats, so damage
/// numbers in tests are easy to reason about.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu")
///     .with_types(vec![PokemonType::Electric])
///     .with_moves(vec!["thunderbolt"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    types: Vec<PokemonType>,
    stats: Stats,
    moves: Vec<&'static str>,
    status: Option<StatusCondition>,
    sleep_turns: u8,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: vec![PokemonType::Normal],
            stats: Stats {
                hp: 160,
                attack: 100,
                defense: 100,
                speed: 100,
            },
            moves: vec!["pound"],
            status: None,
            sleep_turns: 0,
            current_hp: None,
        }
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_attack(mut self, attack: u16) -> Self {
        self.stats.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: u16) -> Self {
        self.stats.defense = defense;
        self
    }

    pub fn with_max_hp(mut self, hp: u16) -> Self {
        self.stats.hp = hp;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Moves are padded with the usual fallbacks up to four.
    pub fn with_moves(mut self, moves: Vec<&'static str>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_sleep(mut self, turns: u8) -> Self {
        self.status = Some(StatusCondition::Sleep);
        self.sleep_turns = turns;
        self
    }

    pub fn build(self) -> PokemonInst {
        let mut pokemon = PokemonInst::new(1, &self.name, &self.stats, self.types, &self.moves);
        pokemon.stats = self.stats;
        pokemon.set_hp(self.current_hp.unwrap_or(self.stats.hp));
        if let Some(status) = self.status {
            pokemon.apply_status(status, self.sleep_turns);
        }
        pokemon
    }
}

pub fn create_test_player(name: &str, team: Vec<PokemonInst>) -> BattlePlayer {
    BattlePlayer::new(name, team)
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(player_pokemon: PokemonInst, enemy_pokemon: PokemonInst) -> BattleState {
    BattleState::new(
        create_test_player("Player", vec![player_pokemon]),
        create_test_player("Brock", vec![enemy_pokemon]),
    )
}

/// A generous buffer of middling rolls for tests that don't care about outcomes.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![0.5; 100])
}

/// All events of one kind, in order.
pub fn events_matching<'a>(
    bus: &'a EventBus,
    predicate: impl Fn(&BattleEvent) -> bool,
) -> Vec<&'a BattleEvent> {
    bus.events().iter().filter(|event| predicate(event)).collect()
}

/// A session with instant pacing and scripted rolls.
pub fn test_session(gauntlet: Gauntlet, rolls: Vec<f64>) -> BattleSession {
    BattleSession::new(gauntlet, PacingConfig::instant(), TurnRng::new_for_test(rolls))
}

/// Fire timers until the session settles in a phase that waits for the player.
pub fn run_timers(session: &mut BattleSession) {
    while let Some(timer) = session.pending_timer() {
        session
            .fire(timer.token)
            .expect("firing a live timer never fails");
    }
}

/// Pick six species and play through the intro up to the first roster request.
pub fn start_run(session: &mut BattleSession) {
    for id in [1, 4, 7, 25, 133, 143] {
        session.toggle_selection(id).expect("selection");
    }
    session.begin_story().expect("begin story");
    run_timers(session);
    assert_eq!(session.phase(), BattlePhase::Loading);
}

/// Answer the pending roster request and play the intro sequence up to the command menu.
pub fn start_battle(
    session: &mut BattleSession,
    player: Option<Vec<PokemonInst>>,
    enemy: Vec<PokemonInst>,
) {
    session
        .deliver_rosters(Ok(RosterDelivery { player, enemy }))
        .expect("deliver rosters");
    assert_eq!(session.phase(), BattlePhase::PreBattleWait);
    session.confirm_start_battle().expect("start battle");
    run_timers(session);
}

/// A session already sitting at the command menu against the given teams.
pub fn session_in_combat(
    player: Vec<PokemonInst>,
    enemy: Vec<PokemonInst>,
    rolls: Vec<f64>,
) -> BattleSession {
    let mut session = test_session(Gauntlet::GymLeaders, rolls);
    start_run(&mut session);
    start_battle(&mut session, Some(player), enemy);
    assert_eq!(session.phase(), BattlePhase::CombatMenu);
    session
}

/// Use a move through the menus and play out the narration.
pub fn use_move(session: &mut BattleSession, move_name: &str) {
    session.open_fight_menu().expect("fight menu");
    session.select_move(move_name).expect("select move");
    run_timers(session);
}

/// A one-hit enemy for walking through the gauntlet.
pub fn fragile_enemy(name: &str) -> PokemonInst {
    TestPokemonBuilder::new(name).with_hp(1).build()
}
