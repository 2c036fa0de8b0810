//! The phase machine driving one gauntlet run.
//!
//! A [`BattleSession`] is synchronous and owns everything: both teams, the
//! trainer sequence, the RNG and the narrative log. Drivers push player
//! commands in, fire the pending timer when its delay has elapsed, and answer
//! roster requests. Every command is validated before anything changes, so a
//! rejected command leaves the session exactly as it was.

use crate::battle::engine::{resolve_enemy_turn, resolve_round, RoundOutcome};
use crate::battle::pacing::{PhaseClock, PhaseToken, ScheduledTransition};
use crate::battle::state::{BattleState, EventBus, TurnRng};
use crate::config::PacingConfig;
use crate::errors::{CommandError, CommandResult, RosterError};
use crate::move_data::STRUGGLE;
use crate::player::BattlePlayer;
use crate::roster::{is_supported_species, RosterDelivery, RosterRequest, TEAM_SIZE};
use crate::trainers::{Gauntlet, Trainer};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const PLAYER_NAME: &str = "Player";

/// Oldest lines are dropped past this many.
const MAX_LOG_LINES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Picking six species for the player's team.
    Selection,
    /// Story text before the first battle. Timed.
    Intro,
    /// Waiting for rosters, or showing why they failed to load.
    Loading,
    /// Rosters are ready; waiting for the player to start.
    PreBattleWait,
    /// Timed.
    TrainerIntro,
    /// Timed.
    TrashTalk,
    /// Timed.
    SendOutEnemy,
    /// Timed.
    SendOutPlayer,
    CombatMenu,
    FightMenu,
    SwitchMenu,
    /// A round is being narrated one line per step. Timed.
    CombatResolution,
    /// A trainer fell and another waits. Advanced by the player.
    NextBattleTransition,
    Victory,
    /// The active Pokemon fainted and a replacement must be chosen.
    ForceSwitchPlayer,
    Defeat,
}

impl BattlePhase {
    /// The run is over until the player returns to the menu.
    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Victory | BattlePhase::Defeat)
    }
}

#[derive(Debug, Clone)]
pub struct BattleSession {
    gauntlet: Gauntlet,
    pacing: PacingConfig,
    rng: TurnRng,

    phase: BattlePhase,
    clock: PhaseClock,
    pending_timer: Option<ScheduledTransition>,
    message: String,
    log: VecDeque<String>,
    lines_shown: usize,

    selection: Vec<u16>,
    battle: BattleState,
    trainer_index: usize,

    roster_request: Option<RosterRequest>,
    load_error: Option<String>,

    // Lines of the round being narrated and where the round leads afterwards.
    narration: VecDeque<String>,
    pending_outcome: Option<RoundOutcome>,
    // Set by a voluntary switch: the enemy still gets its action.
    enemy_turn_pending: bool,

    unlock_signal: bool,
}

impl BattleSession {
    pub fn new(gauntlet: Gauntlet, pacing: PacingConfig, rng: TurnRng) -> Self {
        let first_trainer = gauntlet.trainers()[0].name;
        let mut session = Self {
            gauntlet,
            pacing,
            rng,
            phase: BattlePhase::Selection,
            clock: PhaseClock::new(),
            pending_timer: None,
            message: String::new(),
            log: VecDeque::new(),
            lines_shown: 0,
            selection: Vec::with_capacity(TEAM_SIZE),
            battle: BattleState::new(
                BattlePlayer::new(PLAYER_NAME, Vec::new()),
                BattlePlayer::new(first_trainer, Vec::new()),
            ),
            trainer_index: 0,
            roster_request: None,
            load_error: None,
            narration: VecDeque::new(),
            pending_outcome: None,
            enemy_turn_pending: false,
            unlock_signal: false,
        };
        session.enter(BattlePhase::Selection, selection_prompt());
        session
    }

    // --- Read access ---

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn current_message(&self) -> &str {
        &self.message
    }

    pub fn log(&self) -> &VecDeque<String> {
        &self.log
    }

    /// Lines shown since the session was created, including any dropped from the log.
    pub fn lines_shown(&self) -> usize {
        self.lines_shown
    }

    /// The lines shown after `mark`, a previous value of [`lines_shown`](Self::lines_shown).
    pub fn lines_since(&self, mark: usize) -> impl Iterator<Item = &str> + '_ {
        let fresh = self.lines_shown.saturating_sub(mark).min(self.log.len());
        self.log
            .range(self.log.len() - fresh..)
            .map(String::as_str)
    }

    pub fn gauntlet(&self) -> Gauntlet {
        self.gauntlet
    }

    pub fn selection(&self) -> &[u16] {
        &self.selection
    }

    pub fn battle(&self) -> &BattleState {
        &self.battle
    }

    pub fn player(&self) -> &BattlePlayer {
        &self.battle.player
    }

    pub fn enemy(&self) -> &BattlePlayer {
        &self.battle.enemy
    }

    pub fn trainer(&self) -> &'static Trainer {
        let trainers = self.gauntlet.trainers();
        &trainers[self.trainer_index.min(trainers.len() - 1)]
    }

    pub fn trainer_index(&self) -> usize {
        self.trainer_index
    }

    pub fn pending_timer(&self) -> Option<ScheduledTransition> {
        self.pending_timer
    }

    pub fn pending_roster_request(&self) -> Option<&RosterRequest> {
        self.roster_request.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// True once after the standard gauntlet is cleared. The driver persists it.
    pub fn take_unlock_signal(&mut self) -> bool {
        std::mem::take(&mut self.unlock_signal)
    }

    // --- Commands ---

    /// Add a species to the team, or remove it if already picked.
    pub fn toggle_selection(&mut self, species_id: u16) -> CommandResult {
        self.expect_phase("toggle_selection", &[BattlePhase::Selection])?;
        if !is_supported_species(species_id) {
            return Err(CommandError::UnknownSpecies(species_id));
        }

        if let Some(position) = self.selection.iter().position(|&id| id == species_id) {
            self.selection.remove(position);
        } else {
            if self.selection.len() >= TEAM_SIZE {
                return Err(CommandError::SelectionFull(TEAM_SIZE));
            }
            self.selection.push(species_id);
        }
        self.message = format!("{}/{} Pokemon chosen.", self.selection.len(), TEAM_SIZE);
        Ok(())
    }

    pub fn begin_story(&mut self) -> CommandResult {
        self.expect_phase("begin_story", &[BattlePhase::Selection])?;
        if self.selection.len() != TEAM_SIZE {
            return Err(CommandError::IncompleteSelection {
                required: TEAM_SIZE,
                selected: self.selection.len(),
            });
        }
        info!(gauntlet = ?self.gauntlet, team = ?self.selection, "starting run");
        self.enter(BattlePhase::Intro, self.gauntlet.intro_message());
        Ok(())
    }

    /// Hand back the result of the pending roster request.
    ///
    /// A failed fetch is not a command error: the session shows
    /// "Error loading battle." and stays in `Loading` until `return_to_menu`.
    pub fn deliver_rosters(
        &mut self,
        result: Result<RosterDelivery, RosterError>,
    ) -> CommandResult {
        self.expect_phase("deliver_rosters", &[BattlePhase::Loading])?;
        let Some(request) = self.roster_request.take() else {
            return Err(CommandError::NoPendingRoster);
        };

        match result.and_then(|delivery| check_delivery(&request, delivery)) {
            Ok(delivery) => {
                if let Some(team) = delivery.player {
                    self.battle.player.replace_team(team);
                }
                let trainer = self.trainer();
                self.battle.enemy = BattlePlayer::new(trainer.name, delivery.enemy);
                info!(
                    trainer = trainer.name,
                    enemy_team = self.battle.enemy.team().len(),
                    "rosters loaded"
                );
                self.enter(
                    BattlePhase::PreBattleWait,
                    format!("{} is waiting. Start the battle!", trainer.name),
                );
            }
            Err(err) => {
                warn!(error = %err, "roster load failed");
                self.load_error = Some(err.to_string());
                self.enter(BattlePhase::Loading, "Error loading battle.");
            }
        }
        Ok(())
    }

    pub fn confirm_start_battle(&mut self) -> CommandResult {
        self.expect_phase("confirm_start_battle", &[BattlePhase::PreBattleWait])?;
        self.enter(BattlePhase::TrainerIntro, self.trainer().intro_line());
        Ok(())
    }

    pub fn open_fight_menu(&mut self) -> CommandResult {
        self.expect_phase("open_fight_menu", &[BattlePhase::CombatMenu])?;
        self.set_phase(BattlePhase::FightMenu);
        Ok(())
    }

    pub fn open_switch_menu(&mut self) -> CommandResult {
        self.expect_phase("open_switch_menu", &[BattlePhase::CombatMenu])?;
        self.set_phase(BattlePhase::SwitchMenu);
        Ok(())
    }

    pub fn back_to_command_menu(&mut self) -> CommandResult {
        self.expect_phase(
            "back_to_command_menu",
            &[BattlePhase::FightMenu, BattlePhase::SwitchMenu],
        )?;
        self.set_phase(BattlePhase::CombatMenu);
        Ok(())
    }

    /// Use a move from the fight menu. With no PP left anywhere the active
    /// Pokemon struggles whatever was chosen.
    pub fn select_move(&mut self, move_name: &str) -> CommandResult {
        self.expect_phase("select_move", &[BattlePhase::FightMenu])?;
        let active = self
            .battle
            .player
            .active_pokemon()
            .ok_or(CommandError::NoActiveBattle)?;

        let chosen = if !active.has_usable_move() {
            STRUGGLE.to_string()
        } else {
            let instance = active
                .find_move(move_name)
                .ok_or_else(|| CommandError::UnknownMove {
                    pokemon: active.name.clone(),
                    move_name: move_name.to_string(),
                })?;
            if !instance.has_pp() {
                return Err(CommandError::NoPpLeft {
                    move_name: move_name.to_string(),
                });
            }
            instance.name.clone()
        };

        let mut bus = EventBus::new();
        let outcome = resolve_round(&mut self.battle, &chosen, &mut self.rng, &mut bus);
        self.play_round(bus, outcome);
        Ok(())
    }

    /// Send out `index`. From the switch menu this spends the turn; after a
    /// faint it only fills the empty slot.
    pub fn select_switch(&mut self, index: usize) -> CommandResult {
        self.expect_phase(
            "select_switch",
            &[BattlePhase::SwitchMenu, BattlePhase::ForceSwitchPlayer],
        )?;
        let voluntary = self.phase == BattlePhase::SwitchMenu;
        self.battle.player.switch_pokemon(index)?;

        self.enemy_turn_pending = voluntary;
        self.announce_player_send_out();
        Ok(())
    }

    /// Load the next trainer. The team was healed when the last one fell.
    pub fn advance_to_next_trainer(&mut self) -> CommandResult {
        self.expect_phase(
            "advance_to_next_trainer",
            &[BattlePhase::NextBattleTransition],
        )?;
        self.trainer_index += 1;
        self.battle.enemy = BattlePlayer::new(self.trainer().name, Vec::new());
        self.enter_loading();
        Ok(())
    }

    /// Abandon the run and go back to team selection. Available once the run
    /// is over or while a roster failure is on screen.
    pub fn return_to_menu(&mut self) -> CommandResult {
        let stuck_loading = self.phase == BattlePhase::Loading && self.load_error.is_some();
        if !self.phase.is_terminal() && !stuck_loading {
            return Err(CommandError::WrongPhase {
                command: "return_to_menu",
                phase: self.phase,
            });
        }

        self.selection.clear();
        self.battle = BattleState::new(
            BattlePlayer::new(PLAYER_NAME, Vec::new()),
            BattlePlayer::new(self.gauntlet.trainers()[0].name, Vec::new()),
        );
        self.trainer_index = 0;
        self.roster_request = None;
        self.load_error = None;
        self.narration.clear();
        self.pending_outcome = None;
        self.enemy_turn_pending = false;
        self.enter(BattlePhase::Selection, selection_prompt());
        Ok(())
    }

    /// Fire a scheduled transition. Tokens from an earlier phase are ignored.
    pub fn fire(&mut self, token: PhaseToken) -> CommandResult {
        let live = self
            .pending_timer
            .is_some_and(|timer| timer.token == token && self.clock.is_current(token));
        if !live {
            debug!(epoch = token.epoch(), phase = ?self.phase, "ignoring stale timer");
            return Ok(());
        }
        self.pending_timer = None;

        match self.phase {
            BattlePhase::Intro => self.enter_loading(),
            BattlePhase::TrainerIntro => {
                self.enter(BattlePhase::TrashTalk, self.trainer().taunt_line())
            }
            BattlePhase::TrashTalk => self.announce_enemy_send_out(),
            BattlePhase::SendOutEnemy => self.announce_player_send_out(),
            BattlePhase::SendOutPlayer => self.after_player_send_out(),
            BattlePhase::CombatResolution => self.next_narration_line(),
            phase => warn!(?phase, "timer fired in an untimed phase"),
        }
        Ok(())
    }

    // --- Transitions ---

    fn expect_phase(&self, command: &'static str, allowed: &[BattlePhase]) -> CommandResult {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(CommandError::WrongPhase {
                command,
                phase: self.phase,
            })
        }
    }

    /// Change phase, invalidate outstanding timers and schedule the new phase's own.
    fn set_phase(&mut self, phase: BattlePhase) {
        debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
        self.clock.advance();
        self.pending_timer = self
            .phase_delay(phase)
            .map(|delay| self.clock.schedule(delay));
    }

    fn enter(&mut self, phase: BattlePhase, message: impl Into<String>) {
        self.set_phase(phase);
        self.show(message.into());
    }

    fn show(&mut self, message: String) {
        if self.log.len() == MAX_LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(message.clone());
        self.lines_shown += 1;
        self.message = message;
    }

    fn phase_delay(&self, phase: BattlePhase) -> Option<Duration> {
        let ms = match phase {
            BattlePhase::Intro => self.pacing.intro_ms,
            BattlePhase::TrainerIntro => self.pacing.trainer_intro_ms,
            BattlePhase::TrashTalk => self.pacing.trash_talk_ms,
            BattlePhase::SendOutEnemy => self.pacing.send_out_enemy_ms,
            BattlePhase::SendOutPlayer => self.pacing.send_out_player_ms,
            BattlePhase::CombatResolution => self.pacing.combat_step_ms,
            _ => return None,
        };
        Some(Duration::from_millis(ms))
    }

    fn enter_loading(&mut self) {
        let trainer = self.trainer();
        let request = RosterRequest {
            player_ids: self
                .battle
                .player
                .is_empty()
                .then(|| self.selection.clone()),
            enemy: trainer.affinity.into(),
            count: TEAM_SIZE,
        };
        debug!(?request, "requesting rosters");
        self.roster_request = Some(request);
        self.load_error = None;
        self.enter(
            BattlePhase::Loading,
            format!("Loading {}'s team...", trainer.name),
        );
    }

    fn announce_enemy_send_out(&mut self) {
        let sent_out = self
            .battle
            .enemy
            .active_pokemon()
            .map(|pokemon| pokemon.name.clone())
            .unwrap_or_default();
        let line = format!("{} sent out {}!", self.trainer().name, sent_out);
        self.enter(BattlePhase::SendOutEnemy, line);
    }

    /// Also runs after an enemy replacement, so it can re-announce the
    /// Pokemon that was already out.
    fn announce_player_send_out(&mut self) {
        let sent_out = self
            .battle
            .player
            .active_pokemon()
            .map(|pokemon| pokemon.name.clone())
            .unwrap_or_default();
        self.enter(BattlePhase::SendOutPlayer, format!("Go! {}!", sent_out));
    }

    fn after_player_send_out(&mut self) {
        if std::mem::take(&mut self.enemy_turn_pending) {
            let mut bus = EventBus::new();
            let outcome = resolve_enemy_turn(&mut self.battle, &mut self.rng, &mut bus);
            self.play_round(bus, outcome);
        } else {
            self.enter_command_menu();
        }
    }

    /// Back to the command menu, unless a charged move is waiting to fire.
    fn enter_command_menu(&mut self) {
        let Some(active) = self.battle.player.active_pokemon() else {
            warn!("no active player pokemon");
            return;
        };
        let name = active.name.clone();

        match active.volatiles.charging.clone() {
            Some(stored) => {
                debug!(%name, %stored, "releasing charged move");
                let mut bus = EventBus::new();
                let outcome = resolve_round(&mut self.battle, &stored, &mut self.rng, &mut bus);
                self.play_round(bus, outcome);
            }
            None => self.enter(BattlePhase::CombatMenu, format!("What will {} do?", name)),
        }
    }

    fn play_round(&mut self, bus: EventBus, outcome: RoundOutcome) {
        debug!(events = bus.len(), ?outcome, "round resolved");
        self.narration = bus.formatted_lines().into();
        self.pending_outcome = Some(outcome);
        self.next_narration_line();
    }

    fn next_narration_line(&mut self) {
        match self.narration.pop_front() {
            Some(line) => self.enter(BattlePhase::CombatResolution, line),
            None => {
                let outcome = self.pending_outcome.take().unwrap_or(RoundOutcome::Continue);
                self.apply_outcome(outcome);
            }
        }
    }

    fn apply_outcome(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Continue => self.enter_command_menu(),
            RoundOutcome::EnemyReplacement(index) => {
                self.battle.enemy.send_out(index);
                self.announce_enemy_send_out();
            }
            RoundOutcome::TrainerDefeated => self.trainer_defeated(),
            RoundOutcome::PlayerMustSwitch => {
                self.enter(BattlePhase::ForceSwitchPlayer, "Choose your next Pokemon!")
            }
            RoundOutcome::PlayerDefeated => {
                info!(trainer = self.trainer().name, "player defeated");
                self.enter(BattlePhase::Defeat, "You whited out...");
            }
        }
    }

    fn trainer_defeated(&mut self) {
        let trainer = self.trainer();
        info!(trainer = trainer.name, badge = trainer.badge, "trainer defeated");

        if self.trainer_index + 1 < self.gauntlet.trainers().len() {
            self.battle.player.heal_all();
            self.enter(
                BattlePhase::NextBattleTransition,
                format!("You defeated {}! Your team is fully healed!", trainer.name),
            );
        } else {
            if self.gauntlet.unlocks_capstone() {
                self.unlock_signal = true;
            }
            self.enter(BattlePhase::Victory, self.gauntlet.victory_message());
        }
    }
}

fn selection_prompt() -> String {
    format!("Choose {} Pokemon for your team!", TEAM_SIZE)
}

fn check_delivery(
    request: &RosterRequest,
    delivery: RosterDelivery,
) -> Result<RosterDelivery, RosterError> {
    let player_missing = delivery.player.as_ref().map_or(true, Vec::is_empty);
    if request.player_ids.is_some() && player_missing {
        return Err(RosterError::Empty);
    }
    if delivery.enemy.is_empty() {
        return Err(RosterError::Empty);
    }
    Ok(RosterDelivery {
        player: if request.player_ids.is_some() {
            delivery.player
        } else {
            None
        },
        enemy: delivery.enemy,
    })
}
