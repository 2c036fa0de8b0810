use crate::battle::session::{BattlePhase, BattleSession};
use crate::errors::CommandResult;
use crate::move_data::lookup_move;
use crate::player::BattlePlayer;
use crate::pokemon::{display_name, PokemonInst};
use crate::roster::{fulfill, RosterSource};
use crate::trainers::Gauntlet;
use schema::{PokemonType, StatusCondition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Drives a [`BattleSession`] in real time: sleeps through timed phases and
/// answers roster requests from a [`RosterSource`].
/// Shared by the terminal driver and the MCP server.
pub struct SessionRunner {
    session: BattleSession,
    source: Arc<dyn RosterSource>,
}

/// One player input, as accepted by [`SessionRunner::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    ToggleSelection(u16),
    BeginStory,
    StartBattle,
    OpenFightMenu,
    OpenSwitchMenu,
    Back,
    UseMove(String),
    SwitchTo(usize),
    NextTrainer,
    ReturnToMenu,
}

impl PlayerCommand {
    pub fn apply_to(&self, session: &mut BattleSession) -> CommandResult {
        match self {
            PlayerCommand::ToggleSelection(id) => session.toggle_selection(*id),
            PlayerCommand::BeginStory => session.begin_story(),
            PlayerCommand::StartBattle => session.confirm_start_battle(),
            PlayerCommand::OpenFightMenu => session.open_fight_menu(),
            PlayerCommand::OpenSwitchMenu => session.open_switch_menu(),
            PlayerCommand::Back => session.back_to_command_menu(),
            PlayerCommand::UseMove(name) => session.select_move(name),
            PlayerCommand::SwitchTo(index) => session.select_switch(*index),
            PlayerCommand::NextTrainer => session.advance_to_next_trainer(),
            PlayerCommand::ReturnToMenu => session.return_to_menu(),
        }
    }
}

/// Snapshot of a session for display and API queries.
#[derive(Debug, Clone, Serialize)]
pub struct BattleInfo {
    pub gauntlet: Gauntlet,
    pub phase: BattlePhase,
    pub message: String,
    pub trainer_name: String,
    pub trainer_index: usize,
    pub trainer_count: usize,
    pub selection: Vec<u16>,
    pub load_error: Option<String>,
    pub player: SideInfo,
    pub enemy: SideInfo,
}

/// Information about one side of the battle
#[derive(Debug, Clone, Serialize)]
pub struct SideInfo {
    pub player_name: String,
    pub active_index: usize,
    pub team: Vec<PokemonInfo>,
    pub healthy_count: usize,
}

/// Information about a Pokemon for API queries
#[derive(Debug, Clone, Serialize)]
pub struct PokemonInfo {
    pub species_id: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub current_hp: u16,
    pub max_hp: u16,
    pub is_fainted: bool,
    pub status: Option<StatusCondition>,
    pub confused: bool,
    /// Move being charged, if any.
    pub charging: Option<String>,
    pub moves: Vec<MoveInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveInfo {
    pub id: String,
    pub name: String,
    pub move_type: PokemonType,
    pub power: u16,
    pub current_pp: u8,
    pub max_pp: u8,
}

impl BattleInfo {
    pub fn from_session(session: &BattleSession) -> Self {
        let trainer = session.trainer();
        BattleInfo {
            gauntlet: session.gauntlet(),
            phase: session.phase(),
            message: session.current_message().to_string(),
            trainer_name: trainer.name.to_string(),
            trainer_index: session.trainer_index(),
            trainer_count: session.gauntlet().trainers().len(),
            selection: session.selection().to_vec(),
            load_error: session.load_error().map(str::to_string),
            player: SideInfo::from_player(session.player()),
            enemy: SideInfo::from_player(session.enemy()),
        }
    }

    /// Whether a move or switch can be chosen right now.
    pub fn awaiting_combat_input(&self) -> bool {
        matches!(
            self.phase,
            BattlePhase::CombatMenu
                | BattlePhase::FightMenu
                | BattlePhase::SwitchMenu
                | BattlePhase::ForceSwitchPlayer
        )
    }
}

impl SideInfo {
    fn from_player(player: &BattlePlayer) -> Self {
        SideInfo {
            player_name: player.player_name.clone(),
            active_index: player.active_pokemon_index(),
            team: player.team().iter().map(PokemonInfo::from_pokemon).collect(),
            healthy_count: player.healthy_count(),
        }
    }

    pub fn active(&self) -> Option<&PokemonInfo> {
        self.team.get(self.active_index)
    }
}

impl PokemonInfo {
    fn from_pokemon(pokemon: &PokemonInst) -> Self {
        let moves = pokemon
            .moves
            .iter()
            .map(|instance| {
                let data = lookup_move(&instance.name);
                MoveInfo {
                    id: instance.name.clone(),
                    name: display_name(&data.name),
                    move_type: data.move_type,
                    power: data.power,
                    current_pp: instance.current_pp,
                    max_pp: instance.max_pp,
                }
            })
            .collect();

        PokemonInfo {
            species_id: pokemon.species_id,
            name: pokemon.name.clone(),
            types: pokemon.types.clone(),
            current_hp: pokemon.current_hp(),
            max_hp: pokemon.max_hp(),
            is_fainted: pokemon.is_fainted(),
            status: pokemon.status,
            confused: pokemon.volatiles.confusion.is_some(),
            charging: pokemon.volatiles.charging.clone(),
            moves,
        }
    }
}

impl SessionRunner {
    pub fn new(session: BattleSession, source: Arc<dyn RosterSource>) -> Self {
        Self { session, source }
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn battle_info(&self) -> BattleInfo {
        BattleInfo::from_session(&self.session)
    }

    pub fn take_unlock_signal(&mut self) -> bool {
        self.session.take_unlock_signal()
    }

    /// Apply a command and play out everything that follows it.
    /// Returns every line shown along the way.
    pub async fn submit(&mut self, command: PlayerCommand) -> CommandResult<Vec<String>> {
        let mut lines = Vec::new();
        self.submit_with(command, |line| lines.push(line.to_string()))
            .await?;
        Ok(lines)
    }

    /// Like [`submit`](Self::submit), but hands each line to `on_line` as soon
    /// as it is shown, so the caller can display it during the delay.
    pub async fn submit_with<F>(&mut self, command: PlayerCommand, mut on_line: F) -> CommandResult
    where
        F: FnMut(&str),
    {
        debug!(?command, phase = ?self.session.phase(), "submitting command");
        let mark = self.session.lines_shown();
        command.apply_to(&mut self.session)?;
        self.session.lines_since(mark).for_each(&mut on_line);
        self.settle_with(on_line).await
    }

    /// Fire timers and fulfil roster requests until the session waits on the player.
    pub async fn settle_with<F>(&mut self, mut on_line: F) -> CommandResult
    where
        F: FnMut(&str),
    {
        loop {
            let mark = self.session.lines_shown();
            if let Some(request) = self.session.pending_roster_request().cloned() {
                let result = fulfill(self.source.as_ref(), &request).await;
                self.session.deliver_rosters(result)?;
            } else if let Some(timer) = self.session.pending_timer() {
                if !timer.delay.is_zero() {
                    tokio::time::sleep(timer.delay).await;
                }
                self.session.fire(timer.token)?;
            } else {
                return Ok(());
            }
            self.session.lines_since(mark).for_each(&mut on_line);
        }
    }
}
