//! Pokemon Gauntlet MCP Server
//!
//! A Model Context Protocol server (rmcp) that lets an LLM client play a
//! gauntlet run. Narration is returned as text; timed phases play out
//! instantly.

use std::borrow::Cow;
use std::sync::Arc;

use pokemon_gauntlet::battle::runner::{PlayerCommand, SessionRunner};
use pokemon_gauntlet::battle::session::{BattlePhase, BattleSession};
use pokemon_gauntlet::config::{GauntletConfig, PacingConfig};
use pokemon_gauntlet::interface::{
    display_battle_status, display_moves, display_roster, display_team_status,
    handle_lookup_move_command, prompt_for, resolve_move_id,
};
use pokemon_gauntlet::progress::Progress;
use pokemon_gauntlet::trainers::Gauntlet;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct GauntletService {
    tool_router: ToolRouter<GauntletService>,
    config: Arc<GauntletConfig>,
    runner: Arc<Mutex<SessionRunner>>,
    progress: Arc<Mutex<Progress>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NewGameRequest {
    #[schemars(description = "Challenge the Elite Four instead of the gym leaders (requires the unlock)")]
    pub elite_four: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ChoosePokemonRequest {
    #[schemars(description = "National dex number (1-386) to add to or remove from the team")]
    pub species_id: u16,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UseMoveRequest {
    #[schemars(description = "Name or slot number (1-4) of the move to use")]
    pub move_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SwitchPokemonRequest {
    #[schemars(description = "Team slot to switch to (1-6)")]
    pub pokemon_number: u8,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckRequest {
    #[schemars(description = "What to check: 'team', 'opponent', or 'moves'")]
    pub target: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupMoveRequest {
    #[schemars(description = "Name of the move to look up")]
    pub move_name: String,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

fn new_runner(config: &GauntletConfig, gauntlet: Gauntlet) -> SessionRunner {
    let session = BattleSession::new(gauntlet, PacingConfig::instant(), config.rng(0));
    SessionRunner::new(session, config.build_roster_source())
}

#[tool_router]
impl GauntletService {
    pub fn new(config: GauntletConfig) -> Self {
        let progress = Progress::load(&config.progress_file);
        let runner = new_runner(&config, Gauntlet::GymLeaders);
        Self {
            tool_router: Self::tool_router(),
            config: Arc::new(config),
            runner: Arc::new(Mutex::new(runner)),
            progress: Arc::new(Mutex::new(progress)),
        }
    }

    /// Run a sequence of commands and report the narration plus the new status.
    async fn play(&self, commands: Vec<PlayerCommand>) -> Result<CallToolResult, McpError> {
        let mut runner = self.runner.lock().await;
        let mut lines = Vec::new();
        for command in commands {
            match runner.submit(command).await {
                Ok(shown) => lines.extend(shown),
                Err(err) => {
                    lines.push(format!("Error: {}", err));
                    break;
                }
            }
        }

        if runner.take_unlock_signal() {
            let mut progress = self.progress.lock().await;
            if progress.record_unlock(true) {
                progress
                    .save(&self.config.progress_file)
                    .map_err(|err| internal_error(format!("Error saving progress: {}", err)))?;
                lines.push("The Elite Four is now unlocked!".to_string());
            }
        }

        let info = runner.battle_info();
        lines.push(String::new());
        lines.push(display_battle_status(&info));
        lines.push(format!("Next: {}", prompt_for(&info)));
        Ok(CallToolResult::success(vec![Content::text(lines.join("\n"))]))
    }

    #[tool(description = "Start over in team selection, for the gym leaders or the Elite Four")]
    async fn new_game(
        &self,
        Parameters(request): Parameters<NewGameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let gauntlet = if request.elite_four {
            if !self.progress.lock().await.elite_four_unlocked {
                return Err(internal_error(
                    "The Elite Four is locked. Defeat all 8 gym leaders first.".to_string(),
                ));
            }
            Gauntlet::EliteFour
        } else {
            Gauntlet::GymLeaders
        };

        let mut runner = self.runner.lock().await;
        *runner = new_runner(&self.config, gauntlet);
        info!(?gauntlet, "new game");
        let text = format!(
            "{}\nNext: {}",
            display_battle_status(&runner.battle_info()),
            prompt_for(&runner.battle_info())
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List Pokemon available for team selection")]
    async fn list_roster(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(display_roster())]))
    }

    #[tool(description = "Add a Pokemon to the team, or remove it if already chosen")]
    async fn choose_pokemon(
        &self,
        Parameters(request): Parameters<ChoosePokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.play(vec![PlayerCommand::ToggleSelection(request.species_id)])
            .await
    }

    #[tool(description = "Begin the gauntlet once six Pokemon are chosen; loads the first battle")]
    async fn begin_story(&self) -> Result<CallToolResult, McpError> {
        self.play(vec![PlayerCommand::BeginStory]).await
    }

    #[tool(description = "Start the loaded battle against the waiting trainer")]
    async fn start_battle(&self) -> Result<CallToolResult, McpError> {
        self.play(vec![PlayerCommand::StartBattle]).await
    }

    #[tool(description = "Use a move with the active Pokemon")]
    async fn use_move(
        &self,
        Parameters(request): Parameters<UseMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let info = self.runner.lock().await.battle_info();
        let move_id = match resolve_move_id(request.move_name.trim(), &info) {
            Ok(id) => id,
            Err(message) => return Ok(CallToolResult::success(vec![Content::text(message)])),
        };
        let mut commands = Vec::new();
        if info.phase == BattlePhase::CombatMenu {
            commands.push(PlayerCommand::OpenFightMenu);
        }
        commands.push(PlayerCommand::UseMove(move_id));
        self.play(commands).await
    }

    #[tool(description = "Switch to a different Pokemon on your team")]
    async fn switch_pokemon(
        &self,
        Parameters(request): Parameters<SwitchPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(index) = (request.pokemon_number as usize).checked_sub(1) else {
            return Ok(CallToolResult::success(vec![Content::text(
                "Invalid Pokemon number. Use 1-6.",
            )]));
        };
        let phase = self.runner.lock().await.session().phase();
        let mut commands = Vec::new();
        if phase == BattlePhase::CombatMenu {
            commands.push(PlayerCommand::OpenSwitchMenu);
        }
        commands.push(PlayerCommand::SwitchTo(index));
        self.play(commands).await
    }

    #[tool(description = "Go on to the next trainer after a win")]
    async fn next_trainer(&self) -> Result<CallToolResult, McpError> {
        self.play(vec![PlayerCommand::NextTrainer]).await
    }

    #[tool(description = "Return to team selection after a victory, defeat or loading error")]
    async fn return_to_menu(&self) -> Result<CallToolResult, McpError> {
        self.play(vec![PlayerCommand::ReturnToMenu]).await
    }

    #[tool(description = "Get the current phase, both active Pokemon and the latest message")]
    async fn get_battle_state(&self) -> Result<CallToolResult, McpError> {
        let info = self.runner.lock().await.battle_info();
        let text = format!("{}\nNext: {}", display_battle_status(&info), prompt_for(&info));
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Check your team, the opponent's team, or your active Pokemon's moves")]
    async fn check(
        &self,
        Parameters(request): Parameters<CheckRequest>,
    ) -> Result<CallToolResult, McpError> {
        let info = self.runner.lock().await.battle_info();
        let text = match request.target.trim().to_lowercase().as_str() {
            "team" | "self" => display_team_status(&info.player),
            "opponent" | "enemy" => display_team_status(&info.enemy),
            "moves" => display_moves(&info.player),
            _ => "Unknown check command. Use 'team', 'opponent', or 'moves'.".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Look up detailed information about a Pokemon move")]
    async fn lookup_move(
        &self,
        Parameters(request): Parameters<LookupMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = handle_lookup_move_command(&request.move_name);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for GauntletService {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GauntletConfig::from_env();
    info!(source = %config.roster_source, "Pokemon Gauntlet MCP server starting");

    let service = GauntletService::new(config);
    let server = service.serve((stdin(), stdout())).await?;
    let quit_reason = server.waiting().await?;

    info!(?quit_reason, "Pokemon Gauntlet MCP server exiting");
    Ok(())
}
