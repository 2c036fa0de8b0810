//! Runtime configuration read from the environment.
use crate::battle::state::TurnRng;
use crate::prefab_teams::PrefabRoster;
use crate::roster::pokeapi::PokeApiRoster;
use crate::roster::RosterSource;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use strum::{Display, EnumString};

pub const DEFAULT_POKEAPI_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PROGRESS_FILE: &str = "gauntlet_progress.json";

/// Where team data comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RosterSourceKind {
    /// Live PokeAPI over HTTP.
    #[default]
    PokeApi,
    /// The bundled Gen 1-3 table; no network.
    Offline,
}

/// Settings shared by the terminal driver and the MCP server.
#[derive(Clone, Debug)]
pub struct GauntletConfig {
    pub roster_source: RosterSourceKind,
    pub pokeapi_url: String,
    pub pacing: PacingConfig,
    /// JSON file holding the capstone unlock flag.
    pub progress_file: PathBuf,
    /// Fixed RNG seed for reproducible battles.
    pub seed: Option<u64>,
}

impl Default for GauntletConfig {
    fn default() -> Self {
        Self {
            roster_source: RosterSourceKind::default(),
            pokeapi_url: DEFAULT_POKEAPI_URL.to_string(),
            pacing: PacingConfig::default(),
            progress_file: PathBuf::from(DEFAULT_PROGRESS_FILE),
            seed: None,
        }
    }
}

impl GauntletConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GAUNTLET_ROSTER_SOURCE` - `pokeapi` or `offline` (default: pokeapi)
    /// - `GAUNTLET_POKEAPI_URL` - PokeAPI base URL
    /// - `GAUNTLET_PACING_SCALE` - multiplier on every narrative delay, 0 disables them (default: 1.0)
    /// - `GAUNTLET_COMBAT_STEP_MS` - delay per narrated combat line (default: 1000)
    /// - `GAUNTLET_PROGRESS_FILE` - unlock flag location (default: gauntlet_progress.json)
    /// - `GAUNTLET_SEED` - fixed RNG seed
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(source) = read_env::<RosterSourceKind>("GAUNTLET_ROSTER_SOURCE") {
            config.roster_source = source;
        }
        if let Ok(url) = env::var("GAUNTLET_POKEAPI_URL") {
            config.pokeapi_url = url.trim_end_matches('/').to_string();
        }
        if let Some(step) = read_env::<u64>("GAUNTLET_COMBAT_STEP_MS") {
            config.pacing.combat_step_ms = step;
        }
        if let Some(scale) = read_env::<f64>("GAUNTLET_PACING_SCALE") {
            config.pacing = config.pacing.scaled(scale);
        }
        if let Ok(path) = env::var("GAUNTLET_PROGRESS_FILE") {
            config.progress_file = PathBuf::from(path);
        }
        config.seed = read_env::<u64>("GAUNTLET_SEED");

        config
    }

    /// A fresh RNG. With a fixed seed, each `stream` gets its own reproducible sequence.
    pub fn rng(&self, stream: u64) -> TurnRng {
        match self.seed {
            Some(seed) => TurnRng::from_seed(seed.wrapping_add(stream)),
            None => TurnRng::new_random(),
        }
    }

    pub fn build_roster_source(&self) -> Arc<dyn RosterSource> {
        match self.roster_source {
            RosterSourceKind::PokeApi => {
                Arc::new(PokeApiRoster::new(self.pokeapi_url.clone(), self.rng(1)))
            }
            RosterSourceKind::Offline => Arc::new(PrefabRoster::new(self.rng(1))),
        }
    }
}

/// Narrative delays between timed phases, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacingConfig {
    pub intro_ms: u64,
    pub trainer_intro_ms: u64,
    pub trash_talk_ms: u64,
    pub send_out_enemy_ms: u64,
    pub send_out_player_ms: u64,
    /// Per narrated line while a round plays out.
    pub combat_step_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            intro_ms: 4000,
            trainer_intro_ms: 3000,
            trash_talk_ms: 3000,
            send_out_enemy_ms: 2000,
            send_out_player_ms: 2000,
            combat_step_ms: 1000,
        }
    }
}

impl PacingConfig {
    /// Every delay zero. Timers still have to be fired.
    pub fn instant() -> Self {
        Self {
            intro_ms: 0,
            trainer_intro_ms: 0,
            trash_talk_ms: 0,
            send_out_enemy_ms: 0,
            send_out_player_ms: 0,
            combat_step_ms: 0,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 1.0 };
        let scale = |ms: u64| (ms as f64 * factor).round() as u64;
        Self {
            intro_ms: scale(self.intro_ms),
            trainer_intro_ms: scale(self.trainer_intro_ms),
            trash_talk_ms: scale(self.trash_talk_ms),
            send_out_enemy_ms: scale(self.send_out_enemy_ms),
            send_out_player_ms: scale(self.send_out_player_ms),
            combat_step_ms: scale(self.combat_step_ms),
        }
    }

    /// How long a round's narration lingers before its outcome is applied.
    pub fn combat_resolution(&self, lines: usize) -> Duration {
        Duration::from_millis(self.combat_step_ms.saturating_mul(lines.max(1) as u64))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
