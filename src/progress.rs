//! The one piece of state that outlives a run: whether the Elite Four is unlocked.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub elite_four_unlocked: bool,
}

impl Progress {
    /// Read the progress file. A missing or unreadable file means a fresh start.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read progress file");
                return Self::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "ignoring corrupt progress file");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), unlocked = self.elite_four_unlocked, "progress saved");
        Ok(())
    }

    /// Record an unlock signal. Returns true when the flag changed.
    pub fn record_unlock(&mut self, unlocked: bool) -> bool {
        let changed = unlocked && !self.elite_four_unlocked;
        self.elite_four_unlocked |= unlocked;
        changed
    }
}
