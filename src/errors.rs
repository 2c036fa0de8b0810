use crate::battle::session::BattlePhase;

/// Result alias for session commands.
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Reasons a switch target is refused. Nothing is mutated when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SwitchError {
    #[error("there is no Pokemon in slot {0}")]
    OutOfRange(usize),
    #[error("{0} has fainted and cannot battle")]
    Fainted(String),
    #[error("{0} is already in battle")]
    AlreadyActive(String),
}

/// A player command rejected at the session boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{command} is not available during {phase:?}")]
    WrongPhase {
        command: &'static str,
        phase: BattlePhase,
    },
    #[error("choose exactly {required} Pokemon before starting ({selected} chosen)")]
    IncompleteSelection { required: usize, selected: usize },
    #[error("Pokemon #{0} is not available; pick an id between 1 and 386")]
    UnknownSpecies(u16),
    #[error("your team already has {0} Pokemon")]
    SelectionFull(usize),
    #[error("{pokemon} does not know {move_name}")]
    UnknownMove { pokemon: String, move_name: String },
    #[error("{move_name} has no PP left")]
    NoPpLeft { move_name: String },
    #[error(transparent)]
    InvalidSwitch(#[from] SwitchError),
    #[error("no roster request is waiting for data")]
    NoPendingRoster,
    #[error("no battle is loaded")]
    NoActiveBattle,
}

/// Failures of a roster source. The session surfaces these and waits for the player to back out.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed Pokemon data: {0}")]
    Malformed(String),
    #[error("no Gen 1-3 Pokemon of type {0}")]
    NoCandidates(schema::PokemonType),
    #[error("Pokemon #{0} is outside the supported range")]
    UnknownSpecies(u16),
    #[error("roster source returned no Pokemon")]
    Empty,
}
