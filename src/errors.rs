use schema::Move;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or writing a battle dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read battle data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed battle data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize battle data: {0}")]
    Serialize(#[from] ron::Error),
}

/// Reasons a player's action is rejected before a turn starts.
///
/// These never escape the engine. The `Display` text is narrated to the player
/// as a `move_select` event and the battle state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Invalid move selected!")]
    MoveNotKnown(Move),
    #[error("No PP left for this move!")]
    NoPpRemaining(Move),
    #[error("Battle error: opponent has no moves")]
    OpponentHasNoMoves,
    #[error("The battle is already over!")]
    BattleOver,
}

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;
