//! Error types for snapshot import.

use std::fmt;

/// Reasons a serialized match snapshot can be rejected.
///
/// Import is all-or-nothing: any of these leaves the running match (if
/// one exists) untouched.
#[derive(Debug)]
pub enum SnapshotError {
    /// The payload is not valid JSON or does not match the schema.
    Parse(serde_json::Error),
    /// The phase ordinal is unknown or not importable (the executing
    /// phase only exists inside a resolution pass).
    InvalidPhase(i32),
    /// The winner field names a player that does not exist.
    InvalidWinner(i32),
    /// The winner field disagrees with the phase: a declared winner
    /// requires the game-over phase, and vice versa.
    WinnerPhaseMismatch {
        /// Phase ordinal carried by the snapshot.
        phase: i32,
        /// Winner id carried by the snapshot.
        winner: i32,
    },
    /// The snapshot does not contain exactly two players.
    WrongPlayerCount(usize),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Parse(err) => write!(f, "malformed snapshot: {err}"),
            SnapshotError::InvalidPhase(ordinal) => {
                write!(f, "unknown phase ordinal: {ordinal}")
            }
            SnapshotError::InvalidWinner(winner) => {
                write!(f, "invalid winner id: {winner}")
            }
            SnapshotError::WinnerPhaseMismatch { phase, winner } => {
                write!(f, "winner {winner} inconsistent with phase ordinal {phase}")
            }
            SnapshotError::WrongPlayerCount(count) => {
                write!(f, "expected 2 players, snapshot has {count}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Parse(err)
    }
}

/// Result type for snapshot import.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
