//! Embedding facade over the match core.
//!
//! [`Engine`] exposes the whole rules engine through a flat, primitive-typed
//! surface: integer ids and coordinates in, integers and JSON strings out,
//! and no panics on any input. Hosts that cannot speak rich Rust types (FFI,
//! scripting bridges) talk to this; native callers can use
//! [`GameState`] directly.

use crate::error::SnapshotResult;
use crate::game::{GameState, Player, PlayerId, Position};
use crate::snapshot::Snapshot;

/// A match host. Starts empty; every accessor has a defined answer before
/// [`Engine::initialize`] is called.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    state: Option<GameState>,
}

impl Engine {
    /// Create an engine with no match loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh match, replacing any match in progress.
    pub fn initialize(&mut self, name0: &str, name1: &str) {
        self.state = Some(GameState::new(name0, name1));
    }

    /// Whether a match is loaded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Submit an action by wire name and target coordinates.
    ///
    /// Out-of-range player ids take the same rejection path as unknown
    /// ids; with no match loaded this is a no-op.
    pub fn submit_action(&mut self, player_id: i32, action: &str, x: i32, y: i32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let player = PlayerId::try_from(player_id).unwrap_or(PlayerId::MAX);
        state.submit_named_action(player, action, Position::new(x, y));
    }

    /// Resolve the queued actions and advance the match. No-op with no
    /// match loaded.
    pub fn end_turn(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.end_turn();
        }
    }

    /// Whether the loaded match has ended. `false` with no match loaded.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.as_ref().is_some_and(GameState::is_game_over)
    }

    /// The winner's id, or `-1` while the match is undecided or no match
    /// is loaded.
    #[must_use]
    pub fn winner(&self) -> i32 {
        self.state
            .as_ref()
            .and_then(GameState::winner)
            .map_or(-1, i32::from)
    }

    /// Current turn number, or `0` with no match loaded.
    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.state.as_ref().map_or(0, GameState::turn)
    }

    /// Current phase ordinal, or `-1` with no match loaded.
    #[must_use]
    pub fn phase(&self) -> i32 {
        self.state.as_ref().map_or(-1, |s| s.phase().ordinal())
    }

    /// A player of the loaded match, if both the match and the id exist.
    #[must_use]
    pub fn player(&self, player_id: i32) -> Option<&Player> {
        let id = PlayerId::try_from(player_id).ok()?;
        self.state.as_ref()?.player(id)
    }

    /// The event log of the loaded match; empty with no match loaded.
    #[must_use]
    pub fn log(&self) -> &[String] {
        self.state.as_ref().map_or(&[], GameState::log)
    }

    /// The loaded match state, if any.
    #[must_use]
    pub const fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Export the loaded match as a JSON snapshot, or `"{}"` with no
    /// match loaded.
    #[must_use]
    pub fn export_state(&self) -> String {
        self.state
            .as_ref()
            .map_or_else(|| "{}".to_string(), |s| Snapshot::capture(s).to_json())
    }

    /// Replace the loaded match with one restored from a JSON snapshot.
    ///
    /// Import is all-or-nothing: on any error the previously loaded match
    /// (or the absence of one) is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is malformed or structurally
    /// invalid; see [`crate::error::SnapshotError`].
    pub fn import_state(&mut self, json: &str) -> SnapshotResult<()> {
        let restored = Snapshot::from_json(json)?.restore()?;
        self.state = Some(restored);
        Ok(())
    }
}
