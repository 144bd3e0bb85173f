// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Noise Before Defeat: the rules engine for a two-player simultaneous-turn
//! tactical board game.
//!
//! This crate provides a headless match core designed for:
//! - Deterministic, synchronous turn resolution
//! - A primitive-typed facade for FFI and scripting hosts
//! - JSON snapshots that untrusted payloads cannot corrupt
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      Engine (flat facade)           │
//! ├─────────────────────────────────────┤
//! │   GameState (turn/phase machine)    │
//! ├─────────────────────────────────────┤
//! │  Players, units, nodes, positions   │
//! └─────────────────────────────────────┘
//! ```

pub mod engine;
pub mod error;
pub mod game;
pub mod snapshot;

pub use engine::Engine;
pub use error::{SnapshotError, SnapshotResult};
pub use snapshot::Snapshot;

// Re-export key game types at crate root for convenience
pub use game::{
    Action, ActionKind, GameState, Node, NodeKind, Phase, Player, PlayerId, Position,
};
