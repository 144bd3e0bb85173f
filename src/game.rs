//! Game rules layer for Noise Before Defeat.
//!
//! Implements the authoritative match rules:
//! - Positions on an unbounded integer grid with a diamond board bound
//! - Installations (core, comms, research) with clamped hit points
//! - Mobile units (infantry groups, long-range unit) sharing a
//!   2-hp-per-man health pool model
//! - Players aggregating installations, units, and intel points
//! - The planning/executing phase machine with FIFO simultaneous resolution

mod action;
mod invariants;
mod node;
mod player;
mod position;
mod state;
mod unit;

pub use action::{Action, ActionKind, HACK_COST, HACK_DAMAGE, SPY_INTEL_REWARD};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use node::{NODE_HP, Node, NodeKind};
pub use player::{INITIAL_INTEL, Player, PlayerId};
pub use position::{GRID_SIZE, Position};
pub use state::{GameState, Phase};
pub use unit::{HP_PER_UNIT, InfantryGroup, LongRangeUnit, TargetKind};
