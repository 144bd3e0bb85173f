//! Match invariants - sanity checks that detect bugs.
//!
//! Every mutation path already clamps its values, so these should NEVER
//! trigger in a correctly implemented engine. If they do, it indicates a
//! bug, not a gameplay situation.

use crate::game::{GameState, NodeKind, Phase};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all match invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// These are bug detectors, not gameplay limits.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for id in 0..=1u8 {
        let Some(player) = state.player(id) else {
            continue;
        };

        if player.intel_points() < 0 {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {id} has negative intel balance {}",
                    player.intel_points()
                ),
            });
        }

        for kind in NodeKind::ALL {
            let node = player.node(kind);
            if node.hp() < 0 || node.hp() > node.max_hp() {
                violations.push(InvariantViolation {
                    message: format!(
                        "Player {id} {} node hp {} outside [0, {}]",
                        kind.name(),
                        node.hp(),
                        node.max_hp()
                    ),
                });
            }
        }

        for group in player.infantry() {
            if group.hp() < 0 || group.hp() > group.max_hp() {
                violations.push(InvariantViolation {
                    message: format!(
                        "Infantry {} hp {} outside [0, {}]",
                        group.id(),
                        group.hp(),
                        group.max_hp()
                    ),
                });
            }
            if group.count() != (group.hp() + 1) / 2 {
                violations.push(InvariantViolation {
                    message: format!(
                        "Infantry {} count {} does not match hp {}",
                        group.id(),
                        group.count(),
                        group.hp()
                    ),
                });
            }
        }

        let lr = player.long_range();
        if lr.hp() < 0 || lr.hp() > lr.max_hp() {
            violations.push(InvariantViolation {
                message: format!(
                    "Long-range unit {} hp {} outside [0, {}]",
                    lr.id(),
                    lr.hp(),
                    lr.max_hp()
                ),
            });
        }
        if lr.count() != (lr.hp() + 1) / 2 {
            violations.push(InvariantViolation {
                message: format!(
                    "Long-range unit {} count {} does not match hp {}",
                    lr.id(),
                    lr.count(),
                    lr.hp()
                ),
            });
        }
    }

    // Winner and phase must agree: a winner exists exactly in game over.
    match (state.winner(), state.phase()) {
        (Some(_), Phase::GameOver) | (None, Phase::Planning | Phase::Executing) => {}
        (Some(winner), phase) => violations.push(InvariantViolation {
            message: format!("Winner {winner} declared but phase is {phase:?}"),
        }),
        (None, Phase::GameOver) => violations.push(InvariantViolation {
            message: "Phase is GameOver with no winner declared".to_string(),
        }),
    }

    if let Some(winner) = state.winner() {
        if state.player(winner).is_none() {
            violations.push(InvariantViolation {
                message: format!("Winner {winner} is not a valid player id"),
            });
        }
    }

    violations
}

/// Assert all match invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Match invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
