//! Player actions and gameplay constants.

use crate::game::{PlayerId, Position};

/// Intel cost of a hack.
pub const HACK_COST: i32 = 40;

/// Flat damage a hack deals to the node at its target (before the target's
/// own defense mitigation).
pub const HACK_DAMAGE: i32 = 50;

/// Intel granted by a successful spy action.
pub const SPY_INTEL_REWARD: i32 = 15;

/// The closed set of action kinds a player may submit.
///
/// Unknown action names take an explicit rejection path at the submission
/// boundary; they never reach the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Move a unit one square toward the target position.
    Move,
    /// Strike the opposing piece at the target position.
    Attack,
    /// Spend intel to damage the opposing node at the target position.
    Hack,
    /// Arm the defense flag on the player's own node at the target.
    Defend,
    /// Gather intel (requires comms).
    Spy,
}

impl ActionKind {
    /// Lowercase wire/log name of this action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Attack => "attack",
            ActionKind::Hack => "hack",
            ActionKind::Defend => "defend",
            ActionKind::Spy => "spy",
        }
    }

    /// Parse the wire name of an action. `None` for anything outside the
    /// closed set.
    #[must_use]
    pub fn parse(name: &str) -> Option<ActionKind> {
        match name {
            "move" => Some(ActionKind::Move),
            "attack" => Some(ActionKind::Attack),
            "hack" => Some(ActionKind::Hack),
            "defend" => Some(ActionKind::Defend),
            "spy" => Some(ActionKind::Spy),
            _ => None,
        }
    }
}

/// A queued action: who does what, aimed where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    /// The acting player.
    pub player: PlayerId,
    /// What they do.
    pub kind: ActionKind,
    /// Where it is aimed.
    pub target: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for kind in [
            ActionKind::Move,
            ActionKind::Attack,
            ActionKind::Hack,
            ActionKind::Defend,
            ActionKind::Spy,
        ] {
            assert_eq!(ActionKind::parse(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ActionKind::parse("teleport"), None);
        assert_eq!(ActionKind::parse(""), None);
        assert_eq!(ActionKind::parse("Move"), None);
    }
}
