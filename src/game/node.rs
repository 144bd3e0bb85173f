//! Installations (nodes): the three fixed structures each player owns.

use crate::game::Position;

/// Starting (and maximum) hit points for every node in the standard setup.
pub const NODE_HP: i32 = 50;

/// The three installation kinds.
///
/// The set is closed and known at compile time, so per-kind lookup uses a
/// fixed-size array indexed by [`NodeKind::index`] rather than a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeKind {
    /// The core. Losing it loses the match.
    Core = 0,
    /// Communications. Gates the spy action.
    Comms = 1,
    /// Research. Gates the attack and hack actions.
    Research = 2,
}

impl NodeKind {
    /// All kinds, in index order.
    pub const ALL: [NodeKind; 3] = [NodeKind::Core, NodeKind::Comms, NodeKind::Research];

    /// Stable array index for this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used in log lines and snapshots.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Core => "core",
            NodeKind::Comms => "comms",
            NodeKind::Research => "research",
        }
    }
}

/// A single installation.
///
/// Hit points stay within `[0, max_hp]` across every mutation. A node at
/// 0 hp is "down" but the entity persists for the rest of the match.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    /// Which installation this is.
    pub kind: NodeKind,
    /// Fixed board position.
    pub position: Position,
    hp: i32,
    max_hp: i32,
    defended: bool,
}

impl Node {
    /// Create a node. `hp` is clamped into `[0, max_hp]`; a non-positive
    /// `max_hp` yields a node that is permanently down.
    #[must_use]
    pub fn new(kind: NodeKind, position: Position, hp: i32, max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            kind,
            position,
            hp: hp.clamp(0, max_hp),
            max_hp,
            defended: false,
        }
    }

    /// Current hit points.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Whether the defense flag is armed.
    #[must_use]
    pub const fn is_defended(&self) -> bool {
        self.defended
    }

    /// Whether the node is operational (hp above zero).
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Arm or clear the defense flag.
    pub fn set_defended(&mut self, defended: bool) {
        self.defended = defended;
    }

    /// Apply damage.
    ///
    /// An armed defense flag halves the amount (integer truncation) and is
    /// consumed: it absorbs exactly one incoming hit, even when the halved
    /// amount rounds down to zero. Non-positive amounts are no-ops and do
    /// not consume the flag. Hit points clamp at zero.
    pub fn damage(&mut self, amount: i32) {
        let mut amount = amount;
        if self.defended && amount > 0 {
            amount /= 2;
            self.defended = false;
        }
        if amount <= 0 {
            return;
        }
        self.hp = (self.hp - amount).max(0);
    }

    /// Apply healing. Non-positive amounts are no-ops; hit points clamp at
    /// `max_hp`.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }
}
