//! Player state: installations, units, and intel.

use crate::game::{InfantryGroup, LongRangeUnit, NODE_HP, Node, NodeKind, Position, TargetKind};

/// Unique identifier for a player (0 or 1).
pub type PlayerId = u8;

/// Intel points a player starts the match with.
pub const INITIAL_INTEL: i32 = 100;

/// One side of the match.
///
/// Owns exactly one node of each kind, zero or more infantry groups, and
/// one long-range unit. Intel points never go negative: spending is gated
/// on the balance.
#[derive(Debug, Clone)]
pub struct Player {
    /// Player id, 0 or 1.
    pub id: PlayerId,
    /// Display name, used in log lines.
    pub name: String,
    intel_points: i32,
    nodes: [Node; 3],
    infantry: Vec<InfantryGroup>,
    long_range: LongRangeUnit,
    next_unit_id: u32,
}

impl Player {
    /// Create a player with full-health nodes at the given positions, no
    /// infantry, an empty long-range unit, and the starting intel balance.
    #[must_use]
    pub fn new(
        id: PlayerId,
        name: String,
        core_pos: Position,
        comms_pos: Position,
        research_pos: Position,
    ) -> Self {
        Self {
            id,
            name,
            intel_points: INITIAL_INTEL,
            nodes: [
                Node::new(NodeKind::Core, core_pos, NODE_HP, NODE_HP),
                Node::new(NodeKind::Comms, comms_pos, NODE_HP, NODE_HP),
                Node::new(NodeKind::Research, research_pos, NODE_HP, NODE_HP),
            ],
            infantry: Vec::new(),
            long_range: LongRangeUnit::new(Position::default(), 0, String::new()),
            next_unit_id: 1,
        }
    }

    /// Rebuild a player from restored state. The unit-id counter is
    /// re-seeded past every numeric id suffix already in use so future ids
    /// stay unique.
    #[must_use]
    pub(crate) fn from_parts(
        id: PlayerId,
        name: String,
        intel_points: i32,
        nodes: [Node; 3],
        infantry: Vec<InfantryGroup>,
        long_range: LongRangeUnit,
    ) -> Self {
        let next_unit_id = infantry
            .iter()
            .map(InfantryGroup::id)
            .chain(std::iter::once(long_range.id()))
            .filter_map(id_counter_suffix)
            .max()
            .map_or(1, |n| n + 1);

        Self {
            id,
            name,
            intel_points: intel_points.max(0),
            nodes,
            infantry,
            long_range,
            next_unit_id,
        }
    }

    // ----- nodes -----

    /// The node of the given kind. The kind set is closed, so this cannot
    /// fail.
    #[must_use]
    pub const fn node(&self, kind: NodeKind) -> &Node {
        &self.nodes[kind.index()]
    }

    /// Mutable access to the node of the given kind.
    #[must_use]
    pub fn node_mut(&mut self, kind: NodeKind) -> &mut Node {
        &mut self.nodes[kind.index()]
    }

    /// Damage the node of the given kind (defense mitigation applies).
    pub fn damage_node(&mut self, kind: NodeKind, amount: i32) {
        self.node_mut(kind).damage(amount);
    }

    /// Heal the node of the given kind.
    pub fn heal_node(&mut self, kind: NodeKind, amount: i32) {
        self.node_mut(kind).heal(amount);
    }

    /// Arm the defense flag on the node of the given kind.
    pub fn defend_node(&mut self, kind: NodeKind) {
        self.node_mut(kind).set_defended(true);
    }

    /// The player's own node at a position, if any.
    #[must_use]
    pub fn node_kind_at(&self, position: Position) -> Option<NodeKind> {
        NodeKind::ALL
            .into_iter()
            .find(|&kind| self.node(kind).position == position)
    }

    /// Whether the core is operational.
    #[must_use]
    pub const fn is_core_alive(&self) -> bool {
        self.node(NodeKind::Core).is_alive()
    }

    /// Whether comms is operational (gates spy).
    #[must_use]
    pub const fn is_comms_alive(&self) -> bool {
        self.node(NodeKind::Comms).is_alive()
    }

    /// Whether research is operational (gates attack and hack).
    #[must_use]
    pub const fn is_research_alive(&self) -> bool {
        self.node(NodeKind::Research).is_alive()
    }

    // ----- intel -----

    /// Current intel balance.
    #[must_use]
    pub const fn intel_points(&self) -> i32 {
        self.intel_points
    }

    /// Add intel. The balance never drops below zero, so a negative grant
    /// clamps rather than overdrafts.
    pub fn add_intel(&mut self, amount: i32) {
        self.intel_points = self.intel_points.saturating_add(amount).max(0);
    }

    /// Spend intel. A no-op returning `false` when the balance is short or
    /// the amount is non-positive; the balance never goes negative.
    pub fn spend_intel(&mut self, amount: i32) -> bool {
        if amount <= 0 || self.intel_points < amount {
            return false;
        }
        self.intel_points -= amount;
        true
    }

    // ----- units -----

    /// Infantry groups, in creation order.
    #[must_use]
    pub fn infantry(&self) -> &[InfantryGroup] {
        &self.infantry
    }

    /// Mutable view of the infantry groups.
    #[must_use]
    pub fn infantry_mut(&mut self) -> &mut [InfantryGroup] {
        &mut self.infantry
    }

    /// The long-range unit.
    #[must_use]
    pub const fn long_range(&self) -> &LongRangeUnit {
        &self.long_range
    }

    /// Mutable access to the long-range unit.
    #[must_use]
    pub fn long_range_mut(&mut self) -> &mut LongRangeUnit {
        &mut self.long_range
    }

    /// Add a new infantry group of `count` soldiers; returns its generated
    /// id (`p<player>-inf-<n>`, from a monotonic per-player counter).
    pub fn add_infantry_group(&mut self, position: Position, count: i32) -> String {
        let id = self.generate_unit_id("inf");
        self.infantry
            .push(InfantryGroup::new(position, count, id.clone()));
        id
    }

    /// Replace the long-range unit with a fresh stack of `count` pieces;
    /// returns its generated id (`p<player>-lr-<n>`).
    pub fn set_long_range_unit(&mut self, position: Position, count: i32) -> String {
        let id = self.generate_unit_id("lr");
        self.long_range = LongRangeUnit::new(position, count, id.clone());
        id
    }

    /// Split `count` soldiers off the infantry group with the given id,
    /// registering the new group. Returns the new group's id, or `None`
    /// when the id is unknown or the split was a no-op.
    pub fn split_infantry(&mut self, id: &str, count: i32) -> Option<String> {
        let group = self.infantry.iter_mut().find(|g| g.id() == id)?;
        let split = group.split(count);
        if !split.is_alive() {
            return None;
        }
        let split_id = split.id().to_string();
        self.infantry.push(split);
        Some(split_id)
    }

    /// The living infantry group at a position, if any (first in creation
    /// order).
    #[must_use]
    pub fn infantry_at(&self, position: Position) -> Option<&InfantryGroup> {
        self.infantry
            .iter()
            .find(|g| g.is_alive() && g.position() == position)
    }

    /// Mutable variant of [`Player::infantry_at`].
    #[must_use]
    pub fn infantry_at_mut(&mut self, position: Position) -> Option<&mut InfantryGroup> {
        self.infantry
            .iter_mut()
            .find(|g| g.is_alive() && g.position() == position)
    }

    /// Drop infantry groups that have been wiped out.
    pub fn remove_dead_infantry(&mut self) {
        self.infantry.retain(InfantryGroup::is_alive);
    }

    /// Whether any of this player's pieces sits on the position. Nodes
    /// block their square even when down; units only while alive.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        NodeKind::ALL
            .into_iter()
            .any(|kind| self.node(kind).position == position)
            || self.infantry_at(position).is_some()
            || (self.long_range.is_alive() && self.long_range.position() == position)
    }

    /// What an attacker aiming at `position` would hit, checked in the
    /// order the rules prescribe: infantry, then the long-range unit, then
    /// nodes.
    #[must_use]
    pub fn target_kind_at(&self, position: Position) -> Option<TargetKind> {
        if self.infantry_at(position).is_some() {
            return Some(TargetKind::Infantry);
        }
        if self.long_range.is_alive() && self.long_range.position() == position {
            return Some(TargetKind::LongRange);
        }
        self.node_kind_at(position).map(TargetKind::from)
    }

    /// Move the first living unit adjacent to `target` (infantry in
    /// creation order, then the long-range unit) onto it. Returns the
    /// moved unit's id, or `None` when nothing is in range. Board bounds
    /// and occupancy are the turn engine's concern.
    pub fn move_unit_to(&mut self, target: Position) -> Option<String> {
        if let Some(group) = self
            .infantry
            .iter_mut()
            .find(|g| g.is_alive() && g.position().is_adjacent_to(target))
        {
            group.set_position(target);
            return Some(group.id().to_string());
        }
        if self.long_range.is_alive() && self.long_range.position().is_adjacent_to(target) {
            self.long_range.set_position(target);
            return Some(self.long_range.id().to_string());
        }
        None
    }

    /// Damage the first living unit in range of `target` would deal
    /// against `kind`. Units standing on the center square may not attack.
    /// `None` when nothing is in range.
    #[must_use]
    pub fn attack_damage_against(&self, target: Position, kind: TargetKind) -> Option<i32> {
        if let Some(group) = self
            .infantry
            .iter()
            .find(|g| g.is_alive() && !g.position().is_center() && g.can_attack(target))
        {
            return Some(group.attack_damage(kind));
        }
        if self.long_range.is_alive()
            && !self.long_range.position().is_center()
            && self.long_range.can_attack(target)
        {
            return Some(self.long_range.attack_damage(kind));
        }
        None
    }

    /// Apply `damage` to whatever this player has standing at `position`
    /// as `kind`. Node damage goes through the node's own mitigation;
    /// wiped-out infantry groups are removed.
    pub fn apply_attack(&mut self, position: Position, kind: TargetKind, damage: i32) {
        match kind {
            TargetKind::Infantry => {
                if let Some(group) = self.infantry_at_mut(position) {
                    group.damage(damage);
                }
                self.remove_dead_infantry();
            }
            TargetKind::LongRange => self.long_range.damage(damage),
            TargetKind::Core => self.damage_node(NodeKind::Core, damage),
            TargetKind::Comms => self.damage_node(NodeKind::Comms, damage),
            TargetKind::Research => self.damage_node(NodeKind::Research, damage),
        }
    }

    fn generate_unit_id(&mut self, prefix: &str) -> String {
        let id = format!("p{}-{prefix}-{}", self.id, self.next_unit_id);
        self.next_unit_id += 1;
        id
    }
}

/// Trailing counter of a generated unit id (`p0-inf-7` -> 7). Split ids
/// and foreign ids yield `None`.
fn id_counter_suffix(id: &str) -> Option<u32> {
    id.rsplit('-').next()?.parse().ok()
}
