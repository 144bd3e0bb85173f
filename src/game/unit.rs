//! Mobile units: infantry groups and the long-range unit.
//!
//! Both are stacks of individual combatants sharing one health pool at 2 hp
//! per man, with `count` always derived as `ceil(hp / 2)`. They differ only
//! in their combat profile: infantry hit adjacent squares, the long-range
//! unit reaches 3 squares of Manhattan distance.

use crate::game::{NodeKind, Position};

/// Hit points per individual combatant in a stack.
pub const HP_PER_UNIT: i32 = 2;

/// What an attack is aimed at; selects the row of the damage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// An opposing infantry group.
    Infantry,
    /// The opposing long-range unit.
    LongRange,
    /// An opposing core node.
    Core,
    /// An opposing comms node.
    Comms,
    /// An opposing research node.
    Research,
}

impl TargetKind {
    /// Lowercase name used in log lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TargetKind::Infantry => "infantry",
            TargetKind::LongRange => "long-range",
            TargetKind::Core => "core",
            TargetKind::Comms => "comms",
            TargetKind::Research => "research",
        }
    }
}

impl From<NodeKind> for TargetKind {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Core => TargetKind::Core,
            NodeKind::Comms => TargetKind::Comms,
            NodeKind::Research => TargetKind::Research,
        }
    }
}

/// `count = ceil(hp / 2)` for non-negative hp, in integer arithmetic.
const fn count_for_hp(hp: i32) -> i32 {
    (hp + 1) / HP_PER_UNIT
}

/// A stack of foot soldiers sharing one health pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfantryGroup {
    id: String,
    position: Position,
    count: i32,
    hp: i32,
    max_hp: i32,
}

impl InfantryGroup {
    /// Create a group of `count` soldiers at full health.
    /// A non-positive count yields an empty group.
    #[must_use]
    pub fn new(position: Position, count: i32, id: String) -> Self {
        let count = count.max(0);
        Self {
            id,
            position,
            count,
            hp: count * HP_PER_UNIT,
            max_hp: count * HP_PER_UNIT,
        }
    }

    /// Rebuild a group from stored health values. `hp` is clamped into
    /// `[0, max_hp]` and the count re-derived rather than trusted.
    #[must_use]
    pub(crate) fn from_parts(id: String, position: Position, hp: i32, max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        let hp = hp.clamp(0, max_hp);
        Self {
            id,
            position,
            count: count_for_hp(hp),
            hp,
            max_hp,
        }
    }

    /// Unique (per player) identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Move the group. Legality is the turn engine's concern.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Soldiers remaining, always `ceil(hp / 2)`.
    #[must_use]
    pub const fn count(&self) -> i32 {
        self.count
    }

    /// Current pooled hit points.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Maximum pooled hit points.
    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Whether any soldiers remain.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.count > 0
    }

    /// Apply damage to the pool; non-positive amounts are no-ops. The count
    /// is re-derived from the remaining hit points.
    pub fn damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.hp = (self.hp - amount).max(0);
        self.count = count_for_hp(self.hp);
    }

    /// Heal the pool, clamped at `max_hp`; non-positive amounts are no-ops.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.count = count_for_hp(self.hp);
    }

    /// Split off `count_to_split` soldiers into a new group at the same
    /// position, id `<id>-split`.
    ///
    /// The split is clamped so at least one soldier stays behind; asking
    /// for nothing (or splitting a single-man group) returns an empty
    /// group and leaves this one untouched. The source group's `max_hp`
    /// shrinks to match its new count, so a split is not a way to free up
    /// healing capacity.
    pub fn split(&mut self, count_to_split: i32) -> InfantryGroup {
        let n = count_to_split.min(self.count - 1);
        if n <= 0 || self.count <= 1 {
            return InfantryGroup::new(self.position, 0, String::new());
        }

        let split_hp = n * HP_PER_UNIT;
        let new_group = InfantryGroup::new(self.position, n, format!("{}-split", self.id));

        self.count -= n;
        self.hp -= split_hp;
        self.max_hp = self.count * HP_PER_UNIT;

        new_group
    }

    /// Damage dealt by this group against the given target kind.
    ///
    /// Infantry scale with group size up to a cap: strongest against the
    /// core, weakest against hardened (non-core) nodes and the long-range
    /// unit.
    #[must_use]
    pub const fn attack_damage(&self, target: TargetKind) -> i32 {
        match target {
            TargetKind::Infantry => min_i32(15, self.count / 3),
            TargetKind::Core => min_i32(20, self.count / 2),
            _ => min_i32(10, self.count / 4),
        }
    }

    /// Infantry attack adjacent squares only (diagonals included).
    #[must_use]
    pub const fn can_attack(&self, target: Position) -> bool {
        self.position.is_adjacent_to(target)
    }
}

/// The player's single long-range stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRangeUnit {
    id: String,
    position: Position,
    count: i32,
    hp: i32,
    max_hp: i32,
}

impl LongRangeUnit {
    /// Create a stack of `count` pieces at full health.
    /// A non-positive count yields an empty stack.
    #[must_use]
    pub fn new(position: Position, count: i32, id: String) -> Self {
        let count = count.max(0);
        Self {
            id,
            position,
            count,
            hp: count * HP_PER_UNIT,
            max_hp: count * HP_PER_UNIT,
        }
    }

    /// Rebuild a stack from stored health values. `hp` is clamped into
    /// `[0, max_hp]` and the count re-derived rather than trusted.
    #[must_use]
    pub(crate) fn from_parts(id: String, position: Position, hp: i32, max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        let hp = hp.clamp(0, max_hp);
        Self {
            id,
            position,
            count: count_for_hp(hp),
            hp,
            max_hp,
        }
    }

    /// Unique (per player) identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Move the stack. Legality is the turn engine's concern.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Pieces remaining, always `ceil(hp / 2)`.
    #[must_use]
    pub const fn count(&self) -> i32 {
        self.count
    }

    /// Current pooled hit points.
    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    /// Maximum pooled hit points.
    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Whether any pieces remain.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.count > 0
    }

    /// Apply damage to the pool; non-positive amounts are no-ops. The count
    /// is re-derived from the remaining hit points.
    pub fn damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.hp = (self.hp - amount).max(0);
        self.count = count_for_hp(self.hp);
    }

    /// Heal the pool, clamped at `max_hp`; non-positive amounts are no-ops.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.count = count_for_hp(self.hp);
    }

    /// Split off `count_to_split` pieces into a new stack at the same
    /// position, id `<id>-split`. Same accounting as
    /// [`InfantryGroup::split`].
    pub fn split(&mut self, count_to_split: i32) -> LongRangeUnit {
        let n = count_to_split.min(self.count - 1);
        if n <= 0 || self.count <= 1 {
            return LongRangeUnit::new(self.position, 0, String::new());
        }

        let split_hp = n * HP_PER_UNIT;
        let new_unit = LongRangeUnit::new(self.position, n, format!("{}-split", self.id));

        self.count -= n;
        self.hp -= split_hp;
        self.max_hp = self.count * HP_PER_UNIT;

        new_unit
    }

    /// Damage dealt by this stack against the given target kind.
    ///
    /// Long-range fire scales per piece against infantry; against nodes it
    /// is all-or-nothing: a lone piece barely scratches, two or more hit
    /// hard (very hard against the core).
    #[must_use]
    pub const fn attack_damage(&self, target: TargetKind) -> i32 {
        match target {
            TargetKind::Infantry => self.count * 2,
            TargetKind::Core => {
                if self.count >= 2 {
                    35
                } else {
                    1
                }
            }
            _ => {
                if self.count >= 2 {
                    5
                } else {
                    1
                }
            }
        }
    }

    /// Long-range attacks reach up to 3 squares of Manhattan distance,
    /// excluding the stack's own square.
    #[must_use]
    pub const fn can_attack(&self, target: Position) -> bool {
        let dx = (self.position.x - target.x).abs();
        let dy = (self.position.y - target.y).abs();
        dx + dy <= 3 && !(dx == 0 && dy == 0)
    }
}

/// `i32::min` usable in const fns.
const fn min_i32(a: i32, b: i32) -> i32 {
    if a < b { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infantry(count: i32) -> InfantryGroup {
        InfantryGroup::new(Position::new(0, 0), count, "p0-inf-1".to_string())
    }

    fn long_range(count: i32) -> LongRangeUnit {
        LongRangeUnit::new(Position::new(0, 0), count, "p0-lr-1".to_string())
    }

    #[test]
    fn test_new_group_full_health() {
        let group = infantry(45);
        assert_eq!(group.count(), 45);
        assert_eq!(group.hp(), 90);
        assert_eq!(group.max_hp(), 90);
    }

    #[test]
    fn test_count_tracks_hp_after_damage() {
        let mut group = infantry(10);
        group.damage(5);
        // 15 hp left -> ceil(15/2) = 8 men
        assert_eq!(group.hp(), 15);
        assert_eq!(group.count(), 8);

        group.damage(100);
        assert_eq!(group.hp(), 0);
        assert_eq!(group.count(), 0);
        assert!(!group.is_alive());
    }

    #[test]
    fn test_count_tracks_hp_after_heal() {
        let mut group = infantry(10);
        group.damage(7);
        group.heal(3);
        assert_eq!(group.hp(), 16);
        assert_eq!(group.count(), 8);

        group.heal(1000);
        assert_eq!(group.hp(), 20);
        assert_eq!(group.count(), 10);
    }

    #[test]
    fn test_heal_extreme_amount_clamps() {
        let mut group = infantry(10);
        group.damage(5);
        group.heal(i32::MAX);
        assert_eq!(group.hp(), 20);
        assert_eq!(group.count(), 10);

        let mut unit = long_range(5);
        unit.damage(3);
        unit.heal(i32::MAX);
        assert_eq!(unit.hp(), 10);
        assert_eq!(unit.count(), 5);
    }

    #[test]
    fn test_non_positive_amounts_are_noops() {
        let mut group = infantry(10);
        group.damage(0);
        group.damage(-5);
        group.heal(0);
        group.heal(-5);
        assert_eq!(group.hp(), 20);
        assert_eq!(group.count(), 10);
    }

    #[test]
    fn test_split_accounting() {
        let mut group = infantry(10);
        let split = group.split(4);

        assert_eq!(split.count(), 4);
        assert_eq!(split.hp(), 8);
        assert_eq!(split.id(), "p0-inf-1-split");
        assert_eq!(split.position(), group.position());

        assert_eq!(group.count(), 6);
        assert_eq!(group.hp(), 12);
        // capacity shrinks with the split
        assert_eq!(group.max_hp(), 12);
    }

    #[test]
    fn test_split_leaves_at_least_one() {
        let mut group = infantry(5);
        let split = group.split(20);
        assert_eq!(split.count(), 4);
        assert_eq!(group.count(), 1);
    }

    #[test]
    fn test_split_degenerate_cases() {
        let mut group = infantry(1);
        let split = group.split(1);
        assert_eq!(split.count(), 0);
        assert_eq!(group.count(), 1);

        let mut group = infantry(10);
        let split = group.split(0);
        assert_eq!(split.count(), 0);
        assert_eq!(group.count(), 10);
        let split = group.split(-3);
        assert_eq!(split.count(), 0);
    }

    #[test]
    fn test_infantry_damage_table() {
        let group = infantry(45);
        assert_eq!(group.attack_damage(TargetKind::Infantry), 15);
        assert_eq!(group.attack_damage(TargetKind::Core), 20);
        assert_eq!(group.attack_damage(TargetKind::Comms), 10);
        assert_eq!(group.attack_damage(TargetKind::Research), 10);
        assert_eq!(group.attack_damage(TargetKind::LongRange), 10);

        let small = infantry(7);
        assert_eq!(small.attack_damage(TargetKind::Infantry), 2);
        assert_eq!(small.attack_damage(TargetKind::Core), 3);
        assert_eq!(small.attack_damage(TargetKind::Comms), 1);
    }

    #[test]
    fn test_long_range_damage_table() {
        let unit = long_range(5);
        assert_eq!(unit.attack_damage(TargetKind::Infantry), 10);
        assert_eq!(unit.attack_damage(TargetKind::Core), 35);
        assert_eq!(unit.attack_damage(TargetKind::Comms), 5);

        let lone = long_range(1);
        assert_eq!(lone.attack_damage(TargetKind::Infantry), 2);
        assert_eq!(lone.attack_damage(TargetKind::Core), 1);
        assert_eq!(lone.attack_damage(TargetKind::Research), 1);
    }

    #[test]
    fn test_infantry_range_is_chebyshev_one() {
        let group = infantry(10);
        assert!(group.can_attack(Position::new(1, 1)));
        assert!(group.can_attack(Position::new(-1, 0)));
        assert!(!group.can_attack(Position::new(0, 0)));
        assert!(!group.can_attack(Position::new(2, 0)));
    }

    #[test]
    fn test_long_range_range_is_manhattan_three() {
        let unit = long_range(5);
        assert!(unit.can_attack(Position::new(3, 0)));
        assert!(unit.can_attack(Position::new(1, 2)));
        assert!(!unit.can_attack(Position::new(0, 0)));
        assert!(!unit.can_attack(Position::new(2, 2)));
    }

    #[test]
    fn test_from_parts_clamps_and_derives() {
        let group =
            InfantryGroup::from_parts("g".to_string(), Position::new(1, 1), 99, 20);
        assert_eq!(group.hp(), 20);
        assert_eq!(group.count(), 10);

        let unit = LongRangeUnit::from_parts("u".to_string(), Position::new(1, 1), -4, 10);
        assert_eq!(unit.hp(), 0);
        assert_eq!(unit.count(), 0);
    }
}
