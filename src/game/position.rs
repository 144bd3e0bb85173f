//! Positions on the unbounded integer grid.

use std::fmt;

/// Radius of the diamond-shaped board used by the standard match setup.
///
/// A position is on the board when its Manhattan distance from the origin
/// is at most this value.
pub const GRID_SIZE: i32 = 8;

/// A point on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// X coordinate (column, positive to the right).
    pub x: i32,
    /// Y coordinate (row, positive downward toward player 1).
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    ///
    /// This is the distance measure used for movement and ranged attacks.
    #[must_use]
    pub const fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Euclidean distance to another position.
    ///
    /// Not used by the core rules; provided for callers that want a
    /// straight-line measure.
    #[must_use]
    pub fn euclidean_distance(&self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Check adjacency: Chebyshev distance of 1 (diagonals included),
    /// excluding the position itself.
    #[must_use]
    pub const fn is_adjacent_to(&self, other: Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && !(dx == 0 && dy == 0)
    }

    /// Check whether this position lies on a diamond board of the given
    /// radius.
    #[must_use]
    pub const fn is_valid_position(&self, grid_size: i32) -> bool {
        self.x.abs() + self.y.abs() <= grid_size
    }

    /// Check whether this is the center square.
    ///
    /// Units standing on the center may not attack.
    #[must_use]
    pub const fn is_center(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
