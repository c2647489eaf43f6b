//! Building-grid coordinates and Manhattan distance.
//!
//! Buildings sit on an integer grid; travel distance between two locations
//! is the Manhattan distance between the buildings that house them. This
//! keeps all travel-time arithmetic exact integer math — no floating-point
//! drift, O(1) comparisons, and distances compose trivially with the
//! per-method phases-per-distance rates in the transport config.

/// A building's position on the city grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance between two grid points.
    #[inline]
    pub fn manhattan_distance(self, other: GridPoint) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Manhattan distance between two grid points. Free function form for
/// call sites that already have two `GridPoint`s in hand and don't want
/// `a.manhattan_distance(b)` method-call noise.
#[inline]
pub fn manhattan_distance(a: GridPoint, b: GridPoint) -> u32 {
    a.manhattan_distance(b)
}
