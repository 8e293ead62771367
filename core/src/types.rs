use serde::{Deserialize, Serialize};

/// Single axis of the discrete cell lattice. The lattice is unbounded, so
/// coordinates stay signed and wide enough for any reachable walk.
pub type Coord = i64;

/// Two-dimensional cell coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Continuous position in map units. `x` grows east, `y` grows north.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle covering one cell, in map units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

/// Movement command supplied by the input collaborator. One step shifts the
/// player by exactly one tile width along the matching axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Continuous displacement `(dx, dy)` of one step.
    pub const fn offset(self, tile_width: f64) -> (f64, f64) {
        match self {
            Self::North => (0.0, tile_width),
            Self::South => (0.0, -tile_width),
            Self::East => (tile_width, 0.0),
            Self::West => (-tile_width, 0.0),
        }
    }
}

/// Rounds half away from zero. Every point-to-cell conversion goes through
/// this single policy so boundary points always map to the same cell.
pub(crate) fn round_half_away(value: f64) -> Coord {
    if value >= 0.0 {
        (value + 0.5) as Coord
    } else {
        (value - 0.5) as Coord
    }
}
