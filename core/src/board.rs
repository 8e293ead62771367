use alloc::vec::Vec;
use hashbrown::{HashMap, hash_map::Entry};
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable discrete grid cell. Equality is by coordinate pair; identity
/// comparison belongs to [`CellId`] handles handed out by the [`Board`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub const fn coords(self) -> Coord2 {
        (self.x, self.y)
    }
}

/// Stable handle to an interned cell. For a given board, two handles are
/// equal iff they were produced for the same `(x, y)` pair, so handle
/// equality is the identity comparison the lifecycle manager relies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(usize);

/// Flyweight registry over the cell lattice plus the continuous/discrete
/// coordinate mapping. The interning table grows for as long as the player
/// explores and is never evicted; `interned_count` exposes the growth.
#[derive(Clone, Debug)]
pub struct Board {
    tile_width: f64,
    visibility_radius: u16,
    grid_offset: f64,
    cells: Vec<Cell>,
    interned: HashMap<Coord2, CellId>,
}

impl Board {
    pub fn new(tile_width: f64, visibility_radius: u16, grid_offset: f64) -> Self {
        Self {
            tile_width,
            visibility_radius,
            grid_offset,
            cells: Vec::new(),
            interned: HashMap::new(),
        }
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    pub fn visibility_radius(&self) -> u16 {
        self.visibility_radius
    }

    pub fn grid_offset(&self) -> f64 {
        self.grid_offset
    }

    /// Returns the unique handle for the given coordinates, interning the
    /// cell on first request. Idempotent; the same pair always resolves to
    /// the same handle for the lifetime of the board.
    pub fn canonicalize(&mut self, x: Coord, y: Coord) -> CellId {
        match self.interned.entry((x, y)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = CellId(self.cells.len());
                self.cells.push(Cell::new(x, y));
                *entry.insert(id)
            }
        }
    }

    /// Resolves a handle previously returned by this board.
    pub fn cell(&self, id: CellId) -> Cell {
        self.cells[id.0]
    }

    /// Maps a continuous position to its cell, rounding half away from zero
    /// on both axes.
    pub fn cell_for_point(&mut self, point: Point) -> CellId {
        let x = round_half_away(point.x / self.tile_width);
        let y = round_half_away(point.y / self.tile_width);
        self.canonicalize(x, y)
    }

    /// Renderable rectangle of a cell. The grid offset is a uniform
    /// translation applied to both corners; it never affects cell identity.
    pub fn cell_bounds(&self, id: CellId) -> Bounds {
        let cell = self.cell(id);
        let w = self.tile_width;
        Bounds {
            min: Point::new(
                cell.x as f64 * w + self.grid_offset,
                cell.y as f64 * w + self.grid_offset,
            ),
            max: Point::new(
                (cell.x + 1) as f64 * w + self.grid_offset,
                (cell.y + 1) as f64 * w + self.grid_offset,
            ),
        }
    }

    /// All cells within the visibility radius (Chebyshev distance) of the
    /// cell containing `point`, row-major with `x` outermost, ascending.
    /// Always exactly `(2r + 1)^2` distinct handles.
    pub fn cells_near(&mut self, point: Point) -> Vec<CellId> {
        let r = Coord::from(self.visibility_radius);
        let origin_id = self.cell_for_point(point);
        let origin = self.cell(origin_id);
        let side = 2 * r + 1;
        let mut result = Vec::with_capacity((side * side) as usize);
        for x in (origin.x - r)..=(origin.x + r) {
            for y in (origin.y - r)..=(origin.y + r) {
                result.push(self.canonicalize(x, y));
            }
        }
        result
    }

    /// Number of cells interned so far.
    pub fn interned_count(&self) -> usize {
        self.cells.len()
    }
}
