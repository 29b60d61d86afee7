//! Rectangular footprints on the cell grid
//!
//! The pursuer covers a block of cells rather than a single one. Bounces are
//! decided by scanning the row or column just past the leading edge.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};

/// Axis-aligned block of cells, `origin` is the top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Footprint {
    pub fn new(origin: IVec2, size: IVec2) -> Self {
        debug_assert!(size.x > 0 && size.y > 0, "empty footprint {size}");
        Self { origin, size }
    }

    /// One past the bottom-right cell
    #[inline]
    pub fn end(&self) -> IVec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= self.origin.x
            && cell.y >= self.origin.y
            && cell.x < self.end().x
            && cell.y < self.end().y
    }

    /// Every covered cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + use<> {
        let Footprint { origin, size } = *self;
        (0..size.y).flat_map(move |dy| (0..size.x).map(move |dx| origin + IVec2::new(dx, dy)))
    }

    /// Column just outside the left (`dx < 0`) or right (`dx > 0`) edge
    pub fn edge_x(&self, dx: i32) -> impl Iterator<Item = IVec2> + use<> {
        let x = if dx < 0 { self.origin.x - 1 } else { self.end().x };
        let top = self.origin.y;
        (0..self.size.y).map(move |dy| IVec2::new(x, top + dy))
    }

    /// Row just outside the top (`dy < 0`) or bottom (`dy > 0`) edge
    pub fn edge_y(&self, dy: i32) -> impl Iterator<Item = IVec2> + use<> {
        let y = if dy < 0 { self.origin.y - 1 } else { self.end().y };
        let left = self.origin.x;
        (0..self.size.x).map(move |dx| IVec2::new(left + dx, y))
    }

    /// Cell diagonally past the corner facing `heading`
    pub fn corner(&self, heading: IVec2) -> IVec2 {
        IVec2::new(
            if heading.x < 0 { self.origin.x - 1 } else { self.end().x },
            if heading.y < 0 { self.origin.y - 1 } else { self.end().y },
        )
    }

    pub fn translated(&self, by: IVec2) -> Self {
        Self {
            origin: self.origin + by,
            size: self.size,
        }
    }

    /// Whether any covered cell holds `cell`
    pub fn touches(&self, grid: &Grid, cell: Cell) -> bool {
        self.cells().any(|c| grid.is(c, cell))
    }
}

/// True if any of `cells` is a wall
pub fn hits_wall(grid: &Grid, mut cells: impl Iterator<Item = IVec2>) -> bool {
    cells.any(|c| grid.is(c, Cell::Wall))
}
