//! Cell grid and the area-claim algorithm
//!
//! The outermost ring is always `Wall`. It bounds the flood fill, so the fill
//! never needs an explicit bounds check.
//!
//! Walls come in two kinds. Boundary walls (the ring and every closed trail)
//! stay walkable for the rest of the level; claimed interior never is.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Semantic state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Open space the pursuer roams
    #[default]
    Empty,
    /// Border or claimed territory
    Wall,
    /// The player's unfinished line
    Trail,
    /// Flood-fill marker, only ever seen inside `claim_area`
    Temp,
}

/// The playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Row-major cell states
    cells: Vec<Cell>,
    /// Row-major, set where a `Wall` is part of the ring or a closed trail
    boundary: Vec<bool>,
    /// Claimed share of the interior, 0-100
    claimed_percent: u8,
    /// Flood-fill work list, kept between claims
    #[serde(skip)]
    work: Vec<IVec2>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.cells == other.cells
            && self.boundary == other.boundary
            && self.claimed_percent == other.claimed_percent
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width >= 3 && height >= 3, "grid needs an interior");
        let mut grid = Self {
            width,
            height,
            cells: Vec::new(),
            boundary: Vec::new(),
            claimed_percent: 0,
            work: Vec::with_capacity((width * height) as usize),
        };
        grid.initialize();
        grid
    }

    /// Reset to an open field inside a wall ring
    pub fn initialize(&mut self) {
        let (w, h) = (self.width, self.height);
        self.cells.clear();
        self.cells.extend((0..h).flat_map(|y| {
            (0..w).map(move |x| {
                if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    Cell::Wall
                } else {
                    Cell::Empty
                }
            })
        }));
        self.boundary.clear();
        self.boundary
            .extend(self.cells.iter().map(|&cell| cell == Cell::Wall));
        self.claimed_percent = 0;
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: IVec2) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Cell at `pos`, `None` outside the grid
    #[inline]
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        self.in_bounds(pos).then(|| self.cells[self.index(pos)])
    }

    #[inline]
    pub fn is(&self, pos: IVec2, cell: Cell) -> bool {
        self.get(pos) == Some(cell)
    }

    /// Overwrite a single cell (level setup and tests).
    ///
    /// A `Wall` placed this way is interior, not boundary.
    pub fn set(&mut self, pos: IVec2, cell: Cell) {
        debug_assert!(self.in_bounds(pos), "set outside grid: {pos}");
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx] = cell;
            self.boundary[idx] = false;
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// A boundary wall: the ring or a closed trail
    pub fn is_rail(&self, pos: IVec2) -> bool {
        self.is(pos, Cell::Wall) && self.boundary[self.index(pos)]
    }

    /// Extend the trail by one cell
    pub fn mark_trail(&mut self, pos: IVec2) {
        debug_assert!(
            self.is(pos, Cell::Empty),
            "trail drawn over {:?} at {pos}",
            self.get(pos)
        );
        self.set(pos, Cell::Trail);
    }

    /// Drop an unfinished trail
    pub fn clear_trail(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| **c == Cell::Trail) {
            *cell = Cell::Empty;
        }
    }

    pub fn has_trail(&self) -> bool {
        self.cells.contains(&Cell::Trail)
    }

    /// Claim every region the pursuer cannot reach.
    ///
    /// Flood-fills the pursuer's pocket with `Temp`, then inverts: remaining
    /// open cells become interior `Wall`, the trail becomes boundary `Wall`
    /// and the pocket becomes open again. Returns the new claimed percentage.
    ///
    /// `pursuer_cell` must be `Empty`. Once nothing but the pursuer's pocket
    /// is open and no trail is drawn, claiming again changes nothing.
    pub fn claim_area(&mut self, pursuer_cell: IVec2) -> u8 {
        debug_assert!(
            self.is(pursuer_cell, Cell::Empty),
            "claim seeded from {:?} at {pursuer_cell}",
            self.get(pursuer_cell)
        );

        self.flood_fill(pursuer_cell, Cell::Empty, Cell::Temp);

        for (cell, boundary) in self.cells.iter_mut().zip(&mut self.boundary) {
            *cell = match *cell {
                Cell::Empty => Cell::Wall,
                Cell::Trail => {
                    *boundary = true;
                    Cell::Wall
                }
                Cell::Temp => Cell::Empty,
                Cell::Wall => Cell::Wall,
            };
        }

        self.claimed_percent = self.measure_claimed();
        self.claimed_percent
    }

    /// 4-connected fill with an explicit work list
    fn flood_fill(&mut self, start: IVec2, from: Cell, to: Cell) {
        let mut work = std::mem::take(&mut self.work);
        work.clear();
        work.push(start);

        while let Some(pos) = work.pop() {
            if !self.is(pos, from) {
                continue;
            }
            let idx = self.index(pos);
            self.cells[idx] = to;
            work.extend([
                pos + IVec2::NEG_X,
                pos + IVec2::X,
                pos + IVec2::NEG_Y,
                pos + IVec2::Y,
            ]);
        }

        self.work = work;
    }

    /// Claimed share of the interior (the fixed ring is not counted)
    fn measure_claimed(&self) -> u8 {
        let ring = (2 * (self.width + self.height) - 4) as usize;
        let interior = self.cells.len() - ring;
        let claimed = self.count(Cell::Wall) - ring;
        (claimed * 100 / interior) as u8
    }

    #[inline]
    pub fn claimed_percent(&self) -> u8 {
        self.claimed_percent
    }
}
