//! ASCII renderer for logs and tests

use glam::IVec2;

use super::{FrameView, Renderer};
use crate::sim::Cell;

fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        Cell::Wall => '#',
        Cell::Trail => '+',
        Cell::Temp => '?',
    }
}

/// Renders into an owned string, one line per grid row under a status line
#[derive(Debug, Default)]
pub struct TextRenderer {
    buffer: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered frame
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn glyph(view: &FrameView<'_>, pos: IVec2, cell: Cell) -> char {
        if pos == view.player {
            '@'
        } else if view.wanderers.contains(&pos) {
            '*'
        } else if view.pursuer.contains(pos) {
            'X'
        } else {
            cell_glyph(cell)
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        self.buffer.clear();
        self.buffer.push_str(&format!(
            "level {} | lives {} | claimed {}% | {:?}\n",
            view.level, view.lives, view.claimed_percent, view.phase
        ));
        for (y, row) in view.grid.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let pos = IVec2::new(x as i32, y as i32);
                self.buffer.push(Self::glyph(view, pos, cell));
            }
            self.buffer.push('\n');
        }
    }
}
