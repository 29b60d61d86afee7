//! Rendering contract
//!
//! Renderers get a read-only [`FrameView`] once per tick. They see semantic
//! cell states and integer positions only, never simulation internals.

pub mod text;

pub use text::TextRenderer;

use glam::IVec2;

use crate::sim::{Footprint, GamePhase, GameState, Grid};

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub grid: &'a Grid,
    pub phase: GamePhase,
    pub level: u32,
    pub lives: u8,
    pub claimed_percent: u8,
    pub player: IVec2,
    pub drawing: bool,
    pub pursuer: Footprint,
    pub wanderers: Vec<IVec2>,
}

impl<'a> FrameView<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            grid: &state.grid,
            phase: state.phase,
            level: state.level,
            lives: state.player.lives,
            claimed_percent: state.claimed_percent(),
            player: state.player.pos,
            drawing: state.player.drawing,
            pursuer: state.pursuer_footprint(),
            wanderers: state.wanderer_cells(),
        }
    }
}

/// A frame sink
pub trait Renderer {
    fn render(&mut self, view: &FrameView<'_>);
}
