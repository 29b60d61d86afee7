//! The player: moves on rails, draws trails through open space, claims on return
//!
//! Rails are the boundary walls (the ring plus every closed trail). Claimed
//! interior is never walkable, not even to close a trail.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Frame, Hazard};
use super::collision::Footprint;
use super::grid::{Cell, Grid};
use super::motion::MotionAccumulator;
use super::state::GameEvent;
use crate::config::GameConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    /// True while a trail is being drawn
    pub drawing: bool,
    pub lives: u8,
    speed: f32,
    start: IVec2,
    motion: MotionAccumulator,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let start = config.player_start();
        Self {
            pos: start,
            drawing: false,
            lives: config.initial_lives,
            speed: config.player_speed,
            start,
            motion: MotionAccumulator::new(),
        }
    }

    /// Back to the spawn point with no trail in progress
    pub fn reset_position(&mut self) {
        self.pos = self.start;
        self.drawing = false;
        self.motion.reset();
    }

    /// Whether the player may step onto `target`
    pub fn can_enter(&self, grid: &Grid, target: IVec2) -> bool {
        match grid.get(target) {
            Some(Cell::Empty) => true,
            Some(Cell::Wall) => grid.is_rail(target),
            Some(Cell::Trail | Cell::Temp) | None => false,
        }
    }

    fn step_to(&mut self, target: IVec2, frame: &mut Frame<'_>) {
        self.pos = target;
        frame.player = target;

        match frame.grid.get(target) {
            Some(Cell::Empty) => {
                if !self.drawing {
                    log::debug!("Trail started at {target}");
                    self.drawing = true;
                }
                frame.grid.mark_trail(target);
            }
            Some(Cell::Wall) if self.drawing => {
                let Some(seed) = claim_seed(frame.grid, &frame.pursuer) else {
                    // Nothing open under the pursuer means it sits on the trail
                    log::warn!("Trail closed at {target} under the pursuer, no claim");
                    frame.report_hit(Hazard::TrailCut);
                    return;
                };
                let percent = frame.grid.claim_area(seed);
                self.drawing = false;
                log::debug!("Trail closed at {target}, {percent}% claimed");
                frame.events.push(GameEvent::AreaClaimed { percent });
            }
            _ => {}
        }
    }
}

/// First open cell of the pursuer's footprint, in row-major order
fn claim_seed(grid: &Grid, pursuer: &Footprint) -> Option<IVec2> {
    pursuer.cells().find(|&c| grid.is(c, Cell::Empty))
}

impl Actor for Player {
    fn update(&mut self, frame: &mut Frame<'_>) {
        if let Some(dir) = frame.input.direction() {
            let step = self.motion.advance(self.speed, frame.dt);
            let target = self.pos + dir.delta() * step;
            if step != 0 && self.can_enter(frame.grid, target) {
                self.step_to(target, frame);
            }
        }

        if frame.player_is_safe() {
            return;
        }
        if frame.pursuer.contains(self.pos) {
            frame.report_hit(Hazard::Pursuer);
        } else if frame.wanderers.contains(&self.pos) {
            frame.report_hit(Hazard::Wanderer);
        }
    }
}
