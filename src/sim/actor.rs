//! Shared per-tick update capability
//!
//! Every moving entity implements [`Actor`]. The phase table in `tick`
//! decides which actors get updated; entities never check the phase.

use glam::IVec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Footprint;
use super::grid::Grid;
use super::state::GameEvent;
use super::tick::TickInput;

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    /// Touched the pursuer's body
    Pursuer,
    /// The pursuer ran into the unfinished trail
    TrailCut,
    Wanderer,
}

/// Everything an actor may read or write during one tick
pub struct Frame<'a> {
    pub grid: &'a mut Grid,
    pub input: &'a TickInput,
    /// Elapsed milliseconds for this tick
    pub dt: f32,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
    /// Player cell, refreshed after the player moves
    pub player: IVec2,
    /// Pursuer footprint, refreshed after the pursuer moves
    pub pursuer: Footprint,
    /// Wanderer cells, refreshed as each one moves
    pub wanderers: Vec<IVec2>,
    /// First fatal contact this tick
    hit: Option<Hazard>,
}

impl<'a> Frame<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        grid: &'a mut Grid,
        input: &'a TickInput,
        dt: f32,
        rng: &'a mut Pcg32,
        events: &'a mut Vec<GameEvent>,
        player: IVec2,
        pursuer: Footprint,
        wanderers: Vec<IVec2>,
    ) -> Self {
        Self {
            grid,
            input,
            dt,
            rng,
            events,
            player,
            pursuer,
            wanderers,
            hit: None,
        }
    }

    /// Record a fatal contact; later ones in the same tick are ignored
    pub fn report_hit(&mut self, hazard: Hazard) {
        if self.hit.is_none() {
            log::debug!("Player hit by {hazard:?} at {}", self.player);
            self.hit = Some(hazard);
        }
    }

    pub fn hit(&self) -> Option<Hazard> {
        self.hit
    }

    /// Standing on claimed wall is the only safe place to be touched
    pub fn player_is_safe(&self) -> bool {
        self.grid.is(self.player, super::grid::Cell::Wall)
    }
}

/// A moving entity driven once per tick
pub trait Actor {
    fn update(&mut self, frame: &mut Frame<'_>);
}
