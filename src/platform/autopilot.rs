//! Idle/demo mode: an input source that plays the game by itself
//!
//! Confirms through the menus, then carves rectangular bites out of the open
//! area: straight in from a rail, sideways, and back out to the wall.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::InputSource;
use crate::Direction;
use crate::sim::{Cell, GamePhase, GameState, TickInput};

/// Bites never start closer than this to the pursuer
const SAFE_DISTANCE: i32 = 6;

/// A bite in progress
#[derive(Debug, Clone, Copy)]
struct Bite {
    /// From the rail into open space
    inward: Direction,
    /// End of the inward leg, end of the sideways leg
    waypoints: [IVec2; 2],
    /// 0 and 1 head for the waypoints, 2 heads back out
    stage: usize,
    /// The trail has been started
    started: bool,
}

pub struct Autopilot {
    rng: Pcg32,
    bite: Option<Bite>,
    /// Direction held while travelling along rails
    patrol: Direction,
    /// Confirm state sent last tick
    pulse: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            bite: None,
            patrol: Direction::Left,
            pulse: false,
        }
    }

    /// Input for the coming tick
    pub fn next(&mut self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Intro | GamePhase::Lost => {
                // Confirm acts on the press, so alternate
                self.pulse = !self.pulse;
                TickInput {
                    confirm: self.pulse,
                    ..Default::default()
                }
            }
            GamePhase::Level => self.steer(state),
            GamePhase::GetReady | GamePhase::PlayerExplosion | GamePhase::Completed => {
                self.bite = None;
                TickInput::default()
            }
        }
    }

    fn steer(&mut self, state: &GameState) -> TickInput {
        let pos = state.player.pos;

        if let Some(bite) = &mut self.bite {
            if state.player.drawing {
                bite.started = true;
            } else if bite.started {
                // Trail closed
                self.bite = None;
            }
        }
        if self.bite.is_none() {
            self.bite = self.plan_bite(state);
        }

        let Some(mut bite) = self.bite else {
            return self.patrol(state).map(TickInput::holding).unwrap_or_default();
        };

        if bite.stage < 2 && pos == bite.waypoints[bite.stage] {
            bite.stage += 1;
        }
        let wanted = match bite.waypoints.get(bite.stage) {
            Some(&waypoint) => toward(pos, waypoint).unwrap_or(bite.inward.reverse()),
            None => bite.inward.reverse(),
        };

        let open = |d: Direction| state.player.can_enter(&state.grid, pos + d.delta());
        let dir = if open(wanted) {
            Some(wanted)
        } else if !bite.started {
            // The way in closed before we got going
            self.bite = None;
            return TickInput::default();
        } else {
            // Blocked by our own trail: skip ahead to the way out
            bite.stage = 2;
            let [a, b] = wanted.perpendicular();
            [bite.inward.reverse(), a, b].into_iter().find(|&d| open(d))
        };

        self.bite = Some(bite);
        dir.map(TickInput::holding).unwrap_or_default()
    }

    /// Start a bite from the current cell if open space is next to it
    fn plan_bite(&mut self, state: &GameState) -> Option<Bite> {
        let pos = state.player.pos;
        let grid = &state.grid;

        let footprint = state.pursuer_footprint();
        let nearest = pos.clamp(footprint.origin, footprint.end() - IVec2::ONE);
        let gap = (nearest - pos).abs();
        if gap.x.max(gap.y) < SAFE_DISTANCE {
            return None;
        }

        let mut dirs = Direction::ALL;
        let start = self.rng.random_range(0..dirs.len());
        dirs.rotate_left(start);
        let inward = dirs
            .into_iter()
            .find(|d| grid.is(pos + d.delta(), Cell::Empty))?;

        let depth = self.rng.random_range(2..=(grid.height() / 4).max(2));
        let width = self.rng.random_range(2..=(grid.width() / 4).max(2));
        let [a, b] = inward.perpendicular();
        let side = if self.rng.random_bool(0.5) { a } else { b };

        let first = pos + inward.delta() * depth;
        let second = first + side.delta() * width;
        log::debug!("Autopilot bite from {pos}: {inward:?} {depth}, {side:?} {width}");
        Some(Bite {
            inward,
            waypoints: [first, second],
            stage: 0,
            started: false,
        })
    }

    /// Follow the rails, turning at random when blocked
    fn patrol(&mut self, state: &GameState) -> Option<Direction> {
        let pos = state.player.pos;
        let open = |d: Direction| state.player.can_enter(&state.grid, pos + d.delta());
        if open(self.patrol) && !self.rng.random_bool(0.02) {
            return Some(self.patrol);
        }

        let mut options = Direction::ALL;
        let start = self.rng.random_range(0..options.len());
        options.rotate_left(start);
        let turn = options
            .into_iter()
            .filter(|&d| d != self.patrol.reverse())
            .find(|&d| open(d))
            .or_else(|| open(self.patrol.reverse()).then_some(self.patrol.reverse()))?;
        self.patrol = turn;
        Some(turn)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        self.next(state)
    }
}

/// Axis-aligned direction from `from` to `to`, horizontal first
fn toward(from: IVec2, to: IVec2) -> Option<Direction> {
    let d = to - from;
    if d.x < 0 {
        Some(Direction::Left)
    } else if d.x > 0 {
        Some(Direction::Right)
    } else if d.y < 0 {
        Some(Direction::Up)
    } else if d.y > 0 {
        Some(Direction::Down)
    } else {
        None
    }
}
