//! Claimfield - a territory-claiming arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, claim algorithm, entities, state machine)
//! - `config`: Immutable game configuration
//! - `platform`: Clock and input contracts
//! - `renderer`: Read-only frame views and a text renderer
//! - `audio`: Sound cues derived from simulation events

pub mod audio;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Driver constants
pub mod consts {
    /// Nominal frame length (60 Hz) in milliseconds
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Ticks the headless demo runs when not told otherwise (one minute)
    pub const DEMO_TICKS: u64 = 60 * 60;
}

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in input priority order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit cell offset (y grows downward)
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }

    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The two directions at right angles to this one
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
        }
    }
}
