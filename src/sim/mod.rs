//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in from the caller, never from a clock
//! - Seeded RNG only
//! - Fixed update order: player, pursuer, wanderers in spawn order
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod collision;
pub mod grid;
pub mod motion;
pub mod player;
pub mod pursuer;
pub mod state;
pub mod tick;
pub mod wanderer;

pub use actor::{Actor, Frame, Hazard};
pub use collision::Footprint;
pub use grid::{Cell, Grid};
pub use motion::MotionAccumulator;
pub use player::Player;
pub use pursuer::Pursuer;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use wanderer::{Side, Wanderer};
