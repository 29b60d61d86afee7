//! Platform abstraction layer
//!
//! Everything the simulation consumes from the outside world:
//! - Time: elapsed milliseconds per tick
//! - Input: one intent snapshot per tick
//! - Autopilot: an input source that plays by itself

pub mod autopilot;
pub mod input;
pub mod time;

pub use autopilot::Autopilot;
pub use input::{InputSource, ScriptedInput};
pub use time::{Clock, FixedClock, SystemClock};
