//! Input sources

use std::collections::VecDeque;

use crate::sim::{GameState, TickInput};

/// Supplies one intent snapshot per tick
pub trait InputSource {
    /// Intents for the coming tick. `state` is read-only context for
    /// sources that react to the game (the autopilot); devices ignore it.
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Replays a fixed list of inputs, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `input` for `ticks` consecutive ticks
    pub fn then(mut self, input: TickInput, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(input, ticks));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        self.frames.pop_front().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        })
    }
}
