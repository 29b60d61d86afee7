//! Fixed timestep simulation tick
//!
//! Runs the phase machine and, while a level is active, drives every actor
//! in a fixed order: player, pursuer, then wanderers.

use std::ops::ControlFlow;

use super::actor::{Actor, Frame};
use super::state::{GameEvent, GamePhase, GameState};
use crate::Direction;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Start / restart (acts on the press, not while held)
    pub confirm: bool,
    /// Leave the game loop
    pub quit: bool,
}

impl TickInput {
    /// Only `dir` held
    pub fn holding(dir: Direction) -> Self {
        let mut input = Self::default();
        match dir {
            Direction::Left => input.left = true,
            Direction::Right => input.right = true,
            Direction::Up => input.up = true,
            Direction::Down => input.down = true,
        }
        input
    }

    pub fn confirming() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    /// The single direction to move in; left, right, up, down take priority
    /// in that order so the player never moves diagonally
    pub fn direction(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        })
    }
}

/// Advance the game by one tick of `dt_ms` milliseconds.
///
/// Returns `Break` when the input asks to quit; the state is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> ControlFlow<()> {
    if input.quit {
        log::info!("Quit at tick {}", state.time_ticks);
        return ControlFlow::Break(());
    }

    let dt = state.config.clamp_frame(dt_ms);
    let confirm = input.confirm && !state.confirm_held;
    state.confirm_held = input.confirm;
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Intro => {
            if confirm {
                enter(state, GamePhase::GetReady);
            }
        }

        GamePhase::GetReady => {
            if countdown(state) {
                enter(state, GamePhase::Level);
            }
        }

        GamePhase::Level => run_level(state, input, dt),

        GamePhase::PlayerExplosion => {
            if countdown(state) {
                let next = if state.player.lives == 0 {
                    GamePhase::Lost
                } else {
                    GamePhase::GetReady
                };
                enter(state, next);
            }
        }

        GamePhase::Completed => {
            if countdown(state) {
                state.level += 1;
                state.grid.initialize();
                state.spawn_wanderers();
                enter(state, GamePhase::GetReady);
            }
        }

        GamePhase::Lost => {
            if confirm {
                state.restart();
                enter(state, GamePhase::GetReady);
            }
        }
    }

    ControlFlow::Continue(())
}

/// Tick a countdown; true once it has run out
fn countdown(state: &mut GameState) -> bool {
    state.timer = state.timer.saturating_sub(1);
    state.timer == 0
}

/// Switch phase and run its entry action
fn enter(state: &mut GameState, phase: GamePhase) {
    log::info!("Level {}: {:?} -> {:?}", state.level, state.phase, phase);
    state.phase = phase;

    match phase {
        GamePhase::Intro | GamePhase::Level => state.timer = 0,

        GamePhase::GetReady => {
            state.reset_positions();
            state.timer = state.config.get_ready_ticks;
            state.push_event(GameEvent::LevelStart { level: state.level });
        }

        GamePhase::PlayerExplosion => {
            state.player.lives = state.player.lives.saturating_sub(1);
            if let Some(hazard) = state.last_hazard {
                log::debug!("Player lost a life to {hazard:?}, {} left", state.player.lives);
                state.push_event(GameEvent::PlayerExploded {
                    hazard,
                    lives: state.player.lives,
                });
            }
            if state.player.lives > 0 {
                state.reset_positions();
            }
            state.timer = state.config.explosion_ticks;
        }

        GamePhase::Completed => {
            if state.config.awards_bonus_life(state.level) {
                state.player.lives = state.player.lives.saturating_add(1);
                log::info!("Bonus life, now {}", state.player.lives);
            }
            state.timer = state.config.completed_ticks;
            state.push_event(GameEvent::LevelComplete { level: state.level });
        }

        GamePhase::Lost => {
            state.grid.initialize();
            state.timer = 0;
            state.push_event(GameEvent::GameOver { level: state.level });
        }
    }
}

/// One tick of active play
fn run_level(state: &mut GameState, input: &TickInput, dt: f32) {
    let GameState {
        grid,
        rng,
        events,
        player,
        pursuer,
        wanderers,
        ..
    } = state;

    let mut frame = Frame::new(
        grid,
        input,
        dt,
        rng,
        events,
        player.pos,
        pursuer.footprint,
        wanderers.iter().map(|w| w.pos).collect(),
    );

    player.update(&mut frame);
    pursuer.update(&mut frame);
    for (i, wanderer) in wanderers.iter_mut().enumerate() {
        wanderer.update(&mut frame);
        frame.wanderers[i] = wanderer.pos;
    }
    let hit = frame.hit();

    // A closing claim leaves the player on wall, so a win always wins
    if state.claimed_percent() >= state.config.win_percent {
        enter(state, GamePhase::Completed);
    } else if let Some(hazard) = hit {
        state.last_hazard = Some(hazard);
        enter(state, GamePhase::PlayerExplosion);
    }
}
