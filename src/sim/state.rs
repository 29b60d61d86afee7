//! Game state and core simulation types
//!
//! Everything a playthrough needs lives here, so a state can be snapshotted
//! and replayed from its seed.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Hazard;
use super::collision::Footprint;
use super::grid::Grid;
use super::player::Player;
use super::pursuer::Pursuer;
use super::wanderer::{Wanderer, wanderers_for_level};
use crate::config::GameConfig;

/// Current phase of a playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Intro,
    /// Countdown before a level (or a retry) starts
    GetReady,
    /// Active play
    Level,
    /// The player was hit; waiting out the explosion
    PlayerExplosion,
    /// Level won; waiting out the celebration
    Completed,
    /// Out of lives, waiting for confirm
    Lost,
}

/// Something that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStart { level: u32 },
    /// The pursuer reflected off a wall
    WallBounce,
    /// A trail was closed; `percent` is the new claimed share
    AreaClaimed { percent: u8 },
    LevelComplete { level: u32 },
    /// `lives` is what remains after the hit
    PlayerExploded { hazard: Hazard, lives: u8 },
    GameOver { level: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Simulation RNG; only wanderers draw from it
    pub rng: Pcg32,
    /// Current level, starting at 1
    pub level: u32,
    pub phase: GamePhase,
    /// Ticks left in the current countdown
    pub timer: u32,
    pub grid: Grid,
    pub player: Player,
    pub pursuer: Pursuer,
    pub wanderers: Vec<Wanderer>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// What ended the last life, if anything
    pub last_hazard: Option<Hazard>,
    /// Confirm was down on the previous tick
    pub(crate) confirm_held: bool,
    /// Events raised since the last drain
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// A fresh session on the title screen
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            level: 1,
            phase: GamePhase::Intro,
            timer: 0,
            grid: Grid::new(config.width, config.height),
            player: Player::new(&config),
            pursuer: Pursuer::new(&config),
            wanderers: Vec::new(),
            time_ticks: 0,
            last_hazard: None,
            confirm_held: false,
            events: Vec::new(),
            config,
        };
        state.spawn_wanderers();
        state
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events raised since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Put every entity back on its spawn point and drop any unfinished trail
    pub fn reset_positions(&mut self) {
        self.grid.clear_trail();
        self.player.reset_position();
        self.pursuer.reset_position();
        let (width, height) = (self.config.width, self.config.height);
        for (i, wanderer) in self.wanderers.iter_mut().enumerate() {
            wanderer.reset_position(i, width, height);
        }
    }

    /// Bring the wanderer count in line with the current level
    pub fn spawn_wanderers(&mut self) {
        let count = wanderers_for_level(self.level, &self.config);
        self.wanderers = (0..count)
            .map(|i| Wanderer::spawn(i, &self.config))
            .collect();
    }

    /// Back to level 1 with full lives and a fresh grid
    pub fn restart(&mut self) {
        self.level = 1;
        self.player.lives = self.config.initial_lives;
        self.last_hazard = None;
        self.grid.initialize();
        self.spawn_wanderers();
        self.reset_positions();
    }

    /// Claimed share of the current level
    pub fn claimed_percent(&self) -> u8 {
        self.grid.claimed_percent()
    }

    /// Cells occupied by wanderers, in spawn order
    pub fn wanderer_cells(&self) -> Vec<IVec2> {
        self.wanderers.iter().map(|w| w.pos).collect()
    }

    pub fn pursuer_footprint(&self) -> Footprint {
        self.pursuer.footprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GameConfig {
        GameConfig {
            width: 20,
            height: 16,
            pursuer_width: 3,
            pursuer_height: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_starts_on_intro() {
        let state = GameState::new(small_config());
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.wanderers.len(), 1);
        assert_eq!(state.claimed_percent(), 0);
    }

    #[test]
    fn test_reset_positions_clears_trail() {
        let mut state = GameState::new(small_config());
        state.grid.mark_trail(IVec2::new(10, 14));
        state.player.pos = IVec2::new(10, 14);
        state.player.drawing = true;

        state.reset_positions();
        assert!(!state.grid.has_trail());
        assert!(!state.player.drawing);
        assert_eq!(state.player.pos, state.config.player_start());
    }

    #[test]
    fn test_restart_restores_lives_and_level() {
        let mut state = GameState::new(small_config());
        state.level = 5;
        state.player.lives = 0;
        state.spawn_wanderers();
        assert_eq!(state.wanderers.len(), 4);

        state.restart();
        assert_eq!(state.level, 1);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.wanderers.len(), 1);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(small_config());
        state.push_event(GameEvent::WallBounce);
        assert_eq!(state.pending_events(), [GameEvent::WallBounce]);
        assert_eq!(state.drain_events(), [GameEvent::WallBounce]);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_snapshot_restores_same_state() {
        let state = GameState::new(small_config());
        let json = serde_json::to_string(&state).expect("serialize");
        let restored: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.grid, state.grid);
        assert_eq!(restored.phase, state.phase);
        assert_eq!(restored.wanderer_cells(), state.wanderer_cells());
    }
}
