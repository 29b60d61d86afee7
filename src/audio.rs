//! Sound cues derived from simulation events
//!
//! The core never plays sound itself. Drivers drain `GameEvent`s after each
//! tick and hand the matching cues to an [`AudioNotifier`]; nothing flows back.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Pursuer bounces off a wall
    WallBounce,
    /// Trail closed and territory claimed
    AreaClaimed,
    /// Win threshold reached
    LevelComplete,
    /// Player hit
    PlayerExploded,
    /// Last life lost
    GameOver,
    /// Countdown to a level begins
    LevelStart,
}

impl SoundEffect {
    /// Cue name as the sound bank knows it
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::WallBounce => "wall-bounce",
            SoundEffect::AreaClaimed => "area-claimed",
            SoundEffect::LevelComplete => "level-complete",
            SoundEffect::PlayerExploded => "player-exploded",
            SoundEffect::GameOver => "game-over",
            SoundEffect::LevelStart => "level-start",
        }
    }

    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::LevelStart { .. } => SoundEffect::LevelStart,
            GameEvent::WallBounce => SoundEffect::WallBounce,
            GameEvent::AreaClaimed { .. } => SoundEffect::AreaClaimed,
            GameEvent::LevelComplete { .. } => SoundEffect::LevelComplete,
            GameEvent::PlayerExploded { .. } => SoundEffect::PlayerExploded,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
        }
    }
}

/// Fire-and-forget sink for sound cues
pub trait AudioNotifier {
    fn play(&mut self, effect: SoundEffect);
}

/// Forward the cue for every event, in order
pub fn dispatch(events: &[GameEvent], audio: &mut impl AudioNotifier) {
    for event in events {
        audio.play(SoundEffect::for_event(event));
    }
}

/// Audio manager for headless runs: cues go to the log
pub struct LogAudio {
    master_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    /// Cues actually voiced so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioNotifier for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("♪ {} (vol {vol:.2})", effect.name());
    }
}
