//! Claimfield entry point
//!
//! Headless native driver: runs the autopilot against a fixed clock, routes
//! events to the logging audio notifier and prints the final frame.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use claimfield::GameConfig;
use claimfield::audio::{self, LogAudio};
use claimfield::consts::{DEMO_TICKS, FRAME_MS};
use claimfield::platform::{Autopilot, Clock, FixedClock, InputSource};
use claimfield::renderer::{FrameView, Renderer, TextRenderer};
use claimfield::sim::{GameEvent, GameState, tick};

/// Ticks between progress lines
const REPORT_EVERY: u64 = 600;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON config file; defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the config seed
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks to simulate
    #[arg(long, default_value_t = DEMO_TICKS)]
    ticks: u64,
    /// Milliseconds reported per tick
    #[arg(long, default_value_t = FRAME_MS)]
    frame_ms: f32,
    /// Write the final game state here as JSON
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Silence the audio log
    #[arg(long)]
    mute: bool,
    /// Master volume for audio cues, 0.0 to 1.0
    #[arg(long, default_value_t = 0.8)]
    volume: f32,
}

/// Running totals for the summary line
#[derive(Debug, Default)]
struct Tally {
    claims: u32,
    deaths: u32,
    levels: u32,
    games_over: u32,
}

impl Tally {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::AreaClaimed { .. } => self.claims += 1,
            GameEvent::PlayerExploded { .. } => self.deaths += 1,
            GameEvent::LevelComplete { .. } => self.levels += 1,
            GameEvent::GameOver { .. } => self.games_over += 1,
            GameEvent::LevelStart { .. } | GameEvent::WallBounce => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate()?;
    log::info!(
        "Claimfield starting: {}x{} grid, seed {:#x}, {} ticks",
        config.width,
        config.height,
        config.seed,
        cli.ticks
    );

    let mut state = GameState::new(config);
    let mut pilot = Autopilot::new(state.config.seed ^ 0xA070);
    let mut clock = FixedClock::new(cli.frame_ms);
    let mut audio = LogAudio::new();
    audio.set_master_volume(cli.volume);
    audio.set_muted(cli.mute);
    let mut tally = Tally::default();

    for _ in 0..cli.ticks {
        let input = pilot.poll(&state);
        if tick(&mut state, &input, clock.elapsed_ms()).is_break() {
            break;
        }

        let events = state.drain_events();
        audio::dispatch(&events, &mut audio);
        for event in &events {
            tally.record(event);
        }

        if state.time_ticks % REPORT_EVERY == 0 {
            log::info!(
                "Tick {}: level {}, {}% claimed, {} lives, {:?}",
                state.time_ticks,
                state.level,
                state.claimed_percent(),
                state.player.lives,
                state.phase
            );
        }
    }

    let mut renderer = TextRenderer::new();
    renderer.render(&FrameView::of(&state));
    print!("{}", renderer.as_str());
    println!(
        "{} ticks: {} claims, {} lives lost, {} levels cleared, {} games over, {} cues",
        state.time_ticks,
        tally.claims,
        tally.deaths,
        tally.levels,
        tally.games_over,
        audio.played()
    );

    if let Some(path) = &cli.dump {
        fs::write(path, serde_json::to_string_pretty(&state)?)?;
        log::info!("State written to {}", path.display());
    }

    Ok(())
}
