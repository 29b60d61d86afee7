//! Wanderers: random walkers confined to the boundary network

use glam::IVec2;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Frame, Hazard};
use super::grid::{Cell, Grid};
use super::motion::MotionAccumulator;
use crate::Direction;
use crate::config::GameConfig;

/// Edge a wanderer enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Midpoint of this edge
    pub fn midpoint(self, width: i32, height: i32) -> IVec2 {
        match self {
            Side::Top => IVec2::new(width / 2, 0),
            Side::Bottom => IVec2::new(width / 2, height - 1),
            Side::Left => IVec2::new(0, height / 2),
            Side::Right => IVec2::new(width - 1, height / 2),
        }
    }
}

/// Entry side and first heading for the n-th wanderer, cycled
pub const SPAWN_SCHEDULE: [(Side, Direction); 8] = [
    (Side::Top, Direction::Left),
    (Side::Top, Direction::Right),
    (Side::Left, Direction::Down),
    (Side::Right, Direction::Down),
    (Side::Bottom, Direction::Left),
    (Side::Bottom, Direction::Right),
    (Side::Left, Direction::Up),
    (Side::Right, Direction::Up),
];

/// Wanderers active on `level` (1-based)
pub fn wanderers_for_level(level: u32, config: &GameConfig) -> usize {
    (level as usize).min(config.max_wanderers)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wanderer {
    pub pos: IVec2,
    pub heading: Direction,
    pub side: Side,
    /// No way forward on the last step
    pub stopped: bool,
    speed: f32,
    motion: MotionAccumulator,
}

impl Wanderer {
    /// The `index`-th wanderer of a level
    pub fn spawn(index: usize, config: &GameConfig) -> Self {
        let (side, heading) = SPAWN_SCHEDULE[index % SPAWN_SCHEDULE.len()];
        Self {
            pos: side.midpoint(config.width, config.height),
            heading,
            side,
            stopped: false,
            speed: config.wanderer_speed,
            motion: MotionAccumulator::new(),
        }
    }

    /// Back to the entry point with the scheduled heading
    pub fn reset_position(&mut self, index: usize, width: i32, height: i32) {
        let (side, heading) = SPAWN_SCHEDULE[index % SPAWN_SCHEDULE.len()];
        self.pos = side.midpoint(width, height);
        self.heading = heading;
        self.side = side;
        self.stopped = false;
        self.motion.reset();
    }

    /// Boundary cells a wanderer may occupy
    pub fn can_walk(grid: &Grid, cell: IVec2) -> bool {
        grid.is(cell, Cell::Trail) || grid.is_rail(cell)
    }

    /// Directions open from here, never including a U-turn.
    ///
    /// Returns the candidates and how many of `out` are filled.
    fn candidates(&self, grid: &Grid, out: &mut [Direction; 4]) -> usize {
        let mut n = 0;
        for dir in Direction::ALL {
            if dir != self.heading.reverse() && Self::can_walk(grid, self.pos + dir.delta()) {
                out[n] = dir;
                n += 1;
            }
        }
        n
    }

    /// Pick the next heading, or `None` at a dead end
    fn choose(&self, grid: &Grid, rng: &mut impl rand::Rng) -> Option<Direction> {
        let mut options = [self.heading; 4];
        let n = self.candidates(grid, &mut options);
        match n {
            0 => None,
            1 => Some(options[0]),
            _ => options[..n].choose(rng).copied(),
        }
    }
}

impl Actor for Wanderer {
    fn update(&mut self, frame: &mut Frame<'_>) {
        if self.motion.advance(self.speed, frame.dt) != 0 {
            match self.choose(frame.grid, &mut *frame.rng) {
                Some(dir) => {
                    self.heading = dir;
                    self.pos += dir.delta();
                    self.stopped = false;
                }
                None => self.stopped = true,
            }
        }

        if self.pos == frame.player && !frame.player_is_safe() {
            frame.report_hit(Hazard::Wanderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Footprint;
    use crate::sim::tick::TickInput;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn config() -> GameConfig {
        GameConfig {
            width: 12,
            height: 10,
            wanderer_speed: 1.0,
            ..Default::default()
        }
    }

    fn step(
        grid: &mut Grid,
        wanderer: &mut Wanderer,
        rng: &mut Pcg32,
        player: IVec2,
    ) -> Option<Hazard> {
        let input = TickInput::default();
        let mut events = Vec::new();
        let mut frame = Frame::new(
            grid,
            &input,
            1.0,
            rng,
            &mut events,
            player,
            Footprint::new(IVec2::new(5, 4), IVec2::ONE),
            Vec::new(),
        );
        wanderer.update(&mut frame);
        frame.hit()
    }

    #[test]
    fn test_schedule_spawns_on_edge_midpoints() {
        let config = config();
        let first = Wanderer::spawn(0, &config);
        assert_eq!(first.pos, IVec2::new(6, 0));
        assert_eq!(first.heading, Direction::Left);
        let third = Wanderer::spawn(2, &config);
        assert_eq!(third.pos, IVec2::new(0, 5));
        // Schedule wraps after eight
        assert_eq!(Wanderer::spawn(9, &config).heading, first.heading.reverse());
        assert_eq!(Wanderer::spawn(8, &config).pos, first.pos);
    }

    #[test]
    fn test_level_count_is_capped() {
        let config = config();
        assert_eq!(wanderers_for_level(1, &config), 1);
        assert_eq!(wanderers_for_level(3, &config), 3);
        assert_eq!(wanderers_for_level(40, &config), config.max_wanderers);
    }

    #[test]
    fn test_follows_ring_straight_ahead() {
        let config = config();
        let mut grid = Grid::new(config.width, config.height);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut wanderer = Wanderer::spawn(0, &config);

        // Along the top edge only "left" is open (no U-turn)
        for x in (1..6).rev() {
            step(&mut grid, &mut wanderer, &mut rng, IVec2::ZERO);
            assert_eq!(wanderer.pos, IVec2::new(x, 0));
        }
        // Around the corner
        step(&mut grid, &mut wanderer, &mut rng, IVec2::ZERO);
        step(&mut grid, &mut wanderer, &mut rng, IVec2::ZERO);
        assert_eq!(wanderer.pos, IVec2::new(0, 1));
        assert_eq!(wanderer.heading, Direction::Down);
    }

    #[test]
    fn test_branches_onto_trail() {
        let config = config();
        let mut grid = Grid::new(config.width, config.height);
        grid.mark_trail(IVec2::new(4, 1));
        grid.mark_trail(IVec2::new(4, 2));
        let mut wanderer = Wanderer::spawn(0, &config);
        wanderer.pos = IVec2::new(4, 0);

        let mut seen_trail = false;
        for seed in 0..32 {
            let mut trial = wanderer.clone();
            let mut rng = Pcg32::seed_from_u64(seed);
            step(&mut grid, &mut trial, &mut rng, IVec2::ZERO);
            assert_ne!(trial.pos, IVec2::new(5, 0), "reversed");
            seen_trail |= trial.pos == IVec2::new(4, 1);
        }
        assert!(seen_trail);
    }

    #[test]
    fn test_dead_end_stops() {
        let config = config();
        let mut grid = Grid::new(config.width, config.height);
        grid.mark_trail(IVec2::new(4, 1));
        grid.mark_trail(IVec2::new(4, 2));
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wanderer = Wanderer::spawn(0, &config);
        wanderer.pos = IVec2::new(4, 2);
        wanderer.heading = Direction::Down;

        // End of the trail: going back is never an option
        step(&mut grid, &mut wanderer, &mut rng, IVec2::ZERO);
        assert_eq!(wanderer.pos, IVec2::new(4, 2));
        assert_eq!(wanderer.heading, Direction::Down);
        assert!(wanderer.stopped);

        // The trail grows and the wanderer follows it again
        grid.mark_trail(IVec2::new(4, 3));
        step(&mut grid, &mut wanderer, &mut rng, IVec2::ZERO);
        assert_eq!(wanderer.pos, IVec2::new(4, 3));
        assert!(!wanderer.stopped);

        // Fully boxed in: stays put
        let mut boxed = Grid::new(config.width, config.height);
        boxed.mark_trail(IVec2::new(4, 4));
        wanderer.pos = IVec2::new(4, 4);
        step(&mut boxed, &mut wanderer, &mut rng, IVec2::ZERO);
        assert_eq!(wanderer.pos, IVec2::new(4, 4));
        assert!(wanderer.stopped);
    }

    #[test]
    fn test_contact_on_trail_is_fatal() {
        let config = config();
        let mut grid = Grid::new(config.width, config.height);
        for y in 1..=3 {
            grid.mark_trail(IVec2::new(5, y));
        }
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wanderer = Wanderer::spawn(0, &config);
        wanderer.pos = IVec2::new(5, 3);
        wanderer.heading = Direction::Up;

        // Player drawing at (5, 2), straight up the trail
        let hit = step(&mut grid, &mut wanderer, &mut rng, IVec2::new(5, 2));
        assert_eq!(wanderer.pos, IVec2::new(5, 2));
        assert_eq!(hit, Some(Hazard::Wanderer));
    }

    #[test]
    fn test_contact_on_wall_is_safe() {
        let config = config();
        let mut grid = Grid::new(config.width, config.height);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wanderer = Wanderer::spawn(0, &config);
        let hit = step(&mut grid, &mut wanderer, &mut rng, IVec2::new(5, 0));
        assert_eq!(wanderer.pos, IVec2::new(5, 0));
        assert_eq!(hit, None);
    }

    proptest! {
        #[test]
        fn prop_never_turns_back(
            seed in any::<u64>(),
            trail_x in 2i32..10,
            depth in 1i32..8,
        ) {
            let config = config();
            let mut grid = Grid::new(config.width, config.height);
            for y in 1..=depth {
                grid.mark_trail(IVec2::new(trail_x, y));
            }
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut wanderer = Wanderer::spawn(0, &config);

            for _ in 0..200 {
                let before = wanderer.clone();
                let mut options = [before.heading; 4];
                let open = before.candidates(&grid, &mut options);
                step(&mut grid, &mut wanderer, &mut rng, IVec2::ZERO);
                prop_assert_ne!(wanderer.heading, before.heading.reverse());
                if open == 0 {
                    prop_assert!(wanderer.stopped);
                    prop_assert_eq!(wanderer.pos, before.pos);
                }
                prop_assert!(Wanderer::can_walk(&grid, wanderer.pos));
            }
        }
    }
}
