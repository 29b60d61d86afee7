//! The pursuer: a rectangular block bouncing around the open area

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Frame, Hazard};
use super::collision::{Footprint, hits_wall};
use super::grid::{Cell, Grid};
use super::motion::MotionAccumulator;
use super::state::GameEvent;
use crate::config::GameConfig;

/// Initial heading: right and up
pub const START_HEADING: IVec2 = IVec2::new(1, -1);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub footprint: Footprint,
    /// Per-axis direction, each component in {-1, 0, 1}
    pub heading: IVec2,
    speed: f32,
    start: IVec2,
    motion_x: MotionAccumulator,
    motion_y: MotionAccumulator,
}

impl Pursuer {
    pub fn new(config: &GameConfig) -> Self {
        let start = config.pursuer_start();
        Self::with_footprint(
            Footprint::new(start, config.pursuer_size()),
            START_HEADING,
            config.pursuer_speed,
        )
    }

    /// A pursuer at an arbitrary spot; `reset_position` returns it here
    pub fn with_footprint(footprint: Footprint, heading: IVec2, speed: f32) -> Self {
        Self {
            footprint,
            heading,
            speed,
            start: footprint.origin,
            motion_x: MotionAccumulator::new(),
            motion_y: MotionAccumulator::new(),
        }
    }

    pub fn reset_position(&mut self) {
        self.footprint.origin = self.start;
        self.heading = START_HEADING;
        self.motion_x.reset();
        self.motion_y.reset();
    }

    /// Flip every axis whose leading edge is blocked, then work out this
    /// tick's displacement. Returns the displacement and whether anything
    /// bounced.
    ///
    /// A diagonal step is only taken when the cell past the leading corner
    /// is open as well; otherwise both axes reflect.
    fn plan_step(&mut self, grid: &Grid, dt: f32) -> (IVec2, bool) {
        let bounce_x = self.heading.x != 0 && hits_wall(grid, self.footprint.edge_x(self.heading.x));
        let bounce_y = self.heading.y != 0 && hits_wall(grid, self.footprint.edge_y(self.heading.y));

        if bounce_x {
            self.heading.x = -self.heading.x;
        }
        if bounce_y {
            self.heading.y = -self.heading.y;
        }

        let mut step = IVec2::ZERO;
        if !bounce_x && self.heading.x != 0 {
            step.x = self.motion_x.advance(self.speed, dt) * self.heading.x;
        }
        if !bounce_y && self.heading.y != 0 {
            step.y = self.motion_y.advance(self.speed, dt) * self.heading.y;
        }

        if step.x != 0 && step.y != 0 && grid.is(self.footprint.corner(self.heading), Cell::Wall) {
            self.heading = -self.heading;
            return (IVec2::ZERO, true);
        }

        (step, bounce_x || bounce_y)
    }
}

impl Actor for Pursuer {
    fn update(&mut self, frame: &mut Frame<'_>) {
        let (step, bounced) = self.plan_step(frame.grid, frame.dt);
        if bounced {
            frame.events.push(GameEvent::WallBounce);
        }
        self.footprint = self.footprint.translated(step);
        frame.pursuer = self.footprint;

        if self.footprint.touches(frame.grid, Cell::Trail) {
            frame.report_hit(Hazard::TrailCut);
        } else if self.footprint.contains(frame.player) && !frame.player_is_safe() {
            frame.report_hit(Hazard::Pursuer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::TickInput;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Update the pursuer once with a player parked at `player`
    fn step(
        grid: &mut Grid,
        pursuer: &mut Pursuer,
        player: IVec2,
        dt: f32,
    ) -> (Vec<GameEvent>, Option<Hazard>) {
        let input = TickInput::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut events = Vec::new();
        let mut frame = Frame::new(
            grid,
            &input,
            dt,
            &mut rng,
            &mut events,
            player,
            pursuer.footprint,
            Vec::new(),
        );
        pursuer.update(&mut frame);
        let hit = frame.hit();
        (events, hit)
    }

    const PARKED: IVec2 = IVec2::new(0, 0);

    #[test]
    fn test_new_uses_config_start() {
        let config = GameConfig::default();
        let pursuer = Pursuer::new(&config);
        assert_eq!(pursuer.footprint.origin, config.pursuer_start());
        assert_eq!(pursuer.footprint.size, IVec2::new(18, 8));
        assert_eq!(pursuer.heading, START_HEADING);
    }

    #[test]
    fn test_head_on_wall_reflects_without_entering() {
        let mut grid = Grid::new(10, 10);
        let fp = Footprint::new(IVec2::new(6, 4), IVec2::new(2, 2));
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(1, 0), 1.0);

        let (events, _) = step(&mut grid, &mut pursuer, PARKED, 1.0);
        assert_eq!(pursuer.footprint.origin, IVec2::new(7, 4));
        assert!(events.is_empty());

        // Right edge now faces the ring
        let (events, _) = step(&mut grid, &mut pursuer, PARKED, 1.0);
        assert_eq!(pursuer.footprint.origin, IVec2::new(7, 4));
        assert_eq!(pursuer.heading, IVec2::new(-1, 0));
        assert_eq!(events, [GameEvent::WallBounce]);
        assert!(!pursuer.footprint.touches(&grid, Cell::Wall));

        step(&mut grid, &mut pursuer, PARKED, 1.0);
        assert_eq!(pursuer.footprint.origin, IVec2::new(6, 4));
    }

    #[test]
    fn test_axes_bounce_independently() {
        let mut grid = Grid::new(10, 10);
        // Top edge against the ring, moving up-right
        let fp = Footprint::new(IVec2::new(3, 1), IVec2::new(2, 2));
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(1, -1), 1.0);

        step(&mut grid, &mut pursuer, PARKED, 1.0);
        assert_eq!(pursuer.heading, IVec2::new(1, 1));
        // Horizontal axis kept moving
        assert_eq!(pursuer.footprint.origin, IVec2::new(4, 1));
    }

    #[test]
    fn test_corner_bounce_flips_both() {
        let mut grid = Grid::new(10, 10);
        let fp = Footprint::new(IVec2::new(7, 1), IVec2::new(2, 2));
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(1, -1), 1.0);

        step(&mut grid, &mut pursuer, PARKED, 1.0);
        assert_eq!(pursuer.heading, IVec2::new(-1, 1));
        assert_eq!(pursuer.footprint.origin, IVec2::new(7, 1));
    }

    #[test]
    fn test_diagonal_wall_corner_reflects() {
        let mut grid = Grid::new(12, 12);
        // A lone claimed cell just past the top-right corner
        grid.set(IVec2::new(6, 4), Cell::Wall);
        let fp = Footprint::new(IVec2::new(4, 5), IVec2::new(2, 2));
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(1, -1), 1.0);

        let (events, _) = step(&mut grid, &mut pursuer, PARKED, 1.0);
        assert_eq!(events, [GameEvent::WallBounce]);
        assert_eq!(pursuer.heading, IVec2::new(-1, 1));
        assert!(!pursuer.footprint.touches(&grid, Cell::Wall));
    }

    #[test]
    fn test_trail_contact_is_fatal() {
        let mut grid = Grid::new(10, 10);
        grid.mark_trail(IVec2::new(6, 4));
        let fp = Footprint::new(IVec2::new(4, 4), IVec2::new(2, 2));
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(1, 0), 1.0);

        let (_, hit) = step(&mut grid, &mut pursuer, PARKED, 1.0);
        assert_eq!(hit, Some(Hazard::TrailCut));
    }

    #[test]
    fn test_player_contact_respects_wall() {
        let mut grid = Grid::new(10, 10);
        let fp = Footprint::new(IVec2::new(4, 4), IVec2::new(2, 2));
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(1, 0), 1.0);

        // Player standing in the path on open ground
        let (_, hit) = step(&mut grid, &mut pursuer, IVec2::new(6, 5), 1.0);
        assert_eq!(hit, Some(Hazard::Pursuer));

        // Same overlap, but on a claimed cell
        grid.set(IVec2::new(6, 5), Cell::Wall);
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(1, 0), 1.0);
        pursuer.footprint = pursuer.footprint.translated(IVec2::X);
        let (_, hit) = step(&mut grid, &mut pursuer, IVec2::new(6, 5), 0.0);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_reset_position() {
        let fp = Footprint::new(IVec2::new(3, 3), IVec2::new(2, 2));
        let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(-1, 1), 1.0);
        pursuer.footprint = pursuer.footprint.translated(IVec2::new(2, 2));
        pursuer.reset_position();
        assert_eq!(pursuer.footprint.origin, IVec2::new(3, 3));
        assert_eq!(pursuer.heading, START_HEADING);
    }

    proptest! {
        #[test]
        fn prop_never_ends_tick_inside_wall(
            width in 8i32..24,
            height in 8i32..24,
            size_x in 1i32..4,
            size_y in 1i32..4,
            hx in prop_oneof![Just(-1i32), Just(1i32)],
            hy in prop_oneof![Just(-1i32), Just(1i32)],
            walls in proptest::collection::vec((1i32..23, 1i32..23), 0..12),
            speed in 0.2f32..1.0,
        ) {
            let mut grid = Grid::new(width, height);
            let fp = Footprint::new(IVec2::new(2, 2), IVec2::new(size_x, size_y));
            for (x, y) in walls {
                let cell = IVec2::new(x, y);
                if grid.in_bounds(cell) && !fp.contains(cell) {
                    grid.set(cell, Cell::Wall);
                }
            }
            let mut pursuer = Pursuer::with_footprint(fp, IVec2::new(hx, hy), speed);

            for _ in 0..300 {
                step(&mut grid, &mut pursuer, PARKED, 1.0);
                prop_assert!(!pursuer.footprint.touches(&grid, Cell::Wall));
            }
        }
    }
}
