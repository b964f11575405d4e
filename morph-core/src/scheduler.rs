//! Repeating transition clock.
//!
//! Every tick advances the step counter by exactly one, independent of
//! wall-clock time:
//! 1. `step_index = (step_index + 1) % steps_per_transition`.
//! 2. On wrap to `0`, `cycle_position` advances (also wrapping).
//! 3. `blend = min(1, step_index / (steps_per_transition * dwell_start))`.
//! 4. Each point's live position is interpolated from the anchor of
//!    `cycle[cycle_position]` towards the anchor of the following entry.
//!
//! The clamped tail of the blend ramp is the dwell at each finished layout.

use glam::Vec2;

use crate::{
    config::Config,
    error::{MorphError, Result},
    layout::LayoutKind,
    store::Point,
};

/// Linear interpolation `a + (b - a) * t`, per axis.
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Position of the animation inside its tour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    pub cycle_position: usize,
    pub step_index: u32,
}

/// Summary of one tick, handed to the renderer and host UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Number of ticks performed so far, including this one.
    pub tick: u64,
    pub clock: Clock,
    pub blend: f32,
    pub current: LayoutKind,
    pub next: LayoutKind,
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    clock: Clock,
    cycle: Vec<LayoutKind>,
    steps_per_transition: u32,
    dwell_start: f32,
    ticks: u64,
}

impl Scheduler {
    /// Creates a scheduler at its initial state `(cycle_position, step_index) = (0, 0)`.
    pub fn new(cycle: Vec<LayoutKind>, steps_per_transition: u32, dwell_start: f32) -> Result<Self> {
        Self::from_config(&Config {
            cycle,
            steps_per_transition,
            dwell_start,
            ..Config::default()
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            clock: Clock::default(),
            cycle: cfg.cycle.clone(),
            steps_per_transition: cfg.steps_per_transition,
            dwell_start: cfg.dwell_start,
            ticks: 0,
        })
    }

    #[inline]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[inline]
    pub fn cycle(&self) -> &[LayoutKind] {
        &self.cycle
    }

    #[inline]
    pub fn steps_per_transition(&self) -> u32 {
        self.steps_per_transition
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Blend fraction for a given step, clamped to `[0, 1]`.
    pub fn blend_at(&self, step_index: u32) -> f32 {
        let ramp = self.steps_per_transition as f32 * self.dwell_start;
        (step_index as f32 / ramp).min(1.0)
    }

    /// The `(current, next)` layout pair for a cycle position.
    pub fn pair_at(&self, cycle_position: usize) -> (LayoutKind, LayoutKind) {
        let len = self.cycle.len();
        (
            self.cycle[cycle_position % len],
            self.cycle[(cycle_position + 1) % len],
        )
    }

    /// Advances the clock by one step without touching any points.
    pub fn advance(&mut self) -> Frame {
        self.ticks += 1;
        self.clock.step_index = (self.clock.step_index + 1) % self.steps_per_transition;
        if self.clock.step_index == 0 {
            self.clock.cycle_position = (self.clock.cycle_position + 1) % self.cycle.len();
            tracing::trace!(
                cycle_position = self.clock.cycle_position,
                tick = self.ticks,
                "transition complete"
            );
        }

        let (current, next) = self.pair_at(self.clock.cycle_position);
        Frame {
            tick: self.ticks,
            clock: self.clock,
            blend: self.blend_at(self.clock.step_index),
            current,
            next,
        }
    }

    /// Advances the clock and rewrites every point's live position.
    pub fn tick(&mut self, points: &mut [Point]) -> Frame {
        let frame = self.advance();
        self.place(points);
        frame
    }

    /// Rewrites live positions for the current clock without advancing it.
    pub fn place(&self, points: &mut [Point]) {
        let (current, next) = self.pair_at(self.clock.cycle_position);
        let blend = self.blend_at(self.clock.step_index);
        for p in points.iter_mut() {
            p.live = lerp(p.anchor(current), p.anchor(next), blend);
        }
    }

    /// Changes the transition length, keeping the step index in range.
    pub fn set_steps_per_transition(&mut self, steps: u32) -> Result<()> {
        if steps == 0 {
            return Err(MorphError::ZeroSteps);
        }
        self.steps_per_transition = steps;
        self.clock.step_index %= steps;
        Ok(())
    }

    /// Returns to the initial state. The tick counter is kept.
    pub fn reset(&mut self) {
        self.clock = Clock::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{projection::Viewport, store::PointStore};

    fn two_layout_scheduler(steps: u32) -> Scheduler {
        Scheduler::new(vec![LayoutKind::Phyllotaxis, LayoutKind::Grid], steps, 0.8).unwrap()
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = Vec2::new(1.0, -2.0);
        let b = Vec2::new(5.0, 6.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn first_tick_skips_step_zero() {
        let mut s = two_layout_scheduler(10);
        assert_eq!(s.clock(), Clock::default());

        let frame = s.advance();
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.clock, Clock { cycle_position: 0, step_index: 1 });
        assert_eq!(frame.blend, 0.125);
        assert_eq!(frame.current, LayoutKind::Phyllotaxis);
        assert_eq!(frame.next, LayoutKind::Grid);
    }

    #[test]
    fn blend_is_bounded_and_holds_during_dwell() {
        let steps = 120;
        let s = Scheduler::from_config(&Config::default()).unwrap();
        for step in 0..steps {
            let blend = s.blend_at(step);
            assert!((0.0..=1.0).contains(&blend), "step {step}: blend {blend}");
            if step as f32 >= 0.8 * steps as f32 {
                assert_eq!(blend, 1.0, "step {step} should dwell");
            } else {
                assert!(blend < 1.0, "step {step} should still be moving");
            }
        }
    }

    #[test]
    fn cycle_wraps_after_full_tour() {
        let mut s = Scheduler::from_config(&Config {
            steps_per_transition: 7,
            ..Config::default()
        })
        .unwrap();
        let tour = 7 * s.cycle().len();

        let after_first = s.advance().clock;
        for _ in 0..tour {
            s.advance();
        }
        assert_eq!(s.clock(), after_first);
        assert_eq!(s.ticks(), 1 + tour as u64);
    }

    #[test]
    fn cycle_position_advances_on_step_wrap() {
        let mut s = two_layout_scheduler(10);
        for _ in 0..9 {
            s.advance();
        }
        assert_eq!(s.clock(), Clock { cycle_position: 0, step_index: 9 });

        let frame = s.advance();
        assert_eq!(frame.tick, 10);
        assert_eq!(frame.clock, Clock { cycle_position: 1, step_index: 0 });
        assert_eq!(frame.blend, 0.0);
        assert_eq!(frame.current, LayoutKind::Grid);
        assert_eq!(frame.next, LayoutKind::Phyllotaxis);

        let frame = s.advance();
        assert_eq!(frame.clock, Clock { cycle_position: 1, step_index: 1 });
    }

    #[test]
    fn repeated_layouts_in_cycle_are_visited_in_order() {
        let mut s = Scheduler::from_config(&Config {
            steps_per_transition: 1,
            ..Config::default()
        })
        .unwrap();
        // With a single step per transition every tick wraps.
        let visited: Vec<(LayoutKind, LayoutKind)> =
            (0..5).map(|_| s.advance()).map(|f| (f.current, f.next)).collect();
        use LayoutKind::*;
        assert_eq!(
            visited,
            vec![
                (Spiral, Phyllotaxis),
                (Phyllotaxis, Grid),
                (Grid, Wave),
                (Wave, Phyllotaxis),
                (Phyllotaxis, Spiral),
            ]
        );
    }

    #[test]
    fn tick_interpolates_live_positions() {
        let vp = Viewport::new(400.0, 400.0).unwrap();
        let mut store = PointStore::new(4, vp);
        let mut s = two_layout_scheduler(10);

        let frame = s.tick(store.all_mut());
        for p in store.all() {
            let expected = lerp(
                p.anchor(LayoutKind::Phyllotaxis),
                p.anchor(LayoutKind::Grid),
                frame.blend,
            );
            assert_eq!(p.live, expected);
        }

        for _ in 0..9 {
            s.tick(store.all_mut());
        }
        for p in store.all() {
            assert_eq!(p.live, p.anchor(LayoutKind::Grid));
        }
    }

    #[test]
    fn place_matches_last_tick_without_advancing() {
        let vp = Viewport::new(400.0, 300.0).unwrap();
        let mut store = PointStore::new(12, vp);
        let mut s = two_layout_scheduler(10);
        for _ in 0..4 {
            s.tick(store.all_mut());
        }
        let ticked: Vec<Vec2> = store.all().iter().map(|p| p.live).collect();

        store.rebuild(12, vp);
        s.place(store.all_mut());

        let placed: Vec<Vec2> = store.all().iter().map(|p| p.live).collect();
        assert_eq!(placed, ticked);
        assert_eq!(s.ticks(), 4);
        assert_eq!(s.clock(), Clock { cycle_position: 0, step_index: 4 });
    }

    #[test]
    fn same_inputs_give_same_sequence() {
        let vp = Viewport::new(640.0, 480.0).unwrap();
        let run = || {
            let mut store = PointStore::new(64, vp);
            let mut s = Scheduler::from_config(&Config::default()).unwrap();
            let mut trace = Vec::new();
            for _ in 0..300 {
                s.tick(store.all_mut());
                trace.extend(store.all().iter().map(|p| p.live));
            }
            trace
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn shrinking_steps_rewraps_step_index() {
        let mut s = two_layout_scheduler(10);
        for _ in 0..7 {
            s.advance();
        }
        s.set_steps_per_transition(5).unwrap();
        assert_eq!(s.clock().step_index, 2);
        assert_eq!(s.set_steps_per_transition(0), Err(MorphError::ZeroSteps));
        assert_eq!(s.steps_per_transition(), 5);

        s.reset();
        assert_eq!(s.clock(), Clock::default());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        assert_eq!(Scheduler::new(vec![], 10, 0.8).unwrap_err(), MorphError::EmptyCycle);
        assert_eq!(
            Scheduler::new(vec![LayoutKind::Wave], 0, 0.8).unwrap_err(),
            MorphError::ZeroSteps
        );
    }
}
