//! The single shared animation state.
//!
//! [`Morph`] owns the point store and the scheduler. Callers mutate it only
//! through [`Morph::tick`], [`Morph::set_count`], [`Morph::set_viewport`] and
//! the clock controls, and read it through [`Morph::snapshot`]. Wrapped in a
//! [`SharedMorph`], ticks and rebuilds are serialized by the same lock, so a
//! tick never observes a half-built point set.

use std::sync::{Arc, Mutex, MutexGuard};

use glam::Vec2;

use crate::{
    colormap::Rgba,
    config::{Config, clamp_count},
    error::{MorphError, Result},
    projection::Viewport,
    scheduler::{Clock, Frame, Scheduler},
    store::{Point, PointStore},
};

pub type SharedMorph = Arc<Mutex<Morph>>;

/// What the renderer needs for one marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPoint {
    pub pos: Vec2,
    pub color: Rgba,
}

pub struct Morph {
    store: PointStore,
    scheduler: Scheduler,
    count: usize,
    point_radius: f32,
    last_frame: Option<Frame>,
}

impl Morph {
    /// Builds the initial point set for `viewport` from a validated config.
    pub fn new(cfg: &Config, viewport: Viewport) -> Result<Self> {
        let scheduler = Scheduler::from_config(cfg)?;
        let count = clamp_count(cfg.count);
        let mut morph = Self {
            store: PointStore::new(count, viewport),
            scheduler,
            count,
            point_radius: cfg.point_radius,
            last_frame: None,
        };
        morph.refresh();
        Ok(morph)
    }

    pub fn into_shared(self) -> SharedMorph {
        Arc::new(Mutex::new(self))
    }

    /// Advances the animation by one step and updates every live position.
    pub fn tick(&mut self) -> Frame {
        let frame = self.scheduler.tick(self.store.all_mut());
        self.last_frame = Some(frame);
        frame
    }

    /// Places every point for the current clock without advancing it.
    ///
    /// A rebuild leaves live positions at the pixel origin; this puts them
    /// back where the last tick would have drawn them.
    pub fn refresh(&mut self) {
        self.scheduler.place(self.store.all_mut());
    }

    /// Sets the point count, rebuilding the whole set when it changes.
    ///
    /// Counts below [`crate::types::MIN_COUNT`] are clamped. The new points
    /// are placed for the current clock straight away.
    ///
    /// ### Returns
    /// The count actually in effect.
    pub fn set_count(&mut self, count: usize) -> usize {
        let count = clamp_count(count);
        if count != self.count {
            self.count = count;
            self.store.rebuild(count, self.store.viewport());
            self.refresh();
        }
        self.count
    }

    /// Re-projects all anchors when the viewport size changes.
    ///
    /// ### Returns
    /// `true` if a rebuild happened.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if viewport == self.store.viewport() {
            return false;
        }
        self.store.rebuild(self.count, viewport);
        self.refresh();
        true
    }

    pub fn set_steps_per_transition(&mut self, steps: u32) -> Result<()> {
        self.scheduler.set_steps_per_transition(steps)
    }

    /// Restarts the tour from its first layout.
    pub fn reset_clock(&mut self) {
        self.scheduler.reset();
    }

    /// Copies the live positions and colours in index order.
    pub fn snapshot(&self) -> Vec<RenderPoint> {
        self.store
            .all()
            .iter()
            .map(|p| RenderPoint {
                pos: p.live,
                color: p.color,
            })
            .collect()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        self.store.all()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.store.viewport()
    }

    #[inline]
    pub fn clock(&self) -> Clock {
        self.scheduler.clock()
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn point_radius(&self) -> f32 {
        self.point_radius
    }

    /// The frame produced by the most recent tick, if any.
    #[inline]
    pub fn last_frame(&self) -> Option<Frame> {
        self.last_frame
    }
}

/// Locks the shared state, mapping a poisoned lock to [`MorphError::Poisoned`].
pub fn lock(shared: &SharedMorph) -> Result<MutexGuard<'_, Morph>> {
    shared.lock().map_err(|_| MorphError::Poisoned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout::LayoutKind, scheduler::lerp, types::MIN_COUNT};

    fn viewport() -> Viewport {
        Viewport::new(500.0, 500.0).unwrap()
    }

    fn scenario() -> Morph {
        let cfg = Config {
            count: 4,
            cycle: vec![LayoutKind::Phyllotaxis, LayoutKind::Grid],
            steps_per_transition: 10,
            ..Config::default()
        };
        Morph::new(&cfg, viewport()).unwrap()
    }

    #[test]
    fn end_to_end_two_layout_scenario() {
        let mut morph = scenario();
        assert!(morph.last_frame().is_none());

        let frame = morph.tick();
        assert_eq!(frame.clock, Clock { cycle_position: 0, step_index: 1 });
        assert_eq!(frame.blend, 0.125);

        let p0 = &morph.points()[0];
        let expected = lerp(
            p0.anchor(LayoutKind::Phyllotaxis),
            p0.anchor(LayoutKind::Grid),
            0.125,
        );
        assert_eq!(p0.live, expected);
        assert_eq!(morph.snapshot()[0].pos, expected);

        for _ in 0..9 {
            morph.tick();
        }
        let frame = morph.last_frame().unwrap();
        assert_eq!(frame.tick, 10);
        assert_eq!(frame.clock, Clock { cycle_position: 1, step_index: 0 });
        assert_eq!(frame.blend, 0.0);

        let frame = morph.tick();
        assert_eq!(frame.clock, Clock { cycle_position: 1, step_index: 1 });
    }

    #[test]
    fn count_change_rebuilds_exactly() {
        let cfg = Config {
            count: 100,
            ..Config::default()
        };
        let mut morph = Morph::new(&cfg, viewport()).unwrap();
        morph.tick();
        assert_eq!(morph.snapshot().len(), 100);

        assert_eq!(morph.set_count(50), 50);
        assert_eq!(morph.points().len(), 50);
        for (i, p) in morph.points().iter().enumerate() {
            assert_eq!(p.id, i);
        }

        let fresh = Morph::new(&Config { count: 50, ..Config::default() }, viewport()).unwrap();
        for (p, q) in morph.points().iter().zip(fresh.points()) {
            assert_eq!(p.anchors, q.anchors);
            assert_eq!(p.color, q.color);
        }
    }

    #[test]
    fn rebuilt_points_are_placed_for_current_clock() {
        let cfg = Config {
            count: 100,
            ..Config::default()
        };
        let mut morph = Morph::new(&cfg, viewport()).unwrap();
        for _ in 0..50 {
            morph.tick();
        }
        let frame = morph.last_frame().unwrap();

        morph.set_count(200);
        assert_eq!(morph.clock(), frame.clock);
        assert!(morph.snapshot().iter().any(|p| p.pos != Vec2::ZERO));
        for p in morph.points() {
            assert_eq!(p.live, lerp(p.anchor(frame.current), p.anchor(frame.next), frame.blend));
        }

        assert!(morph.set_viewport(Viewport::new(1000.0, 600.0).unwrap()));
        assert!(morph.snapshot().iter().any(|p| p.pos != Vec2::ZERO));
        for p in morph.points() {
            assert_eq!(p.live, lerp(p.anchor(frame.current), p.anchor(frame.next), frame.blend));
        }
    }

    #[test]
    fn new_state_starts_on_first_layout() {
        let morph = scenario();
        for p in morph.points() {
            assert_eq!(p.live, p.anchor(LayoutKind::Phyllotaxis));
        }
    }

    #[test]
    fn count_change_keeps_clock() {
        let mut morph = scenario();
        for _ in 0..3 {
            morph.tick();
        }
        morph.set_count(9);
        assert_eq!(morph.clock(), Clock { cycle_position: 0, step_index: 3 });
    }

    #[test]
    fn degenerate_counts_are_clamped() {
        let mut morph = scenario();
        assert_eq!(morph.set_count(0), MIN_COUNT);
        assert_eq!(morph.set_count(1), MIN_COUNT);
        assert_eq!(morph.points().len(), MIN_COUNT);

        morph.tick();
        assert!(morph.snapshot().iter().all(|p| p.pos.is_finite()));

        let cfg = Config { count: 1, ..Config::default() };
        assert_eq!(Morph::new(&cfg, viewport()).unwrap().count(), MIN_COUNT);
    }

    #[test]
    fn viewport_change_reprojects_only_when_different() {
        let mut morph = scenario();
        assert!(!morph.set_viewport(viewport()));

        let wide = Viewport::new(1000.0, 500.0).unwrap();
        assert!(morph.set_viewport(wide));
        assert_eq!(morph.viewport(), wide);
        assert_eq!(morph.count(), 4);
        assert_eq!(
            morph.points()[0].anchor(LayoutKind::Phyllotaxis),
            Vec2::new(500.0, 250.0)
        );
    }

    #[test]
    fn snapshot_carries_colours_in_index_order() {
        let mut morph = scenario();
        morph.tick();
        let snap = morph.snapshot();
        for (r, p) in snap.iter().zip(morph.points()) {
            assert_eq!(r.color, p.color);
            assert_eq!(r.pos, p.live);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = Config {
            cycle: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(Morph::new(&cfg, viewport()), Err(MorphError::EmptyCycle)));
    }

    #[test]
    fn clock_controls() {
        let mut morph = scenario();
        for _ in 0..4 {
            morph.tick();
        }
        morph.set_steps_per_transition(3).unwrap();
        assert_eq!(morph.clock().step_index, 1);
        morph.reset_clock();
        assert_eq!(morph.clock(), Clock::default());
        assert_eq!(morph.scheduler().steps_per_transition(), 3);
    }

    #[test]
    fn lock_reports_poisoning() {
        let shared = scenario().into_shared();
        assert!(lock(&shared).is_ok());

        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(lock(&shared), Err(MorphError::Poisoned)));
    }
}
