use std::time::Duration;

use crate::{
    error::{MorphError, Result},
    layout::LayoutKind,
    types::MIN_COUNT,
};

pub const DEFAULT_COUNT: usize = 1000;
pub const DEFAULT_STEPS: u32 = 120;
pub const DEFAULT_DWELL_START: f32 = 0.8;

/// Tour used when no explicit cycle order is given.
pub const DEFAULT_CYCLE: [LayoutKind; 5] = [
    LayoutKind::Phyllotaxis,
    LayoutKind::Spiral,
    LayoutKind::Phyllotaxis,
    LayoutKind::Grid,
    LayoutKind::Wave,
];

/// Construction-time settings for a [`crate::Morph`].
///
/// ### Fields
/// - `count` - Number of animated points.
/// - `steps_per_transition` - Ticks spent moving from one layout to the next.
/// - `dwell_start` - Fraction of a transition after which the blend is held at `1.0`.
/// - `cycle` - Ordered, wrapping tour of layouts. Repeats are allowed.
/// - `frame_interval` - Target time between driver ticks.
/// - `point_radius` - Marker radius in pixels, read by the host view.
#[derive(Clone, Debug)]
pub struct Config {
    pub count: usize,
    pub steps_per_transition: u32,
    pub dwell_start: f32,
    pub cycle: Vec<LayoutKind>,
    pub frame_interval: Duration,
    pub point_radius: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            steps_per_transition: DEFAULT_STEPS,
            dwell_start: DEFAULT_DWELL_START,
            cycle: DEFAULT_CYCLE.to_vec(),
            frame_interval: Duration::from_millis(16),
            point_radius: 3.0,
        }
    }
}

impl Config {
    /// Checks the settings that the scheduler relies on.
    ///
    /// `count` is not rejected here; it is clamped by [`clamp_count`] when
    /// the state is built.
    pub fn validate(&self) -> Result<()> {
        if self.cycle.is_empty() {
            return Err(MorphError::EmptyCycle);
        }
        if self.steps_per_transition == 0 {
            return Err(MorphError::ZeroSteps);
        }
        if !(self.dwell_start > 0.0 && self.dwell_start <= 1.0) {
            return Err(MorphError::InvalidDwell(self.dwell_start));
        }
        Ok(())
    }
}

/// Raises counts below [`MIN_COUNT`] to the minimum.
///
/// The wave and spiral formulas divide by `count - 1`, so a single point
/// has no meaningful position in them.
pub fn clamp_count(count: usize) -> usize {
    if count < MIN_COUNT {
        tracing::warn!(requested = count, clamped = MIN_COUNT, "point count below minimum");
        MIN_COUNT
    } else {
        count
    }
}
