//! Arrangement generators.
//!
//! Each generator is built for a point count `n` and maps a point index to
//! an unnormalized coordinate, nominally inside `[-1, 1]` on both axes.
//! [`crate::projection`] later scales these into viewport pixels.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec2;

use crate::types::PointId;

/// One of the four target arrangements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Phyllotaxis,
    Grid,
    Wave,
    Spiral,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::Phyllotaxis,
        LayoutKind::Grid,
        LayoutKind::Wave,
        LayoutKind::Spiral,
    ];

    /// Position of this kind in per-point anchor arrays.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            LayoutKind::Phyllotaxis => 0,
            LayoutKind::Grid => 1,
            LayoutKind::Wave => 2,
            LayoutKind::Spiral => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Phyllotaxis => "phyllotaxis",
            LayoutKind::Grid => "grid",
            LayoutKind::Wave => "wave",
            LayoutKind::Spiral => "spiral",
        }
    }

    /// Builds the index-to-coordinate function for `n` points.
    pub fn generator(self, n: usize) -> Box<dyn Fn(PointId) -> Vec2> {
        match self {
            LayoutKind::Phyllotaxis => Box::new(phyllotaxis(n)),
            LayoutKind::Grid => Box::new(grid(n)),
            LayoutKind::Wave => Box::new(wave(n)),
            LayoutKind::Spiral => Box::new(spiral(n)),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sunflower-seed packing: `r = sqrt(i/n)`, `θ = i·π(3 − √5)`.
pub fn phyllotaxis(n: usize) -> impl Fn(PointId) -> Vec2 {
    let golden_angle = PI * (3.0 - 5f32.sqrt());
    let n = n as f32;
    move |i| {
        let i = i as f32;
        let r = (i / n).sqrt();
        let theta = i * golden_angle;
        Vec2::new(r * theta.cos(), r * theta.sin())
    }
}

/// Row-major square lattice spanning `[-0.8, 0.8]`.
pub fn grid(n: usize) -> impl Fn(PointId) -> Vec2 {
    let row_length = ((n as f32).sqrt().round() as usize).max(1);
    let cell = 1.6 / row_length as f32;
    move |i| {
        let col = (i % row_length) as f32;
        let row = (i / row_length) as f32;
        Vec2::new(-0.8 + cell * col, -0.8 + cell * row)
    }
}

/// Three sine periods across `x ∈ [-1, 1]` with amplitude `0.3`.
pub fn wave(n: usize) -> impl Fn(PointId) -> Vec2 {
    let x_scale = if n > 1 { 2.0 / (n - 1) as f32 } else { 0.0 };
    let single = n <= 1;
    move |i| {
        if single {
            return Vec2::ZERO;
        }
        let x = -1.0 + i as f32 * x_scale;
        Vec2::new(x, (x * 3.0 * PI).sin() * 0.3)
    }
}

/// Spiral whose radius grows as `sqrt` of the index order.
pub fn spiral(n: usize) -> impl Fn(PointId) -> Vec2 {
    let last = n.saturating_sub(1) as f32;
    move |i| {
        if last == 0.0 {
            return Vec2::ZERO;
        }
        let t = (i as f32 / last).sqrt();
        let angle = 10.0 * PI * t;
        Vec2::new(t * angle.cos(), t * angle.sin())
    }
}
