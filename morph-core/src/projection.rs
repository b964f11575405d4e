//! Mapping from unit layout coordinates into viewport pixel space.
//!
//! The shorter viewport axis defines the scale, so a layout spanning
//! `[-1, 1]` always fits and stays centered regardless of aspect ratio.

use glam::Vec2;

use crate::error::{MorphError, Result};

/// Pixel dimensions of the drawing area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport, rejecting non-finite or non-positive sizes.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(MorphError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Half width and half height, i.e. the pixel center.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Pixels per layout unit.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.half_extents().min_element()
    }

    /// Converts a layout coordinate into pixel space.
    ///
    /// ### Parameters
    /// - `p` - Unnormalized layout coordinate, nominally in `[-1, 1]`.
    ///
    /// ### Returns
    /// `p * magnitude + (width / 2, height / 2)`.
    #[inline]
    pub fn project(&self, p: Vec2) -> Vec2 {
        p * self.magnitude() + self.half_extents()
    }
}
