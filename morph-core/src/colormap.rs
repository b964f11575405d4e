use std::fmt;

use colorgrad::Gradient;

/// 8-bit RGBA colour handed to the renderer.
///
/// Formats as `#rrggbb` through [`fmt::Display`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Perceptually uniform colormap sampled by point rank.
pub struct Colormap {
    gradient: Gradient,
}

impl Colormap {
    pub fn viridis() -> Self {
        Self {
            gradient: colorgrad::viridis(),
        }
    }

    /// Samples the colormap at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Rgba {
        let [r, g, b, a] = self.gradient.at(t.clamp(0.0, 1.0)).to_rgba8();
        Rgba::new(r, g, b, a)
    }

    /// Colour for point `index` out of `count`, i.e. `sample(index / count)`.
    pub fn for_index(&self, index: usize, count: usize) -> Rgba {
        if count == 0 {
            return self.sample(0.0);
        }
        self.sample(index as f64 / count as f64)
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::viridis()
    }
}
