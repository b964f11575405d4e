/// Identifier for a point in a [`crate::store::PointStore`].
///
/// This is an index into the store's point list, and is only meaningful
/// until the next rebuild.
pub type PointId = usize;

/// Smallest point count the engine accepts; lower requests are clamped.
pub const MIN_COUNT: usize = 2;

/// Largest point count offered by host controls.
pub const MAX_COUNT: usize = 10_000;
