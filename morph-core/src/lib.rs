//! Core engine for a point cloud that morphs between 2-D arrangements.
//!
//! Main components:
//! - [`layout`] — the four arrangement generators.
//! - [`projection`] — mapping of unit coordinates into viewport pixels.
//! - [`colormap`] — per-point colours sampled from a perceptual colormap.
//! - [`store`] — per-point anchors, live positions and colours.
//! - [`scheduler`] — the repeating clock that blends between arrangements.
//! - [`morph`] — the shared animation state with its mutation entry points.
//! - [`driver`] — the cancellable per-frame tick loop.
//! - [`config`] — construction-time configuration.
//! - [`error`] — error type for the fallible constructors.
//! - [`types`] — shared type aliases and constants.

pub mod colormap;
pub mod config;
pub mod driver;
pub mod error;
pub mod layout;
pub mod morph;
pub mod projection;
pub mod scheduler;
pub mod store;
pub mod types;

pub use error::{MorphError, Result};
pub use morph::{Morph, SharedMorph};
