use glam::Vec2;

use crate::{
    colormap::{Colormap, Rgba},
    layout::LayoutKind,
    projection::Viewport,
    types::PointId,
};

/// One animated point.
///
/// ### Fields
/// - `id` - Index of the point, stable until the next rebuild.
/// - `anchors` - Projected target position per [`LayoutKind`], indexed by [`LayoutKind::slot`].
/// - `live` - Position currently rendered; rewritten every tick.
/// - `color` - Colormap colour derived from `id / count`.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub anchors: [Vec2; 4],
    pub live: Vec2,
    pub color: Rgba,
}

impl Point {
    #[inline]
    pub fn anchor(&self, kind: LayoutKind) -> Vec2 {
        self.anchors[kind.slot()]
    }
}

/// Owns the current point set and the viewport it was projected into.
pub struct PointStore {
    points: Vec<Point>,
    viewport: Viewport,
}

impl PointStore {
    /// Creates a store already populated with `count` points.
    pub fn new(count: usize, viewport: Viewport) -> Self {
        let mut store = Self {
            points: Vec::new(),
            viewport,
        };
        store.rebuild(count, viewport);
        store
    }

    /// Discards every point and builds `count` fresh ones.
    ///
    /// For each index this computes the four layout coordinates, projects
    /// them into `viewport`, assigns the colormap colour and resets the live
    /// position to the pixel origin.
    pub fn rebuild(&mut self, count: usize, viewport: Viewport) {
        self.viewport = viewport;

        let generators: Vec<_> = LayoutKind::ALL.iter().map(|k| k.generator(count)).collect();
        let colormap = Colormap::viridis();

        self.points.clear();
        self.points.reserve(count);
        for id in 0..count {
            let mut anchors = [Vec2::ZERO; 4];
            for (kind, generate) in LayoutKind::ALL.iter().zip(&generators) {
                anchors[kind.slot()] = viewport.project(generate(id));
            }
            self.points.push(Point {
                id,
                anchors,
                live: Vec2::ZERO,
                color: colormap.for_index(id, count),
            });
        }

        tracing::debug!(
            count,
            width = viewport.width(),
            height = viewport.height(),
            "rebuilt point anchors"
        );
    }

    /// All points in index order.
    #[inline]
    pub fn all(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn all_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Projected anchor of point `id` in the given layout, if the point exists.
    pub fn anchor(&self, id: PointId, kind: LayoutKind) -> Option<Vec2> {
        self.points.get(id).map(|p| p.anchor(kind))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
