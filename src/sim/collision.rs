//! Collision detection for axis-aligned boxes on a tile grid
//!
//! Two questions get answered here: does one box overlap another, and what
//! terrain does a (hypothetical) box touch. Neither mutates anything; the
//! level and the actors decide what to do with the answer.

use super::level::{Grid, Terrain};
use super::vector::Vector;

/// Edges of an axis-aligned box, derived from position and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(pos: Vector, size: Vector) -> Self {
        Self {
            left: pos.x(),
            top: pos.y(),
            right: pos.x() + size.x(),
            bottom: pos.y() + size.y(),
        }
    }

    /// True if `other` lies strictly inside `self` on every edge
    #[inline]
    pub fn strictly_contains(&self, other: &Bounds) -> bool {
        other.top > self.top
            && other.left > self.left
            && other.bottom < self.bottom
            && other.right < self.right
    }

    /// Open-interval overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        other.right > self.left
            && other.left < self.right
            && other.bottom > self.top
            && other.top < self.bottom
    }
}

/// Box-vs-box intersection test
///
/// Checked in order: identical edges, containment, then open overlap. For
/// boxes with positive extent the first two are special cases of the third.
pub fn boxes_intersect(this: &Bounds, other: &Bounds) -> bool {
    if this == other {
        return true;
    }
    if this.strictly_contains(other) {
        return true;
    }
    this.overlaps(other)
}

/// Classify a probe box against the level grid
///
/// Anything left of, above, or right of the playfield counts as wall; anything
/// below it counts as lava. The edge tests compare against `width - 1` and
/// `height - 1` with a strict `>`, so a probe flush with the far edge is still
/// inside.
pub fn probe_terrain(grid: &Grid, probe: &Bounds) -> Option<Terrain> {
    let width = grid.width() as f32;
    let height = grid.height() as f32;

    if probe.top < 0.0 || probe.left < 0.0 || probe.right > width - 1.0 {
        return Some(Terrain::Wall);
    }
    if probe.bottom > height - 1.0 {
        return Some(Terrain::Lava);
    }

    let rows = probe.top.floor() as usize..probe.bottom.ceil() as usize;
    let cols = probe.left.floor() as usize..probe.right.ceil() as usize;

    for row in rows {
        for col in cols.clone() {
            if let Some(terrain) = grid.cell(row, col) {
                return Some(terrain);
            }
        }
    }

    None
}
