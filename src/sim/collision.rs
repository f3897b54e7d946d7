//! Collision detection: walls and target
//!
//! Two independent wall rules end the game:
//! - the rendered marker rectangle touching the rendered arena rectangle
//! - the freshly stepped coordinate landing on 0 or on the legacy 495 sentinel
//!
//! The target check is a plain axis-aligned box overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{EDGE_SENTINEL, MARKER_SIZE, MIN_COORD, TARGET_SIZE};

/// Screen-space rectangle as reported by the presenter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from a top-left corner and a size
    pub fn from_origin(origin: IVec2, width: i32, height: i32) -> Self {
        let origin = origin.as_vec2();
        Self::new(
            origin.x,
            origin.y,
            origin.x + width as f32,
            origin.y + height as f32,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Zero-area or non-finite, e.g. layout not mounted yet
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite());
        !finite || self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Supplies the last rendered rectangles of the arena and the marker
pub trait GeometryOracle {
    fn arena_rect(&self) -> Option<Rect>;
    fn marker_rect(&self) -> Option<Rect>;

    /// Both rectangles, or None if either is missing or degenerate
    fn layout(&self) -> Option<(Rect, Rect)> {
        let arena = self.arena_rect().filter(|r| !r.is_degenerate())?;
        let marker = self.marker_rect().filter(|r| !r.is_degenerate())?;
        Some((arena, marker))
    }
}

/// Oracle for headless runs: nothing is rendered, so the rectangle check never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayout;

impl GeometryOracle for NoLayout {
    fn arena_rect(&self) -> Option<Rect> {
        None
    }

    fn marker_rect(&self) -> Option<Rect> {
        None
    }
}

/// Marker touching or outside any arena edge
pub fn touches_boundary(arena: &Rect, marker: &Rect) -> bool {
    marker.left <= arena.left
        || marker.right >= arena.right
        || marker.top <= arena.top
        || marker.bottom >= arena.bottom
}

/// Coordinate rule on the stepped position
///
/// The 495 branch cannot trigger while coordinates move in steps of 10 from 10.
pub fn hits_edge_sentinel(position: IVec2) -> bool {
    position.x == MIN_COORD
        || position.x == EDGE_SENTINEL
        || position.y == MIN_COORD
        || position.y == EDGE_SENTINEL
}

/// Marker box overlaps target box (strict inequalities, so shared edges do not count)
pub fn overlaps(position: IVec2, target: IVec2) -> bool {
    position.x < target.x + TARGET_SIZE
        && position.x + MARKER_SIZE > target.x
        && position.y < target.y + TARGET_SIZE
        && position.y + MARKER_SIZE > target.y
}
