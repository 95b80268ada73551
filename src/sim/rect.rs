//! Axis-aligned bounding rectangles
//!
//! Every entity collides as a box. Overlap is strict: rectangles that only
//! share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Rectangle of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
    }

    /// Same size, moved so the top-left corner sits at `pos`
    pub fn at(&self, pos: Vec2) -> Self {
        Self {
            pos,
            size: self.size,
        }
    }

    /// Strict overlap test (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Keep this rectangle fully inside `bounds`
    pub fn clamp_inside(&mut self, bounds: &Rect) {
        let max_x = bounds.right() - self.width();
        let max_y = bounds.bottom() - self.height();
        self.pos.x = self.pos.x.max(bounds.left()).min(max_x);
        self.pos.y = self.pos.y.max(bounds.top()).min(max_y);
    }
}
