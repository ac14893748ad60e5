//! Axis-aligned rectangle geometry
//!
//! Every collider in the game is a rectangle in level space:
//! - `pos`: top-left corner (y grows downward)
//! - `size`: width and height

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
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

    /// Vertical midline
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Rect {
        Rect {
            pos: self.pos + Vec2::splat(amount),
            size: self.size - Vec2::splat(amount * 2.0),
        }
    }

    /// Same size, shifted by `delta`
    pub fn offset(&self, delta: Vec2) -> Rect {
        Rect {
            pos: self.pos + delta,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(20.0, 20.0, 40.0, 40.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Player standing exactly on a block
        let player = Rect::new(0.0, 360.0, 40.0, 40.0);
        let block = Rect::new(0.0, 400.0, 40.0, 40.0);
        assert!(!player.overlaps(&block));

        // Side by side
        let left = Rect::new(0.0, 0.0, 40.0, 40.0);
        let right = Rect::new(40.0, 0.0, 40.0, 40.0);
        assert!(!left.overlaps(&right));
    }

    #[test]
    fn test_inset_hitbox() {
        let r = Rect::new(100.0, 100.0, 40.0, 40.0).inset(4.0);
        assert_eq!(r.pos, Vec2::new(104.0, 104.0));
        assert_eq!(r.size, Vec2::new(32.0, 32.0));

        // Corners that touch by 3px no longer overlap once inset
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(37.0, 0.0, 40.0, 40.0);
        assert!(a.overlaps(&b));
        assert!(!a.inset(4.0).overlaps(&b.inset(4.0)));
    }

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.mid_y(), 40.0);
        assert_eq!(r.offset(Vec2::new(5.0, -5.0)).pos, Vec2::new(15.0, 15.0));
    }
}
