//! Collision detection and response for axis-aligned rectangles
//!
//! Detection is a plain boolean overlap test. No penetration depth is
//! computed and nothing is pushed apart: the caller decides which velocity
//! component to invert based on which surface triggered the test.

use glam::Vec2;

use super::rect::Rect;

/// Check whether two rectangles overlap
///
/// Closed intervals on both axes, so rectangles that merely touch along an
/// edge count as overlapping.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() <= b.right() && a.right() >= b.left() && a.top() <= b.bottom() && a.bottom() >= b.top()
}

/// Which screen boundaries a ball is touching or past
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContacts {
    /// Left or right wall
    pub side: bool,
    /// Ceiling
    pub top: bool,
    /// Floor (the paddle missed)
    pub bottom: bool,
}

/// Test a ball against the four screen edges
///
/// The ball is not clamped back inside; a ball can sit slightly past a wall
/// for one tick before the inverted velocity carries it back.
pub fn wall_contacts(ball: &Rect, screen_width: f32, screen_height: f32) -> WallContacts {
    WallContacts {
        side: ball.left() <= 0.0 || ball.right() >= screen_width,
        top: ball.top() <= 0.0,
        bottom: ball.bottom() >= screen_height,
    }
}

/// Invert the horizontal velocity component
#[inline]
pub fn reflect_x(velocity: Vec2) -> Vec2 {
    Vec2::new(-velocity.x, velocity.y)
}

/// Invert the vertical velocity component
#[inline]
pub fn reflect_y(velocity: Vec2) -> Vec2 {
    Vec2::new(velocity.x, -velocity.y)
}
