//! Destructible brick grid
//!
//! Bricks are stored in a flat row-major array. Position is derived from
//! row/column, so nothing here depends on how the host renders them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::rect::Rect;

/// Brick visibility. A destroyed brick never comes back within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Visible,
    Destroyed,
}

/// A single brick cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub visibility: Visibility,
}

impl Brick {
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Reference to a brick by grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickRef {
    pub row: usize,
    pub col: usize,
}

/// The brick matrix for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    brick_size: Vec2,
    margin: f32,
    /// Top-left corner of brick (0, 0)
    origin: Vec2,
    /// Row-major: index = row * cols + col
    bricks: Vec<Brick>,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl BrickGrid {
    /// A grid with no bricks (before the first game is laid out)
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            brick_size: Vec2::ZERO,
            margin: 0.0,
            origin: Vec2::ZERO,
            bricks: Vec::new(),
        }
    }

    /// Lay out a fresh grid with every brick visible
    ///
    /// Brick (r, c) sits at `origin + (c * (w + margin), r * (h + margin))`.
    pub fn layout(rows: usize, cols: usize, brick_size: Vec2, margin: f32, origin: Vec2) -> Self {
        let mut bricks = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                bricks.push(Brick {
                    row,
                    col,
                    visibility: Visibility::Visible,
                });
            }
        }
        Self {
            rows,
            cols,
            brick_size,
            margin,
            origin,
            bricks,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Look up a brick by coordinates
    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.index(row, col).map(|i| &self.bricks[i])
    }

    /// Whether the brick at (row, col) is still standing (false if out of range)
    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Brick::is_visible)
    }

    /// Screen rectangle of the brick at (row, col)
    pub fn brick_rect(&self, row: usize, col: usize) -> Rect {
        let step = self.brick_size + Vec2::splat(self.margin);
        let pos = self.origin + Vec2::new(col as f32 * step.x, row as f32 * step.y);
        Rect::from_pos_size(pos, self.brick_size)
    }

    /// All bricks in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn visible_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_visible()).count()
    }

    /// First visible brick overlapping `ball`, scanning rows top-to-bottom and
    /// columns left-to-right
    pub fn find_hit(&self, ball: &Rect) -> Option<BrickRef> {
        self.bricks
            .iter()
            .filter(|b| b.is_visible())
            .find(|b| overlaps(ball, &self.brick_rect(b.row, b.col)))
            .map(|b| BrickRef {
                row: b.row,
                col: b.col,
            })
    }

    /// Destroy the first brick `ball` overlaps (scan order as in `find_hit`)
    ///
    /// At most one brick is destroyed per call even when the ball covers
    /// several.
    pub fn hit(&mut self, ball: &Rect) -> Option<BrickRef> {
        let hit = self.find_hit(ball)?;
        self.destroy(hit.row, hit.col);
        Some(hit)
    }

    /// Mark a brick destroyed. Returns false if it was already gone or out of range.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        let Some(i) = self.index(row, col) else {
            return false;
        };
        let brick = &mut self.bricks[i];
        if brick.is_visible() {
            brick.visibility = Visibility::Destroyed;
            true
        } else {
            false
        }
    }

    /// Victory predicate: every brick destroyed
    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_visible())
    }

    /// Per-brick visibility flags, row-major (for the presentation layer)
    pub fn visibility_mask(&self) -> Vec<bool> {
        self.bricks.iter().map(Brick::is_visible).collect()
    }
}
