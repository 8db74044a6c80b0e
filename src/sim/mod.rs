//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable scan order (row-major for bricks)
//! - No rendering, threading or platform dependencies

pub mod bricks;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickGrid, BrickRef, Visibility};
pub use collision::{WallContacts, overlaps, reflect_x, reflect_y, wall_contacts};
pub use rect::Rect;
pub use state::{Arena, Ball, GameEvent, GamePhase, GameState, Paddle, Snapshot};
pub use tick::tick;
