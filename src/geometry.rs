/// Geometry primitives — plain value types, no game logic.
///
/// All board-space values are `f32` units.  Board-relative coordinates have
/// their origin at the bottom-left corner of the board with y growing upward.

use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::time::Duration;

use serde::Deserialize;

// ── Vector ────────────────────────────────────────────────────────────────────

/// A 2D point or translation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

/// A point in board-relative (or absolute, where stated) coordinates.
pub type Position = Vector;

/// A displacement to be added to a `Position`.
pub type Translation = Vector;

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

// ── Size ──────────────────────────────────────────────────────────────────────

/// Width and height of a board or sprite.  Fixed per entity kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vector from a sprite's lower-left corner to its centre.
    pub fn half(&self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

// ── Velocity ──────────────────────────────────────────────────────────────────

/// Speed in units per second along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translation covered during `dt`: each axis scaled by `dt_ms / 1000`.
    pub fn displacement(&self, dt: Duration) -> Translation {
        let ratio = dt.as_secs_f32();
        Vector::new(self.x * ratio, self.y * ratio)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
