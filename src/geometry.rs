use std::ops::{Add, AddAssign, Div, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Integer 2D vector used for widget positions, sizes and pointer coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector2i {
    pub x: i32,
    pub y: i32,
}

impl Vector2i {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if either dimension is zero (a degenerate window/framebuffer size).
    pub fn is_degenerate(&self) -> bool {
        self.x == 0 || self.y == 0
    }

    /// Multiply by a float factor, truncating toward zero.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: (self.x as f32 * factor) as i32,
            y: (self.y as f32 * factor) as i32,
        }
    }

    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

// Pointer coordinates come straight from the platform, so component
// arithmetic saturates instead of overflowing.
impl Add for Vector2i {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl AddAssign for Vector2i {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector2i {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl SubAssign for Vector2i {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vector2i {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl Div<i32> for Vector2i {
    type Output = Self;
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Float 2D vector (scroll deltas).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2f {
    pub x: f32,
    pub y: f32,
}

impl Vector2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds returned by text measurement: `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}
