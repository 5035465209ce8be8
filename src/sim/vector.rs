//! Immutable 2D vector used for positions, sizes and velocities
//!
//! The same type plays three roles (world position, box size, per-second
//! displacement); callers keep track of which one a given value is.

use std::ops::{Add, Mul, Neg};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SimError, SimResult};

/// A point or displacement in tile units (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector(Vec2);

impl Vector {
    pub const ZERO: Self = Self(Vec2::ZERO);

    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    /// Componentwise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        Self(self.0 + other.0)
    }

    /// Componentwise scale
    #[inline]
    pub fn times(self, factor: f32) -> Vector {
        Self(self.0 * factor)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == Vec2::ZERO
    }

    /// Read a vector from untyped JSON.
    ///
    /// Accepts `{"x": 1, "y": 2}` or `[1, 2]`; anything else is a
    /// [`SimError::TypeKind`].
    pub fn from_value(value: &Value) -> SimResult<Self> {
        const EXPECTED: &str = "vector ({x, y} object or [x, y] array)";

        let (x, y) = match value {
            Value::Object(map) => (map.get("x"), map.get("y")),
            Value::Array(items) if items.len() == 2 => (items.first(), items.get(1)),
            other => return Err(SimError::type_kind(EXPECTED, other)),
        };

        match (x.and_then(Value::as_f64), y.and_then(Value::as_f64)) {
            (Some(x), Some(y)) => Ok(Self::new(x as f32, y as f32)),
            _ => Err(SimError::type_kind(EXPECTED, value)),
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.times(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Self(-self.0)
    }
}

impl From<(f32, f32)> for Vector {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}
