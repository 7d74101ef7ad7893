use std::{
    fmt::Display,
    ops::Add,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An integer pair in image coordinates: x grows to the right, y grows
/// *downwards*. Used both for pixel positions and for headings.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub const RIGHT: Vector2 = Vector2 { x: 1, y: 0 };
    pub const UP: Vector2 = Vector2 { x: 0, y: -1 };
    pub const LEFT: Vector2 = Vector2 { x: -1, y: 0 };
    pub const DOWN: Vector2 = Vector2 { x: 0, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotates the vector 90 degrees counter-clockwise as seen on screen.
    ///
    /// The usual counter-clockwise rotation is
    /// ```text
    /// ⎛ 0 -1 ⎞
    /// ⎝ 1  0 ⎠
    /// ```
    /// but the y axis points down here, so it has to be sandwiched between
    /// two flips `diag(1, -1)`. The product collapses to `(x, y) -> (y, -x)`.
    ///
    /// A right turn is three left turns and reversing is two.
    pub const fn rotate_left(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    pub const fn rotate_right(self) -> Self {
        self.rotate_left().rotate_left().rotate_left()
    }

    /// `None` when the sum leaves the `i32` range.
    pub fn checked_add(self, rhs: Vector2) -> Option<Vector2> {
        Some(Vector2 {
            x: self.x.checked_add(rhs.x)?,
            y: self.y.checked_add(rhs.y)?,
        })
    }

    pub fn manhattan(self, other: Vector2) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Self) -> Self::Output {
        Vector2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl From<[i32; 2]> for Vector2 {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vector2> for [i32; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl FromStr for Vector2 {
    type Err = ConfigError;

    /// Parses a JSON array such as `[12, 40]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<i32> = serde_json::from_str(s).map_err(|source| ConfigError::Json {
            what: "coordinate",
            source,
        })?;

        match values[..] {
            [x, y] => Ok(Vector2 { x, y }),
            _ => Err(ConfigError::Arity {
                expected: 2,
                actual: values.len(),
            }),
        }
    }
}
