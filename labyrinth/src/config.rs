use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, vector::Vector2};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Half-open rectangle `[x0, x1) x [y0, y1)` in source image coordinates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width as i32,
            y1: height as i32,
        }
    }

    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }

    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Number of pixels trimmed from each edge of the source image before solving.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct Crop {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Crop {
    /// The part of a `width` x `height` image that survives the crop. Positions
    /// keep their pre-crop coordinates.
    pub fn apply(&self, width: u32, height: u32) -> Result<Rect, ConfigError> {
        let empty = || ConfigError::EmptyCrop {
            crop: self.to_string(),
            width,
            height,
        };

        let x1 = width.checked_sub(self.right).ok_or_else(empty)?;
        let y1 = height.checked_sub(self.bottom).ok_or_else(empty)?;
        if self.left >= x1 || self.top >= y1 {
            return Err(empty());
        }

        let coord = |v: u32| i32::try_from(v).map_err(|_| empty());
        Ok(Rect {
            x0: coord(self.left)?,
            y0: coord(self.top)?,
            x1: coord(x1)?,
            y1: coord(y1)?,
        })
    }
}

impl From<[u32; 4]> for Crop {
    fn from([left, top, right, bottom]: [u32; 4]) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl From<Crop> for [u32; 4] {
    fn from(c: Crop) -> Self {
        [c.left, c.top, c.right, c.bottom]
    }
}

impl Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl FromStr for Crop {
    type Err = ConfigError;

    /// Parses a JSON array `[left, top, right, bottom]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<u32> = serde_json::from_str(s).map_err(|source| ConfigError::Json {
            what: "crop",
            source,
        })?;

        match values[..] {
            [left, top, right, bottom] => Ok(Crop {
                left,
                top,
                right,
                bottom,
            }),
            _ => Err(ConfigError::Arity {
                expected: 4,
                actual: values.len(),
            }),
        }
    }
}

/// Everything the core needs to know about a solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolveConfig {
    pub start: Vector2,
    pub end: Vector2,
    pub threshold: f64,
    /// Walls are darker than the threshold instead of brighter.
    pub invert: bool,
    pub crop: Crop,
    /// Upper bound on solver iterations, `None` for unbounded.
    pub max_steps: Option<u64>,
}

impl SolveConfig {
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Self {
            start,
            end,
            threshold: DEFAULT_THRESHOLD,
            invert: false,
            crop: Crop::default(),
            max_steps: None,
        }
    }

    /// Checks the options against an image of the given size and returns the
    /// domain the walker may move in.
    pub fn validate(&self, width: u32, height: u32) -> Result<Rect, ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }

        let domain = self.crop.apply(width, height)?;

        for (which, position) in [("start", self.start), ("end", self.end)] {
            if !domain.contains(position) {
                return Err(ConfigError::OutOfDomain { which, position });
            }
        }

        Ok(domain)
    }
}
