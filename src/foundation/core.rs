use std::fmt;

use crate::foundation::error::{ClipError, ClipResult};

/// Orientation metadata of a video stream, as reported by the probe step.
///
/// The serialized names match the library server's wire format.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Unrotated,
    /// Rotated by -90 degrees.
    Neg90,
    /// Rotated by +90 degrees.
    Pos90,
    /// Rotated by 180 degrees.
    Neg180,
}

impl Rotation {
    /// Every rotation value, in menu order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Unrotated,
        Rotation::Neg90,
        Rotation::Pos90,
        Rotation::Neg180,
    ];

    /// Angle in degrees used for preview compositing.
    pub fn angle_deg(self) -> i32 {
        match self {
            Rotation::Unrotated => 0,
            Rotation::Neg90 => -90,
            Rotation::Pos90 => 90,
            Rotation::Neg180 => 180,
        }
    }

    /// `true` for quarter turns, where width and height are visually swapped.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Neg90 | Rotation::Pos90)
    }

    /// Map a probe side-data rotation in degrees to a [`Rotation`].
    pub fn from_degrees(deg: i32) -> ClipResult<Self> {
        match deg {
            0 => Ok(Rotation::Unrotated),
            90 => Ok(Rotation::Pos90),
            -90 => Ok(Rotation::Neg90),
            180 | -180 => Ok(Rotation::Neg180),
            other => Err(ClipError::validation(format!("unknown rotation {other}"))),
        }
    }
}

/// Pixel dimensions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// `width` by `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Same box with width and height swapped.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Parse the `WIDTHxHEIGHT` form used by resolution pickers.
    pub fn parse(s: &str) -> ClipResult<Self> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| ClipError::validation(format!("size '{s}' must be WIDTHxHEIGHT")))?;
        let width = w
            .trim()
            .parse()
            .map_err(|e| ClipError::validation(format!("size '{s}' has bad width: {e}")))?;
        let height = h
            .trim()
            .parse()
            .map_err(|e| ClipError::validation(format!("size '{s}' has bad height: {e}")))?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
