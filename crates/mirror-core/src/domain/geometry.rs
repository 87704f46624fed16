//! Basic geometry value types carried by every input event.
//!
//! All coordinates are integer pixels.  Which frame a pixel belongs to (the
//! client's video frame, the encoder's video frame, or the device display)
//! depends on context; the types themselves do not record it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing geometry values.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// A frame size with a zero width or height.
    ///
    /// Such a size would make every per-axis scale factor infinite or NaN, so
    /// it is rejected where it is built instead of where it is used.
    #[error("invalid frame size {width}x{height}: both dimensions must be non-zero")]
    ZeroDimension { width: u32, height: u32 },
}

/// Dimensions of a frame in pixels.
///
/// Both dimensions are always non-zero.  The only ways to obtain a `Size` are
/// [`Size::new`] and deserialization, and both enforce that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSize")]
pub struct Size {
    width: u32,
    height: u32,
}

/// Unvalidated wire shape of a [`Size`].
#[derive(Deserialize)]
struct RawSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawSize> for Size {
    type Error = GeometryError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        Size::new(raw.width, raw.height)
    }
}

impl Size {
    /// Creates a new size.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::ZeroDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels (always > 0).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (always > 0).
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pixel position in some frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The geometric payload of one input event.
///
/// `screen_size` is the size of the frame the client says `point` was
/// measured against.  It can lag behind the real video size for a frame or
/// two while the stream is being resized or rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub point: Point,
    pub screen_size: Size,
}

impl Position {
    /// Creates a new position.
    pub fn new(point: Point, screen_size: Size) -> Self {
        Self { point, screen_size }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
