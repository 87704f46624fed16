//! 2-D affine transforms.
//!
//! # Matrix layout
//!
//! An [`AffineMatrix`] stores six coefficients `(a, b, c, d, e, f)` of the
//! homogeneous matrix
//!
//! ```text
//! | a  c  e |
//! | b  d  f |
//! | 0  0  1 |
//! ```
//!
//! so applying it to a point computes `x' = a·x + c·y + e` and
//! `y' = b·x + d·y + f`.
//!
//! # Normalized device coordinates (for beginners)
//!
//! A rotation or crop filter should not care whether the video is 720p or 4K.
//! The mapper therefore moves pixel coordinates into a *normalized* space
//! first, applies the filter there, and converts back to pixels of the target
//! frame afterwards.  Here the normalized space is centered on the frame:
//! `(-1, -1)` is the top-left corner, `(1, 1)` the bottom-right corner, and the
//! y axis points down just like pixel coordinates do.  A pure rotation about
//! the origin therefore rotates the frame about its center.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Size};

/// An immutable 2-D affine transform.
///
/// Values are `Copy` and side-effect free, so one matrix may be shared by any
/// number of mappers and threads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct AffineMatrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl AffineMatrix {
    /// The identity transform.
    pub const IDENTITY: AffineMatrix = AffineMatrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a matrix from its six coefficients (see the module docs for
    /// their layout).
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Returns the coefficients as `[a, b, c, d, e, f]`.
    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Maps pixel coordinates of a frame of `size` into normalized
    /// coordinates, `[-1, 1]` on both axes.
    pub fn ndc_from_pixels(size: Size) -> Self {
        let w = f64::from(size.width());
        let h = f64::from(size.height());
        Self::new(2.0 / w, 0.0, 0.0, 2.0 / h, -1.0, -1.0)
    }

    /// Maps normalized coordinates back into pixel coordinates of a frame of
    /// `size`.  Inverse of [`AffineMatrix::ndc_from_pixels`] for the same size.
    pub fn ndc_to_pixels(size: Size) -> Self {
        let w = f64::from(size.width());
        let h = f64::from(size.height());
        Self::new(w / 2.0, 0.0, 0.0, h / 2.0, w / 2.0, h / 2.0)
    }

    /// A translation by `(tx, ty)`.
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// A scale by `sx` horizontally and `sy` vertically, about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// A clockwise rotation by `turns` quarter turns about the origin, with
    /// exact coefficients.  Negative values turn counter-clockwise.
    pub fn rotate_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::IDENTITY,
            1 => Self::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0),
            2 => Self::new(-1.0, 0.0, 0.0, -1.0, 0.0, 0.0),
            _ => Self::new(0.0, -1.0, 1.0, 0.0, 0.0, 0.0),
        }
    }

    /// A horizontal mirror (`x ↦ -x`).
    pub fn hflip() -> Self {
        Self::scale(-1.0, 1.0)
    }

    /// A vertical mirror (`y ↦ -y`).
    pub fn vflip() -> Self {
        Self::scale(1.0, -1.0)
    }

    /// Composes two transforms.
    ///
    /// `a.multiply(&b)` applies `b` first, then `a`:
    /// `a.multiply(&b).apply(p) == a.apply(b.apply(p))` up to rounding.
    pub fn multiply(&self, rhs: &AffineMatrix) -> AffineMatrix {
        let l = self;
        let r = rhs;
        Self::new(
            l.a * r.a + l.c * r.b,
            l.b * r.a + l.d * r.b,
            l.a * r.c + l.c * r.d,
            l.b * r.c + l.d * r.d,
            l.a * r.e + l.c * r.f + l.e,
            l.b * r.e + l.d * r.f + l.f,
        )
    }

    /// Applies the transform to continuous coordinates, without rounding.
    pub fn apply_f64(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Applies the transform to a pixel position.
    ///
    /// Each axis is rounded to the nearest integer with ties rounding half
    /// away from zero (`2.5 → 3`, `-2.5 → -3`).  Results beyond the `i32`
    /// range saturate.
    pub fn apply(&self, point: Point) -> Point {
        let (x, y) = self.apply_f64(f64::from(point.x), f64::from(point.y));
        Point::new(round_to_pixel(x), round_to_pixel(y))
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for AffineMatrix {
    type Output = AffineMatrix;

    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        self.multiply(&rhs)
    }
}

impl From<[f64; 6]> for AffineMatrix {
    fn from(c: [f64; 6]) -> Self {
        Self::new(c[0], c[1], c[2], c[3], c[4], c[5])
    }
}

impl From<AffineMatrix> for [f64; 6] {
    fn from(m: AffineMatrix) -> Self {
        m.coefficients()
    }
}

/// Quantizes a continuous coordinate to a pixel, half away from zero.
pub(crate) fn round_to_pixel(value: f64) -> i32 {
    // `as` saturates at the i32 bounds and maps NaN to 0.
    value.round() as i32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
