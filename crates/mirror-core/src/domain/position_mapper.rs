//! Mapping of client-observed positions into device coordinates.
//!
//! # How a tap travels (for beginners)
//!
//! ```text
//! client tap (x, y) in a WxH frame
//!   │
//!   ├─ frame size matches the current video size?  ── no ──► rescale per axis
//!   │                                                        into the video frame
//!   ▼
//! video-to-device matrix (if any)
//!   │   = ndc_to_pixels(target) ∘ filter ∘ ndc_from_pixels(video)
//!   ▼
//! device point (x', y')
//! ```
//!
//! The matrix is composed once per *geometry epoch*: at session start, and
//! whenever the video size, the target size, or the filter transform changes.
//! A geometry change never edits an existing mapper.  The session builds a new
//! one and swaps it in, so every event sees one consistent mapper.
//!
//! # Why rescale instead of dropping? (for beginners)
//!
//! Video frames and input events travel through independent pipelines.  When
//! the device rotates, the client may still be showing (and reporting taps
//! against) the old frame size for a moment.  Scaling the tap into the new
//! frame keeps interaction continuous at the cost of a pixel of rounding error
//! during the transition.

use tracing::trace;

use super::affine::{round_to_pixel, AffineMatrix};
use super::geometry::{Point, Position, Size};

/// Maps positions from the video frame into device coordinates.
///
/// Immutable once built; share it behind an `Arc` and replace it wholesale
/// when the geometry changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionMapper {
    /// The size the matrix was computed against.
    video_size: Size,
    /// `None` means positions in `video_size` already are device positions.
    video_to_device: Option<AffineMatrix>,
}

impl PositionMapper {
    /// Creates a mapper from an already-composed video-to-device matrix.
    pub fn new(video_size: Size, video_to_device: Option<AffineMatrix>) -> Self {
        Self {
            video_size,
            video_to_device,
        }
    }

    /// Builds the mapper for one geometry epoch.
    ///
    /// `filter` is a transform expressed in normalized coordinates (see
    /// [`AffineMatrix::ndc_from_pixels`]) that compensates for device
    /// rotation, crop, or letterboxing.  `target_size` is the size of the
    /// device-side frame the result should land in.
    ///
    /// When the sizes are equal and there is no filter, no matrix is stored at
    /// all and [`PositionMapper::map`] becomes a passthrough.  Otherwise the
    /// stored matrix is `ndc_to_pixels(target) ∘ filter ∘ ndc_from_pixels(video)`,
    /// with a missing filter treated as identity so that a pure size change is
    /// still represented by a single matrix.
    pub fn create(video_size: Size, filter: Option<AffineMatrix>, target_size: Size) -> Self {
        let convert_to_pixels = video_size != target_size || filter.is_some();

        let video_to_device = if convert_to_pixels {
            let input_transform = AffineMatrix::ndc_from_pixels(video_size);
            let output_transform = AffineMatrix::ndc_to_pixels(target_size);
            let filter = filter.unwrap_or(AffineMatrix::IDENTITY);
            Some(output_transform.multiply(&filter).multiply(&input_transform))
        } else {
            filter
        };

        Self::new(video_size, video_to_device)
    }

    /// The reference video size this mapper was built for.
    pub fn video_size(&self) -> Size {
        self.video_size
    }

    /// The composed video-to-device matrix, if any.
    pub fn video_to_device_matrix(&self) -> Option<&AffineMatrix> {
        self.video_to_device.as_ref()
    }

    /// Returns `true` if `position` was measured against a different frame
    /// size than this mapper's video size, i.e. [`PositionMapper::map`] will
    /// rescale it.
    pub fn needs_rescale(&self, position: &Position) -> bool {
        position.screen_size != self.video_size
    }

    /// Maps a client position into device coordinates.
    ///
    /// If the position's claimed frame size differs from the video size, the
    /// point is first rescaled independently on each axis into the video frame.
    /// Both the rescale and the matrix application round to the nearest pixel,
    /// ties away from zero.
    pub fn map(&self, position: &Position) -> Point {
        let point = if self.needs_rescale(position) {
            self.rescale(position.point, position.screen_size)
        } else {
            position.point
        };

        match &self.video_to_device {
            Some(matrix) => matrix.apply(point),
            None => point,
        }
    }

    /// Rescales `point` from a `client_size` frame into the video frame.
    fn rescale(&self, point: Point, client_size: Size) -> Point {
        let scale_x = f64::from(self.video_size.width()) / f64::from(client_size.width());
        let scale_y = f64::from(self.video_size.height()) / f64::from(client_size.height());

        let scaled = Point::new(
            round_to_pixel(f64::from(point.x) * scale_x),
            round_to_pixel(f64::from(point.y) * scale_y),
        );

        trace!(
            client_size = %client_size,
            video_size = %self.video_size,
            from = %point,
            to = %scaled,
            "rescaled position from stale frame size"
        );

        scaled
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
