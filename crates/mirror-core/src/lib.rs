//! # mirror-core
//!
//! Shared geometry library for the mirror control channel.
//!
//! A client watches a mirrored video stream and sends input events (taps,
//! drags, scrolls) expressed in the pixel coordinates of the frame it is
//! currently showing.  Before those events can be injected on the device they
//! must be translated into device coordinates, which may differ because of
//! rotation, cropping, letterboxing, or simply because the client is still
//! showing a frame from before the last resize.
//!
//! This crate has zero dependencies on OS APIs, network sockets, or video
//! codecs.
//!
//! # Architecture overview (for beginners)
//!
//! - **`domain::geometry`** – The small value types every event carries:
//!   [`Size`], [`Point`], and [`Position`] (a point plus the frame size it was
//!   measured against).
//!
//! - **`domain::affine`** – [`AffineMatrix`], a 2-D affine transform with
//!   composition, point application, and the normalization constructors that
//!   make rotation/crop filters resolution-independent.
//!
//! - **`domain::position_mapper`** – [`PositionMapper`], the per-geometry
//!   mapping policy.  It is built once whenever the video geometry changes and
//!   then maps every incoming [`Position`] into device space.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `mirror_core::PositionMapper` instead of
// `mirror_core::domain::position_mapper::PositionMapper`.
pub use domain::affine::AffineMatrix;
pub use domain::geometry::{GeometryError, Point, Position, Size};
pub use domain::position_mapper::PositionMapper;
