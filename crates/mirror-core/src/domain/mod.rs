//! Domain entities for the mirror control channel.
//!
//! This module contains pure geometry with no infrastructure dependencies.
//!
//! # Why keep geometry in its own layer? (for beginners)
//!
//! The code that decides *where* a tap lands on the device is the part of the
//! system most likely to hide off-by-one and rounding bugs.  Keeping it free of
//! sockets, codecs, and OS calls means it can be compiled and tested on any
//! machine, and every rule about rotation or rescaling can be pinned down with
//! a plain `#[test]`.
//!
//! Outer layers (event decoding, injection, configuration) depend on this
//! module, but this module never depends on them.

/// Sizes, points, and positions.
pub mod geometry;

/// 2-D affine transforms and the normalized coordinate space.
pub mod affine;

/// Mapping of client-observed positions into device coordinates.
///
/// See [`position_mapper::PositionMapper`] for the main type.
pub mod position_mapper;
