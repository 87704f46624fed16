//! mirror-server library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does mirror-server do? (for beginners)
//!
//! The server runs next to the mirrored device.  A client watches the video
//! stream and sends input events back: touches, drags, scrolls.  Each event
//! carries a position measured in the frame the client is displaying.  The
//! server:
//!
//! 1. Reads control events, one per line, from its input stream.
//! 2. Maps each event's position into device coordinates with the current
//!    [`mirror_core::PositionMapper`].
//! 3. Hands the device point to an [`application::inject_input::InputInjector`]
//!    which performs the actual injection.
//! 4. Swaps in a new mapper whenever a geometry change (rotation, resize,
//!    new crop filter) is announced.

/// Application layer: use cases for the control channel.
pub mod application;

/// Infrastructure layer: event source, injectors, and configuration storage.
pub mod infrastructure;
