//! Application layer use cases for the control channel.
//!
//! # What use cases does the server have?
//!
//! - **`update_geometry`** – Builds a [`mirror_core::PositionMapper`] for a
//!   new geometry epoch and swaps it into the [`update_geometry::SharedMapper`]
//!   slot that event handling reads from.
//!
//! - **`inject_input`** – Maps the position carried by each control event
//!   into device coordinates and forwards the result to an `InputInjector`
//!   implementation injected at construction time.

pub mod inject_input;
pub mod update_geometry;
