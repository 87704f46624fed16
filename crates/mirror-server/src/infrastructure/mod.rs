//! Infrastructure layer for the server.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `mirror_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`event_source`** – Decodes the line-oriented control protocol
//!   (`LAEvent:` / `LAGeometry:` lines carrying JSON) and drives the
//!   inject-input use case from an async reader.
//!
//! - **`input_injection`** – Implementations of `InputInjector`: a
//!   `TracingInjector` that logs what would be injected, and a
//!   `RecordingInjector` for tests.
//!
//! - **`storage`** – TOML configuration loading and saving.

pub mod event_source;
pub mod input_injection;
pub mod storage;
