//! Persistent storage for the server.
//!
//! Currently only the TOML configuration file.

pub mod config;
