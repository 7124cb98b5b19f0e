//! Configuration model for relnotes.
//!
//! This module defines the Config struct that represents `.repo/release.yaml`.
//! The file is optional; every field has a default matching the standard
//! repository layout, and unknown fields are ignored.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
