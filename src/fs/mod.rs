//! Filesystem utilities for relnotes.
//!
//! Rendered notes are written atomically so a crash never leaves a truncated
//! file behind for `gh release create --notes-file` to publish.

pub mod atomic;

pub use atomic::atomic_write;
