//! Utility functions module
//!
//! Plane geometry primitives and process signal handling.

pub mod geometry;
pub mod signals;

// Re-export main items
pub use geometry::{Point, Size, Vector};
pub use signals::shutdown_signal;
