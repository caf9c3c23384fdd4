//! Motion module
//!
//! Keeps the clock widget drifting around the canvas without ever leaving it.

pub mod simulator;

// Re-export main types
pub use simulator::{MotionSettings, MotionSimulator, MotionState};
