//! Prism Clock - a wandering, color-cycling analog clock
//!
//! This library holds the deterministic animation core: time sampling, palette
//! derivation and fades, bouncing motion, hand and overlap geometry, and the
//! lifecycle that keeps a stopped or replaced instance from drawing again.
//! Rendering is left to whoever consumes the published [`state::Snapshot`]s.

pub mod clock;
pub mod color;
pub mod config;
pub mod motion;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, ClockEngine, ClockHost, Generation, Snapshot};
pub use utils::signals::shutdown_signal;
