//! Background tasks module
//!
//! These tasks drive the clock engine and watch over its lifecycle.

pub mod frame_pump;
pub mod frame_report;
pub mod orphan_watch;

// Re-export main functions
pub use frame_pump::frame_pump_task;
pub use frame_report::{frame_report_task, FrameReport};
pub use orphan_watch::orphan_watch_task;
