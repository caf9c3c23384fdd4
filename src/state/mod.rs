//! State management module
//!
//! This module owns the per-instance clock engine, its lifecycle, and the host
//! that decides which instance is allowed to drive.

pub mod app_state;
pub mod engine;
pub mod host;
pub mod lifecycle;
pub mod settings;
pub mod snapshot;
pub mod sources;

// Re-export main types
pub use app_state::AppState;
pub use engine::{ClockEngine, TickResult};
pub use host::ClockHost;
pub use lifecycle::{LifecycleState, LifecycleStateMachine, StopReason};
pub use settings::ClockSettings;
pub use snapshot::{Generation, Snapshot};
pub use sources::{ClockSource, ManualClock, RandomSource, SystemClock, Timestamp};
