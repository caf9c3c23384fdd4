//! Tunables for one clock engine

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::motion::MotionSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSettings {
    pub motion: MotionSettings,
    /// Face diameter relative to the widget edge
    pub inset: f64,
    pub direction_change_interval: Duration,
    pub color_change_interval: Duration,
    pub color_transition_duration: Duration,
    /// How long a set-up instance may wait for its first tick
    pub orphan_timeout: Duration,
    pub debug_refresh_interval: Duration,
    /// Emit an activity trace every this many accepted ticks
    pub activity_log_every: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            motion: MotionSettings::default(),
            inset: 0.8,
            direction_change_interval: Duration::from_secs(15),
            color_change_interval: Duration::from_secs(30),
            color_transition_duration: Duration::from_secs(2),
            orphan_timeout: Duration::from_secs(2),
            debug_refresh_interval: Duration::from_secs(1),
            activity_log_every: 120,
        }
    }
}
