//! Host-supplied collaborators: a clock and a source of randomness

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use chrono::{Local, NaiveTime};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One reading of the host clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Monotonic time since the clock's epoch, used for every interval check
    pub elapsed: Duration,
    /// Local wall-clock time, used only to position the hands
    pub wall: NaiveTime,
}

impl Timestamp {
    pub fn new(elapsed: Duration, wall: NaiveTime) -> Self {
        Self { elapsed, wall }
    }

    /// Same instant moved forward on both clocks
    pub fn advanced_by(&self, delta: Duration) -> Self {
        let step = chrono::Duration::from_std(delta).unwrap_or_else(|_| chrono::Duration::zero());
        Self {
            elapsed: self.elapsed + delta,
            wall: self.wall.overflowing_add_signed(step).0,
        }
    }
}

pub trait ClockSource {
    fn now(&self) -> Timestamp;
}

/// Real clock: `Instant` for elapsed time, `chrono::Local` for the face
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp {
            elapsed: self.epoch.elapsed(),
            wall: Local::now().time(),
        }
    }
}

/// Hand-cranked clock. Clones share the same reading.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Starts at zero elapsed time and midnight
    pub fn at_midnight() -> Self {
        Self::new(Timestamp::new(Duration::ZERO, NaiveTime::default()))
    }

    pub fn advance(&self, delta: Duration) -> Timestamp {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = current.advanced_by(delta);
        *current
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> Timestamp {
        match self.current.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Uniform real numbers in a closed range
pub trait RandomSource {
    fn uniform(&mut self, range: RangeInclusive<f64>) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self, range: RangeInclusive<f64>) -> f64 {
        if range.start() >= range.end() {
            return *range.start();
        }
        self.gen_range(range)
    }
}
