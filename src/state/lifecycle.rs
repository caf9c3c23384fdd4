//! One-way lifecycle gate for a clock engine instance

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Lifecycle phase. Transitions only ever move down this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleState {
    Created,
    Running,
    Stopped,
    CleanedUp,
}

/// Why an instance was shut down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The host asked for it (window hidden, user dismissed the saver)
    External,
    /// Set up but never ticked before the orphan timeout
    Orphaned,
    /// A newer instance took over the host slot
    Replaced,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StopReason::External => "external stop",
            StopReason::Orphaned => "orphaned instance",
            StopReason::Replaced => "replaced by newer instance",
        };
        f.write_str(label)
    }
}

/// Gate consulted before any per-tick work.
#[derive(Debug, Clone)]
pub struct LifecycleStateMachine {
    state: LifecycleState,
    ready: bool,
    orphan_timeout: Duration,
    orphan_deadline: Option<Duration>,
    stop_reason: Option<StopReason>,
    accepted_ticks: u64,
    stale_ticks: u64,
}

impl LifecycleStateMachine {
    pub fn new(orphan_timeout: Duration) -> Self {
        Self {
            state: LifecycleState::Created,
            ready: false,
            orphan_timeout,
            orphan_deadline: None,
            stop_reason: None,
            accepted_ticks: 0,
            stale_ticks: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.state >= LifecycleState::Stopped
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn accepted_ticks(&self) -> u64 {
        self.accepted_ticks
    }

    /// Ticks that arrived after the instance was stopped
    pub fn stale_ticks(&self) -> u64 {
        self.stale_ticks
    }

    pub fn orphan_deadline(&self) -> Option<Duration> {
        self.orphan_deadline
    }

    /// Record a successful setup and arm the orphan timer.
    ///
    /// Only the first call from `Created` has any effect.
    pub fn mark_ready(&mut self, now: Duration) -> bool {
        if self.state != LifecycleState::Created || self.ready {
            debug!("Setup ignored in state {:?} (ready={})", self.state, self.ready);
            return false;
        }
        self.ready = true;
        self.orphan_deadline = Some(now + self.orphan_timeout);
        debug!(
            "Setup complete, orphan detection armed for {:?}",
            self.orphan_timeout
        );
        true
    }

    /// Decide whether a frame tick at `now` may run. The first accepted tick starts the instance.
    ///
    /// A first tick arriving after the orphan deadline is refused; the instance
    /// stays `Created` and is expected to be stopped as orphaned.
    pub fn accept_tick(&mut self, now: Duration) -> bool {
        match self.state {
            LifecycleState::Running => {
                self.accepted_ticks += 1;
                true
            }
            LifecycleState::Created if self.is_orphaned(now) => {
                warn!("First tick arrived after the orphan deadline; refusing to start");
                false
            }
            LifecycleState::Created if self.ready => {
                self.state = LifecycleState::Running;
                self.orphan_deadline = None;
                self.accepted_ticks += 1;
                info!("First tick received, instance is running");
                true
            }
            LifecycleState::Created => {
                debug!("Tick rejected: instance has not been set up");
                false
            }
            LifecycleState::Stopped | LifecycleState::CleanedUp => {
                self.stale_ticks += 1;
                if self.stale_ticks == 1 {
                    warn!(
                        "Tick received after stop ({:?}); ignoring",
                        self.stop_reason
                    );
                } else {
                    debug!("Stale tick #{} ignored", self.stale_ticks);
                }
                false
            }
        }
    }

    /// Stop the instance, run `release` once, and finish in `CleanedUp`.
    ///
    /// Returns `false` (and skips `release`) if the instance was already stopped.
    pub fn stop<F: FnOnce()>(&mut self, reason: StopReason, release: F) -> bool {
        match self.state {
            LifecycleState::Created | LifecycleState::Running => {
                info!(
                    "Stopping instance from {:?}: {} after {} ticks",
                    self.state, reason, self.accepted_ticks
                );
                self.state = LifecycleState::Stopped;
                self.stop_reason = Some(reason);
                self.orphan_deadline = None;
                release();
                self.cleanup();
                true
            }
            LifecycleState::Stopped | LifecycleState::CleanedUp => {
                debug!("Stop ({}) ignored, already {:?}", reason, self.state);
                false
            }
        }
    }

    /// Final teardown step; only acts on the first call from `Stopped`
    pub fn cleanup(&mut self) -> bool {
        if self.state != LifecycleState::Stopped {
            return false;
        }
        self.state = LifecycleState::CleanedUp;
        info!("Instance cleaned up ({:?})", self.stop_reason);
        true
    }

    /// True once the orphan deadline has passed without a tick
    pub fn is_orphaned(&self, now: Duration) -> bool {
        self.state == LifecycleState::Created
            && matches!(self.orphan_deadline, Some(deadline) if now >= deadline)
    }
}
