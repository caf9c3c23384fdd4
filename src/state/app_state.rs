//! Shared host state handed to the background tasks

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{
    ClockHost, ClockSettings, Generation, LifecycleState, Snapshot, SystemClock, TickResult,
};
use crate::{state::sources::ClockSource, utils::geometry::Size};

/// Application state: the clock host plus a channel renderers watch for new frames
#[derive(Debug)]
pub struct AppState<C = SystemClock> {
    /// The one active clock engine and its token bookkeeping
    pub host: Arc<Mutex<ClockHost<C>>>,
    /// Host metadata
    pub start_time: Instant,
    pub canvas_size: Size,
    /// Last lifecycle event tracking
    pub last_event: Arc<Mutex<Option<String>>>,
    pub last_event_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Latest published frame
    pub snapshot_tx: watch::Sender<Option<Snapshot>>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Option<Snapshot>>,
}

impl<C: ClockSource + Clone> AppState<C> {
    pub fn new(settings: ClockSettings, clock: C, seed: Option<u64>, canvas_size: Size) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(None);

        Self {
            host: Arc::new(Mutex::new(ClockHost::new(settings, clock, seed))),
            start_time: Instant::now(),
            canvas_size,
            last_event: Arc::new(Mutex::new(None)),
            last_event_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Run an operation against the host under its lock
    pub fn with_host<T, F>(&self, op: F) -> Result<T, String>
    where
        F: FnOnce(&mut ClockHost<C>) -> T,
    {
        let mut host = self.host.lock()
            .map_err(|e| format!("Failed to lock clock host: {}", e))?;
        Ok(op(&mut *host))
    }

    fn record_event(&self, event: String) {
        if let Ok(mut last_event) = self.last_event.lock() {
            *last_event = Some(event);
        }
        if let Ok(mut last_time) = self.last_event_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, snapshot: Option<Snapshot>) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish snapshot: {}", e);
        }
    }

    /// Install a fresh engine on the configured canvas
    pub fn install(&self) -> Result<Generation, String> {
        let canvas_size = self.canvas_size;
        let (token, snapshot) = self.with_host(|host| {
            let token = host.install(canvas_size);
            (token, host.snapshot().cloned())
        })?;

        info!("Installed clock engine {}", token);
        self.record_event(format!("install {}", token));
        self.publish(snapshot);
        Ok(token)
    }

    /// Drive one frame and publish the result if it was applied
    pub fn drive_frame(&self, token: Generation) -> Result<TickResult, String> {
        let (result, snapshot) = self.with_host(|host| {
            let result = host.drive_now(token);
            let snapshot = if result.is_applied() {
                host.snapshot().cloned()
            } else {
                None
            };
            (result, snapshot)
        })?;

        if snapshot.is_some() {
            self.publish(snapshot);
        }
        Ok(result)
    }

    /// Stop the engine behind `token` and publish its final frame
    pub fn stop(&self, token: Generation) -> Result<bool, String> {
        let (stopped, snapshot) = self.with_host(|host| (host.stop(token), host.snapshot().cloned()))?;
        if stopped {
            self.record_event(format!("stop {}", token));
            self.publish(snapshot);
        }
        Ok(stopped)
    }

    /// Reclaim the active engine if it never started
    pub fn check_orphans(&self) -> Result<bool, String> {
        let (orphaned, snapshot) = self.with_host(|host| (host.check_orphans(), host.snapshot().cloned()))?;
        if orphaned {
            self.record_event("orphan cleanup".to_string());
            self.publish(snapshot);
        }
        Ok(orphaned)
    }

    pub fn lifecycle(&self, token: Generation) -> Result<Option<LifecycleState>, String> {
        self.with_host(|host| host.state(token))
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate host uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last lifecycle event information
    pub fn get_last_event(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_event = self.last_event.lock().ok().and_then(|e| e.clone());
        let last_event_time = self.last_event_time.lock().ok().and_then(|t| *t);
        (last_event, last_event_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::sources::ManualClock;
    use std::time::Duration;

    fn app() -> (AppState<ManualClock>, ManualClock) {
        let clock = ManualClock::at_midnight();
        let state = AppState::new(ClockSettings::default(), clock.clone(), Some(1), Size::new(800.0, 600.0));
        (state, clock)
    }

    #[test]
    fn test_install_publishes_initial_frame() {
        let (state, _) = app();
        let rx = state.subscribe();
        let token = state.install().unwrap();
        let snapshot = rx.borrow().clone().unwrap();
        assert_eq!(snapshot.generation, token);
        assert_eq!(snapshot.lifecycle, LifecycleState::Created);
        assert_eq!(state.get_last_event().0, Some(format!("install {}", token)));
    }

    #[test]
    fn test_rejected_frame_does_not_publish() {
        let (state, clock) = app();
        let token = state.install().unwrap();
        clock.advance(Duration::from_millis(16));
        assert_eq!(state.drive_frame(token).unwrap(), TickResult::Applied);
        state.stop(token).unwrap();

        let mut rx = state.subscribe();
        rx.borrow_and_update();
        clock.advance(Duration::from_millis(16));
        assert_eq!(state.drive_frame(token).unwrap(), TickResult::Rejected);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_uptime_format() {
        let (state, _) = app();
        assert!(state.get_uptime().ends_with('s'));
    }
}
