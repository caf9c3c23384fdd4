//! Orphan watch background task

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::state::{AppState, ClockSource, Generation, LifecycleState};

const RECHECK_INTERVAL: Duration = Duration::from_millis(100);

/// Reclaim the engine behind `token` if it never receives a frame within `timeout`
pub async fn orphan_watch_task<C>(state: Arc<AppState<C>>, token: Generation, timeout: Duration)
where
    C: ClockSource + Clone,
{
    debug!("Watching engine {} for a first frame within {:?}", token, timeout);
    sleep(timeout).await;

    loop {
        match state.lifecycle(token) {
            Ok(Some(LifecycleState::Created)) => match state.check_orphans() {
                Ok(true) => {
                    warn!("Engine {} never started and was reclaimed", token);
                    return;
                }
                // Deadline not reached on the engine's own clock yet
                Ok(false) => sleep(RECHECK_INTERVAL).await,
                Err(e) => {
                    error!("Orphan check failed: {}", e);
                    return;
                }
            },
            Ok(_) => {
                debug!("Engine {} is past setup, orphan watch done", token);
                return;
            }
            Err(e) => {
                error!("Failed to read engine lifecycle: {}", e);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClockSettings, ManualClock, TickResult};
    use crate::utils::geometry::Size;

    fn app(clock: ManualClock) -> Arc<AppState<ManualClock>> {
        Arc::new(AppState::new(
            ClockSettings::default(),
            clock,
            Some(5),
            Size::new(800.0, 600.0),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_engine_is_reclaimed() {
        let clock = ManualClock::at_midnight();
        let state = app(clock.clone());
        let token = state.install().unwrap();
        clock.advance(Duration::from_secs(3));

        orphan_watch_task(Arc::clone(&state), token, Duration::from_secs(2)).await;

        assert_eq!(state.lifecycle(token).unwrap(), Some(LifecycleState::CleanedUp));
        assert_eq!(state.drive_frame(token).unwrap(), TickResult::Rejected);
        let (event, when) = state.get_last_event();
        assert_eq!(event.as_deref(), Some("orphan cleanup"));
        assert!(when.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_engine_is_left_alone() {
        let clock = ManualClock::at_midnight();
        let state = app(clock.clone());
        let token = state.install().unwrap();
        clock.advance(Duration::from_millis(16));
        assert_eq!(state.drive_frame(token).unwrap(), TickResult::Applied);
        clock.advance(Duration::from_secs(5));

        orphan_watch_task(Arc::clone(&state), token, Duration::from_secs(2)).await;

        assert_eq!(state.lifecycle(token).unwrap(), Some(LifecycleState::Running));
    }
}
