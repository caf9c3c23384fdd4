//! Frame pump background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, ClockSource, Generation, LifecycleState, TickResult};

const MIN_PERIOD: Duration = Duration::from_micros(100);

/// Drive the engine behind `token` at `fps` until it is stopped or replaced
pub async fn frame_pump_task<C>(state: Arc<AppState<C>>, token: Generation, fps: u32)
where
    C: ClockSource + Clone,
{
    // interval() panics on a zero period
    let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1))).max(MIN_PERIOD);
    info!("Starting frame pump for engine {} at {} fps", token, fps);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        match state.drive_frame(token) {
            Ok(TickResult::Applied) => {}
            Ok(TickResult::Rejected) => match state.lifecycle(token) {
                Ok(Some(LifecycleState::Created)) => {
                    debug!("Engine {} not ready yet, frame skipped", token);
                }
                Ok(Some(lifecycle)) => {
                    info!("Engine {} is {:?}, frame pump exiting", token, lifecycle);
                    break;
                }
                Ok(None) => {
                    info!("Engine {} was replaced, frame pump exiting", token);
                    break;
                }
                Err(e) => {
                    error!("Failed to read engine lifecycle: {}", e);
                    break;
                }
            },
            Err(e) => {
                error!("Failed to drive frame: {}", e);
                break;
            }
        }
    }
}
