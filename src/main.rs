//! Prism Clock - wandering analog clock simulation
//!
//! This is the main entry point for the prism-clock application.

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info};

use prism_clock::{
    config::Config,
    state::{AppState, SystemClock},
    tasks::{frame_pump_task, frame_report_task, orphan_watch_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("prism_clock={}", config.log_level()))
        .init();

    config.validate()?;

    info!("Starting prism-clock v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: canvas={}x{}, fps={}, seed={:?}, start_delay={}ms",
        config.width, config.height, config.fps, config.seed, config.start_delay_ms
    );

    let settings = config.clock_settings();
    let orphan_timeout = settings.orphan_timeout;
    let report_every = settings.debug_refresh_interval;

    // Create application state and install the first engine
    let state = Arc::new(AppState::new(
        settings,
        SystemClock::new(),
        config.seed,
        config.canvas_size(),
    ));
    let token = state.install().map_err(anyhow::Error::msg)?;

    // Reclaim the engine if frames never start
    tokio::spawn(orphan_watch_task(Arc::clone(&state), token, orphan_timeout));

    // Stand-in renderer
    let report = tokio::spawn(frame_report_task(Arc::clone(&state), report_every, config.json));

    let run_for = config.run_secs.map(std::time::Duration::from_secs);
    let deadline = async move {
        match run_for {
            Some(duration) => sleep(duration).await,
            None => std::future::pending().await,
        }
    };

    let pump_state = Arc::clone(&state);
    let fps = config.fps;
    let start_delay = config.start_delay();
    let pump = async move {
        if !start_delay.is_zero() {
            info!("Delaying first frame by {:?}", start_delay);
            sleep(start_delay).await;
        }
        frame_pump_task(pump_state, token, fps).await;
    };

    tokio::select! {
        _ = pump => {
            info!("Frame pump finished");
        }
        _ = deadline => {
            info!("Run time elapsed");
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    match state.stop(token) {
        Ok(true) => info!("Engine {} stopped", token),
        Ok(false) => info!("Engine {} was already stopped", token),
        Err(e) => error!("Failed to stop engine: {}", e),
    }
    report.abort();

    if let (Some(event), Some(at)) = state.get_last_event() {
        info!("Last lifecycle event: {} at {}", event, at.format("%H:%M:%S"));
    }
    info!("Clock shutdown complete after {}", state.get_uptime());
    Ok(())
}
