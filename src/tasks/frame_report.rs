//! Frame report background task
//!
//! Stands in for a renderer: samples the published frames at the debug refresh
//! cadence and writes them to the log, or to stdout as JSON lines.

use std::{sync::Arc, time::Duration};
use serde::Serialize;
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::{
    clock::Layer,
    state::{AppState, ClockSource, Snapshot},
};

/// One rendered frame as written by `--json`
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    #[serde(flatten)]
    pub snapshot: &'a Snapshot,
    pub layers: Vec<Layer>,
}

impl<'a> FrameReport<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            layers: snapshot.layers(),
        }
    }
}

/// Background task that reports the latest frame every `every`
pub async fn frame_report_task<C>(state: Arc<AppState<C>>, every: Duration, json: bool)
where
    C: ClockSource + Clone,
{
    info!("Starting frame report task (every {:?}, json={})", every, json);

    let mut frames = state.subscribe();
    let mut ticker = interval(every);

    loop {
        ticker.tick().await;

        match frames.has_changed() {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                error!("Frame channel closed: {}", e);
                break;
            }
        }

        let snapshot = frames.borrow_and_update().clone();
        let Some(snapshot) = snapshot else {
            continue;
        };

        let report = FrameReport::new(&snapshot);
        if json {
            match serde_json::to_string(&report) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize frame: {}", e),
            }
        } else {
            let origin = snapshot.widget_origin();
            info!(
                "Frame {} of engine {} ({:?}): {} layers, widget at ({:.1}, {:.1}) size {:.1}",
                snapshot.tick_count,
                snapshot.generation,
                snapshot.lifecycle,
                report.layers.len(),
                origin.x,
                origin.y,
                snapshot.widget_size
            );
            for line in snapshot.debug_text.lines() {
                debug!("  {}", line);
            }
        }
    }
}
