//! The clock engine: one owned simulation instance driven by frame ticks

use std::{fmt::Write as _, time::Duration};

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    lifecycle::{LifecycleState, LifecycleStateMachine, StopReason},
    settings::ClockSettings,
    snapshot::{Generation, Snapshot},
    sources::{ClockSource, RandomSource, SystemClock, Timestamp},
};
use crate::{
    clock::{ClockGeometry, TimeComponents},
    color::{ColorPalette, ColorTransitionController, Hsb},
    motion::MotionSimulator,
    utils::geometry::{Point, Size, Vector},
};

/// Outcome of offering a frame tick to an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickResult {
    Applied,
    Rejected,
}

impl TickResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, TickResult::Applied)
    }
}

/// Periodic-event bookkeeping, measured on the monotonic clock
#[derive(Debug, Clone, Copy)]
struct Schedule {
    last_direction_change: Duration,
    last_color_change: Duration,
    last_debug_refresh: Option<Duration>,
}

/// One wandering clock.
///
/// All mutation happens inside [`ClockEngine::tick`], [`ClockEngine::setup`],
/// [`ClockEngine::resize`] and the stop paths; renderers only read [`Snapshot`]s.
#[derive(Debug)]
pub struct ClockEngine<C = SystemClock, R = StdRng> {
    generation: Generation,
    settings: ClockSettings,
    clock: C,
    rng: R,
    lifecycle: LifecycleStateMachine,
    motion: Option<MotionSimulator>,
    colors: ColorTransitionController,
    time: TimeComponents,
    schedule: Option<Schedule>,
    debug_text: String,
    snapshot: Snapshot,
}

impl<C: ClockSource, R: RandomSource> ClockEngine<C, R> {
    pub fn new(generation: Generation, settings: ClockSettings, clock: C, mut rng: R) -> Self {
        let initial_color = Hsb::random(&mut rng);
        let lifecycle = LifecycleStateMachine::new(settings.orphan_timeout);
        let colors = ColorTransitionController::new(initial_color, settings.color_transition_duration);
        let time = TimeComponents::sample(&clock.now().wall);

        let mut engine = Self {
            generation,
            settings,
            clock,
            rng,
            lifecycle,
            motion: None,
            colors,
            time,
            schedule: None,
            debug_text: String::from("Waiting for first frame..."),
            snapshot: placeholder_snapshot(generation),
        };
        engine.publish();
        debug!("Engine {} created", generation);
        engine
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn lifecycle(&self) -> &LifecycleStateMachine {
        &self.lifecycle
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn settings(&self) -> &ClockSettings {
        &self.settings
    }

    /// Last published view. Still readable after the engine is stopped.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Place the clock on a canvas and make the engine eligible for ticks.
    ///
    /// Returns the engine's generation once it is set up. A zero-area canvas
    /// leaves the engine inert so a later call (or resize) can finish the job.
    pub fn setup(&mut self, canvas_size: Size) -> Option<Generation> {
        if self.lifecycle.state() != LifecycleState::Created {
            debug!("Engine {}: setup ignored in {:?}", self.generation, self.lifecycle.state());
            return None;
        }
        if self.lifecycle.is_ready() {
            return Some(self.generation);
        }

        let Some(motion) = MotionSimulator::new(canvas_size, self.settings.motion.clone(), &mut self.rng) else {
            warn!(
                "Engine {}: canvas {}x{} has no area, waiting for a usable size",
                self.generation, canvas_size.width, canvas_size.height
            );
            return None;
        };

        info!(
            "Engine {}: set up on {}x{} canvas, widget {:.1}px",
            self.generation,
            canvas_size.width,
            canvas_size.height,
            motion.widget_size()
        );
        self.motion = Some(motion);
        self.colors.reset(Hsb::random(&mut self.rng));
        self.lifecycle.mark_ready(self.clock.now().elapsed);
        self.publish();
        Some(self.generation)
    }

    /// Follow a canvas size change. Completes a pending setup if needed.
    pub fn resize(&mut self, canvas_size: Size) -> bool {
        if self.lifecycle.is_stopped() {
            return false;
        }
        let resized = match self.motion.as_mut() {
            Some(motion) => motion.resize(canvas_size),
            None => return self.setup(canvas_size).is_some(),
        };
        if resized {
            debug!(
                "Engine {}: canvas resized to {}x{}",
                self.generation, canvas_size.width, canvas_size.height
            );
            self.publish();
        }
        resized
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self, now: Timestamp) -> TickResult {
        // Gate first: nothing below may run for a stopped, unready or orphaned engine
        if self.lifecycle.is_orphaned(now.elapsed) {
            warn!(
                "Engine {}: first tick came after the orphan deadline, forcing cleanup",
                self.generation
            );
            self.stop_with(StopReason::Orphaned);
            return TickResult::Rejected;
        }
        if !self.lifecycle.accept_tick(now.elapsed) {
            return TickResult::Rejected;
        }

        let schedule = self.schedule.get_or_insert(Schedule {
            last_direction_change: now.elapsed,
            last_color_change: now.elapsed,
            last_debug_refresh: None,
        });

        self.time = TimeComponents::sample(&now.wall);

        if let Some(motion) = self.motion.as_mut() {
            motion.step(&mut self.rng);
        }

        self.colors.tick(now.elapsed);

        if now.elapsed.saturating_sub(schedule.last_direction_change) >= self.settings.direction_change_interval {
            if let Some(motion) = self.motion.as_mut() {
                motion.perturb_direction(&mut self.rng);
            }
            schedule.last_direction_change = now.elapsed;
        }

        if now.elapsed.saturating_sub(schedule.last_color_change) >= self.settings.color_change_interval {
            self.colors.start_random(&mut self.rng, now.elapsed);
            schedule.last_color_change = now.elapsed;
        }

        let debug_due = match schedule.last_debug_refresh {
            None => true,
            Some(last) => now.elapsed.saturating_sub(last) >= self.settings.debug_refresh_interval,
        };
        if debug_due {
            schedule.last_debug_refresh = Some(now.elapsed);
            self.debug_text = self.render_debug_text(&now);
        }

        let ticks = self.lifecycle.accepted_ticks();
        if self.settings.activity_log_every > 0 && ticks % self.settings.activity_log_every == 0 {
            debug!(
                "Engine {}: {} ticks, running={}",
                self.generation,
                ticks,
                self.lifecycle.is_running()
            );
        }

        self.publish();
        TickResult::Applied
    }

    /// Shut down on request from the host. Safe to call repeatedly.
    pub fn stop(&mut self) -> bool {
        self.stop_with(StopReason::External)
    }

    pub fn stop_with(&mut self, reason: StopReason) -> bool {
        let colors = &mut self.colors;
        let schedule = &mut self.schedule;
        let stopped = self.lifecycle.stop(reason, || {
            colors.cancel();
            *schedule = None;
        });
        if stopped {
            // Only the lifecycle field changes; everything else stays as last drawn
            self.snapshot.lifecycle = self.lifecycle.state();
            info!("Engine {}: stopped ({})", self.generation, reason);
        }
        stopped
    }

    /// Reclaim the engine if it was set up but never ticked in time
    pub fn check_orphan(&mut self) -> bool {
        let now = self.clock.now().elapsed;
        if !self.lifecycle.is_orphaned(now) {
            return false;
        }
        warn!(
            "Engine {}: set up but never received a tick, forcing cleanup",
            self.generation
        );
        self.stop_with(StopReason::Orphaned)
    }

    fn publish(&mut self) {
        let (canvas_size, widget_size, position, velocity) = match &self.motion {
            Some(motion) => {
                let state = motion.state();
                (state.canvas_size, motion.widget_size(), state.position, state.velocity)
            }
            None => (Size::default(), 0.0, Point::default(), Vector::default()),
        };
        let base_color = self.colors.displayed();

        self.snapshot = Snapshot {
            generation: self.generation,
            lifecycle: self.lifecycle.state(),
            canvas_size,
            widget_size,
            position,
            velocity,
            base_color,
            palette: ColorPalette::derive(&base_color, &self.time),
            time: self.time,
            hands: ClockGeometry::build(&self.time, widget_size, self.settings.inset),
            debug_text: self.debug_text.clone(),
            tick_count: self.lifecycle.accepted_ticks(),
        };
    }

    fn render_debug_text(&self, now: &Timestamp) -> String {
        use chrono::Timelike;

        let Some(motion) = &self.motion else {
            return String::new();
        };
        let state = motion.state();
        let clock_size = motion.widget_size();
        let geometry = ClockGeometry::build(&self.time, clock_size, self.settings.inset);
        let tip = geometry.hour_hand.tip;

        let mut text = String::new();
        let _ = writeln!(text, "Version: {}", env!("CARGO_PKG_VERSION"));
        let _ = writeln!(text, "Instance: {} ({:?})", self.generation, self.lifecycle.state());
        let _ = writeln!(
            text,
            "Screen: {:.0} x {:.0}",
            state.canvas_size.width, state.canvas_size.height
        );
        let _ = writeln!(
            text,
            "Time: {:02}:{:02}:{:02}",
            now.wall.hour(),
            now.wall.minute(),
            now.wall.second()
        );
        let (face_hours, face_minutes, face_seconds) = self.time.whole();
        let _ = writeln!(
            text,
            "Face: {:02}:{:02}:{:02}",
            if face_hours == 0 { 12 } else { face_hours },
            face_minutes,
            face_seconds
        );
        let _ = writeln!(text, "Position: ({:.1}, {:.1})", state.position.x, state.position.y);
        let _ = writeln!(text, "Velocity: ({:.3}, {:.3})", state.velocity.x, state.velocity.y);
        let _ = writeln!(
            text,
            "Hour Hand: {:.3}h, {:.1}°",
            self.time.hours,
            geometry.hour_angle.to_degrees()
        );
        let _ = writeln!(text, "Hour hand Tip: ({:.1}, {:.1})", tip.x, tip.y);
        let _ = writeln!(text, "Hour hand radius: {:.1}", geometry.hour_hand_radius());
        let _ = write!(text, "Clock radius: {:.1}", geometry.face_radius());
        text
    }
}

fn placeholder_snapshot(generation: Generation) -> Snapshot {
    let time = TimeComponents::default();
    let base_color = Hsb::BLACK;
    Snapshot {
        generation,
        lifecycle: LifecycleState::Created,
        canvas_size: Size::default(),
        widget_size: 0.0,
        position: Point::default(),
        velocity: Vector::default(),
        base_color,
        palette: ColorPalette::derive(&base_color, &time),
        time,
        hands: ClockGeometry::build(&time, 0.0, 0.8),
        debug_text: String::new(),
        tick_count: 0,
    }
}
