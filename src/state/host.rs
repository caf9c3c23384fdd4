//! Explicit ownership of the active engine, keyed by generation tokens

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    engine::{ClockEngine, TickResult},
    lifecycle::{LifecycleState, StopReason},
    settings::ClockSettings,
    snapshot::{Generation, Snapshot},
    sources::{ClockSource, Timestamp},
};
use crate::utils::geometry::Size;

/// Holds the one engine a host is currently showing.
///
/// Drivers keep the [`Generation`] returned by [`ClockHost::install`] and
/// present it on every call; a driver holding an older token is simply turned
/// away, which is how a replaced preview instance gets silenced.
#[derive(Debug)]
pub struct ClockHost<C> {
    settings: ClockSettings,
    clock: C,
    seeder: StdRng,
    next_generation: u64,
    active: Option<ClockEngine<C, StdRng>>,
}

impl<C: ClockSource + Clone> ClockHost<C> {
    pub fn new(settings: ClockSettings, clock: C, seed: Option<u64>) -> Self {
        let seeder = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            clock,
            seeder,
            next_generation: 1,
            active: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn active_generation(&self) -> Option<Generation> {
        self.active.as_ref().map(|engine| engine.generation())
    }

    /// Build and set up a fresh engine, retiring whichever one was active
    pub fn install(&mut self, canvas_size: Size) -> Generation {
        let generation = Generation(self.next_generation);
        self.next_generation += 1;

        if let Some(previous) = self.active.as_mut() {
            info!(
                "Handing off from engine {} to engine {}",
                previous.generation(),
                generation
            );
            previous.stop_with(StopReason::Replaced);
        }

        let rng = StdRng::seed_from_u64(self.seeder.gen());
        let mut engine = ClockEngine::new(generation, self.settings.clone(), self.clock.clone(), rng);
        engine.setup(canvas_size);
        self.active = Some(engine);
        generation
    }

    fn engine_for(&mut self, token: Generation) -> Option<&mut ClockEngine<C, StdRng>> {
        match self.active.as_mut() {
            Some(engine) if engine.generation() == token => Some(engine),
            _ => None,
        }
    }

    /// Tick the engine identified by `token`, if it is still the active one
    pub fn drive(&mut self, token: Generation, now: Timestamp) -> TickResult {
        match self.engine_for(token) {
            Some(engine) => engine.tick(now),
            None => {
                debug!("Tick for stale token {} rejected", token);
                TickResult::Rejected
            }
        }
    }

    /// Tick using the host's own clock
    pub fn drive_now(&mut self, token: Generation) -> TickResult {
        let now = self.clock.now();
        self.drive(token, now)
    }

    pub fn resize(&mut self, token: Generation, canvas_size: Size) -> bool {
        self.engine_for(token)
            .map(|engine| engine.resize(canvas_size))
            .unwrap_or(false)
    }

    pub fn stop(&mut self, token: Generation) -> bool {
        self.engine_for(token)
            .map(|engine| engine.stop())
            .unwrap_or(false)
    }

    /// Run the orphan check on the active engine
    pub fn check_orphans(&mut self) -> bool {
        self.active
            .as_mut()
            .map(|engine| engine.check_orphan())
            .unwrap_or(false)
    }

    /// Lifecycle of the engine behind `token`; `None` once it has been replaced
    pub fn state(&self, token: Generation) -> Option<LifecycleState> {
        self.active
            .as_ref()
            .filter(|engine| engine.generation() == token)
            .map(|engine| engine.lifecycle_state())
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.active.as_ref().map(|engine| engine.snapshot())
    }
}
