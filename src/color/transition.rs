//! Crossfade between two base colors

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Hsb;
use crate::state::sources::RandomSource;

/// One in-flight crossfade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    pub start_time: Duration,
    pub from_color: Hsb,
    pub to_color: Hsb,
    pub duration: Duration,
}

impl TransitionState {
    /// Fraction of the fade completed at `now`, clamped to `[0, 1]`
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Owns the displayed base color and at most one crossfade.
#[derive(Debug, Clone)]
pub struct ColorTransitionController {
    displayed: Hsb,
    duration: Duration,
    active: Option<TransitionState>,
}

impl ColorTransitionController {
    pub fn new(initial: Hsb, duration: Duration) -> Self {
        Self {
            displayed: initial,
            duration,
            active: None,
        }
    }

    pub fn displayed(&self) -> Hsb {
        self.displayed
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn transition(&self) -> Option<&TransitionState> {
        self.active.as_ref()
    }

    /// Replace the displayed color outright, dropping any fade in progress
    pub fn reset(&mut self, color: Hsb) {
        self.displayed = color;
        self.active = None;
    }

    /// Begin fading toward `to`. Ignored while another fade is running.
    pub fn start(&mut self, to: Hsb, now: Duration) -> bool {
        if self.active.is_some() {
            debug!("Color change requested during an active transition, ignoring");
            return false;
        }

        self.active = Some(TransitionState {
            start_time: now,
            from_color: self.displayed,
            to_color: to,
            duration: self.duration,
        });
        debug!("Color transition started toward hue {:.3}", to.hue);
        true
    }

    /// Begin fading toward a freshly sampled random color.
    ///
    /// The random source is only consulted when the fade actually starts.
    pub fn start_random<R: RandomSource + ?Sized>(&mut self, rng: &mut R, now: Duration) -> bool {
        if self.active.is_some() {
            debug!("Color change requested during an active transition, ignoring");
            return false;
        }
        let to = Hsb::random(rng);
        self.start(to, now)
    }

    /// Advance the fade and return the color to display
    pub fn tick(&mut self, now: Duration) -> Hsb {
        if let Some(transition) = self.active {
            let progress = transition.progress(now);
            if progress >= 1.0 {
                self.displayed = transition.to_color;
                self.active = None;
                debug!("Color transition complete");
            } else {
                self.displayed = transition.from_color.interpolate(&transition.to_color, progress);
            }
        }
        self.displayed
    }

    /// Abandon the fade, keeping whatever color is on screen now
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
