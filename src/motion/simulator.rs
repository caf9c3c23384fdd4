//! Bounded, jittered billiard motion of the clock widget

use std::{f64::consts::TAU, ops::RangeInclusive};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::state::sources::RandomSource;
use crate::utils::geometry::{Point, Size, Vector};

/// Motion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSettings {
    /// Nominal speed in pixels per tick; each velocity axis is capped at twice this
    pub base_speed: f64,
    /// Widget edge length is `min(width, height) / size_factor`
    pub size_factor: f64,
    /// Half-width of the jitter added to the non-bouncing axis on a wall hit
    pub bounce_jitter: f64,
    /// Half-width of the random turn applied on a direction change, in radians
    pub turn_jitter: f64,
    /// Speed multiplier range for initial velocity and direction changes
    pub speed_variation: RangeInclusive<f64>,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            base_speed: 0.16,
            size_factor: 2.0,
            bounce_jitter: 0.2,
            turn_jitter: 0.5,
            speed_variation: 0.5..=1.5,
        }
    }
}

impl MotionSettings {
    pub fn max_axis_speed(&self) -> f64 {
        self.base_speed * 2.0
    }
}

/// Position, velocity and the canvas they live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub position: Point,
    pub velocity: Vector,
    pub canvas_size: Size,
}

#[derive(Debug, Clone)]
pub struct MotionSimulator {
    state: MotionState,
    settings: MotionSettings,
}

impl MotionSimulator {
    /// Center the widget and launch it in a random direction.
    ///
    /// Returns `None` when the canvas has no usable area.
    pub fn new<R: RandomSource + ?Sized>(
        canvas_size: Size,
        settings: MotionSettings,
        rng: &mut R,
    ) -> Option<Self> {
        if canvas_size.is_degenerate() {
            return None;
        }

        let angle = rng.uniform(0.0..=TAU);
        let speed = settings.base_speed * rng.uniform(settings.speed_variation.clone());
        let mut simulator = Self {
            state: MotionState {
                position: canvas_size.center(),
                velocity: Vector::from_angle(angle, speed),
                canvas_size,
            },
            settings,
        };
        simulator.cap_velocity();
        Some(simulator)
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    pub fn widget_size(&self) -> f64 {
        self.state.canvas_size.min_dimension() / self.settings.size_factor
    }

    pub fn margin(&self) -> f64 {
        self.widget_size() / 2.0
    }

    /// Advance one tick, bouncing off any wall that would be crossed
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let margin = self.margin();
        let limit = self.settings.max_axis_speed();
        let jitter = self.settings.bounce_jitter;
        let Size { width, height } = self.state.canvas_size;
        let MotionState {
            position, velocity, ..
        } = &mut self.state;

        let mut next = position.offset(*velocity);

        if next.x <= margin || next.x >= width - margin {
            velocity.x = -velocity.x;
            next.x = position.x + velocity.x;
            velocity.y = (velocity.y + rng.uniform(-jitter..=jitter)).clamp(-limit, limit);
        }

        if next.y <= margin || next.y >= height - margin {
            velocity.y = -velocity.y;
            next.y = position.y + velocity.y;
            velocity.x = (velocity.x + rng.uniform(-jitter..=jitter)).clamp(-limit, limit);
        }

        next.x = clamp_axis(next.x, margin, width - margin);
        next.y = clamp_axis(next.y, margin, height - margin);
        *position = next;
    }

    /// Turn by a random angle and pick a new speed
    pub fn perturb_direction<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let turn = rng.uniform(-self.settings.turn_jitter..=self.settings.turn_jitter);
        let speed = self.settings.base_speed * rng.uniform(self.settings.speed_variation.clone());
        let angle = self.state.velocity.angle() + turn;

        self.state.velocity = Vector::from_angle(angle, speed);
        self.cap_velocity();
        debug!(
            "Direction change: heading {:.2} rad, speed {:.3}",
            angle, speed
        );
    }

    /// Adopt a new canvas, pulling the widget back inside if it shrank
    pub fn resize(&mut self, canvas_size: Size) -> bool {
        if canvas_size.is_degenerate() {
            warn!(
                "Ignoring degenerate canvas size {}x{}",
                canvas_size.width, canvas_size.height
            );
            return false;
        }

        self.state.canvas_size = canvas_size;
        let margin = self.margin();
        let position = &mut self.state.position;
        position.x = clamp_axis(position.x, margin, canvas_size.width - margin);
        position.y = clamp_axis(position.y, margin, canvas_size.height - margin);
        true
    }

    fn cap_velocity(&mut self) {
        let limit = self.settings.max_axis_speed();
        self.state.velocity.x = self.state.velocity.x.clamp(-limit, limit);
        self.state.velocity.y = self.state.velocity.y.clamp(-limit, limit);
    }
}

/// Clamp into `[lo, hi]`, settling on the middle if the band is inverted
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn simulator(seed: u64) -> (MotionSimulator, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sim = MotionSimulator::new(Size::new(800.0, 600.0), MotionSettings::default(), &mut rng).unwrap();
        (sim, rng)
    }

    #[test]
    fn test_starts_centered() {
        let (sim, _) = simulator(1);
        assert_eq!(sim.state().position, Point::new(400.0, 300.0));
        assert_eq!(sim.widget_size(), 300.0);
        assert_eq!(sim.margin(), 150.0);
    }

    #[test]
    fn test_degenerate_canvas_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(MotionSimulator::new(Size::new(0.0, 600.0), MotionSettings::default(), &mut rng).is_none());
        assert!(MotionSimulator::new(Size::new(0.0, 0.0), MotionSettings::default(), &mut rng).is_none());
    }

    #[test]
    fn test_free_step_moves_by_velocity() {
        let (mut sim, mut rng) = simulator(3);
        let before = *sim.state();
        sim.step(&mut rng);
        let after = sim.state();
        assert!((after.position.x - (before.position.x + before.velocity.x)).abs() < 1e-12);
        assert!((after.position.y - (before.position.y + before.velocity.y)).abs() < 1e-12);
        assert_eq!(after.velocity, before.velocity);
    }

    #[test]
    fn test_wall_hit_reflects_axis() {
        let (mut sim, mut rng) = simulator(5);
        sim.state.position = Point::new(650.0 - 0.05, 300.0);
        sim.state.velocity = Vector::new(0.1, 0.0);
        sim.step(&mut rng);

        let state = sim.state();
        assert_eq!(state.velocity.x, -0.1);
        assert!((state.position.x - (650.0 - 0.15)).abs() < 1e-9);
        assert!(state.velocity.y.abs() <= 0.2 + 1e-12, "jitter stays within range");
    }

    #[test]
    fn test_resize_pulls_widget_inside() {
        let (mut sim, _) = simulator(9);
        sim.state.position = Point::new(640.0, 440.0);
        assert!(sim.resize(Size::new(400.0, 300.0)));
        let margin = sim.margin();
        let p = sim.state().position;
        assert!(p.x <= 400.0 - margin && p.y <= 300.0 - margin);
        assert!(!sim.resize(Size::new(-5.0, 300.0)));
        assert_eq!(sim.state().canvas_size, Size::new(400.0, 300.0));
    }

    #[test]
    fn test_direction_change_respects_speed_range() {
        let (mut sim, mut rng) = simulator(11);
        for _ in 0..200 {
            sim.perturb_direction(&mut rng);
            let speed = sim.state().velocity.magnitude();
            assert!(speed >= 0.16 * 0.5 - 1e-12 && speed <= 0.16 * 1.5 + 1e-12, "speed {}", speed);
        }
    }

    #[test]
    fn test_inverted_band_settles_in_middle() {
        assert_eq!(clamp_axis(5.0, 10.0, 2.0), 6.0);
        assert_eq!(clamp_axis(5.0, 0.0, 2.0), 2.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn stays_contained_with_bounded_velocity(
            seed in any::<u64>(),
            width in 50.0_f64..2000.0,
            height in 50.0_f64..2000.0,
            angle in 0.0_f64..TAU,
            speed in 0.0_f64..0.32,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sim = MotionSimulator::new(Size::new(width, height), MotionSettings::default(), &mut rng).unwrap();
            sim.state.velocity = Vector::from_angle(angle, speed);
            sim.cap_velocity();

            let limit = sim.settings().max_axis_speed() + 1e-9;
            let margin = sim.margin();
            for n in 0..10_000 {
                sim.step(&mut rng);
                if n % 900 == 0 {
                    sim.perturb_direction(&mut rng);
                }
                let s = sim.state();
                prop_assert!(s.position.x >= margin && s.position.x <= width - margin);
                prop_assert!(s.position.y >= margin && s.position.y <= height - margin);
                prop_assert!(s.velocity.x.abs() <= limit && s.velocity.y.abs() <= limit);
            }
        }
    }
}
