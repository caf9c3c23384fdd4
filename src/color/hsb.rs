//! Cylindrical color model and the RGB conversion boundary

use serde::{Deserialize, Serialize};

use crate::state::sources::RandomSource;

/// Color in hue/saturation/brightness space, every component in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

/// Linear RGB triple with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Wrap any hue value onto the color wheel, `[0, 1)`
pub fn normalize_hue(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

impl Hsb {
    pub const BLACK: Hsb = Hsb {
        hue: 0.0,
        saturation: 0.0,
        brightness: 0.0,
    };

    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue: normalize_hue(hue),
            saturation: saturation.clamp(0.0, 1.0),
            brightness: brightness.clamp(0.0, 1.0),
        }
    }

    /// Pick a pleasant pastel: any hue, muted saturation, fairly bright
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.uniform(0.0..=1.0),
            rng.uniform(0.3..=0.6),
            rng.uniform(0.7..=0.9),
        )
    }

    /// Same saturation and brightness, hue moved by `delta` turns
    pub fn rotate(&self, delta: f64) -> Self {
        Self {
            hue: normalize_hue(self.hue + delta),
            saturation: self.saturation,
            brightness: self.brightness,
        }
    }

    /// Blend toward `to` along the shorter arc of the hue circle.
    ///
    /// Saturation and brightness are blended linearly. `progress` is clamped to `[0, 1]`.
    pub fn interpolate(&self, to: &Hsb, progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);

        let mut diff = to.hue - self.hue;
        if diff > 0.5 {
            diff -= 1.0;
        } else if diff < -0.5 {
            diff += 1.0;
        }

        Self {
            hue: normalize_hue(self.hue + diff * progress),
            saturation: self.saturation + (to.saturation - self.saturation) * progress,
            brightness: self.brightness + (to.brightness - self.brightness) * progress,
        }
    }

    /// Convert to RGB (the `fromHSB` side of the renderer boundary)
    pub fn to_rgb(&self) -> Rgb {
        let v = self.brightness;
        if self.saturation <= 0.0 {
            return Rgb { r: v, g: v, b: v };
        }

        let h = normalize_hue(self.hue) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - self.saturation);
        let q = v * (1.0 - self.saturation * f);
        let t = v * (1.0 - self.saturation * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Rgb { r, g, b }
    }

    /// Extract hue/saturation/brightness from RGB (the `toHSB` side)
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = rgb.r.clamp(0.0, 1.0);
        let g = rgb.g.clamp(0.0, 1.0);
        let b = rgb.b.clamp(0.0, 1.0);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max > 0.0 { delta / max } else { 0.0 };
        let hue = if delta <= 0.0 {
            0.0
        } else if max == r {
            ((g - b) / delta) / 6.0
        } else if max == g {
            ((b - r) / delta + 2.0) / 6.0
        } else {
            ((r - g) / delta + 4.0) / 6.0
        };

        Self {
            hue: normalize_hue(hue),
            saturation,
            brightness: max,
        }
    }
}

impl Rgb {
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_hue_eq(actual: f64, expected: f64) {
        let d = (actual - expected).abs();
        assert!(d < 1e-6 || (1.0 - d) < 1e-6, "hue {} != {}", actual, expected);
    }

    #[test]
    fn test_normalize_hue_wraps_both_directions() {
        assert_hue_eq(normalize_hue(1.25), 0.25);
        assert_hue_eq(normalize_hue(-0.25), 0.75);
        assert_eq!(normalize_hue(1.0), 0.0);
        assert!(normalize_hue(-1e-18) < 1.0);
    }

    #[test]
    fn test_rotate_keeps_saturation_and_brightness() {
        let c = Hsb::new(0.9, 0.4, 0.8).rotate(0.2);
        assert_hue_eq(c.hue, 0.1);
        assert_eq!(c.saturation, 0.4);
        assert_eq!(c.brightness, 0.8);
    }

    #[test]
    fn test_interpolate_takes_short_arc() {
        let from = Hsb::new(0.1, 0.5, 0.5);
        let to = Hsb::new(0.9, 0.5, 0.5);
        assert_hue_eq(from.interpolate(&to, 0.5).hue, 0.0);
        assert_hue_eq(to.interpolate(&from, 0.5).hue, 0.0);
    }

    #[test]
    fn test_interpolate_direct_when_short() {
        let from = Hsb::new(0.2, 0.2, 0.4);
        let to = Hsb::new(0.4, 0.6, 0.8);
        let mid = from.interpolate(&to, 0.5);
        assert_hue_eq(mid.hue, 0.3);
        assert!((mid.saturation - 0.4).abs() < 1e-9);
        assert!((mid.brightness - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_clamps_progress() {
        let from = Hsb::new(0.2, 0.2, 0.4);
        let to = Hsb::new(0.4, 0.6, 0.8);
        assert_eq!(from.interpolate(&to, -3.0), from);
        let end = from.interpolate(&to, 7.0);
        assert_hue_eq(end.hue, 0.4);
    }

    #[test]
    fn test_primary_colors_convert() {
        assert_eq!(Hsb::new(0.0, 1.0, 1.0).to_rgb().to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Hsb::new(1.0 / 3.0, 1.0, 1.0).to_rgb().to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Hsb::new(2.0 / 3.0, 1.0, 1.0).to_rgb().to_rgba8(), [0, 0, 255, 255]);
        assert_eq!(Hsb::BLACK.to_rgb().to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_gray_has_zero_saturation() {
        let hsb = Hsb::from_rgb(Rgb { r: 0.5, g: 0.5, b: 0.5 });
        assert_eq!(hsb.saturation, 0.0);
        assert_eq!(hsb.brightness, 0.5);
    }

    proptest! {
        #[test]
        fn rotate_then_unrotate_returns_hue(hue in 0.0_f64..1.0, delta in -3.0_f64..3.0) {
            let back = Hsb::new(hue, 0.5, 0.5).rotate(delta).rotate(-delta);
            let d = (back.hue - hue).abs();
            prop_assert!(d < 1e-9 || (1.0 - d) < 1e-9, "{} vs {}", back.hue, hue);
        }

        #[test]
        fn rgb_round_trip_within_epsilon(
            hue in 0.0_f64..1.0,
            saturation in 0.05_f64..=1.0,
            brightness in 0.05_f64..=1.0,
        ) {
            let original = Hsb::new(hue, saturation, brightness);
            let back = Hsb::from_rgb(original.to_rgb());
            let d = (back.hue - original.hue).abs();
            prop_assert!(d < 1e-6 || (1.0 - d) < 1e-6, "hue {} vs {}", back.hue, original.hue);
            prop_assert!((back.saturation - saturation).abs() < 1e-6);
            prop_assert!((back.brightness - brightness).abs() < 1e-6);
        }

        #[test]
        fn interpolation_never_exceeds_half_turn(
            a in 0.0_f64..1.0,
            b in 0.0_f64..1.0,
            progress in 0.0_f64..=1.0,
        ) {
            let from = Hsb::new(a, 0.5, 0.5);
            let to = Hsb::new(b, 0.5, 0.5);
            let mid = from.interpolate(&to, progress);
            let travelled = (mid.hue - a).abs();
            let arc = travelled.min(1.0 - travelled);
            prop_assert!(arc <= 0.5 * progress + 1e-9);
        }
    }
}
