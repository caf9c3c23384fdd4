//! Eight-color face palette derived from one base color and the time of day

use serde::{Deserialize, Serialize};

use super::Hsb;
use crate::clock::TimeComponents;

/// Offset between a color and its "prime" partner, one sixth of the wheel
pub const PRIME_OFFSET: f64 = 1.0 / 6.0;

/// Colors used to paint one frame of the clock face.
///
/// Each color is derived from the one before it by rotating the hue, so the
/// whole set drifts around the wheel as time passes while keeping the base
/// saturation and brightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub s_color: Hsb,
    pub s_prime_color: Hsb,
    pub m_color: Hsb,
    pub m_prime_color: Hsb,
    pub h_color: Hsb,
    pub h_prime_color: Hsb,
    pub hm_color: Hsb,
    pub hm_prime_color: Hsb,
}

impl ColorPalette {
    pub fn derive(base: &Hsb, time: &TimeComponents) -> Self {
        let s_color = base.rotate(time.seconds / 60.0);
        let s_prime_color = s_color.rotate(-PRIME_OFFSET);

        let m_color = s_color.rotate(time.minutes / 60.0);
        let m_prime_color = s_prime_color.rotate(time.minutes / 60.0);

        let h_color = s_color.rotate(time.hours / 12.0);
        let h_prime_color = s_prime_color.rotate(time.hours / 12.0);

        Self {
            s_color,
            s_prime_color,
            m_color,
            m_prime_color,
            h_color,
            h_prime_color,
            // Hour/minute overlaps reuse the minute colors rather than a blend
            hm_color: m_color,
            hm_prime_color: m_prime_color,
        }
    }

    /// Hairline border color drawn around the triple overlap
    pub fn triple_border(&self) -> Hsb {
        self.hm_prime_color.rotate(PRIME_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn time(seconds: f64, minutes: f64, hours: f64) -> TimeComponents {
        TimeComponents {
            seconds,
            minutes,
            hours,
        }
    }

    fn assert_hue(actual: f64, expected: f64) {
        let d = (actual - expected).abs();
        assert!(d < 1e-3 || (1.0 - d) < 1e-3, "hue {} != {}", actual, expected);
    }

    #[test]
    fn test_seconds_color_wraps_at_boundary() {
        let palette = ColorPalette::derive(&Hsb::new(0.5, 1.0, 1.0), &time(30.0, 0.0, 0.0));
        assert_hue(palette.s_color.hue, 0.0);
        assert_hue(palette.s_prime_color.hue, 0.8333);
        assert_eq!(palette.s_color.saturation, 1.0);
        assert_eq!(palette.s_color.brightness, 1.0);
    }

    #[test]
    fn test_seconds_color_without_wrap() {
        let palette = ColorPalette::derive(&Hsb::new(0.3, 0.8, 0.8), &time(15.0, 0.0, 0.0));
        assert_hue(palette.s_color.hue, 0.55);
    }

    #[test]
    fn test_prime_offset() {
        let palette = ColorPalette::derive(&Hsb::new(0.5, 0.8, 0.8), &time(0.0, 0.0, 0.0));
        assert_hue(palette.s_prime_color.hue, 0.3333);

        let palette = ColorPalette::derive(&Hsb::new(0.1, 0.8, 0.8), &time(0.0, 0.0, 0.0));
        assert_hue(palette.s_prime_color.hue, 0.9333);
    }

    #[test]
    fn test_minutes_cascade_from_seconds() {
        let palette = ColorPalette::derive(&Hsb::new(0.4, 0.8, 0.8), &time(0.0, 18.0, 0.0));
        assert_hue(palette.m_color.hue, 0.7);
        assert_hue(palette.m_prime_color.hue, 0.5333);
    }

    #[test]
    fn test_hours_cascade_from_seconds() {
        let palette = ColorPalette::derive(&Hsb::new(0.4, 0.8, 0.8), &time(0.0, 0.0, 6.0));
        assert_hue(palette.h_color.hue, 0.9);
        assert_hue(palette.h_prime_color.hue, 0.7333);
    }

    #[test]
    fn test_full_time_components() {
        let palette = ColorPalette::derive(&Hsb::new(0.0, 0.8, 0.8), &time(30.0, 45.0, 5.0));
        assert_hue(palette.s_color.hue, 0.5);
        assert_hue(palette.m_color.hue, 0.25);
        assert_hue(palette.h_color.hue, 0.9167);
    }

    #[test]
    fn test_overlap_colors_reuse_minute_colors() {
        let palette = ColorPalette::derive(&Hsb::new(0.7, 0.5, 0.9), &time(12.5, 33.3, 7.7));
        assert_eq!(palette.hm_color, palette.m_color);
        assert_eq!(palette.hm_prime_color, palette.m_prime_color);
    }

    #[test]
    fn test_saturation_and_brightness_carried_through() {
        let palette = ColorPalette::derive(&Hsb::new(0.25, 0.6, 0.7), &time(41.0, 12.0, 3.0));
        for color in [
            palette.s_color,
            palette.s_prime_color,
            palette.m_color,
            palette.m_prime_color,
            palette.h_color,
            palette.h_prime_color,
        ] {
            assert_eq!(color.saturation, 0.6);
            assert_eq!(color.brightness, 0.7);
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let base = Hsb::new(0.61, 0.42, 0.83);
        let t = time(59.999, 59.99, 11.99);
        assert_eq!(ColorPalette::derive(&base, &t), ColorPalette::derive(&base, &t));
    }

    #[test]
    fn test_all_hues_in_range_near_midnight() {
        let palette = ColorPalette::derive(&Hsb::new(0.999, 0.5, 0.5), &time(59.999, 59.999, 11.999));
        for color in [palette.s_color, palette.m_prime_color, palette.h_color, palette.triple_border()] {
            assert!((0.0..1.0).contains(&color.hue), "hue out of range: {}", color.hue);
        }
    }
}
