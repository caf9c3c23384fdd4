//! Wall-clock time to fractional clock-face positions

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Continuous hand positions: seconds and minutes in `[0, 60)`, hours in `[0, 12)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeComponents {
    pub seconds: f64,
    pub minutes: f64,
    pub hours: f64,
}

impl TimeComponents {
    /// Sample a wall-clock time, carrying sub-second precision forward into
    /// minutes and hours so every hand sweeps smoothly.
    pub fn sample(time: &NaiveTime) -> Self {
        // chrono reports a leap second as a nanosecond field past 1e9
        let fraction = f64::from(time.nanosecond()) / 1_000_000_000.0;

        let mut seconds = f64::from(time.second()) + fraction;
        let mut minute_carry = 0.0;
        if seconds >= 60.0 {
            seconds -= 60.0;
            minute_carry = 1.0;
        }

        let mut minutes = f64::from(time.minute()) + minute_carry + seconds / 60.0;
        let mut hour_carry = 0.0;
        if minutes >= 60.0 {
            minutes -= 60.0;
            hour_carry = 1.0;
        }

        let hours = (f64::from(time.hour() % 12) + hour_carry + minutes / 60.0).rem_euclid(12.0);

        Self {
            seconds: seconds.clamp(0.0, next_below(60.0)),
            minutes: minutes.clamp(0.0, next_below(60.0)),
            hours: if hours >= 12.0 { 0.0 } else { hours },
        }
    }

    /// Whole `HH:MM:SS` for display, hours on the 12-hour face
    pub fn whole(&self) -> (u32, u32, u32) {
        (self.hours as u32, self.minutes as u32, self.seconds as u32)
    }
}

fn next_below(limit: f64) -> f64 {
    limit - limit * f64::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(h: u32, m: u32, s: u32, nanos: u32) -> NaiveTime {
        NaiveTime::from_hms_nano_opt(h, m, s, nanos).unwrap()
    }

    #[test]
    fn test_whole_time_has_fractional_carry() {
        let t = TimeComponents::sample(&at(3, 15, 30, 0));
        assert_eq!(t.seconds, 30.0);
        assert!((t.minutes - 15.5).abs() < 1e-12);
        assert!((t.hours - (3.0 + 15.5 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_sub_second_fraction_is_kept() {
        let t = TimeComponents::sample(&at(0, 0, 12, 250_000_000));
        assert!((t.seconds - 12.25).abs() < 1e-12);
    }

    #[test]
    fn test_afternoon_wraps_to_twelve_hour_face() {
        let t = TimeComponents::sample(&at(15, 0, 0, 0));
        assert!((t.hours - 3.0).abs() < 1e-12);
        let noon = TimeComponents::sample(&at(12, 0, 0, 0));
        assert_eq!(noon.hours, 0.0);
    }

    #[test]
    fn test_leap_second_carries_forward() {
        // 23:59:60.5 in chrono's leap-second encoding
        let t = TimeComponents::sample(&at(23, 59, 59, 1_500_000_000));
        assert!((t.seconds - 0.5).abs() < 1e-9, "seconds {}", t.seconds);
        assert!(t.minutes < 1.0, "minutes {}", t.minutes);
        assert!(t.hours < 1.0, "hours {}", t.hours);
    }

    #[test]
    fn test_whole_components() {
        let t = TimeComponents::sample(&at(22, 7, 9, 999_000_000));
        assert_eq!(t.whole(), (10, 7, 9));
    }

    proptest! {
        #[test]
        fn components_stay_in_period(
            h in 0u32..24,
            m in 0u32..60,
            s in 0u32..60,
            nanos in 0u32..2_000_000_000,
        ) {
            // Leap-second encoding is only valid at second 59
            let s = if nanos >= 1_000_000_000 { 59 } else { s };
            let t = TimeComponents::sample(&at(h, m, s, nanos));
            prop_assert!((0.0..60.0).contains(&t.seconds), "seconds {}", t.seconds);
            prop_assert!((0.0..60.0).contains(&t.minutes), "minutes {}", t.minutes);
            prop_assert!((0.0..12.0).contains(&t.hours), "hours {}", t.hours);
        }
    }
}
