//! Time-driven difficulty curves
//!
//! Pure functions of elapsed session seconds. Both parameters ramp linearly
//! toward a clamp and never cross it, so the same session history always
//! produces the same parameters.

use crate::consts::*;

/// Spawn/fall parameters for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    /// Object fall speed in pixels/sec
    pub fall_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

pub fn params(elapsed: f32) -> DifficultyParams {
    DifficultyParams {
        fall_speed: fall_speed(elapsed),
        spawn_interval: spawn_interval(elapsed),
    }
}

/// Fall speed ramps from `FALL_SPEED_BASE` toward `FALL_SPEED_MAX`
pub fn fall_speed(elapsed: f32) -> f32 {
    (FALL_SPEED_BASE + FALL_SPEED_RAMP * elapsed.max(0.0)).min(FALL_SPEED_MAX)
}

/// Spawn interval shrinks from `SPAWN_INTERVAL_BASE` toward the floor
pub fn spawn_interval(elapsed: f32) -> f32 {
    (SPAWN_INTERVAL_BASE - SPAWN_INTERVAL_RAMP * elapsed.max(0.0)).max(SPAWN_INTERVAL_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn session_start_uses_base_parameters() {
        let p = params(0.0);
        assert_eq!(p.fall_speed, FALL_SPEED_BASE);
        assert_eq!(p.spawn_interval, SPAWN_INTERVAL_BASE);
    }

    #[test]
    fn extremes_saturate_at_the_clamps() {
        let p = params(1.0e6);
        assert_eq!(p.fall_speed, FALL_SPEED_MAX);
        assert_eq!(p.spawn_interval, SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn negative_time_is_treated_as_zero() {
        assert_eq!(params(-5.0), params(0.0));
    }

    proptest! {
        #[test]
        fn fall_speed_is_monotonic_and_bounded(a in 0.0f32..1.0e5, b in 0.0f32..1.0e5) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(fall_speed(lo) <= fall_speed(hi));
            prop_assert!(fall_speed(hi) >= FALL_SPEED_BASE);
            prop_assert!(fall_speed(hi) <= FALL_SPEED_MAX);
        }

        #[test]
        fn spawn_interval_is_monotonic_and_bounded(a in 0.0f32..1.0e5, b in 0.0f32..1.0e5) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(spawn_interval(lo) >= spawn_interval(hi));
            prop_assert!(spawn_interval(hi) >= SPAWN_INTERVAL_MIN);
            prop_assert!(spawn_interval(hi) <= SPAWN_INTERVAL_BASE);
        }
    }
}
