//! Translation of user-facing controls into engine parameters
//!
//! The engine expects already-validated values; interactive inputs are
//! clamped and mapped here before they reach it.

use langevin_core::ForceConfig;

/// Initial position and velocity are clamped to +-this
pub const INITIAL_LIMIT: f64 = 1.0;

/// Time step at speed index 0
pub const BASE_TIME_STEP: f64 = 0.025;

/// Slider range of the speed control
pub const SPEED_INDEX_RANGE: std::ops::RangeInclusive<i32> = -10..=10;

pub fn clamp_position(x: f64) -> f64 {
    x.clamp(-INITIAL_LIMIT, INITIAL_LIMIT)
}

pub fn clamp_velocity(v: f64) -> f64 {
    v.clamp(-INITIAL_LIMIT, INITIAL_LIMIT)
}

/// `dt = 0.025 * 10^(index / 10)`: every 10 slider ticks is a factor of ten
pub fn time_step_from_index(index: i32) -> f64 {
    BASE_TIME_STEP * 10f64.powf(index as f64 / 10.0)
}

/// Closest slider index for a time step
pub fn index_from_time_step(dt: f64) -> i32 {
    let index = (10.0 * (dt / BASE_TIME_STEP).log10()).round() as i32;
    index.clamp(*SPEED_INDEX_RANGE.start(), *SPEED_INDEX_RANGE.end())
}

/// Force configuration after the viewer's toggles or speed slider moved
///
/// The scenario's time step is kept unless the slider itself was moved,
/// in which case `moved_speed` carries the new index.
pub fn forces_from_controls(
    current: ForceConfig,
    friction: bool,
    noise: bool,
    moved_speed: Option<i32>,
) -> ForceConfig {
    ForceConfig {
        friction_enabled: friction,
        noise_enabled: noise,
        dt: moved_speed.map_or(current.dt, time_step_from_index),
        ..current
    }
}
