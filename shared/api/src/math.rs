//! Angle helpers. All angles are radians.

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Angles further than this from zero are reduced with a single remainder
/// before the corrective loop runs.
const LOOP_LIMIT: f64 = 4.0 * TAU;

/// Returns the angle equivalent to `rads` in the half-open range `(-π, π]`.
///
/// Angles within a few turns of the range are corrected by adding or
/// subtracting whole turns, which is exact for the small per-tick deltas the
/// simulator produces. Anything larger is first reduced modulo a full turn.
/// NaN is returned unchanged.
pub fn normalize_angle(rads: f64) -> f64 {
    let mut out = rads;
    if out.abs() > LOOP_LIMIT {
        out = out.rem_euclid(TAU);
    }
    while out > PI {
        out -= TAU;
    }
    while out <= -PI {
        out += TAU;
    }
    out
}

/// Returns the smallest rotation between angles `a` and `b`.
///
/// A positive result is a counter-clockwise rotation and negative is clockwise.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}
