use std::f64::consts::{PI, TAU};

mod cartesian3;
mod cartographic;
mod matrix2;

pub use cartesian3::*;
pub use cartographic::*;
pub use matrix2::*;

pub const EPSILON1: f64 = 0.1;
pub const EPSILON6: f64 = 0.000001;
pub const EPSILON8: f64 = 0.00000001;
pub const EPSILON9: f64 = 0.000000001;
pub const EPSILON14: f64 = 0.00000000000001;

/// Compares two scalars with an absolute tolerance, falling back to a tolerance
/// relative to the magnitude of `left`.
pub fn equals_epsilon(
    left: f64,
    right: f64,
    relative_epsilon: Option<f64>,
    absolute_epsilon: Option<f64>,
) -> bool {
    let relative_epsilon = relative_epsilon.unwrap_or(0.0);
    let absolute_epsilon = absolute_epsilon.unwrap_or(relative_epsilon);
    let diff = (left - right).abs();
    diff <= absolute_epsilon || diff <= relative_epsilon * left.abs()
}

pub fn negative_pi_to_pi(angle: f64) -> f64 {
    if (-PI..=PI).contains(&angle) {
        return angle;
    }
    zero_to_two_pi(angle + PI) - PI
}

pub fn zero_to_two_pi(angle: f64) -> f64 {
    if (0.0..=TAU).contains(&angle) {
        return angle;
    }
    let mode = angle.rem_euclid(TAU);
    if mode.abs() < EPSILON14 && angle.abs() > EPSILON14 {
        return TAU;
    }
    mode
}
