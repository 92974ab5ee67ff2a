// fusion_core/src/utils/angles.rs

use num_traits::{Float, FloatConst};

/// Wraps an angle into `(-π, π]` by repeatedly adding or removing a full turn.
///
/// Bearing innovations must go through this: subtracting two bearings on
/// either side of ±π otherwise yields a residual close to 2π.
pub fn normalize_angle<T: Float + FloatConst>(angle: T) -> T {
    if !angle.is_finite() {
        return angle;
    }
    let two_pi = T::PI() + T::PI();
    // `%` bounds the loops below to a single iteration for any input
    let mut a = angle % two_pi;
    while a > T::PI() {
        a = a - two_pi;
    }
    while a <= -T::PI() {
        a = a + two_pi;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn wraps_across_the_discontinuity() {
        // measured -π+0.01, predicted π-0.01
        let raw = (-PI + 0.01) - (PI - 0.01);
        assert_abs_diff_eq!(normalize_angle(raw), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn keeps_pi_and_maps_minus_pi() {
        assert_abs_diff_eq!(normalize_angle(PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn handles_several_turns() {
        assert_abs_diff_eq!(normalize_angle(7.0 * PI + 0.5), -PI + 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(normalize_angle(-4.0 * PI - 0.25), -0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(normalize_angle(0.3f32), 0.3f32, epsilon = 1e-6);
    }
}
