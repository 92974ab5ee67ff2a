// fusion_core/src/models/measurement/radar.rs

//! Radar measurement model `z = h(x) = [rho, phi, rho_dot]` and its
//! linearization.
//!
//! ```text
//! rho     = sqrt(px² + py²)
//! phi     = atan2(py, px)
//! rho_dot = (px·vx + py·vy) / rho
//! ```
//!
//! Both `h(x)` and its Jacobian divide by the range, so they refuse to be
//! evaluated when the position sits on the origin.

use crate::error::FusionError;
use crate::types::{RadarJacobian, RadarNoise, RadarVector, State};
use nalgebra::Vector3;

/// Below this squared range (1 cm of range) the model is treated as undefined.
pub const MIN_RANGE_SQUARED: f64 = 1e-4;

/// Squared range of the state position, or `DivisionByZero` when it is too
/// close to the origin (or not finite) to divide by.
fn checked_range_squared(x: &State) -> Result<f64, FusionError> {
    let c1 = x[0] * x[0] + x[1] * x[1];
    if !c1.is_finite() || c1.abs() < MIN_RANGE_SQUARED {
        return Err(FusionError::DivisionByZero);
    }
    Ok(c1)
}

/// Evaluates the nonlinear radar function on the current state.
pub fn predict_measurement(x: &State) -> Result<RadarVector, FusionError> {
    let (px, py, vx, vy) = (x[0], x[1], x[2], x[3]);
    let rho = checked_range_squared(x)?.sqrt();
    let phi = py.atan2(px);
    let rho_dot = (px * vx + py * vy) / rho;
    Ok(RadarVector::new(rho, phi, rho_dot))
}

/// Jacobian `H = ∂h/∂x` of the radar function, evaluated at `x`.
pub fn calculate_jacobian(x: &State) -> Result<RadarJacobian, FusionError> {
    let (px, py, vx, vy) = (x[0], x[1], x[2], x[3]);

    let c1 = checked_range_squared(x)?;
    let c2 = c1.sqrt();
    let c3 = c1 * c2;

    #[rustfmt::skip]
    let h_jac = RadarJacobian::new(
        px / c2,                           py / c2,                           0.0,     0.0,
        -py / c1,                          px / c1,                           0.0,     0.0,
        py * (vx * py - vy * px) / c3,     px * (vy * px - vx * py) / c3,     px / c2, py / c2,
    );
    Ok(h_jac)
}

/// Converts a polar position into Cartesian `(px, py)`.
pub fn polar_to_cartesian(rho: f64, phi: f64) -> (f64, f64) {
    (rho * phi.cos(), rho * phi.sin())
}

/// Builds the diagonal radar noise covariance R from
/// `[var_rho, var_phi, var_rho_dot]`.
pub fn noise_covariance(variances: [f64; 3]) -> RadarNoise {
    RadarNoise::from_diagonal(&Vector3::from(variances))
}
