// fusion_core/src/models/dynamics/constant_velocity.rs

//! Constant-velocity kinematics for the `[px, py, vx, vy]` state.
//!
//! ## Transition model
//! F = I₄ + dt * [[0₂ I₂]; [0₂ 0₂]], i.e. px += vx*dt, py += vy*dt.
//!
//! ## Process noise
//! Discretized white-noise acceleration, one intensity per axis:
//! Q_pos = σ²·dt⁴/4, Q_pos_vel = σ²·dt³/2, Q_vel = σ²·dt²

use crate::types::StateCovariance;
use nalgebra::Matrix4;

/// Transition matrix F for an elapsed time of `dt` seconds.
/// With `dt == 0` this is exactly the identity.
pub fn transition_matrix(dt: f64) -> Matrix4<f64> {
    let mut f = Matrix4::<f64>::identity();
    write_transition_terms(&mut f, dt);
    f
}

/// Rewrites only the position/velocity coupling terms of an existing F.
pub fn write_transition_terms(f: &mut Matrix4<f64>, dt: f64) {
    f[(0, 2)] = dt;
    f[(1, 3)] = dt;
}

/// Process noise covariance Q for `dt` seconds with acceleration noise
/// intensities `noise_ax` and `noise_ay` (variances, m²/s⁴).
pub fn process_noise(dt: f64, noise_ax: f64, noise_ay: f64) -> StateCovariance {
    let dt2 = dt * dt;
    let dt3 = dt2 * dt;
    let dt4 = dt3 * dt;

    let mut q = StateCovariance::zeros();
    for (i, noise) in [(0usize, noise_ax), (1usize, noise_ay)] {
        q[(i, i)] = dt4 / 4.0 * noise;
        q[(i, i + 2)] = dt3 / 2.0 * noise;
        q[(i + 2, i)] = dt3 / 2.0 * noise;
        q[(i + 2, i + 2)] = dt2 * noise;
    }
    q
}
