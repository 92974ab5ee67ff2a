// fusion_core/src/estimation/filters/ekf.rs

use crate::error::FusionError;
use crate::models::measurement::radar;
use crate::types::{RadarJacobian, RadarNoise, RadarVector, State, StateCovariance, STATE_DIM};
use crate::utils::angles::normalize_angle;
use nalgebra::{Matrix4, SMatrix, SVector};
use tracing::trace;

/// Index of the bearing inside a radar measurement.
const BEARING_IDX: usize = 1;

/// Diagnostics of a successful measurement update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport<const M: usize> {
    /// Innovation `y = z − ẑ` (bearing already wrapped for radar).
    pub innovation: SVector<f64, M>,
    /// Innovation covariance `S = H·P·Hᵀ + R`.
    pub innovation_covariance: SMatrix<f64, M, M>,
}

/// The Kalman core: state `x`, covariance `P`, and the transition `F` and
/// process noise `Q` staged for the next prediction.
///
/// The two measurement updates are explicit methods. H and R are borrowed per
/// call; the caller owns the sensor matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedKalmanFilter {
    x: State,
    p: StateCovariance,
    f: Matrix4<f64>,
    q: StateCovariance,
}

impl ExtendedKalmanFilter {
    /// Creates a filter with `F = I` and `Q = 0` staged.
    pub fn new(x: State, p: StateCovariance) -> Self {
        Self {
            x,
            p,
            f: Matrix4::identity(),
            q: StateCovariance::zeros(),
        }
    }

    pub fn state(&self) -> &State {
        &self.x
    }

    pub fn covariance(&self) -> &StateCovariance {
        &self.p
    }

    pub fn transition(&self) -> &Matrix4<f64> {
        &self.f
    }

    pub fn process_noise(&self) -> &StateCovariance {
        &self.q
    }

    /// Overwrites the state vector. Only meant for (re)initialization.
    pub fn initialize_state(&mut self, x: State) {
        self.x = x;
    }

    pub fn set_transition(&mut self, f: Matrix4<f64>) {
        self.f = f;
    }

    /// Mutable access so the caller can rewrite individual terms of F.
    pub fn transition_mut(&mut self) -> &mut Matrix4<f64> {
        &mut self.f
    }

    pub fn set_process_noise(&mut self, q: StateCovariance) {
        self.q = q;
    }

    /// Time update with the staged matrices:
    /// `x ← F·x`, `P ← F·P·Fᵀ + Q`.
    pub fn predict(&mut self) {
        self.x = self.f * self.x;
        self.p = symmetrize(self.f * self.p * self.f.transpose() + self.q);
    }

    /// Linear measurement update (lidar): the innovation is `z − H·x`.
    pub fn update<const M: usize>(
        &mut self,
        z: &SVector<f64, M>,
        h: &SMatrix<f64, M, STATE_DIM>,
        r: &SMatrix<f64, M, M>,
    ) -> Result<UpdateReport<M>, FusionError> {
        let y = z - h * self.x;
        self.correct(y, h, r)
    }

    /// Linearized measurement update (radar).
    ///
    /// The innovation is taken against the nonlinear prediction `h(x)`, not
    /// `H·x`, and its bearing is wrapped into `(-π, π]`. `h_jac` is the
    /// Jacobian evaluated at the current state.
    pub fn update_ekf(
        &mut self,
        z: &RadarVector,
        h_jac: &RadarJacobian,
        r: &RadarNoise,
    ) -> Result<UpdateReport<3>, FusionError> {
        let z_pred = radar::predict_measurement(&self.x)?;
        let mut y = z - z_pred;
        y[BEARING_IDX] = normalize_angle(y[BEARING_IDX]);
        self.correct(y, h_jac, r)
    }

    /// Shared gain/correction algebra. Leaves `x` and `P` untouched on error.
    fn correct<const M: usize>(
        &mut self,
        y: SVector<f64, M>,
        h: &SMatrix<f64, M, STATE_DIM>,
        r: &SMatrix<f64, M, M>,
    ) -> Result<UpdateReport<M>, FusionError> {
        let ht = h.transpose();
        let s = h * self.p * ht + r;

        let s_inv = s
            .try_inverse()
            .filter(|inv| inv.iter().all(|v| v.is_finite()))
            .ok_or(FusionError::SingularInnovationCovariance)?;
        let k = self.p * ht * s_inv;

        let x_new = self.x + k * y;
        // Joseph form keeps P positive semi-definite under rounding.
        let i_kh = StateCovariance::identity() - k * h;
        let p_new = i_kh * self.p * i_kh.transpose() + k * r * k.transpose();
        if !x_new.iter().chain(p_new.iter()).all(|v| v.is_finite()) {
            return Err(FusionError::SingularInnovationCovariance);
        }

        trace!(innovation = ?y.as_slice(), "measurement update applied");
        self.x = x_new;
        self.p = symmetrize(p_new);

        Ok(UpdateReport {
            innovation: y,
            innovation_covariance: s,
        })
    }
}

/// `(P + Pᵀ) / 2`, removing the asymmetry rounding leaves behind.
fn symmetrize(p: StateCovariance) -> StateCovariance {
    (p + p.transpose()) * 0.5
}
