// fusion_replay/src/replay/scoring.rs

use super::{GroundTruth, ReplayError};
use fusion_core::types::State;
use nalgebra::Vector4;

/// Per-component root-mean-square error `[px, py, vx, vy]` between estimates
/// and ground truth paired by index.
pub fn calculate_rmse(
    estimates: &[State],
    truths: &[GroundTruth],
) -> Result<Vector4<f64>, ReplayError> {
    if estimates.is_empty() || estimates.len() != truths.len() {
        return Err(ReplayError::ScoreMismatch {
            estimates: estimates.len(),
            truths: truths.len(),
        });
    }

    let mut acc = RmseAccumulator::default();
    for (estimate, truth) in estimates.iter().zip(truths) {
        acc.push(estimate, truth);
    }
    acc.rmse().ok_or(ReplayError::ScoreMismatch {
        estimates: estimates.len(),
        truths: truths.len(),
    })
}

/// Running RMSE for streams where not every estimate has a ground truth.
#[derive(Debug, Clone)]
pub struct RmseAccumulator {
    squared_sum: Vector4<f64>,
    count: usize,
}

impl Default for RmseAccumulator {
    fn default() -> Self {
        Self {
            squared_sum: Vector4::zeros(),
            count: 0,
        }
    }
}

impl RmseAccumulator {
    pub fn push(&mut self, estimate: &State, truth: &GroundTruth) {
        let residual = estimate - truth;
        self.squared_sum += residual.component_mul(&residual);
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` until at least one pair has been pushed.
    pub fn rmse(&self) -> Option<Vector4<f64>> {
        if self.count == 0 {
            return None;
        }
        Some((self.squared_sum / self.count as f64).map(f64::sqrt))
    }
}
