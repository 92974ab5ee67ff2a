// fusion_core/src/error.rs

use crate::types::{SensorKind, Timestamp};
use thiserror::Error;

/// Everything that can go wrong while processing one measurement.
///
/// The numerical variants are contained to the cycle that produced them: the
/// filter keeps its predicted state and carries on with the next measurement.
/// The input variants are raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FusionError {
    /// The radar measurement function was evaluated at (or next to) the origin.
    #[error("radar linearization undefined: state position is at the origin")]
    DivisionByZero,

    /// `S = H·P·Hᵀ + R` could not be inverted.
    #[error("innovation covariance is singular")]
    SingularInnovationCovariance,

    #[error("malformed {sensor} measurement: expected {expected} values, found {found}")]
    MalformedMeasurement {
        sensor: SensorKind,
        expected: usize,
        found: usize,
    },

    #[error("{sensor} measurement contains a non-finite value")]
    NonFiniteMeasurement { sensor: SensorKind },

    #[error("measurement at {current}us arrived after {previous}us")]
    OutOfOrderMeasurement {
        previous: Timestamp,
        current: Timestamp,
    },

    /// The gap between two timestamps does not fit in a `Timestamp`.
    #[error("time span from {previous}us to {current}us overflows")]
    TimestampSpanOverflow {
        previous: Timestamp,
        current: Timestamp,
    },
}

impl FusionError {
    /// True for failures that only abort the update stage of a cycle.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            FusionError::DivisionByZero | FusionError::SingularInnovationCovariance
        )
    }
}
