// fusion_core/src/prelude.rs

// --- Core Abstractions ---
pub use crate::estimation::filters::ekf::{ExtendedKalmanFilter, UpdateReport};
pub use crate::estimation::fusion::{CycleOutcome, FilterStatus, FusionEkf};

// --- Core Data Structures ---
pub use crate::config::FilterConfig;
pub use crate::error::FusionError;
pub use crate::messages::{Estimate, MeasurementData, MeasurementMessage};
pub use crate::types::{SensorKind, State, StateCovariance, Timestamp};
