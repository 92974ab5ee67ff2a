// fusion_replay/src/prelude.rs

// Re-export the entire fusion_core prelude so you can easily access
// pure types like `FusionEkf`, `MeasurementMessage`, `Estimate`, etc.
pub use fusion_core::prelude::*;

// Re-export common harness types.
pub use crate::config::{ConfigError, ReplayConfig};
pub use crate::replay::parser::parse_log;
pub use crate::replay::runner::{run_replay, ReplaySummary};
pub use crate::replay::scoring::{calculate_rmse, RmseAccumulator};
pub use crate::replay::writer::{write_log, EstimateWriter};
pub use crate::replay::{GroundTruth, LogRecord, ReplayError};
pub use crate::simulation::{generate, SimulationConfig, SimulationError, TrajectoryConfig};
