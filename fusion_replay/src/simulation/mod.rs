// fusion_replay/src/simulation/mod.rs

//! Deterministic synthetic scenarios: a ground-truth trajectory sampled by a
//! lidar and a radar on fixed schedules, with Gaussian noise on every reading.

pub mod prng;
pub mod sensors;
pub mod target;

use crate::replay::LogRecord;
use fusion_core::messages::{MeasurementData, MeasurementMessage};
use fusion_core::types::{Timestamp, MICROS_PER_SECOND};
use sensors::SensorSimulator;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use target::TrajectoryConfig;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("{field} must be positive, got {value}")]
    NonPositivePeriod { field: &'static str, value: i64 },

    #[error("duration_seconds must be finite and non-negative, got {0}")]
    InvalidDuration(f64),

    #[error("{field} must be a finite, non-negative standard deviation, got {stddev}")]
    InvalidNoise { field: &'static str, stddev: f64 },
}

/// The `[simulation]` section of a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SimulationConfig {
    /// Seed for the pseudo-random number generator.
    pub seed: u64,
    pub duration_seconds: f64,
    pub lidar_period_us: i64,
    pub radar_period_us: i64,
    /// Radar schedule shift relative to the lidar, so the sensors interleave.
    pub radar_offset_us: i64,
    pub lidar_noise_stddev: f64,
    pub radar_range_stddev: f64,
    pub radar_bearing_stddev: f64,
    pub radar_rate_stddev: f64,
    pub trajectory: TrajectoryConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            duration_seconds: 25.0,
            lidar_period_us: 100_000,
            radar_period_us: 100_000,
            radar_offset_us: 50_000,
            lidar_noise_stddev: 0.15,
            radar_range_stddev: 0.3,
            radar_bearing_stddev: 0.03,
            radar_rate_stddev: 0.3,
            trajectory: TrajectoryConfig::default(),
        }
    }
}

/// Builds the full measurement log for a scenario, ordered by timestamp.
/// Every record carries the ground truth it was sampled from.
pub fn generate(config: &SimulationConfig) -> Result<Vec<LogRecord>, SimulationError> {
    if config.lidar_period_us <= 0 {
        return Err(SimulationError::NonPositivePeriod {
            field: "lidar_period_us",
            value: config.lidar_period_us,
        });
    }
    if config.radar_period_us <= 0 {
        return Err(SimulationError::NonPositivePeriod {
            field: "radar_period_us",
            value: config.radar_period_us,
        });
    }
    if !config.duration_seconds.is_finite() || config.duration_seconds < 0.0 {
        return Err(SimulationError::InvalidDuration(config.duration_seconds));
    }

    let mut sensors = SensorSimulator::new(config)?;
    let end = (config.duration_seconds * MICROS_PER_SECOND).round() as Timestamp;

    let lidar_times = schedule(0, config.lidar_period_us, end);
    let radar_times = schedule(config.radar_offset_us.max(0), config.radar_period_us, end);

    // Merge the two schedules. On a tie the lidar goes first.
    let mut records = Vec::with_capacity(lidar_times.len() + radar_times.len());
    let (mut li, mut ri) = (0, 0);
    while li < lidar_times.len() || ri < radar_times.len() {
        let take_lidar = match (lidar_times.get(li), radar_times.get(ri)) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            _ => false,
        };

        let timestamp = if take_lidar {
            li += 1;
            lidar_times[li - 1]
        } else {
            ri += 1;
            radar_times[ri - 1]
        };
        let truth = config.trajectory.sample(timestamp as f64 / MICROS_PER_SECOND);

        let data = if take_lidar {
            MeasurementData::Lidar(sensors.lidar(&truth))
        } else {
            match sensors.radar(&truth) {
                Some(z) => MeasurementData::Radar(z),
                None => {
                    debug!(timestamp, "target on the sensor, radar sample dropped");
                    continue;
                }
            }
        };

        records.push(LogRecord {
            message: MeasurementMessage { timestamp, data },
            ground_truth: Some(truth),
        });
    }

    info!(
        records = records.len(),
        seed = config.seed,
        "generated synthetic scenario"
    );
    Ok(records)
}

fn schedule(start: Timestamp, period: Timestamp, end: Timestamp) -> Vec<Timestamp> {
    (0..)
        .map(|k| start + k * period)
        .take_while(|t| *t <= end)
        .collect()
}
