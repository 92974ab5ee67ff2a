// fusion_replay/src/simulation/sensors.rs

use super::prng::SimulationRng;
use super::{SimulationConfig, SimulationError};
use crate::replay::GroundTruth;
use fusion_core::types::{LidarVector, RadarVector};
use fusion_core::utils::angles::normalize_angle;
use rand_distr::{Distribution, Normal};

/// Produces noisy lidar and radar readings of a ground-truth state.
pub struct SensorSimulator {
    rng: SimulationRng,
    // Store the noise distributions for efficiency
    lidar_noise: Normal<f64>,
    range_noise: Normal<f64>,
    bearing_noise: Normal<f64>,
    rate_noise: Normal<f64>,
}

impl SensorSimulator {
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        Ok(Self {
            rng: SimulationRng::from_seed(config.seed),
            lidar_noise: noise("lidar_noise_stddev", config.lidar_noise_stddev)?,
            range_noise: noise("radar_range_stddev", config.radar_range_stddev)?,
            bearing_noise: noise("radar_bearing_stddev", config.radar_bearing_stddev)?,
            rate_noise: noise("radar_rate_stddev", config.radar_rate_stddev)?,
        })
    }

    pub fn lidar(&mut self, truth: &GroundTruth) -> LidarVector {
        LidarVector::new(
            truth[0] + self.lidar_noise.sample(&mut self.rng.0),
            truth[1] + self.lidar_noise.sample(&mut self.rng.0),
        )
    }

    /// Polar reading of `truth`, or `None` when the object sits on the sensor
    /// and has no defined bearing or range-rate.
    pub fn radar(&mut self, truth: &GroundTruth) -> Option<RadarVector> {
        let (px, py, vx, vy) = (truth[0], truth[1], truth[2], truth[3]);
        let rho = px.hypot(py);
        if rho < 1e-6 {
            return None;
        }
        let phi = py.atan2(px);
        let rho_dot = (px * vx + py * vy) / rho;

        Some(RadarVector::new(
            (rho + self.range_noise.sample(&mut self.rng.0)).max(0.0),
            normalize_angle(phi + self.bearing_noise.sample(&mut self.rng.0)),
            rho_dot + self.rate_noise.sample(&mut self.rng.0),
        ))
    }
}

fn noise(field: &'static str, stddev: f64) -> Result<Normal<f64>, SimulationError> {
    let invalid = SimulationError::InvalidNoise { field, stddev };
    // `Normal::new` accepts negative deviations and mirrors them.
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(invalid);
    }
    Normal::new(0.0, stddev).map_err(|_| invalid)
}
