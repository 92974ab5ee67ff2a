// fusion_core/src/config.rs

use crate::models::measurement::{lidar, radar};
use crate::types::{LidarNoise, RadarNoise, StateCovariance};
use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

// =========================================================================
// == Filter Configuration ==
// =========================================================================

/// Noise and initialization parameters of the fusion filter.
///
/// `Default` holds the reference tuning every consumer must match for
/// compatible output; other values are only meant for offline tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FilterConfig {
    /// Lidar measurement variances `[px, py]`.
    pub lidar_noise: [f64; 2],
    /// Radar measurement variances `[rho, phi, rho_dot]`.
    pub radar_noise: [f64; 3],
    /// Acceleration noise intensity along x (m²/s⁴).
    pub noise_ax: f64,
    /// Acceleration noise intensity along y (m²/s⁴).
    pub noise_ay: f64,
    /// Diagonal of P at construction `[px, py, vx, vy]`.
    pub initial_covariance: [f64; 4],
    /// Velocity assigned on the first measurement, which carries none.
    pub initial_velocity: [f64; 2],
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            lidar_noise: [0.0225, 0.0225],
            radar_noise: [0.09, 0.0009, 0.09],
            noise_ax: 9.0,
            noise_ay: 9.0,
            initial_covariance: [1.0, 1.0, 1000.0, 1000.0],
            initial_velocity: [0.0, 0.0],
        }
    }
}

impl FilterConfig {
    pub fn lidar_r(&self) -> LidarNoise {
        lidar::noise_covariance(self.lidar_noise)
    }

    pub fn radar_r(&self) -> RadarNoise {
        radar::noise_covariance(self.radar_noise)
    }

    pub fn initial_p(&self) -> StateCovariance {
        StateCovariance::from_diagonal(&Vector4::from(self.initial_covariance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_reference_tuning() {
        let cfg = FilterConfig::default();
        assert_eq!(cfg.lidar_r()[(0, 0)], 0.0225);
        assert_eq!(cfg.lidar_r()[(1, 1)], 0.0225);
        assert_eq!(cfg.radar_r()[(1, 1)], 0.0009);
        assert_eq!(cfg.initial_p()[(2, 2)], 1000.0);
        assert_eq!(cfg.initial_p()[(0, 1)], 0.0);
        assert_eq!((cfg.noise_ax, cfg.noise_ay), (9.0, 9.0));
    }
}
