// fusion_core/src/types.rs

use nalgebra::{Matrix2, Matrix2x4, Matrix3, Matrix3x4, Matrix4, Vector2, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Core Type Aliases ---
// The tracked object is described by [px, py, vx, vy] in the world frame.
pub const STATE_DIM: usize = 4;

pub type State = Vector4<f64>;
pub type StateCovariance = Matrix4<f64>;

/// Lidar measurement `[px, py]`.
pub type LidarVector = Vector2<f64>;
/// Radar measurement `[rho, phi, rho_dot]`.
pub type RadarVector = Vector3<f64>;

pub type LidarMatrix = Matrix2x4<f64>;
pub type RadarJacobian = Matrix3x4<f64>;
pub type LidarNoise = Matrix2<f64>;
pub type RadarNoise = Matrix3<f64>;

/// Microsecond timestamps, as delivered by the sensors.
pub type Timestamp = i64;

/// Divisor converting a microsecond timestamp delta into seconds.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

// --- Sensor Identifier ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    Lidar,
    Radar,
}

impl SensorKind {
    /// Number of raw values one measurement of this sensor carries.
    pub fn measurement_dim(self) -> usize {
        match self {
            SensorKind::Lidar => 2,
            SensorKind::Radar => 3,
        }
    }

    /// The single-letter tag used in measurement logs.
    pub fn tag(self) -> &'static str {
        match self {
            SensorKind::Lidar => "L",
            SensorKind::Radar => "R",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Lidar => write!(f, "lidar"),
            SensorKind::Radar => write!(f, "radar"),
        }
    }
}
