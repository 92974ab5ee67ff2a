// fusion_core/src/messages.rs

use crate::error::FusionError;
use crate::types::{LidarVector, RadarVector, SensorKind, State, Timestamp};
use nalgebra::Vector4;

// =========================================================================
// == Core Message and Data Enums ==
// =========================================================================

/// A self-describing container for one sensor reading.
///
/// The component count is fixed by the variant, so a message that exists is
/// always well-formed. Raw slices go through [`MeasurementMessage::from_raw`].
#[derive(Clone, Debug, PartialEq)]
pub enum MeasurementData {
    /// Cartesian position `[px, py]`.
    Lidar(LidarVector),
    /// Polar reading `[rho, phi, rho_dot]`.
    Radar(RadarVector),
}

impl MeasurementData {
    pub fn sensor(&self) -> SensorKind {
        match self {
            MeasurementData::Lidar(_) => SensorKind::Lidar,
            MeasurementData::Radar(_) => SensorKind::Radar,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            MeasurementData::Lidar(z) => z.as_slice(),
            MeasurementData::Radar(z) => z.as_slice(),
        }
    }
}

/// The message that carries a sensor reading into the fusion controller.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementMessage {
    /// Microseconds, non-decreasing across a stream.
    pub timestamp: Timestamp,
    pub data: MeasurementData,
}

impl MeasurementMessage {
    pub fn lidar(timestamp: Timestamp, px: f64, py: f64) -> Self {
        Self {
            timestamp,
            data: MeasurementData::Lidar(LidarVector::new(px, py)),
        }
    }

    pub fn radar(timestamp: Timestamp, rho: f64, phi: f64, rho_dot: f64) -> Self {
        Self {
            timestamp,
            data: MeasurementData::Radar(RadarVector::new(rho, phi, rho_dot)),
        }
    }

    /// Builds a message from an untyped reading, checking the component count
    /// against the declared sensor and rejecting NaN/Inf values.
    pub fn from_raw(
        sensor: SensorKind,
        values: &[f64],
        timestamp: Timestamp,
    ) -> Result<Self, FusionError> {
        let expected = sensor.measurement_dim();
        if values.len() != expected {
            return Err(FusionError::MalformedMeasurement {
                sensor,
                expected,
                found: values.len(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FusionError::NonFiniteMeasurement { sensor });
        }

        let data = match sensor {
            SensorKind::Lidar => MeasurementData::Lidar(LidarVector::from_column_slice(values)),
            SensorKind::Radar => MeasurementData::Radar(RadarVector::from_column_slice(values)),
        };
        Ok(Self { timestamp, data })
    }

    pub fn sensor(&self) -> SensorKind {
        self.data.sensor()
    }
}

// =========================================================================
// == Public API Messages ==
// =========================================================================

/// The filter output after a cycle: the state estimate plus the diagonal of P.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate {
    pub timestamp: Timestamp,
    pub state: State,
    /// `[var_px, var_py, var_vx, var_vy]`.
    pub variances: Vector4<f64>,
}

impl Estimate {
    pub fn px(&self) -> f64 {
        self.state[0]
    }

    pub fn py(&self) -> f64 {
        self.state[1]
    }

    pub fn vx(&self) -> f64 {
        self.state[2]
    }

    pub fn vy(&self) -> f64 {
        self.state[3]
    }
}
