// fusion_core/src/estimation/fusion.rs

use crate::config::FilterConfig;
use crate::error::FusionError;
use crate::estimation::filters::ekf::ExtendedKalmanFilter;
use crate::messages::{Estimate, MeasurementData, MeasurementMessage};
use crate::models::dynamics::constant_velocity;
use crate::models::measurement::{lidar, radar};
use crate::types::{
    LidarMatrix, LidarNoise, LidarVector, RadarNoise, RadarVector, SensorKind, State, Timestamp,
    MICROS_PER_SECOND,
};
use nalgebra::Matrix4;
use tracing::{debug, info, warn};

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStatus {
    /// No measurement seen yet; the state vector is meaningless.
    Uninitialized,
    /// Initialized; predictions are measured from `previous_timestamp`.
    Running { previous_timestamp: Timestamp },
}

/// What a single accepted measurement did to the filter.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// First measurement: state seeded from the raw reading, no predict/update.
    Initialized,
    /// Predict and update both ran.
    Updated,
    /// Predict ran but the update was dropped; the state holds the prediction.
    UpdateSkipped(FusionError),
}

/// The fusion controller. Feeds lidar and radar readings, one at a time,
/// through the Kalman core.
///
/// It owns the sensor-fixed matrices (`H_laser`, `R_laser`, `R_radar`) and
/// lends them to the core on every update.
#[derive(Debug, Clone)]
pub struct FusionEkf {
    config: FilterConfig,
    status: FilterStatus,
    ekf: ExtendedKalmanFilter,
    h_laser: LidarMatrix,
    r_laser: LidarNoise,
    r_radar: RadarNoise,
}

impl Default for FusionEkf {
    fn default() -> Self {
        Self::new()
    }
}

impl FusionEkf {
    /// Creates a controller with the reference noise tuning.
    pub fn new() -> Self {
        Self::with_config(FilterConfig::default())
    }

    pub fn with_config(config: FilterConfig) -> Self {
        Self {
            status: FilterStatus::Uninitialized,
            ekf: ExtendedKalmanFilter::new(State::zeros(), config.initial_p()),
            h_laser: lidar::measurement_matrix(),
            r_laser: config.lidar_r(),
            r_radar: config.radar_r(),
            config,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn status(&self) -> FilterStatus {
        self.status
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.status, FilterStatus::Running { .. })
    }

    /// Read-only view of the Kalman core.
    pub fn filter(&self) -> &ExtendedKalmanFilter {
        &self.ekf
    }

    /// Current estimate, or `None` before the first measurement.
    pub fn estimate(&self) -> Option<Estimate> {
        match self.status {
            FilterStatus::Uninitialized => None,
            FilterStatus::Running { previous_timestamp } => Some(Estimate {
                timestamp: previous_timestamp,
                state: *self.ekf.state(),
                variances: self.ekf.covariance().diagonal(),
            }),
        }
    }

    /// Drops the track and returns to the freshly constructed state.
    pub fn reset(&mut self) {
        self.ekf = ExtendedKalmanFilter::new(State::zeros(), self.config.initial_p());
        self.status = FilterStatus::Uninitialized;
    }

    /// Validates an untyped reading and processes it.
    pub fn process_raw(
        &mut self,
        sensor: SensorKind,
        values: &[f64],
        timestamp: Timestamp,
    ) -> Result<CycleOutcome, FusionError> {
        let message = MeasurementMessage::from_raw(sensor, values, timestamp)?;
        self.process_measurement(&message)
    }

    /// Runs one full cycle for `message`.
    ///
    /// Input problems (non-finite values, a timestamp going backwards) are
    /// returned as `Err` and leave the filter untouched. Numerical problems
    /// during the update come back as [`CycleOutcome::UpdateSkipped`]: the
    /// prediction is kept and the controller stays usable.
    pub fn process_measurement(
        &mut self,
        message: &MeasurementMessage,
    ) -> Result<CycleOutcome, FusionError> {
        let sensor = message.sensor();
        if message.data.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(FusionError::NonFiniteMeasurement { sensor });
        }

        let previous_timestamp = match self.status {
            FilterStatus::Uninitialized => {
                self.initialize(message);
                return Ok(CycleOutcome::Initialized);
            }
            FilterStatus::Running { previous_timestamp } => previous_timestamp,
        };

        if message.timestamp < previous_timestamp {
            return Err(FusionError::OutOfOrderMeasurement {
                previous: previous_timestamp,
                current: message.timestamp,
            });
        }

        let elapsed = message
            .timestamp
            .checked_sub(previous_timestamp)
            .ok_or(FusionError::TimestampSpanOverflow {
                previous: previous_timestamp,
                current: message.timestamp,
            })?;

        // --- Prediction ---
        let dt = elapsed as f64 / MICROS_PER_SECOND;
        self.status = FilterStatus::Running {
            previous_timestamp: message.timestamp,
        };
        debug!(%sensor, dt, "predicting");
        self.predict(dt);

        // --- Update ---
        let result = match &message.data {
            MeasurementData::Radar(z) => self.update_radar(z),
            MeasurementData::Lidar(z) => self.update_lidar(z),
        };

        match result {
            Ok(()) => Ok(CycleOutcome::Updated),
            Err(err) if err.is_numerical() => {
                warn!(
                    %sensor,
                    timestamp = message.timestamp,
                    error = %err,
                    "update skipped, keeping predicted state"
                );
                Ok(CycleOutcome::UpdateSkipped(err))
            }
            Err(err) => Err(err),
        }
    }

    /// Seeds the state from the first reading. P keeps its constructed value.
    fn initialize(&mut self, message: &MeasurementMessage) {
        let [v0x, v0y] = self.config.initial_velocity;
        let (px, py) = match &message.data {
            MeasurementData::Lidar(z) => (z[0], z[1]),
            MeasurementData::Radar(z) => radar::polar_to_cartesian(z[0], z[1]),
        };

        self.ekf.initialize_state(State::new(px, py, v0x, v0y));
        self.ekf.set_transition(Matrix4::identity());
        self.status = FilterStatus::Running {
            previous_timestamp: message.timestamp,
        };
        info!(
            sensor = %message.sensor(),
            timestamp = message.timestamp,
            px,
            py,
            "filter initialized"
        );
    }

    fn predict(&mut self, dt: f64) {
        constant_velocity::write_transition_terms(self.ekf.transition_mut(), dt);
        self.ekf.set_process_noise(constant_velocity::process_noise(
            dt,
            self.config.noise_ax,
            self.config.noise_ay,
        ));
        self.ekf.predict();
    }

    fn update_radar(&mut self, z: &RadarVector) -> Result<(), FusionError> {
        let h_jac = radar::calculate_jacobian(self.ekf.state())?;
        let report = self.ekf.update_ekf(z, &h_jac, &self.r_radar)?;
        debug!(
            innovation = ?report.innovation.as_slice(),
            s_diag = ?report.innovation_covariance.diagonal().as_slice(),
            "radar update"
        );
        Ok(())
    }

    fn update_lidar(&mut self, z: &LidarVector) -> Result<(), FusionError> {
        let report = self.ekf.update(z, &self.h_laser, &self.r_laser)?;
        debug!(
            innovation = ?report.innovation.as_slice(),
            s_diag = ?report.innovation_covariance.diagonal().as_slice(),
            "lidar update"
        );
        Ok(())
    }
}
