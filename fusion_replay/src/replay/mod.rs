// fusion_replay/src/replay/mod.rs

//! Everything around the filter that a consumer of `fusion_core` provides:
//! reading measurement logs, running them through the controller, writing
//! estimates and scoring them against ground truth.

pub mod parser;
pub mod runner;
pub mod scoring;
pub mod writer;

use fusion_core::error::FusionError;
use fusion_core::messages::MeasurementMessage;
use fusion_core::types::SensorKind;
use nalgebra::Vector4;
use thiserror::Error;

/// True state of the object at a measurement instant `[px, py, vx, vy]`.
pub type GroundTruth = Vector4<f64>;

/// One line of a measurement log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub message: MeasurementMessage,
    pub ground_truth: Option<GroundTruth>,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: unknown sensor tag '{tag}'")]
    UnknownSensor { line: usize, tag: String },

    #[error("line {line}: {sensor} record needs {expected} or {with_truth} fields, found {found}")]
    FieldCount {
        line: usize,
        sensor: SensorKind,
        expected: usize,
        with_truth: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse '{token}' as a number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: {source}")]
    Measurement {
        line: usize,
        #[source]
        source: FusionError,
    },

    #[error("cannot score: {estimates} estimates against {truths} ground-truth states")]
    ScoreMismatch { estimates: usize, truths: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
