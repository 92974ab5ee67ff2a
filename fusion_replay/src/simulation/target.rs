// fusion_replay/src/simulation/target.rs

use crate::replay::GroundTruth;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// The path the simulated object follows. Selected in TOML with `kind = "..."`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")]
pub enum TrajectoryConfig {
    /// Straight line at constant speed.
    ConstantVelocity { start: [f64; 2], velocity: [f64; 2] },
    /// Circle around `center`, counter-clockwise for positive `angular_rate` (rad/s).
    CoordinatedTurn {
        center: [f64; 2],
        radius: f64,
        angular_rate: f64,
    },
    /// Figure-eight `x = a·sin(ωt)`, `y = a/2·sin(2ωt)` shifted to `center`.
    Lemniscate {
        center: [f64; 2],
        scale: f64,
        period_seconds: f64,
    },
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        TrajectoryConfig::Lemniscate {
            center: [15.0, 5.0],
            scale: 10.0,
            period_seconds: 25.0,
        }
    }
}

impl TrajectoryConfig {
    /// True `[px, py, vx, vy]` at `t` seconds into the scenario.
    pub fn sample(&self, t: f64) -> GroundTruth {
        match *self {
            TrajectoryConfig::ConstantVelocity { start, velocity } => GroundTruth::new(
                start[0] + velocity[0] * t,
                start[1] + velocity[1] * t,
                velocity[0],
                velocity[1],
            ),
            TrajectoryConfig::CoordinatedTurn {
                center,
                radius,
                angular_rate,
            } => {
                let theta = angular_rate * t;
                let (sin, cos) = theta.sin_cos();
                GroundTruth::new(
                    center[0] + radius * cos,
                    center[1] + radius * sin,
                    -radius * angular_rate * sin,
                    radius * angular_rate * cos,
                )
            }
            TrajectoryConfig::Lemniscate {
                center,
                scale,
                period_seconds,
            } => {
                let w = TAU / period_seconds;
                let phase = w * t;
                GroundTruth::new(
                    center[0] + scale * phase.sin(),
                    center[1] + 0.5 * scale * (2.0 * phase).sin(),
                    scale * w * phase.cos(),
                    scale * w * (2.0 * phase).cos(),
                )
            }
        }
    }
}
