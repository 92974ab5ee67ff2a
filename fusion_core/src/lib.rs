// fusion_core/src/lib.rs

//! Lidar/radar fusion for a single moving object with an Extended Kalman
//! Filter over the `[px, py, vx, vy]` constant-velocity state.
//!
//! - [`models::measurement::radar`] — radar function `h(x)` and its Jacobian
//! - [`estimation::filters::ekf`]   — Kalman core (predict, linear and EKF update)
//! - [`estimation::fusion`]         — per-measurement controller / state machine

pub mod config;
pub mod error;
pub mod estimation;
pub mod messages;
pub mod models;
pub mod prelude;
pub mod types;
pub mod utils;
