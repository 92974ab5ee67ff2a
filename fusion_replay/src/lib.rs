// fusion_replay/src/lib.rs

//! Harness around `fusion_core`: log replay, accuracy scoring, synthetic
//! scenarios and the layered configuration the `fusion_replay` binary uses.

// This prelude is for convenience for other files WITHIN the fusion_replay crate.
pub mod prelude;

pub mod cli;
pub mod config;
pub mod replay;
pub mod simulation;
