// fusion_core/src/estimation/mod.rs

pub mod filters;
pub mod fusion;
