// fusion_core/src/models/dynamics/mod.rs

pub mod constant_velocity;
