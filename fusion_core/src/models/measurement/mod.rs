// fusion_core/src/models/measurement/mod.rs

// Each sensor exposes its model as plain functions; the set of sensors is
// closed, so the controller matches on `SensorKind` instead of going through
// a trait object.
pub mod lidar;
pub mod radar;
