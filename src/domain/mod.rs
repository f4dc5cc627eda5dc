// Domain layer - Sensor telemetry models
pub mod analysis;
pub mod chart;
pub mod date_range;
pub mod readings;
pub mod sample;
