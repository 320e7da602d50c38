pub mod catalog;
pub mod config;
pub mod error;
pub mod simulator;
pub mod telemetry;
