pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod prediction;
pub mod report;
pub mod simulation;
pub mod telemetry;
