//! Binding-affinity prediction.
//!
//! A pure formula set over two energies and two strings. Every caller (HTTP endpoint,
//! docking runs, CLI) goes through [`predict_affinity`] or its strict variant so the
//! numbers cannot drift between call sites.

mod affinity;
pub mod constants;
pub mod domain;
mod fixed;
pub mod impact;
mod seed;

pub use affinity::{predict_affinity, predict_affinity_strict, PredictionError, PredictionMode};
pub use domain::{AffinityRequest, AffinityResult, ModelComparison, ModelTiming, Pose};
pub use impact::{ImpactBadge, ImpactLevel};
pub use seed::{input_seed, seeded_rng};
