//! Fixed coefficients used by the affinity formulas and the impact classifier.
//!
//! These are not configurable. Tests reference them by name so the formulas and
//! the presentation thresholds cannot drift apart.

/// Thermal energy at ~298K in kcal/mol, used as the exponent denominator.
pub const THERMAL_ENERGY_RT: f64 = 0.59;

/// Converts a molar dissociation constant to the nanomolar-equivalent scale.
pub const NANOMOLAR_SCALE: f64 = 1e9;

pub const CONFIDENCE_FLOOR: f64 = 0.5;
pub const CONFIDENCE_SLOPE_DIVISOR: f64 = 10.0;

pub const CONSISTENCY_FLOOR: f64 = 0.75;
pub const CONSISTENCY_SLOPE_DIVISOR: f64 = 20.0;

/// Alternative model score is `affinity * (BASE + U * SPREAD) + OFFSET` with `U` in `[0, 1)`.
pub const ALTERNATIVE_MODEL_BASE_FACTOR: f64 = 1.2;
pub const ALTERNATIVE_MODEL_FACTOR_SPREAD: f64 = 0.3;
pub const ALTERNATIVE_MODEL_OFFSET: f64 = 5.0;

pub const PRIMARY_TIME_BASE_SECONDS: f64 = 0.5;
pub const PRIMARY_TIME_STEP_SECONDS: f64 = 0.05;
pub const PRIMARY_TIME_FLOOR_SECONDS: f64 = 0.3;

pub const ALTERNATIVE_TIME_BASE_SECONDS: f64 = 1.2;
pub const ALTERNATIVE_TIME_STEP_SECONDS: f64 = 0.1;
/// The alternative model always reports at least this much more time than the primary model.
pub const ALTERNATIVE_TIME_MIN_GAP_SECONDS: f64 = 0.5;

/// Timing formulas bucket string lengths modulo this value.
pub const TIMING_LENGTH_MODULUS: usize = 10;

/// Pose coordinates are drawn from `[0, POSE_COORDINATE_SPAN)`.
pub const POSE_COORDINATE_SPAN: f64 = 10.0;

/// Ground-state energy sits up to this far below the refined energy.
pub const GROUND_STATE_SPREAD: f64 = 0.5;

/// Affinities strictly below this are classified as high impact.
pub const HIGH_IMPACT_CEILING_NM: f64 = 10.0;
/// Affinities at or below this (and not high) are classified as moderate impact.
pub const MODERATE_IMPACT_CEILING_NM: f64 = 100.0;
