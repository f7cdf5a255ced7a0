use rand::Rng;
use serde::{Deserialize, Serialize};

use super::constants::*;
use super::domain::{AffinityRequest, AffinityResult, ModelComparison, ModelTiming, Pose};
use super::fixed::to_fixed;
use super::impact::ImpactLevel;

const COMPARISON_EXPLANATION: &str = "The quantum model captures subtle electron-correlation effects, providing superior affinity estimation compared to the GNN baseline.";

/// Whether degenerate input is passed through or rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMode {
    /// NaN and infinities propagate into the result unchanged.
    #[default]
    Lenient,
    /// Non-finite numbers, empty strings, and non-finite outputs are errors.
    Strict,
}

impl PredictionMode {
    pub fn predict<R: Rng + ?Sized>(
        self,
        request: &AffinityRequest,
        rng: &mut R,
    ) -> Result<AffinityResult, PredictionError> {
        match self {
            PredictionMode::Lenient => Ok(predict_affinity(request, rng)),
            PredictionMode::Strict => predict_affinity_strict(request, rng),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PredictionMode::Lenient => "lenient",
            PredictionMode::Strict => "strict",
        }
    }
}

/// Rejections raised by [`predict_affinity_strict`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("{field} must be a finite number")]
    NonFiniteInput { field: &'static str },
    #[error("{field} must not be empty")]
    EmptyInput { field: &'static str },
    #[error("prediction produced non-finite values for {}", fields.join(", "))]
    NonFiniteOutput { fields: Vec<&'static str> },
}

/// Apply the affinity formulas to `request`, drawing randomness from `rng`.
///
/// Total over its input: NaN or infinite scores flow through to the result. Draw order is
/// fixed (alternative-model factor, pose x, y, z, ground-state offset) so a seeded
/// generator reproduces results exactly.
pub fn predict_affinity<R: Rng + ?Sized>(request: &AffinityRequest, rng: &mut R) -> AffinityResult {
    let refined = request.quantum_refined_energy;
    let classical = request.classical_docking_score;

    let dissociation_constant = (refined / THERMAL_ENERGY_RT).exp();
    let binding_affinity = dissociation_constant * NANOMOLAR_SCALE;

    let difference = (refined - classical).abs();
    let confidence_score = floored(CONFIDENCE_FLOOR, 1.0 - difference / CONFIDENCE_SLOPE_DIVISOR);
    let ranking_consistency =
        floored(CONSISTENCY_FLOOR, 1.0 - difference / CONSISTENCY_SLOPE_DIVISOR);

    let rationale = format!(
        "Quantum-refined energy ({} kcal/mol) indicates improved electronic-structure accuracy over classical scores.",
        to_fixed(refined, 2)
    );

    let factor: f64 = rng.gen();
    let alternative_model_score = binding_affinity
        * (ALTERNATIVE_MODEL_BASE_FACTOR + factor * ALTERNATIVE_MODEL_FACTOR_SPREAD)
        + ALTERNATIVE_MODEL_OFFSET;

    let timing = model_timing(&request.molecule_representation, &request.target_name);

    let pose = Pose {
        x: rng.gen::<f64>() * POSE_COORDINATE_SPAN,
        y: rng.gen::<f64>() * POSE_COORDINATE_SPAN,
        z: rng.gen::<f64>() * POSE_COORDINATE_SPAN,
    };
    let ground_state_energy = refined - rng.gen::<f64>() * GROUND_STATE_SPREAD;
    let energy_correction = refined - classical;

    let disease_impact_narrative = request.primary_disease().map(|disease| {
        ImpactLevel::classify(binding_affinity).narrative(disease, &request.target_name)
    });

    AffinityResult {
        binding_affinity,
        confidence_score,
        rationale,
        pose: pose.to_string(),
        ground_state_energy,
        energy_correction,
        ranking_consistency,
        comparison: ModelComparison {
            alternative_model_score,
            explanation: COMPARISON_EXPLANATION.to_string(),
        },
        timing,
        disease_impact_narrative,
    }
}

/// Fail-fast variant of [`predict_affinity`].
pub fn predict_affinity_strict<R: Rng + ?Sized>(
    request: &AffinityRequest,
    rng: &mut R,
) -> Result<AffinityResult, PredictionError> {
    if !request.classical_docking_score.is_finite() {
        return Err(PredictionError::NonFiniteInput {
            field: "classicalDockingScore",
        });
    }
    if !request.quantum_refined_energy.is_finite() {
        return Err(PredictionError::NonFiniteInput {
            field: "quantumRefinedEnergy",
        });
    }
    if request.molecule_representation.is_empty() {
        return Err(PredictionError::EmptyInput {
            field: "moleculeRepresentation",
        });
    }
    if request.target_name.is_empty() {
        return Err(PredictionError::EmptyInput {
            field: "targetName",
        });
    }

    let result = predict_affinity(request, rng);
    let fields = result.non_finite_fields();
    if fields.is_empty() {
        Ok(result)
    } else {
        Err(PredictionError::NonFiniteOutput { fields })
    }
}

/// `floor.max(value)`, except NaN stays NaN (`f64::max` would drop it).
fn floored(floor: f64, value: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        floor.max(value)
    }
}

fn model_timing(molecule_representation: &str, target_name: &str) -> ModelTiming {
    let molecule_bucket = utf16_len(molecule_representation) % TIMING_LENGTH_MODULUS;
    let target_bucket = utf16_len(target_name) % TIMING_LENGTH_MODULUS;

    let primary_model_seconds = PRIMARY_TIME_FLOOR_SECONDS
        .max(PRIMARY_TIME_BASE_SECONDS + molecule_bucket as f64 * PRIMARY_TIME_STEP_SECONDS);
    let alternative_model_seconds = (primary_model_seconds + ALTERNATIVE_TIME_MIN_GAP_SECONDS)
        .max(ALTERNATIVE_TIME_BASE_SECONDS + target_bucket as f64 * ALTERNATIVE_TIME_STEP_SECONDS);

    ModelTiming {
        primary_model_seconds,
        alternative_model_seconds,
    }
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}
