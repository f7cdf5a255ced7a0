use std::fmt;

use serde::{Deserialize, Serialize};

use super::fixed::to_fixed;

/// Inputs for a single affinity prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityRequest {
    /// Baseline docking score in kcal/mol; more negative is better.
    pub classical_docking_score: f64,
    /// Refined binding energy in kcal/mol.
    pub quantum_refined_energy: f64,
    /// Chemical-structure string for the ligand. Only its length is consulted.
    pub molecule_representation: String,
    /// Protein target name. Only its length is consulted, plus the high-impact narrative.
    pub target_name: String,
    /// Disease labels; only the first is consulted.
    #[serde(default)]
    pub diseases: Vec<String>,
}

impl AffinityRequest {
    pub fn new(
        classical_docking_score: f64,
        quantum_refined_energy: f64,
        molecule_representation: impl Into<String>,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            classical_docking_score,
            quantum_refined_energy,
            molecule_representation: molecule_representation.into(),
            target_name: target_name.into(),
            diseases: Vec::new(),
        }
    }

    pub fn with_diseases<I, S>(mut self, diseases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diseases = diseases.into_iter().map(Into::into).collect();
        self
    }

    pub fn primary_disease(&self) -> Option<&str> {
        self.diseases.first().map(String::as_str)
    }
}

/// Output of the affinity formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityResult {
    /// Nanomolar-equivalent affinity; lower is stronger.
    pub binding_affinity: f64,
    pub confidence_score: f64,
    pub rationale: String,
    /// Formatted as `[x.xxxx, y.xxxx, z.xxxx]`.
    pub pose: String,
    pub ground_state_energy: f64,
    /// Signed `refined - classical`.
    pub energy_correction: f64,
    pub ranking_consistency: f64,
    pub comparison: ModelComparison,
    pub timing: ModelTiming,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_impact_narrative: Option<String>,
}

impl AffinityResult {
    /// Names of numeric fields holding NaN or an infinity.
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        [
            ("bindingAffinity", self.binding_affinity),
            ("confidenceScore", self.confidence_score),
            ("groundStateEnergy", self.ground_state_energy),
            ("energyCorrection", self.energy_correction),
            ("rankingConsistency", self.ranking_consistency),
            (
                "comparison.alternativeModelScore",
                self.comparison.alternative_model_score,
            ),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelComparison {
    pub alternative_model_score: f64,
    pub explanation: String,
}

/// Reported runtimes. Derived from input string lengths, not measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTiming {
    pub primary_model_seconds: f64,
    pub alternative_model_seconds: f64,
}

/// Synthetic ligand placement. Not a real geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            to_fixed(self.x, 4),
            to_fixed(self.y, 4),
            to_fixed(self.z, 4)
        )
    }
}
