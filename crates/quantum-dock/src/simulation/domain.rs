use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Molecule, Protein};
use crate::prediction::{AffinityResult, ImpactLevel};

const CHART_LABEL_UNITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    Complete,
    Error,
}

/// Outcome for one molecule/protein pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEntry {
    pub molecule: Molecule,
    pub protein: Protein,
    pub status: SimulationStatus,
    pub classical_score: Option<f64>,
    pub refined_energy: Option<f64>,
    pub prediction: Option<AffinityResult>,
    pub impact_level: Option<ImpactLevel>,
    pub combined_molecular_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulationEntry {
    pub(crate) fn complete(
        molecule: Molecule,
        protein: Protein,
        classical_score: f64,
        refined_energy: f64,
        prediction: AffinityResult,
    ) -> Self {
        let combined_molecular_weight = molecule.molecular_weight + protein.molecular_weight;
        Self {
            impact_level: Some(ImpactLevel::classify(prediction.binding_affinity)),
            molecule,
            protein,
            status: SimulationStatus::Complete,
            classical_score: Some(classical_score),
            refined_energy: Some(refined_energy),
            prediction: Some(prediction),
            combined_molecular_weight,
            error: None,
        }
    }

    pub(crate) fn failed(molecule: Molecule, protein: Protein, error: String) -> Self {
        let combined_molecular_weight = molecule.molecular_weight + protein.molecular_weight;
        Self {
            molecule,
            protein,
            status: SimulationStatus::Error,
            classical_score: None,
            refined_energy: None,
            prediction: None,
            impact_level: None,
            combined_molecular_weight,
            error: Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == SimulationStatus::Complete && self.prediction.is_some()
    }

    pub fn combination_label(&self) -> String {
        format!("{} + {}", self.molecule.name, self.protein.name)
    }

    pub fn binding_affinity(&self) -> Option<f64> {
        self.prediction
            .as_ref()
            .map(|prediction| prediction.binding_affinity)
    }
}

/// Bar-chart point: shortened pair label and its affinity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub binding_affinity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub combinations: usize,
    pub completed: usize,
    pub errored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_binding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub entries: Vec<SimulationEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SimulationRun {
    pub fn completed(&self) -> impl Iterator<Item = &SimulationEntry> {
        self.entries.iter().filter(|entry| entry.is_complete())
    }

    pub fn errored(&self) -> impl Iterator<Item = &SimulationEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == SimulationStatus::Error)
    }

    /// Completed pairs, strongest (lowest affinity) first.
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        let mut points: Vec<ChartPoint> = self
            .completed()
            .filter_map(|entry| {
                entry.binding_affinity().map(|binding_affinity| ChartPoint {
                    name: format!(
                        "{}... + {}...",
                        truncate_utf16(&entry.molecule.name, CHART_LABEL_UNITS),
                        truncate_utf16(&entry.protein.name, CHART_LABEL_UNITS)
                    ),
                    binding_affinity,
                })
            })
            .collect();
        points.sort_by(|a, b| a.binding_affinity.total_cmp(&b.binding_affinity));
        points
    }

    pub fn summary(&self) -> RunSummary {
        let completed: Vec<&SimulationEntry> = self.completed().collect();
        let strongest_binding = completed
            .iter()
            .filter_map(|entry| entry.binding_affinity().map(|affinity| (affinity, *entry)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, entry)| entry.combination_label());
        let mean_confidence = if completed.is_empty() {
            None
        } else {
            let total: f64 = completed
                .iter()
                .filter_map(|entry| entry.prediction.as_ref())
                .map(|prediction| prediction.confidence_score)
                .sum();
            Some(total / completed.len() as f64)
        };

        RunSummary {
            combinations: self.entries.len(),
            completed: completed.len(),
            errored: self.errored().count(),
            strongest_binding,
            mean_confidence,
        }
    }
}

/// Keeps at most `limit` UTF-16 code units. A character whose surrogate pair
/// would straddle the limit is dropped whole.
fn truncate_utf16(value: &str, limit: usize) -> &str {
    let mut units = 0;
    for (index, ch) in value.char_indices() {
        units += ch.len_utf16();
        if units > limit {
            return &value[..index];
        }
    }
    value
}
