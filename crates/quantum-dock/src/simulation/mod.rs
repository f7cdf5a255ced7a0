//! Docking runs over every selected molecule × protein pair.
//!
//! Each pair gets a generator seeded from its SMILES and protein name, which supplies the
//! mock classical score, the refined energy, and the draws inside the affinity formulas.
//! Re-running the same selection therefore reproduces the same numbers.

mod domain;

pub use domain::{ChartPoint, RunSummary, SimulationEntry, SimulationRun, SimulationStatus};

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Molecule, Protein};
use crate::prediction::{input_seed, seeded_rng, AffinityRequest, PredictionMode};

/// Mock classical scores fall in `[CLASSICAL_SCORE_MIN, CLASSICAL_SCORE_MIN + CLASSICAL_SCORE_SPAN)`.
pub const CLASSICAL_SCORE_MIN: f64 = -12.0;
pub const CLASSICAL_SCORE_SPAN: f64 = 6.0;
/// Refinement lowers the classical score by up to this many kcal/mol.
pub const REFINEMENT_MAX_GAIN: f64 = 2.0;

/// Selection submitted by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub smiles: Vec<String>,
    #[serde(default)]
    pub proteins: Vec<String>,
    #[serde(default)]
    pub diseases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("select at least one molecule and one protein")]
    SelectionMissing,
}

/// Runs docking simulations against a catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockingSimulator {
    mode: PredictionMode,
}

impl DockingSimulator {
    pub fn new(mode: PredictionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PredictionMode {
        self.mode
    }

    pub fn run(
        &self,
        catalog: &Catalog,
        request: &SimulationRequest,
    ) -> Result<SimulationRun, SimulationError> {
        let molecules = catalog.select_molecules(&request.smiles);
        let proteins = catalog.select_proteins(&request.proteins);
        if molecules.is_empty() || proteins.is_empty() {
            return Err(SimulationError::SelectionMissing);
        }

        let started_at = Utc::now();
        let combinations = molecules.len() * proteins.len();
        info!(
            combinations,
            mode = self.mode.label(),
            "starting docking simulation"
        );

        let mut entries = Vec::with_capacity(combinations);
        for molecule in &molecules {
            for protein in &proteins {
                let entry = self.simulate_pair(molecule, protein, &request.diseases);
                match &entry.error {
                    Some(error) => warn!(
                        combination = %entry.combination_label(),
                        %error,
                        "docking simulation failed"
                    ),
                    None => debug!(
                        combination = %entry.combination_label(),
                        affinity = entry.binding_affinity(),
                        "docking simulation complete"
                    ),
                }
                entries.push(entry);
            }
        }

        let run = SimulationRun {
            entries,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            completed = run.completed().count(),
            errored = run.errored().count(),
            "docking simulation finished"
        );
        Ok(run)
    }

    fn simulate_pair(
        &self,
        molecule: &Molecule,
        protein: &Protein,
        diseases: &[String],
    ) -> SimulationEntry {
        let mut rng = seeded_rng(input_seed(&molecule.smiles, &protein.name));
        let classical_score = CLASSICAL_SCORE_MIN + rng.gen::<f64>() * CLASSICAL_SCORE_SPAN;
        let refined_energy = classical_score - rng.gen::<f64>() * REFINEMENT_MAX_GAIN;

        let request = AffinityRequest {
            classical_docking_score: classical_score,
            quantum_refined_energy: refined_energy,
            molecule_representation: molecule.smiles.clone(),
            target_name: protein.name.clone(),
            diseases: diseases.to_vec(),
        };

        match self.mode.predict(&request, &mut rng) {
            Ok(prediction) => SimulationEntry::complete(
                molecule.clone(),
                protein.clone(),
                classical_score,
                refined_energy,
                prediction,
            ),
            Err(error) => SimulationEntry::failed(molecule.clone(), protein.clone(), error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::ImpactLevel;
    use std::io::Cursor;

    const ASPIRIN: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";
    const CAFFEINE: &str = "CN1C=NC2=C1C(=O)N(C(=O)N2C)C";

    fn request(smiles: &[&str], proteins: &[&str], diseases: &[&str]) -> SimulationRequest {
        SimulationRequest {
            smiles: smiles.iter().map(|s| s.to_string()).collect(),
            proteins: proteins.iter().map(|s| s.to_string()).collect(),
            diseases: diseases.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_selection_is_rejected() {
        let catalog = Catalog::builtin();
        let simulator = DockingSimulator::default();
        assert_eq!(
            simulator
                .run(&catalog, &request(&[ASPIRIN], &[], &[]))
                .map(|run| run.entries.len()),
            Err(SimulationError::SelectionMissing)
        );
        assert_eq!(
            simulator
                .run(&catalog, &request(&["unknown"], &["BACE1"], &[]))
                .map(|run| run.entries.len()),
            Err(SimulationError::SelectionMissing)
        );
    }

    #[test]
    fn runs_every_pair_molecule_major() {
        let catalog = Catalog::builtin();
        let run = DockingSimulator::default()
            .run(
                &catalog,
                &request(&[CAFFEINE, ASPIRIN], &["BACE1", "Cyclooxygenase-2"], &[]),
            )
            .expect("run succeeds");

        let labels: Vec<(&str, &str)> = run
            .entries
            .iter()
            .map(|entry| (entry.molecule.name.as_str(), entry.protein.name.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Aspirin", "Cyclooxygenase-2"),
                ("Aspirin", "BACE1"),
                ("Caffeine", "Cyclooxygenase-2"),
                ("Caffeine", "BACE1"),
            ]
        );
        assert_eq!(run.completed().count(), 4);
        assert!(run.finished_at >= run.started_at);
    }

    #[test]
    fn scores_stay_in_mock_ranges() {
        let catalog = Catalog::builtin();
        let all_smiles: Vec<&str> = catalog.molecules().iter().map(|m| m.smiles.as_str()).collect();
        let all_proteins: Vec<&str> = catalog.proteins().iter().map(|p| p.name.as_str()).collect();
        let run = DockingSimulator::default()
            .run(&catalog, &request(&all_smiles, &all_proteins, &[]))
            .expect("run succeeds");

        for entry in &run.entries {
            let classical = entry.classical_score.expect("classical score");
            let refined = entry.refined_energy.expect("refined energy");
            assert!((CLASSICAL_SCORE_MIN..CLASSICAL_SCORE_MIN + CLASSICAL_SCORE_SPAN).contains(&classical));
            assert!(refined <= classical && refined > classical - REFINEMENT_MAX_GAIN);
            let prediction = entry.prediction.as_ref().expect("prediction");
            assert_eq!(prediction.energy_correction, refined - classical);
        }
    }

    #[test]
    fn identical_selections_reproduce_results() {
        let catalog = Catalog::builtin();
        let selection = request(&[ASPIRIN], &["HIV-1 Protease", "BACE1"], &["HIV/AIDS"]);
        let first = DockingSimulator::default().run(&catalog, &selection).expect("run");
        let second = DockingSimulator::default().run(&catalog, &selection).expect("run");
        assert_eq!(first.entries, second.entries);
    }

    #[test]
    fn narrative_follows_classified_affinity() {
        let catalog = Catalog::builtin();
        let run = DockingSimulator::default()
            .run(&catalog, &request(&[ASPIRIN, CAFFEINE], &["BACE1"], &["Alzheimer's Disease"]))
            .expect("run succeeds");

        for entry in run.completed() {
            let prediction = entry.prediction.as_ref().expect("prediction");
            let level = ImpactLevel::classify(prediction.binding_affinity);
            assert_eq!(entry.impact_level, Some(level));
            assert_eq!(
                prediction.disease_impact_narrative.as_deref(),
                Some(level.narrative("Alzheimer's Disease", "BACE1").as_str())
            );
        }
    }

    #[test]
    fn strict_failures_mark_entry_and_continue() {
        let csv = "name,smiles,molecular_weight,donors,acceptors\n\
                   Unnamed,\"\",10.0,0,0\n\
                   Ethanol,CCO,46.07,1,1\n";
        let catalog = Catalog::builtin()
            .with_molecules_from_reader(Cursor::new(csv))
            .expect("valid csv");

        let run = DockingSimulator::new(PredictionMode::Strict)
            .run(&catalog, &request(&["", "CCO"], &["BACE1"], &[]))
            .expect("run succeeds");

        assert_eq!(run.entries.len(), 2);
        let failed = &run.entries[0];
        assert_eq!(failed.status, SimulationStatus::Error);
        assert_eq!(failed.error.as_deref(), Some("moleculeRepresentation must not be empty"));
        assert!(failed.prediction.is_none());
        assert_eq!(run.entries[1].status, SimulationStatus::Complete);
        assert_eq!(run.errored().count(), 1);
    }
}
