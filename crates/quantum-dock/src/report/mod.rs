//! Docking throughput report: classical vs. quantum docking time over a large
//! synthetic molecule set, binned for charting.

use rand::Rng;
use serde::Serialize;

pub const DEFAULT_MOLECULES: usize = 16_000;
pub const DEFAULT_BIN_SIZE: usize = 1_000;
/// Largest dataset a single report may simulate.
pub const MAX_MOLECULES: usize = 1_000_000;

const CLASSICAL_BASE_SECONDS: f64 = 5.0;
const CLASSICAL_SPREAD_SECONDS: f64 = 5.0;
const QUANTUM_BASE_SECONDS: f64 = 30.0;
const QUANTUM_SPREAD_SECONDS: f64 = 10.0;
/// Quantum time improves linearly by up to this much across the dataset.
const QUANTUM_SCALING_GAIN_SECONDS: f64 = 15.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("report needs at least one molecule and a non-zero bin size")]
    EmptyDataset,
    #[error("report is limited to {max} molecules (requested {requested})")]
    TooManyMolecules { requested: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputBin {
    /// 1-based inclusive range, e.g. `1-1000`.
    pub name: String,
    pub classical_seconds: f64,
    pub quantum_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputSummary {
    pub total_classical_hours: f64,
    pub total_quantum_hours: f64,
    pub average_classical_seconds: f64,
    pub average_quantum_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputReport {
    pub molecules: usize,
    pub bin_size: usize,
    pub bins: Vec<ThroughputBin>,
    pub summary: ThroughputSummary,
}

impl ThroughputReport {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        molecules: usize,
        bin_size: usize,
    ) -> Result<Self, ReportError> {
        if molecules == 0 || bin_size == 0 {
            return Err(ReportError::EmptyDataset);
        }
        if molecules > MAX_MOLECULES {
            return Err(ReportError::TooManyMolecules {
                requested: molecules,
                max: MAX_MOLECULES,
            });
        }

        let mut bins = Vec::with_capacity(molecules.div_ceil(bin_size));
        let (mut total_classical, mut total_quantum) = (0.0, 0.0);
        let (mut bin_classical, mut bin_quantum, mut bin_count) = (0.0, 0.0, 0usize);

        for index in 0..molecules {
            let classical = CLASSICAL_BASE_SECONDS + rng.gen::<f64>() * CLASSICAL_SPREAD_SECONDS;
            let progress = index as f64 / molecules as f64;
            let quantum = QUANTUM_BASE_SECONDS + rng.gen::<f64>() * QUANTUM_SPREAD_SECONDS
                - progress * QUANTUM_SCALING_GAIN_SECONDS;

            total_classical += classical;
            total_quantum += quantum;
            bin_classical += classical;
            bin_quantum += quantum;
            bin_count += 1;

            if bin_count == bin_size || index + 1 == molecules {
                let start = index + 2 - bin_count;
                bins.push(ThroughputBin {
                    name: format!("{}-{}", start, index + 1),
                    classical_seconds: bin_classical / bin_count as f64,
                    quantum_seconds: bin_quantum / bin_count as f64,
                });
                (bin_classical, bin_quantum, bin_count) = (0.0, 0.0, 0);
            }
        }

        let summary = ThroughputSummary {
            total_classical_hours: total_classical / SECONDS_PER_HOUR,
            total_quantum_hours: total_quantum / SECONDS_PER_HOUR,
            average_classical_seconds: total_classical / molecules as f64,
            average_quantum_seconds: total_quantum / molecules as f64,
        };

        Ok(Self {
            molecules,
            bin_size,
            bins,
            summary,
        })
    }

    /// Bins where quantum docking beat classical docking on average.
    pub fn quantum_faster_bins(&self) -> impl Iterator<Item = &ThroughputBin> {
        self.bins
            .iter()
            .filter(|bin| bin.quantum_seconds < bin.classical_seconds)
    }
}
