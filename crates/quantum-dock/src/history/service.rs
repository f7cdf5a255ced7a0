use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{DockingRecord, HistoryEntryView, UserId};
use super::repository::{ResultStore, StoreError};
use crate::simulation::SimulationEntry;

/// Time source for server-assigned timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Saves completed docking results and reads them back per user.
pub struct HistoryService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> HistoryService<S>
where
    S: ResultStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Persist every completed entry for `user`, returning how many were saved.
    pub fn save_run(
        &self,
        user: &UserId,
        entries: &[SimulationEntry],
    ) -> Result<usize, HistoryError> {
        let created_at = self.clock.now();
        let records: Vec<DockingRecord> = entries
            .iter()
            .filter_map(|entry| record_from_entry(user, entry, created_at))
            .collect();

        if records.is_empty() {
            return Err(HistoryError::NothingToSave);
        }

        let saved = records.len();
        for (appended, record) in records.into_iter().enumerate() {
            if let Err(source) = self.store.append(record) {
                return Err(if appended == 0 {
                    HistoryError::Store(source)
                } else {
                    warn!(user = user.as_str(), saved = appended, "docking results partially saved");
                    HistoryError::Partial {
                        saved: appended,
                        source,
                    }
                });
            }
        }

        info!(user = user.as_str(), saved, "saved docking results");
        Ok(saved)
    }

    /// Saved results for `user`, newest first.
    pub fn history(&self, user: &UserId) -> Result<Vec<HistoryEntryView>, HistoryError> {
        let mut records = self.store.list(user)?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let now = self.clock.now();
        Ok(records
            .into_iter()
            .map(|record| HistoryEntryView::from_record(record, now))
            .collect())
    }
}

fn record_from_entry(
    user: &UserId,
    entry: &SimulationEntry,
    created_at: DateTime<Utc>,
) -> Option<DockingRecord> {
    if !entry.is_complete() {
        return None;
    }
    let prediction = entry.prediction.as_ref()?;

    Some(DockingRecord {
        user_id: user.clone(),
        molecule_name: entry.molecule.name.clone(),
        protein_name: entry.protein.name.clone(),
        classical_score: entry.classical_score,
        refined_energy: entry.refined_energy,
        binding_affinity: prediction.binding_affinity,
        confidence_score: prediction.confidence_score,
        rationale: prediction.rationale.clone(),
        pose: prediction.pose.clone(),
        disease_impact: prediction.disease_impact_narrative.clone(),
        created_at,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("there are no completed simulations to save")]
    NothingToSave,
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The store failed after accepting the first `saved` records.
    #[error("saved {saved} result(s) before the store failed: {source}")]
    Partial { saved: usize, source: StoreError },
}
