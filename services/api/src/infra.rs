use metrics_exporter_prometheus::PrometheusHandle;
use quantum_dock::catalog::Catalog;
use quantum_dock::config::PredictionConfig;
use quantum_dock::history::{DockingRecord, ResultStore, StoreError, UserId};
use quantum_dock::simulation::DockingSimulator;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) simulator: DockingSimulator,
    pub(crate) prediction: PredictionConfig,
}

/// Process-local result history; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultStore {
    records: Arc<Mutex<HashMap<UserId, Vec<DockingRecord>>>>,
}

impl ResultStore for InMemoryResultStore {
    fn append(&self, record: DockingRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        guard.entry(record.user_id.clone()).or_default().push(record);
        Ok(())
    }

    fn list(&self, user: &UserId) -> Result<Vec<DockingRecord>, StoreError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(user).cloned().unwrap_or_default())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable("result store mutex poisoned".to_string())
}
