use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::catalog::Catalog;
use crate::history::domain::{DockingRecord, UserId};
use crate::history::repository::{ResultStore, StoreError};
use crate::history::service::{Clock, HistoryService};
use crate::simulation::{DockingSimulator, SimulationEntry, SimulationRequest};

pub(super) const ASPIRIN: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";
pub(super) const IMATINIB: &str =
    "CC1=C(C=C(C=C1)NC(=O)C2=CC=C(C=C2)CN3CCN(CC3)C)NC4=NC=CC(=N4)C5=CN=CC=C5";

pub(super) fn user() -> UserId {
    UserId("uid-ada".to_string())
}

pub(super) fn other_user() -> UserId {
    UserId("uid-grace".to_string())
}

pub(super) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn completed_entries() -> Vec<SimulationEntry> {
    let request = SimulationRequest {
        smiles: vec![ASPIRIN.to_string(), IMATINIB.to_string()],
        proteins: vec!["BCR-ABL Tyrosine Kinase".to_string()],
        diseases: vec!["Chronic Myeloid Leukemia".to_string()],
    };
    DockingSimulator::default()
        .run(&Catalog::builtin(), &request)
        .expect("simulation runs")
        .entries
}

pub(super) fn entries_with_failure() -> Vec<SimulationEntry> {
    let mut entries = completed_entries();
    let template = entries[0].clone();
    entries.push(SimulationEntry::failed(
        template.molecule,
        template.protein,
        "quantumRefinedEnergy must be a finite number".to_string(),
    ));
    entries
}

/// Clock that can be advanced between calls.
pub(super) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(super) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock mutex poisoned");
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<HashMap<UserId, Vec<DockingRecord>>>,
}

impl MemoryStore {
    pub(super) fn count(&self, user: &UserId) -> usize {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(user)
            .map_or(0, Vec::len)
    }
}

impl ResultStore for MemoryStore {
    fn append(&self, record: DockingRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.entry(record.user_id.clone()).or_default().push(record);
        Ok(())
    }

    fn list(&self, user: &UserId) -> Result<Vec<DockingRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(user).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableStore;

impl ResultStore for UnavailableStore {
    fn append(&self, _record: DockingRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }

    fn list(&self, _user: &UserId) -> Result<Vec<DockingRecord>, StoreError> {
        Err(StoreError::Unavailable("firestore offline".to_string()))
    }
}

/// Accepts appends until the `fail_on`-th (1-based), which fails along with every later one.
pub(super) struct FlakyStore {
    fail_on: usize,
    inner: MemoryStore,
    attempts: Mutex<usize>,
}

impl FlakyStore {
    pub(super) fn failing_on(fail_on: usize) -> Self {
        Self {
            fail_on,
            inner: MemoryStore::default(),
            attempts: Mutex::new(0),
        }
    }

    pub(super) fn count(&self, user: &UserId) -> usize {
        self.inner.count(user)
    }
}

impl ResultStore for FlakyStore {
    fn append(&self, record: DockingRecord) -> Result<(), StoreError> {
        let mut attempts = self.attempts.lock().expect("attempt mutex poisoned");
        *attempts += 1;
        if *attempts >= self.fail_on {
            return Err(StoreError::Unavailable("write quota exceeded".to_string()));
        }
        self.inner.append(record)
    }

    fn list(&self, user: &UserId) -> Result<Vec<DockingRecord>, StoreError> {
        self.inner.list(user)
    }
}

pub(super) fn build_service() -> (
    HistoryService<MemoryStore>,
    Arc<MemoryStore>,
    Arc<ManualClock>,
) {
    let store = Arc::new(MemoryStore::default());
    let clock = Arc::new(ManualClock::starting_at(epoch()));
    let service = HistoryService::with_clock(store.clone(), clock.clone());
    (service, store, clock)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
