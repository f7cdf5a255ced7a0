use super::domain::{DockingRecord, UserId};

/// Append-only, per-user result storage.
pub trait ResultStore: Send + Sync {
    fn append(&self, record: DockingRecord) -> Result<(), StoreError>;
    /// All records saved by `user`, in no particular order.
    fn list(&self, user: &UserId) -> Result<Vec<DockingRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("result store unavailable: {0}")]
    Unavailable(String),
}
