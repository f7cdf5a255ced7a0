//! Per-user, append-only history of saved docking results.
//!
//! Storage sits behind [`ResultStore`]; the service stamps every record with a
//! server-side timestamp and reads history back newest first.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{relative_age, DockingRecord, HistoryEntryView, UserId};
pub use repository::{ResultStore, StoreError};
pub use router::{history_router, SaveResultsRequest, USER_ID_HEADER};
pub use service::{Clock, HistoryError, HistoryService, SystemClock};
