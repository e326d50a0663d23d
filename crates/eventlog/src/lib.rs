//! `peopleops-eventlog` — append-only, file-backed event log.
//!
//! One JSON record per line. The log is the single source of truth for
//! analytics and retention: KPIs are always recomputed by replaying it, never
//! read from a separately maintained counter. Records are immutable once
//! written; the only mutation is whole-line removal during retention
//! compaction.

pub mod log;
pub mod record;

pub use log::{EventLog, LogError};
pub use record::{EventKind, EventRecord};
