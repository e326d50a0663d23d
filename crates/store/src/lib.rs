//! `peopleops-store` — in-memory workflow state behind one lock.
//!
//! The store is volatile by design (no durability across restarts); the event
//! log carries the durable audit trail. Everything mutable lives in
//! [`RecordStore`] and is only reachable through its lock, so multi-step
//! read-modify-write sequences stay atomic.

pub mod directory;
pub mod records;
pub mod seed;
pub mod store;

pub use directory::UserDirectory;
pub use records::{
    DocumentRequest, DocumentStatus, LeaveRequest, LeaveStatus, OnboardingTask, PolicyResponse,
    TaskOwner, TaskStatus, UserPublic, UserRecord,
};
pub use store::{RecordStore, Tables};
