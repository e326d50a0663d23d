//! `peopleops-governance` — consent gating, subject access, erasure, retention.
//!
//! Erasure and retention are the two irreversible operations in the system:
//! both redact in place and log a governance event, and neither has an undo
//! path.

pub mod consent;
pub mod service;
pub mod types;

pub use consent::ensure_consent;
pub use service::{GovernanceError, GovernanceService, anonymized_handle};
pub use types::{ErasureReport, RetentionReport, SubjectAccessBundle};
