//! `peopleops-auth` — roles, permissions, and the resolved actor context.
//!
//! This crate is intentionally decoupled from HTTP and storage. Token
//! encoding/decoding lives at the transport layer; everything here is pure.

pub mod actor;
pub mod claims;
pub mod credentials;
pub mod permissions;
pub mod roles;

pub use actor::Actor;
pub use claims::{Claims, TokenValidationError, validate_claims};
pub use credentials::{hash_password, verify_password};
pub use permissions::{Permission, has_permission, role_permissions};
pub use roles::Role;
