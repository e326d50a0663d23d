use peopleops_auth::Actor;
use peopleops_core::{DomainError, DomainResult};

/// Consent gate for operations that process personal data.
///
/// Every policy query and workflow creation calls this before touching any
/// state; a missing flag aborts with Forbidden and no side effect.
pub fn ensure_consent(actor: &Actor, purpose: &str) -> DomainResult<()> {
    if actor.consent {
        Ok(())
    } else {
        Err(DomainError::forbidden(format!(
            "consent missing for purpose '{purpose}'"
        )))
    }
}
