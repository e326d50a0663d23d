use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use peopleops_core::UserId;

use crate::Role;

/// Bearer-token claims model (transport-agnostic).
///
/// This is the minimal set of claims the API expects once a token has been
/// decoded and signature-verified by the transport layer. `exp` is seconds
/// since the Unix epoch, matching the JWT registered claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id the token was issued for.
    pub sub: UserId,

    /// Role granted at issue time.
    pub role: Role,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token subject is empty")]
    EmptySubject,
}

/// Deterministically validate claims.
///
/// Signature verification and decoding are intentionally outside this crate.
pub fn validate_claims(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.sub.as_str().is_empty() {
        return Err(TokenValidationError::EmptySubject);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(exp: DateTime<Utc>) -> Claims {
        Claims {
            sub: UserId::new("u-emp-001"),
            role: Role::Employee,
            exp: exp.timestamp(),
        }
    }

    #[test]
    fn accepts_live_token() {
        let now = Utc::now();
        assert!(validate_claims(&claims(now + Duration::minutes(5)), now).is_ok());
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let err = validate_claims(&claims(now - Duration::minutes(1)), now).unwrap_err();
        assert_eq!(err, TokenValidationError::Expired);
    }

    #[test]
    fn rejects_empty_subject() {
        let now = Utc::now();
        let mut c = claims(now + Duration::minutes(5));
        c.sub = UserId::new("");
        assert_eq!(
            validate_claims(&c, now).unwrap_err(),
            TokenValidationError::EmptySubject
        );
    }
}
