//! Bearer-token mechanics (encode/decode only; claim semantics live in
//! `peopleops-auth`).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use peopleops_auth::{Claims, Role};
use peopleops_core::UserId;

const TOKEN_TTL_MINUTES: i64 = 120;

/// Mint an HS256 token for a user. Returns the token and its expiry instant.
pub fn issue_token(
    secret: &str,
    user_id: &UserId,
    role: Role,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let expires_at = Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES);
    let claims = Claims {
        sub: user_id.clone(),
        role,
        exp: expires_at.timestamp(),
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, expires_at))
}

/// Decode and signature-verify a bearer token.
///
/// Expiry is enforced here (jsonwebtoken validates `exp`); callers still run
/// [`peopleops_auth::validate_claims`] for the deterministic claim checks.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_decode_with_the_same_secret() {
        let (token, expires_at) = issue_token("s3cret", &UserId::new("u-emp-001"), Role::Employee)
            .unwrap();

        let claims = decode_token("s3cret", &token).unwrap();
        assert_eq!(claims.sub, UserId::new("u-emp-001"));
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = issue_token("s3cret", &UserId::new("u-emp-001"), Role::Employee).unwrap();
        assert!(decode_token("other", &token).is_err());
    }
}
