use std::sync::Arc;

use peopleops_auth::{Actor, verify_password};
use peopleops_core::{DomainError, DomainResult, UserId};

use crate::records::{UserPublic, UserRecord};
use crate::store::RecordStore;

/// Read-side views over the user table.
///
/// Credential *parsing* (tokens, headers) happens at the transport layer;
/// this only answers "which directory entry matches these credentials" and
/// "what actor context does this entry imply".
#[derive(Debug, Clone)]
pub struct UserDirectory {
    store: Arc<RecordStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Username + password lookup. `None` covers both unknown usernames and
    /// bad passwords; callers surface a single Unauthorized either way.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<UserRecord> {
        self.store.with(|t| {
            t.users
                .values()
                .find(|u| u.username == username)
                .filter(|u| verify_password(password, &u.password_digest))
                .cloned()
        })
    }

    /// Resolve a user id minted into a token back to a directory entry.
    ///
    /// A missing entry is Unauthorized, not NotFound: the token's subject
    /// could not be re-verified against the directory.
    pub fn require_user(&self, user_id: &UserId) -> DomainResult<UserRecord> {
        self.store
            .with(|t| t.users.get(user_id).cloned())
            .ok_or(DomainError::Unauthorized)
    }

    pub fn resolve_actor(&self, user_id: &UserId) -> DomainResult<Actor> {
        Ok(self.require_user(user_id)?.as_actor())
    }

    pub fn list_users(&self) -> Vec<UserPublic> {
        let mut users = self
            .store
            .with(|t| t.users.values().map(UserRecord::as_public).collect::<Vec<_>>());
        users.sort_by(|a, b| a.user_id.as_str().cmp(b.user_id.as_str()));
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn directory() -> UserDirectory {
        let store = Arc::new(RecordStore::new());
        seed::seed_demo_users(&store);
        UserDirectory::new(store)
    }

    #[test]
    fn authenticate_accepts_seeded_credentials() {
        let dir = directory();
        let user = dir.authenticate("emp_alex", "employee123").unwrap();
        assert_eq!(user.id, UserId::new("u-emp-001"));
    }

    #[test]
    fn authenticate_rejects_bad_password_and_unknown_user() {
        let dir = directory();
        assert!(dir.authenticate("emp_alex", "wrong").is_none());
        assert!(dir.authenticate("nobody", "employee123").is_none());
    }

    #[test]
    fn require_user_maps_missing_entry_to_unauthorized() {
        let dir = directory();
        assert!(dir.require_user(&UserId::new("u-emp-001")).is_ok());

        let err = dir.require_user(&UserId::new("u-ghost")).unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);
    }

    #[test]
    fn list_users_is_sorted_and_public() {
        let dir = directory();
        let users = dir.list_users();
        assert_eq!(users.len(), 4);
        assert_eq!(users[0].user_id, UserId::new("u-emp-001"));
        assert_eq!(users[3].user_id, UserId::new("u-mgr-001"));
    }
}
