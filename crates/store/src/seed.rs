//! Demo directory seeded at bootstrap.
//!
//! Users are created here once and only mutated afterwards by consent updates
//! and erasure. Manager/team wiring invariant: `manager_id` references a user
//! whose role can manage, and `team_members` lists only existing ids.

use peopleops_auth::{Role, hash_password};
use peopleops_core::UserId;

use crate::records::UserRecord;
use crate::store::RecordStore;

struct SeedUser {
    id: &'static str,
    username: &'static str,
    full_name: &'static str,
    role: Role,
    manager_id: Option<&'static str>,
    team_members: &'static [&'static str],
    password: &'static str,
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        id: "u-hr-001",
        username: "hr_admin",
        full_name: "Avery Jordan",
        role: Role::Hr,
        manager_id: None,
        team_members: &["u-mgr-001", "u-emp-001", "u-emp-002"],
        password: "hr123",
    },
    SeedUser {
        id: "u-mgr-001",
        username: "mgr_jane",
        full_name: "Jane Rivera",
        role: Role::Manager,
        manager_id: Some("u-hr-001"),
        team_members: &["u-emp-001", "u-emp-002"],
        password: "manager123",
    },
    SeedUser {
        id: "u-emp-001",
        username: "emp_alex",
        full_name: "Alex Kim",
        role: Role::Employee,
        manager_id: Some("u-mgr-001"),
        team_members: &[],
        password: "employee123",
    },
    SeedUser {
        id: "u-emp-002",
        username: "emp_sam",
        full_name: "Sam Patel",
        role: Role::Employee,
        manager_id: Some("u-mgr-001"),
        team_members: &[],
        password: "employee456",
    },
];

/// Populate the demo users. No-op when the directory is already seeded.
pub fn seed_demo_users(store: &RecordStore) {
    store.with(|t| {
        if !t.users.is_empty() {
            return;
        }
        for seed in SEED_USERS {
            let record = UserRecord {
                id: UserId::new(seed.id),
                username: seed.username.to_string(),
                full_name: seed.full_name.to_string(),
                role: seed.role,
                manager_id: seed.manager_id.map(UserId::new),
                team_members: seed.team_members.iter().map(|m| UserId::new(*m)).collect(),
                consent: true,
                password_digest: hash_password(seed.password),
            };
            t.users.insert(record.id.clone(), record);
        }
    });
}
