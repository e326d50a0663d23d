use std::path::PathBuf;

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub policy_dataset_path: PathBuf,
    pub event_log_path: PathBuf,
}

impl Settings {
    /// Read settings from the environment, falling back to dev defaults.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("PEOPLEOPS_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("PEOPLEOPS_JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let policy_dataset_path = std::env::var("PEOPLEOPS_POLICY_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/hr_policies.json"))
            });

        let event_log_path = std::env::var("PEOPLEOPS_EVENT_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/events.jsonl"));

        Self {
            bind_addr: std::env::var("PEOPLEOPS_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            jwt_secret,
            policy_dataset_path,
            event_log_path,
        }
    }
}
