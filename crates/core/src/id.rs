//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings on the wire (`u-hr-001`, `leave-9f2c31ab04`),
//! so these newtypes wrap `String` rather than a UUID. Generated ids use a
//! short fixed prefix plus a slice of a random UUID's hex form.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! impl_string_id {
    ($t:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl FromStr for $t {
            type Err = core::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }
    };
}

macro_rules! impl_generated_id {
    ($t:ident, $prefix:literal, $hex_len:literal) => {
        impl $t {
            /// Mint a fresh identifier: `<prefix>-<random hex>`.
            pub fn generate() -> Self {
                let hex = Uuid::new_v4().simple().to_string();
                Self(format!("{}-{}", $prefix, &hex[..$hex_len]))
            }
        }
    };
}

impl_string_id!(UserId);
impl_string_id!(LeaveRequestId);
impl_string_id!(DocumentRequestId);
impl_string_id!(OnboardingTaskId);
impl_string_id!(PolicyId);
impl_string_id!(ResponseId);

impl_generated_id!(LeaveRequestId, "leave", 10);
impl_generated_id!(DocumentRequestId, "doc", 10);
impl_generated_id!(OnboardingTaskId, "onb", 10);
impl_generated_id!(ResponseId, "pol", 12);
