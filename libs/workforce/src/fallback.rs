//! Per-call-site policy for store failures
//!
//! Time-off operations can hide a backend failure behind substitute data so
//! the kiosk keeps working while the database is unreachable. Whether they
//! do is configured per call site.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ServiceResult;
use crate::repositories::{StoreError, StoreResult};

/// What to do when the store fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Surface the failure to the caller
    FailLoud,
    /// Log a warning and substitute fallback data
    #[default]
    Degrade,
}

/// Fallback policy for each degradable call site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicies {
    pub time_off_listing: FallbackPolicy,
    pub time_off_submission: FallbackPolicy,
    pub time_off_review: FallbackPolicy,
}

impl FallbackPolicies {
    /// Every call site fails loudly
    pub fn fail_loud() -> Self {
        Self {
            time_off_listing: FallbackPolicy::FailLoud,
            time_off_submission: FallbackPolicy::FailLoud,
            time_off_review: FallbackPolicy::FailLoud,
        }
    }
}

impl FallbackPolicy {
    /// Resolve a store result under this policy
    ///
    /// Only backend failures are degraded. Conflicts always surface.
    pub fn recover<T>(
        self,
        operation: &str,
        result: StoreResult<T>,
        fallback: impl FnOnce() -> T,
    ) -> ServiceResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(StoreError::Backend { message }) if self == FallbackPolicy::Degrade => {
                warn!("Degrading {} after store failure: {}", operation, message);
                Ok(fallback())
            }
            Err(err) => Err(err.into()),
        }
    }
}
