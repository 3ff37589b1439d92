//! Workforce data-access service
//!
//! [`WorkforceService`] is the single entry point used by the HTTP layer.
//! It validates input, hashes PINs, reads the clock and talks to whichever
//! [`WorkforceStore`] was selected at startup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::fallback::FallbackPolicies;
use crate::models::Worker;
use crate::pin::PinHasher;
use crate::repositories::WorkforceStore;

mod kiosk;
mod time_off;
mod verification;
mod workers;

pub use kiosk::{Authenticated, ClockOutSummary};
pub use time_off::ReviewReceipt;
pub use verification::CODE_TTL_MINUTES;
pub use workers::WorkerRegistration;

/// Workforce service over a storage provider
#[derive(Clone)]
pub struct WorkforceService {
    store: Arc<dyn WorkforceStore>,
    clock: Arc<dyn Clock>,
    hasher: PinHasher,
    policies: FallbackPolicies,
}

impl WorkforceService {
    /// Create a new service
    pub fn new(
        store: Arc<dyn WorkforceStore>,
        clock: Arc<dyn Clock>,
        hasher: PinHasher,
        policies: FallbackPolicies,
    ) -> Self {
        Self {
            store,
            clock,
            hasher,
            policies,
        }
    }

    /// Name of the storage provider in use
    pub fn storage_kind(&self) -> &'static str {
        self.store.kind()
    }

    /// Whether the storage provider currently answers
    pub async fn storage_healthy(&self) -> bool {
        self.store.is_healthy().await
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    async fn require_worker(&self, worker_id: Uuid) -> ServiceResult<Worker> {
        self.store
            .get_worker(worker_id)
            .await?
            .ok_or(ServiceError::WorkerNotFound)
    }
}

impl std::fmt::Debug for WorkforceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkforceService")
            .field("store", &self.store.kind())
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}
