//! Storage providers for workforce data
//!
//! Both providers implement [`WorkforceStore`]; the application picks one
//! at startup with [`connect`] and never switches afterwards.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::database::{DatabaseConfig, init_pool};
use common::error::DatabaseResult;
use mockable::Clock;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    NewProductionLog, NewTimeOffRequest, NewVerificationCode, NewWorker, ProductionLogEntry, Punch,
    PunchType, TimeOffRequest, TimeOffReview, TimeOffStatus, VerificationCode, Worker,
};
use crate::pin::PinHasher;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Most recent requests returned by the unfiltered listing
pub const ALL_REQUESTS_LIMIT: usize = 50;

/// Errors surfaced by a storage provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Connectivity, query or decoding failure
    #[error("backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Which time-off requests to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffFilter {
    /// A worker's own requests, newest first
    Worker(Uuid),
    /// Requests awaiting review, oldest first
    Pending,
    /// Every request, newest first, capped at [`ALL_REQUESTS_LIMIT`]
    All,
}

/// Result of applying a review to a request
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    Reviewed(TimeOffRequest),
    NotFound,
    AlreadyReviewed(TimeOffStatus),
}

/// Storage capability shared by the in-memory and PostgreSQL providers
#[async_trait]
pub trait WorkforceStore: Send + Sync {
    /// Short provider name for logs and health output
    fn kind(&self) -> &'static str;

    /// Whether the backing storage currently answers
    async fn is_healthy(&self) -> bool;

    async fn find_active_worker_by_pin(&self, pin_digest: &str) -> StoreResult<Option<Worker>>;

    async fn get_worker(&self, id: Uuid) -> StoreResult<Option<Worker>>;

    /// Fails with [`StoreError::Conflict`] when the PIN digest is taken
    async fn insert_worker(&self, new_worker: NewWorker) -> StoreResult<Worker>;

    /// Workers ordered by name
    async fn list_workers(&self, include_inactive: bool) -> StoreResult<Vec<Worker>>;

    async fn set_worker_active(
        &self,
        id: Uuid,
        active: bool,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Worker>>;

    async fn insert_punch(
        &self,
        worker_id: Uuid,
        punch_type: PunchType,
        at: DateTime<Utc>,
    ) -> StoreResult<Punch>;

    async fn latest_punch(&self, worker_id: Uuid) -> StoreResult<Option<Punch>>;

    /// Punches at or after `since`, oldest first
    async fn punches_since(&self, worker_id: Uuid, since: DateTime<Utc>) -> StoreResult<Vec<Punch>>;

    async fn insert_production_logs(
        &self,
        logs: Vec<NewProductionLog>,
    ) -> StoreResult<Vec<ProductionLogEntry>>;

    async fn insert_time_off(&self, request: NewTimeOffRequest) -> StoreResult<TimeOffRequest>;

    async fn list_time_off(&self, filter: TimeOffFilter) -> StoreResult<Vec<TimeOffRequest>>;

    /// Applies the review only while the request is still pending
    async fn review_time_off(&self, id: Uuid, review: TimeOffReview) -> StoreResult<ReviewOutcome>;

    async fn insert_verification_code(
        &self,
        code: NewVerificationCode,
    ) -> StoreResult<VerificationCode>;

    /// Most recently issued code, used or not
    async fn latest_code(&self, worker_id: Uuid) -> StoreResult<Option<VerificationCode>>;

    async fn mark_code_used(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()>;
}

/// Select the storage provider once, at startup
///
/// With a database configuration the PostgreSQL provider is connected and
/// migrated; without one the seeded in-memory demo store is used.
pub async fn connect(
    database: Option<&DatabaseConfig>,
    hasher: &PinHasher,
    clock: &dyn Clock,
    demo_latency: Duration,
) -> DatabaseResult<Arc<dyn WorkforceStore>> {
    match database {
        Some(config) => {
            let pool = init_pool(config).await?;
            let store = PgStore::new(pool);
            store.run_migrations().await?;
            info!("Using PostgreSQL store");
            Ok(Arc::new(store))
        }
        None => {
            info!("No database configured, running in demo mode");
            let store = MemoryStore::seeded(hasher, clock.utc())
                .map_err(|e| common::error::DatabaseError::Configuration(e.to_string()))?
                .with_latency(demo_latency);
            Ok(Arc::new(store))
        }
    }
}
