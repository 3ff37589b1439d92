//! In-memory storage provider used in demo mode and tests
//!
//! Each [`MemoryStore`] owns its tables; nothing is process-global. Clones
//! share the same tables. Operations are serialised on a single mutex and
//! can be slowed down to approximate network round trips.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ALL_REQUESTS_LIMIT, ReviewOutcome, StoreResult, TimeOffFilter, WorkforceStore};
use crate::demo::{demo_time_off, demo_workers};
use crate::models::{
    NewProductionLog, NewTimeOffRequest, NewVerificationCode, NewWorker, ProductionLogEntry, Punch,
    PunchType, TimeOffRequest, TimeOffReview, VerificationCode, Worker,
};
use crate::pin::{PinHashError, PinHasher};
use crate::repositories::StoreError;

#[derive(Debug, Clone, Default)]
struct Tables {
    workers: Vec<Worker>,
    punches: Vec<Punch>,
    production_logs: Vec<ProductionLogEntry>,
    time_off: Vec<TimeOffRequest>,
    codes: Vec<VerificationCode>,
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    seed: Arc<Tables>,
    latency: Duration,
}

impl MemoryStore {
    /// Create an empty store with no latency
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the demo accounts and requests, dated from `now`
    pub fn seeded(hasher: &PinHasher, now: DateTime<Utc>) -> Result<Self, PinHashError> {
        let seed = Tables {
            workers: demo_workers(hasher, now)?,
            time_off: demo_time_off(now),
            ..Tables::default()
        };

        Ok(Self {
            tables: Arc::new(Mutex::new(seed.clone())),
            seed: Arc::new(seed),
            latency: Duration::ZERO,
        })
    }

    /// Delay every operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Discard all writes and restore the initial contents
    pub async fn reset(&self) {
        let mut tables = self.tables.lock().await;
        *tables = (*self.seed).clone();
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Filter, order and cap time-off requests for a listing
pub(crate) fn select_time_off<'a>(
    requests: impl Iterator<Item = &'a TimeOffRequest>,
    filter: TimeOffFilter,
) -> Vec<TimeOffRequest> {
    let mut selected: Vec<TimeOffRequest> = requests
        .filter(|request| match filter {
            TimeOffFilter::Worker(worker_id) => request.worker_id == worker_id,
            TimeOffFilter::Pending => !request.status.is_terminal(),
            TimeOffFilter::All => true,
        })
        .cloned()
        .collect();

    match filter {
        TimeOffFilter::Pending => selected.sort_by_key(|request| request.created_at),
        TimeOffFilter::Worker(_) | TimeOffFilter::All => {
            selected.sort_by(|a, b| b.created_at.cmp(&a.created_at))
        }
    }

    if filter == TimeOffFilter::All {
        selected.truncate(ALL_REQUESTS_LIMIT);
    }

    selected
}

#[async_trait]
impl WorkforceStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn is_healthy(&self) -> bool {
        true
    }

    async fn find_active_worker_by_pin(&self, pin_digest: &str) -> StoreResult<Option<Worker>> {
        self.simulate_latency().await;
        let tables = self.tables.lock().await;
        Ok(tables
            .workers
            .iter()
            .find(|worker| worker.is_active && worker.pin_digest == pin_digest)
            .cloned())
    }

    async fn get_worker(&self, id: Uuid) -> StoreResult<Option<Worker>> {
        self.simulate_latency().await;
        let tables = self.tables.lock().await;
        Ok(tables.workers.iter().find(|worker| worker.id == id).cloned())
    }

    async fn insert_worker(&self, new_worker: NewWorker) -> StoreResult<Worker> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;

        if tables
            .workers
            .iter()
            .any(|worker| worker.pin_digest == new_worker.pin_digest)
        {
            return Err(StoreError::conflict("workers.pin is already taken"));
        }

        let worker = Worker::from_new(Uuid::new_v4(), new_worker);
        tables.workers.push(worker.clone());
        Ok(worker)
    }

    async fn list_workers(&self, include_inactive: bool) -> StoreResult<Vec<Worker>> {
        self.simulate_latency().await;
        let tables = self.tables.lock().await;
        let mut workers: Vec<Worker> = tables
            .workers
            .iter()
            .filter(|worker| include_inactive || worker.is_active)
            .cloned()
            .collect();
        workers.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(workers)
    }

    async fn set_worker_active(
        &self,
        id: Uuid,
        active: bool,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Worker>> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;
        Ok(tables
            .workers
            .iter_mut()
            .find(|worker| worker.id == id)
            .map(|worker| {
                worker.is_active = active;
                worker.updated_at = at;
                worker.clone()
            }))
    }

    async fn insert_punch(
        &self,
        worker_id: Uuid,
        punch_type: PunchType,
        at: DateTime<Utc>,
    ) -> StoreResult<Punch> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;
        let punch = Punch {
            id: Uuid::new_v4(),
            worker_id,
            punch_type,
            timestamp: at,
        };
        tables.punches.push(punch.clone());
        Ok(punch)
    }

    async fn latest_punch(&self, worker_id: Uuid) -> StoreResult<Option<Punch>> {
        self.simulate_latency().await;
        let tables = self.tables.lock().await;
        Ok(tables
            .punches
            .iter()
            .filter(|punch| punch.worker_id == worker_id)
            .max_by_key(|punch| punch.timestamp)
            .cloned())
    }

    async fn punches_since(&self, worker_id: Uuid, since: DateTime<Utc>) -> StoreResult<Vec<Punch>> {
        self.simulate_latency().await;
        let tables = self.tables.lock().await;
        let mut punches: Vec<Punch> = tables
            .punches
            .iter()
            .filter(|punch| punch.worker_id == worker_id && punch.timestamp >= since)
            .cloned()
            .collect();
        punches.sort_by_key(|punch| punch.timestamp);
        Ok(punches)
    }

    async fn insert_production_logs(
        &self,
        logs: Vec<NewProductionLog>,
    ) -> StoreResult<Vec<ProductionLogEntry>> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;
        let stored: Vec<ProductionLogEntry> = logs
            .into_iter()
            .map(|log| ProductionLogEntry {
                id: Uuid::new_v4(),
                worker_id: log.worker_id,
                task_name: log.task_name,
                quantity: log.quantity,
                timestamp: log.timestamp,
            })
            .collect();
        tables.production_logs.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn insert_time_off(&self, request: NewTimeOffRequest) -> StoreResult<TimeOffRequest> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;
        let request = TimeOffRequest::pending(Uuid::new_v4(), request);
        tables.time_off.push(request.clone());
        Ok(request)
    }

    async fn list_time_off(&self, filter: TimeOffFilter) -> StoreResult<Vec<TimeOffRequest>> {
        self.simulate_latency().await;
        let tables = self.tables.lock().await;
        Ok(select_time_off(tables.time_off.iter(), filter))
    }

    async fn review_time_off(&self, id: Uuid, review: TimeOffReview) -> StoreResult<ReviewOutcome> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;
        let Some(request) = tables.time_off.iter_mut().find(|request| request.id == id) else {
            return Ok(ReviewOutcome::NotFound);
        };

        if request.status.is_terminal() {
            return Ok(ReviewOutcome::AlreadyReviewed(request.status));
        }

        request.apply_review(review);
        Ok(ReviewOutcome::Reviewed(request.clone()))
    }

    async fn insert_verification_code(
        &self,
        code: NewVerificationCode,
    ) -> StoreResult<VerificationCode> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;
        let stored = VerificationCode {
            id: Uuid::new_v4(),
            worker_id: code.worker_id,
            code: code.code,
            expires_at: code.expires_at,
            used_at: None,
            created_at: code.created_at,
        };
        tables.codes.push(stored.clone());
        Ok(stored)
    }

    async fn latest_code(&self, worker_id: Uuid) -> StoreResult<Option<VerificationCode>> {
        self.simulate_latency().await;
        let tables = self.tables.lock().await;
        Ok(tables
            .codes
            .iter()
            .filter(|code| code.worker_id == worker_id)
            .max_by_key(|code| code.created_at)
            .cloned())
    }

    async fn mark_code_used(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        self.simulate_latency().await;
        let mut tables = self.tables.lock().await;
        if let Some(code) = tables.codes.iter_mut().find(|code| code.id == id) {
            code.used_at = Some(at);
        }
        Ok(())
    }
}
