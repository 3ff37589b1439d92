//! Shared fixtures for service integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use workforce::models::{
    NewProductionLog, NewTimeOffRequest, NewVerificationCode, NewWorker, ProductionLogEntry, Punch,
    PunchType, TimeOffRequest, TimeOffReview, VerificationCode, Worker,
};
use workforce::pin::{PinHashCost, PinHasher};
use workforce::repositories::{
    MemoryStore, ReviewOutcome, StoreError, StoreResult, TimeOffFilter, WorkforceStore,
};
use workforce::{FallbackPolicies, WorkforceService};

/// Clock whose current time is set by the test
#[derive(Debug, Clone)]
pub struct MutableClock(Arc<Mutex<DateTime<Utc>>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().expect("clock mutex") = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().expect("clock mutex");
        *now += by;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Cheap hasher so tests stay fast
pub fn hasher() -> PinHasher {
    PinHasher::with_cost(
        "integration-pepper",
        PinHashCost {
            memory_kib: 64,
            iterations: 1,
        },
    )
    .expect("hasher")
}

pub fn service_over(
    store: Arc<dyn WorkforceStore>,
    clock: &MutableClock,
    policies: FallbackPolicies,
) -> WorkforceService {
    WorkforceService::new(store, Arc::new(clock.clone()), hasher(), policies)
}

/// Service over a freshly seeded in-memory store
pub fn demo_service(clock: &MutableClock) -> WorkforceService {
    let store = MemoryStore::seeded(&hasher(), clock.utc()).expect("seeded store");
    service_over(Arc::new(store), clock, FallbackPolicies::default())
}

/// Store whose backend is unreachable for every operation
#[derive(Debug, Default)]
pub struct OfflineStore;

fn offline<T>() -> StoreResult<T> {
    Err(StoreError::backend("connection refused"))
}

#[async_trait]
impl WorkforceStore for OfflineStore {
    fn kind(&self) -> &'static str {
        "offline"
    }

    async fn is_healthy(&self) -> bool {
        false
    }

    async fn find_active_worker_by_pin(&self, _pin_digest: &str) -> StoreResult<Option<Worker>> {
        offline()
    }

    async fn get_worker(&self, _id: Uuid) -> StoreResult<Option<Worker>> {
        offline()
    }

    async fn insert_worker(&self, _new_worker: NewWorker) -> StoreResult<Worker> {
        offline()
    }

    async fn list_workers(&self, _include_inactive: bool) -> StoreResult<Vec<Worker>> {
        offline()
    }

    async fn set_worker_active(
        &self,
        _id: Uuid,
        _active: bool,
        _at: DateTime<Utc>,
    ) -> StoreResult<Option<Worker>> {
        offline()
    }

    async fn insert_punch(
        &self,
        _worker_id: Uuid,
        _punch_type: PunchType,
        _at: DateTime<Utc>,
    ) -> StoreResult<Punch> {
        offline()
    }

    async fn latest_punch(&self, _worker_id: Uuid) -> StoreResult<Option<Punch>> {
        offline()
    }

    async fn punches_since(&self, _worker_id: Uuid, _since: DateTime<Utc>) -> StoreResult<Vec<Punch>> {
        offline()
    }

    async fn insert_production_logs(
        &self,
        _logs: Vec<NewProductionLog>,
    ) -> StoreResult<Vec<ProductionLogEntry>> {
        offline()
    }

    async fn insert_time_off(&self, _request: NewTimeOffRequest) -> StoreResult<TimeOffRequest> {
        offline()
    }

    async fn list_time_off(&self, _filter: TimeOffFilter) -> StoreResult<Vec<TimeOffRequest>> {
        offline()
    }

    async fn review_time_off(&self, _id: Uuid, _review: TimeOffReview) -> StoreResult<ReviewOutcome> {
        offline()
    }

    async fn insert_verification_code(
        &self,
        _code: NewVerificationCode,
    ) -> StoreResult<VerificationCode> {
        offline()
    }

    async fn latest_code(&self, _worker_id: Uuid) -> StoreResult<Option<VerificationCode>> {
        offline()
    }

    async fn mark_code_used(&self, _id: Uuid, _at: DateTime<Utc>) -> StoreResult<()> {
        offline()
    }
}
