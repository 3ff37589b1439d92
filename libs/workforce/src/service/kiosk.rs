//! Kiosk operations: PIN login, clocking and production logging

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::WorkforceService;
use crate::duration::format_duration;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    NewProductionLog, ProductionEntry, ProductionLogEntry, Punch, PunchPair, PunchType, Role,
    Worker, WorkerStatus,
};
use crate::pairing::pair_punches;
use crate::pin::ADMIN_PIN;
use crate::validation::validate_pin;
use crate::weekly::{WeeklyHours, aggregate_week};

const MAX_HISTORY_DAYS: u32 = 366;

/// Outcome of a successful kiosk login
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Authenticated {
    pub worker: Worker,
    pub is_admin: bool,
}

/// Outcome of clocking out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockOutSummary {
    pub punch: Punch,
    pub time_worked: String,
    pub time_worked_ms: i64,
}

impl WorkforceService {
    /// Resolve a kiosk PIN to an active worker
    ///
    /// The admin bypass PIN never touches the store.
    pub async fn authenticate_worker(&self, pin: &str) -> ServiceResult<Authenticated> {
        if pin == ADMIN_PIN {
            info!("Admin bypass PIN used at kiosk");
            return Ok(Authenticated {
                worker: self.admin_identity(),
                is_admin: true,
            });
        }

        validate_pin(pin).map_err(|_| ServiceError::InvalidPin)?;
        let digest = self.hasher.digest(pin)?;

        let worker = self
            .store
            .find_active_worker_by_pin(&digest)
            .await?
            .ok_or(ServiceError::InvalidPin)?;

        info!("Worker {} authenticated", worker.id);
        Ok(Authenticated {
            is_admin: worker.role == Role::Admin,
            worker,
        })
    }

    pub(super) fn admin_identity(&self) -> Worker {
        let now = self.now();
        Worker {
            id: Uuid::nil(),
            pin_digest: String::new(),
            full_name: "Administrator".to_string(),
            role: Role::Admin,
            email: None,
            phone: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the worker is currently clocked in
    pub async fn worker_status(&self, worker_id: Uuid) -> ServiceResult<WorkerStatus> {
        let latest = self.store.latest_punch(worker_id).await?;
        Ok(WorkerStatus::from_latest(latest.as_ref()))
    }

    /// Record an IN punch at the current time
    pub async fn clock_in(&self, worker_id: Uuid) -> ServiceResult<Punch> {
        self.require_worker(worker_id).await?;
        let punch = self
            .store
            .insert_punch(worker_id, PunchType::In, self.now())
            .await?;

        info!("Worker {} clocked in", worker_id);
        Ok(punch)
    }

    /// Record an OUT punch and report the time since `last_clock_in`
    pub async fn clock_out(
        &self,
        worker_id: Uuid,
        last_clock_in: DateTime<Utc>,
    ) -> ServiceResult<ClockOutSummary> {
        self.require_worker(worker_id).await?;
        let now = self.now();
        let punch = self
            .store
            .insert_punch(worker_id, PunchType::Out, now)
            .await?;

        let time_worked_ms = (now - last_clock_in).num_milliseconds();
        info!("Worker {} clocked out after {} ms", worker_id, time_worked_ms);

        Ok(ClockOutSummary {
            punch,
            time_worked: format_duration(time_worked_ms),
            time_worked_ms,
        })
    }

    /// Store the positive-quantity entries of a production report
    pub async fn log_production(
        &self,
        worker_id: Uuid,
        entries: Vec<ProductionEntry>,
    ) -> ServiceResult<Vec<ProductionLogEntry>> {
        let now = self.now();
        let logs: Vec<NewProductionLog> = entries
            .into_iter()
            .filter(|entry| entry.quantity > 0)
            .map(|entry| NewProductionLog {
                worker_id,
                task_name: entry.task_name.trim().to_string(),
                quantity: entry.quantity,
                timestamp: now,
            })
            .collect();

        if logs.is_empty() {
            return Err(ServiceError::Validation(
                "At least one entry with a positive quantity is required".to_string(),
            ));
        }

        if logs.iter().any(|log| log.task_name.is_empty()) {
            return Err(ServiceError::Validation("Task name is required".to_string()));
        }

        self.require_worker(worker_id).await?;
        let stored = self.store.insert_production_logs(logs).await?;

        info!("Logged {} production entries for worker {}", stored.len(), worker_id);
        Ok(stored)
    }

    /// Per-day punch pairs over the trailing `days`, newest date first
    pub async fn punch_history(&self, worker_id: Uuid, days: u32) -> ServiceResult<Vec<PunchPair>> {
        if days == 0 || days > MAX_HISTORY_DAYS {
            return Err(ServiceError::Validation(format!(
                "Days must be between 1 and {MAX_HISTORY_DAYS}"
            )));
        }

        let since = self.now() - Duration::days(i64::from(days));
        let punches = self.store.punches_since(worker_id, since).await?;
        debug!("Pairing {} punches for worker {}", punches.len(), worker_id);

        Ok(pair_punches(&punches))
    }

    /// Hours worked since Monday of the current week
    pub async fn weekly_hours(&self, worker_id: Uuid) -> ServiceResult<WeeklyHours> {
        let pairs = self.punch_history(worker_id, 7).await?;
        Ok(aggregate_week(&pairs, self.now().date_naive()))
    }
}
