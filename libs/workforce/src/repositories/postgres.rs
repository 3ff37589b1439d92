//! PostgreSQL storage provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::database::health_check;
use common::error::DatabaseResult;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{error, info};
use uuid::Uuid;

use super::{
    ALL_REQUESTS_LIMIT, ReviewOutcome, StoreError, StoreResult, TimeOffFilter, WorkforceStore,
};
use crate::models::{
    NewProductionLog, NewTimeOffRequest, NewVerificationCode, NewWorker, ProductionLogEntry, Punch,
    PunchType, TimeOffRequest, TimeOffReview, TimeOffStatus, VerificationCode, Worker,
};

const WORKER_COLUMNS: &str =
    "id, pin_digest, full_name, role, email, phone, is_active, created_at, updated_at";

const TIME_OFF_COLUMNS: &str = "id, worker_id, type, start_date, end_date, paid_hours, \
     unpaid_hours, is_excused, is_planned, comments, status, reviewed_by, reviewed_at, \
     denial_reason, created_at, updated_at";

const CODE_COLUMNS: &str = "id, worker_id, code, expires_at, used_at, created_at";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations
    pub async fn run_migrations(&self) -> DatabaseResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

/// Log a driver error and hide it behind a backend failure
fn backend(operation: &str, err: sqlx::Error) -> StoreError {
    error!("Failed to {}: {}", operation, err);
    StoreError::backend(format!("failed to {operation}"))
}

fn decode_text<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn worker_from_row(row: &PgRow) -> Result<Worker, sqlx::Error> {
    Ok(Worker {
        id: row.try_get("id")?,
        pin_digest: row.try_get("pin_digest")?,
        full_name: row.try_get("full_name")?,
        role: decode_text(row, "role")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn punch_from_row(row: &PgRow) -> Result<Punch, sqlx::Error> {
    Ok(Punch {
        id: row.try_get("id")?,
        worker_id: row.try_get("worker_id")?,
        punch_type: decode_text(row, "type")?,
        timestamp: row.try_get("timestamp")?,
    })
}

fn time_off_from_row(row: &PgRow) -> Result<TimeOffRequest, sqlx::Error> {
    Ok(TimeOffRequest {
        id: row.try_get("id")?,
        worker_id: row.try_get("worker_id")?,
        request_type: decode_text(row, "type")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        paid_hours: row.try_get("paid_hours")?,
        unpaid_hours: row.try_get("unpaid_hours")?,
        is_excused: row.try_get("is_excused")?,
        is_planned: row.try_get("is_planned")?,
        comments: row.try_get("comments")?,
        status: decode_text(row, "status")?,
        reviewed_by: row.try_get("reviewed_by")?,
        reviewed_at: row.try_get("reviewed_at")?,
        denial_reason: row.try_get("denial_reason")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn code_from_row(row: &PgRow) -> Result<VerificationCode, sqlx::Error> {
    Ok(VerificationCode {
        id: row.try_get("id")?,
        worker_id: row.try_get("worker_id")?,
        code: row.try_get("code")?,
        expires_at: row.try_get("expires_at")?,
        used_at: row.try_get("used_at")?,
        created_at: row.try_get("created_at")?,
    })
}

fn collect_rows<T>(
    rows: Vec<PgRow>,
    decode: fn(&PgRow) -> Result<T, sqlx::Error>,
) -> Result<Vec<T>, sqlx::Error> {
    rows.iter().map(decode).collect()
}

#[async_trait]
impl WorkforceStore for PgStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn is_healthy(&self) -> bool {
        health_check(&self.pool).await
    }

    async fn find_active_worker_by_pin(&self, pin_digest: &str) -> StoreResult<Option<Worker>> {
        let query = format!(
            "SELECT {WORKER_COLUMNS} FROM workers WHERE pin_digest = $1 AND is_active = TRUE"
        );
        let row = sqlx::query(&query)
            .bind(pin_digest)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("look up worker by PIN", e))?;

        row.as_ref()
            .map(worker_from_row)
            .transpose()
            .map_err(|e| backend("decode worker", e))
    }

    async fn get_worker(&self, id: Uuid) -> StoreResult<Option<Worker>> {
        let query = format!("SELECT {WORKER_COLUMNS} FROM workers WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("get worker", e))?;

        row.as_ref()
            .map(worker_from_row)
            .transpose()
            .map_err(|e| backend("decode worker", e))
    }

    async fn insert_worker(&self, new_worker: NewWorker) -> StoreResult<Worker> {
        let query = format!(
            r#"
            INSERT INTO workers (id, pin_digest, full_name, role, email, phone, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $7)
            RETURNING {WORKER_COLUMNS}
            "#
        );
        let result = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(&new_worker.pin_digest)
            .bind(&new_worker.full_name)
            .bind(new_worker.role.as_str())
            .bind(&new_worker.email)
            .bind(&new_worker.phone)
            .bind(new_worker.created_at)
            .fetch_one(&self.pool)
            .await;

        let row = match result {
            Ok(row) => row,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(StoreError::conflict("workers.pin is already taken"));
            }
            Err(e) => return Err(backend("insert worker", e)),
        };

        worker_from_row(&row).map_err(|e| backend("decode worker", e))
    }

    async fn list_workers(&self, include_inactive: bool) -> StoreResult<Vec<Worker>> {
        let query = format!(
            "SELECT {WORKER_COLUMNS} FROM workers WHERE ($1 OR is_active) ORDER BY full_name"
        );
        let rows = sqlx::query(&query)
            .bind(include_inactive)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| backend("list workers", e))?;

        collect_rows(rows, worker_from_row).map_err(|e| backend("decode worker", e))
    }

    async fn set_worker_active(
        &self,
        id: Uuid,
        active: bool,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Worker>> {
        let query = format!(
            "UPDATE workers SET is_active = $2, updated_at = $3 WHERE id = $1 RETURNING {WORKER_COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(active)
            .bind(at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("update worker", e))?;

        row.as_ref()
            .map(worker_from_row)
            .transpose()
            .map_err(|e| backend("decode worker", e))
    }

    async fn insert_punch(
        &self,
        worker_id: Uuid,
        punch_type: PunchType,
        at: DateTime<Utc>,
    ) -> StoreResult<Punch> {
        let row = sqlx::query(
            r#"
            INSERT INTO punches (id, worker_id, type, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, worker_id, type, timestamp
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(worker_id)
        .bind(punch_type.as_str())
        .bind(at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| backend("record punch", e))?;

        punch_from_row(&row).map_err(|e| backend("decode punch", e))
    }

    async fn latest_punch(&self, worker_id: Uuid) -> StoreResult<Option<Punch>> {
        let row = sqlx::query(
            r#"
            SELECT id, worker_id, type, timestamp
            FROM punches
            WHERE worker_id = $1
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(worker_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| backend("load latest punch", e))?;

        row.as_ref()
            .map(punch_from_row)
            .transpose()
            .map_err(|e| backend("decode punch", e))
    }

    async fn punches_since(&self, worker_id: Uuid, since: DateTime<Utc>) -> StoreResult<Vec<Punch>> {
        let rows = sqlx::query(
            r#"
            SELECT id, worker_id, type, timestamp
            FROM punches
            WHERE worker_id = $1 AND timestamp >= $2
            ORDER BY timestamp ASC
            "#,
        )
        .bind(worker_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| backend("load punches", e))?;

        collect_rows(rows, punch_from_row).map_err(|e| backend("decode punch", e))
    }

    async fn insert_production_logs(
        &self,
        logs: Vec<NewProductionLog>,
    ) -> StoreResult<Vec<ProductionLogEntry>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| backend("begin production transaction", e))?;
        let mut stored = Vec::with_capacity(logs.len());

        for log in logs {
            let id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO production_logs (id, worker_id, task_name, quantity, timestamp)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id)
            .bind(log.worker_id)
            .bind(&log.task_name)
            .bind(log.quantity)
            .bind(log.timestamp)
            .execute(&mut *tx)
            .await
            .map_err(|e| backend("insert production log", e))?;

            stored.push(ProductionLogEntry {
                id,
                worker_id: log.worker_id,
                task_name: log.task_name,
                quantity: log.quantity,
                timestamp: log.timestamp,
            });
        }

        tx.commit()
            .await
            .map_err(|e| backend("commit production logs", e))?;

        Ok(stored)
    }

    async fn insert_time_off(&self, request: NewTimeOffRequest) -> StoreResult<TimeOffRequest> {
        let draft = &request.draft;
        let query = format!(
            r#"
            INSERT INTO time_off_requests
                (id, worker_id, type, start_date, end_date, paid_hours, unpaid_hours,
                 is_excused, is_planned, comments, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending', $11, $11)
            RETURNING {TIME_OFF_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(request.worker_id)
            .bind(draft.request_type.as_str())
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(draft.paid_hours)
            .bind(draft.unpaid_hours)
            .bind(draft.is_excused)
            .bind(draft.is_planned)
            .bind(&draft.comments)
            .bind(request.submitted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| backend("insert time-off request", e))?;

        time_off_from_row(&row).map_err(|e| backend("decode time-off request", e))
    }

    async fn list_time_off(&self, filter: TimeOffFilter) -> StoreResult<Vec<TimeOffRequest>> {
        let result = match filter {
            TimeOffFilter::Worker(worker_id) => {
                let query = format!(
                    "SELECT {TIME_OFF_COLUMNS} FROM time_off_requests WHERE worker_id = $1 ORDER BY created_at DESC"
                );
                sqlx::query(&query)
                    .bind(worker_id)
                    .fetch_all(&self.pool)
                    .await
            }
            TimeOffFilter::Pending => {
                let query = format!(
                    "SELECT {TIME_OFF_COLUMNS} FROM time_off_requests WHERE status = 'pending' ORDER BY created_at ASC"
                );
                sqlx::query(&query).fetch_all(&self.pool).await
            }
            TimeOffFilter::All => {
                let query = format!(
                    "SELECT {TIME_OFF_COLUMNS} FROM time_off_requests ORDER BY created_at DESC LIMIT $1"
                );
                sqlx::query(&query)
                    .bind(ALL_REQUESTS_LIMIT as i64)
                    .fetch_all(&self.pool)
                    .await
            }
        };

        let rows = result.map_err(|e| backend("list time-off requests", e))?;
        collect_rows(rows, time_off_from_row).map_err(|e| backend("decode time-off request", e))
    }

    async fn review_time_off(&self, id: Uuid, review: TimeOffReview) -> StoreResult<ReviewOutcome> {
        let query = format!(
            r#"
            UPDATE time_off_requests
            SET status = $2, reviewed_by = $3, reviewed_at = $4, denial_reason = $5, updated_at = $4
            WHERE id = $1 AND status = 'pending'
            RETURNING {TIME_OFF_COLUMNS}
            "#
        );
        let updated = sqlx::query(&query)
            .bind(id)
            .bind(review.status.as_str())
            .bind(review.reviewed_by)
            .bind(review.reviewed_at)
            .bind(&review.denial_reason)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("review time-off request", e))?;

        if let Some(row) = updated {
            let request =
                time_off_from_row(&row).map_err(|e| backend("decode time-off request", e))?;
            return Ok(ReviewOutcome::Reviewed(request));
        }

        let current = sqlx::query("SELECT status FROM time_off_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("load time-off status", e))?;

        match current {
            None => Ok(ReviewOutcome::NotFound),
            Some(row) => {
                let status: TimeOffStatus =
                    decode_text(&row, "status").map_err(|e| backend("decode time-off status", e))?;
                Ok(ReviewOutcome::AlreadyReviewed(status))
            }
        }
    }

    async fn insert_verification_code(
        &self,
        code: NewVerificationCode,
    ) -> StoreResult<VerificationCode> {
        let query = format!(
            r#"
            INSERT INTO verification_codes (id, worker_id, code, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CODE_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(code.worker_id)
            .bind(&code.code)
            .bind(code.expires_at)
            .bind(code.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| backend("store verification code", e))?;

        code_from_row(&row).map_err(|e| backend("decode verification code", e))
    }

    async fn latest_code(&self, worker_id: Uuid) -> StoreResult<Option<VerificationCode>> {
        let query = format!(
            r#"
            SELECT {CODE_COLUMNS}
            FROM verification_codes
            WHERE worker_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#
        );
        let row = sqlx::query(&query)
            .bind(worker_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("load verification code", e))?;

        row.as_ref()
            .map(code_from_row)
            .transpose()
            .map_err(|e| backend("decode verification code", e))
    }

    async fn mark_code_used(&self, id: Uuid, at: DateTime<Utc>) -> StoreResult<()> {
        sqlx::query("UPDATE verification_codes SET used_at = $2 WHERE id = $1 AND used_at IS NULL")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| backend("mark verification code used", e))?;

        Ok(())
    }
}
