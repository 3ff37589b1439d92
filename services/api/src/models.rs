//! API models for request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use workforce::models::{ProductionEntry, TimeOffDraft};
use workforce::repositories::TimeOffFilter;

use crate::error::ApiError;

const DEFAULT_HISTORY_DAYS: u32 = 7;

/// Kiosk login
#[derive(Deserialize)]
pub struct AuthenticateRequest {
    pub pin: String,
}

/// Clock-out payload; elapsed time is measured from `last_clock_in`
#[derive(Deserialize)]
pub struct ClockOutRequest {
    pub last_clock_in: DateTime<Utc>,
}

/// Query for punch history
#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    pub days: Option<u32>,
}

impl HistoryQuery {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_HISTORY_DAYS)
    }
}

/// Query for the worker list
#[derive(Deserialize, Default)]
pub struct WorkersQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

#[derive(Deserialize)]
pub struct ProductionRequest {
    pub entries: Vec<ProductionEntry>,
}

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub code: String,
}

/// Verification result
#[derive(Serialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
}

/// Time-off submission
#[derive(Deserialize)]
pub struct SubmitTimeOffRequest {
    pub worker_id: Uuid,
    #[serde(flatten)]
    pub draft: TimeOffDraft,
}

/// Which listing to return
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOffScope {
    Mine,
    Pending,
    #[default]
    All,
}

/// Query for time-off listings
#[derive(Deserialize, Default)]
pub struct TimeOffQuery {
    #[serde(default)]
    pub scope: TimeOffScope,
    pub worker_id: Option<Uuid>,
}

impl TimeOffQuery {
    pub fn filter(&self) -> Result<TimeOffFilter, ApiError> {
        match (self.scope, self.worker_id) {
            (TimeOffScope::Mine, Some(worker_id)) => Ok(TimeOffFilter::Worker(worker_id)),
            (TimeOffScope::Mine, None) => Err(ApiError::BadRequest(
                "worker_id is required for scope=mine".to_string(),
            )),
            (TimeOffScope::Pending, _) => Ok(TimeOffFilter::Pending),
            (TimeOffScope::All, _) => Ok(TimeOffFilter::All),
        }
    }
}

/// Approve or deny payload
#[derive(Deserialize)]
pub struct ReviewRequest {
    pub reviewer_id: Uuid,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub storage: &'static str,
    pub storage_healthy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_scope_requires_worker() {
        let query = TimeOffQuery {
            scope: TimeOffScope::Mine,
            worker_id: None,
        };
        assert!(query.filter().is_err());

        let worker_id = Uuid::new_v4();
        let query = TimeOffQuery {
            scope: TimeOffScope::Mine,
            worker_id: Some(worker_id),
        };
        assert_eq!(query.filter().unwrap(), TimeOffFilter::Worker(worker_id));
    }

    #[test]
    fn test_default_scope_lists_everything() {
        assert_eq!(TimeOffQuery::default().filter().unwrap(), TimeOffFilter::All);
        assert_eq!(HistoryQuery::default().days(), 7);
    }

    #[test]
    fn test_submission_flattens_the_draft() {
        let payload: SubmitTimeOffRequest = serde_json::from_str(
            r#"{
                "worker_id": "6f1c2a4e-0001-4000-8000-000000000001",
                "type": "sick",
                "start_date": "2026-10-20",
                "end_date": "2026-10-20",
                "paid_hours": 8
            }"#,
        )
        .unwrap();

        assert_eq!(payload.draft.paid_hours, 8.0);
        assert_eq!(payload.draft.unpaid_hours, 0.0);
        assert!(!payload.draft.is_planned);
    }
}
