//! Time-off request model and its review lifecycle
//!
//! A request is created `pending` and moves exactly once to `approved` or
//! `denied`. Both are terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::ParseVariantError;

/// Kind of absence being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOffType {
    Vacation,
    Personal,
    Sick,
    Bereavement,
    Unpaid,
}

impl TimeOffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOffType::Vacation => "vacation",
            TimeOffType::Personal => "personal",
            TimeOffType::Sick => "sick",
            TimeOffType::Bereavement => "bereavement",
            TimeOffType::Unpaid => "unpaid",
        }
    }
}

impl fmt::Display for TimeOffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOffType {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vacation" => Ok(TimeOffType::Vacation),
            "personal" => Ok(TimeOffType::Personal),
            "sick" => Ok(TimeOffType::Sick),
            "bereavement" => Ok(TimeOffType::Bereavement),
            "unpaid" => Ok(TimeOffType::Unpaid),
            other => Err(ParseVariantError::new("time-off type", other)),
        }
    }
}

/// Review state of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Denied,
}

impl TimeOffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOffStatus::Pending => "pending",
            TimeOffStatus::Approved => "approved",
            TimeOffStatus::Denied => "denied",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TimeOffStatus::Pending)
    }
}

impl fmt::Display for TimeOffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOffStatus {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TimeOffStatus::Pending),
            "approved" => Ok(TimeOffStatus::Approved),
            "denied" => Ok(TimeOffStatus::Denied),
            other => Err(ParseVariantError::new("time-off status", other)),
        }
    }
}

/// Time-off request entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub id: Uuid,
    pub worker_id: Uuid,
    #[serde(rename = "type")]
    pub request_type: TimeOffType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub paid_hours: f64,
    pub unpaid_hours: f64,
    pub is_excused: bool,
    pub is_planned: bool,
    pub comments: Option<String>,
    pub status: TimeOffStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub denial_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What a worker fills in when asking for time off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffDraft {
    #[serde(rename = "type")]
    pub request_type: TimeOffType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub paid_hours: f64,
    #[serde(default)]
    pub unpaid_hours: f64,
    #[serde(default)]
    pub is_excused: bool,
    #[serde(default)]
    pub is_planned: bool,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Time-off request insert payload
#[derive(Debug, Clone)]
pub struct NewTimeOffRequest {
    pub worker_id: Uuid,
    pub draft: TimeOffDraft,
    pub submitted_at: DateTime<Utc>,
}

/// Terminal decision applied to a pending request
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOffReview {
    pub status: TimeOffStatus,
    pub reviewed_by: Uuid,
    pub reviewed_at: DateTime<Utc>,
    pub denial_reason: Option<String>,
}

impl TimeOffReview {
    pub fn approve(reviewed_by: Uuid, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            status: TimeOffStatus::Approved,
            reviewed_by,
            reviewed_at,
            denial_reason: None,
        }
    }

    pub fn deny(reviewed_by: Uuid, reviewed_at: DateTime<Utc>, reason: Option<String>) -> Self {
        Self {
            status: TimeOffStatus::Denied,
            reviewed_by,
            reviewed_at,
            denial_reason: reason,
        }
    }
}

impl TimeOffRequest {
    /// Build the pending record for a newly submitted request
    pub fn pending(id: Uuid, new: NewTimeOffRequest) -> Self {
        let draft = new.draft;
        Self {
            id,
            worker_id: new.worker_id,
            request_type: draft.request_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            paid_hours: draft.paid_hours,
            unpaid_hours: draft.unpaid_hours,
            is_excused: draft.is_excused,
            is_planned: draft.is_planned,
            comments: draft.comments,
            status: TimeOffStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            denial_reason: None,
            created_at: new.submitted_at,
            updated_at: new.submitted_at,
        }
    }

    /// Stamp a review onto this request
    ///
    /// Callers must check the request is still pending first.
    pub fn apply_review(&mut self, review: TimeOffReview) {
        self.status = review.status;
        self.reviewed_by = Some(review.reviewed_by);
        self.reviewed_at = Some(review.reviewed_at);
        self.denial_reason = review.denial_reason;
        self.updated_at = review.reviewed_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TimeOffDraft {
        TimeOffDraft {
            request_type: TimeOffType::Vacation,
            start_date: NaiveDate::from_ymd_opt(2026, 7, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            paid_hours: 32.0,
            unpaid_hours: 8.0,
            is_excused: true,
            is_planned: true,
            comments: Some("Family trip".to_string()),
        }
    }

    #[test]
    fn test_pending_request_has_no_review_fields() {
        let now = Utc::now();
        let request = TimeOffRequest::pending(
            Uuid::new_v4(),
            NewTimeOffRequest {
                worker_id: Uuid::new_v4(),
                draft: draft(),
                submitted_at: now,
            },
        );

        assert_eq!(request.status, TimeOffStatus::Pending);
        assert!(request.reviewed_by.is_none());
        assert!(request.reviewed_at.is_none());
        assert_eq!(request.created_at, now);
        assert_eq!(request.updated_at, now);
    }

    #[test]
    fn test_deny_stamps_reason_and_reviewer() {
        let now = Utc::now();
        let reviewer = Uuid::new_v4();
        let mut request = TimeOffRequest::pending(
            Uuid::new_v4(),
            NewTimeOffRequest {
                worker_id: Uuid::new_v4(),
                draft: draft(),
                submitted_at: now,
            },
        );

        let later = now + chrono::Duration::hours(2);
        request.apply_review(TimeOffReview::deny(reviewer, later, Some("Short staffed".to_string())));

        assert_eq!(request.status, TimeOffStatus::Denied);
        assert!(request.status.is_terminal());
        assert_eq!(request.reviewed_by, Some(reviewer));
        assert_eq!(request.reviewed_at, Some(later));
        assert_eq!(request.denial_reason.as_deref(), Some("Short staffed"));
        assert_eq!(request.updated_at, later);
    }

    #[test]
    fn test_draft_defaults_optional_fields() {
        let draft: TimeOffDraft = serde_json::from_value(serde_json::json!({
            "type": "sick",
            "start_date": "2026-03-02",
            "end_date": "2026-03-02"
        }))
        .unwrap();

        assert_eq!(draft.request_type, TimeOffType::Sick);
        assert_eq!(draft.paid_hours, 0.0);
        assert!(!draft.is_planned);
        assert!(draft.comments.is_none());
    }
}
