//! Time-off submission, listing and review
//!
//! These call sites degrade on backend failures according to the configured
//! [`crate::fallback::FallbackPolicies`].

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::WorkforceService;
use crate::demo::fallback_time_off;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewTimeOffRequest, TimeOffDraft, TimeOffRequest, TimeOffReview, TimeOffStatus};
use crate::repositories::{ReviewOutcome, TimeOffFilter};
use crate::validation::{validate_date_range, validate_hours};

/// Outcome of approving or denying a request
///
/// `request` is absent when a store failure was degraded into success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewReceipt {
    pub request_id: Uuid,
    pub status: TimeOffStatus,
    pub request: Option<TimeOffRequest>,
}

impl WorkforceService {
    /// File a new pending request
    ///
    /// An unknown worker is rejected; an unreachable store degrades under
    /// the submission policy.
    pub async fn submit_time_off(
        &self,
        worker_id: Uuid,
        mut draft: TimeOffDraft,
    ) -> ServiceResult<TimeOffRequest> {
        validate_hours("Paid hours", draft.paid_hours).map_err(ServiceError::Validation)?;
        validate_hours("Unpaid hours", draft.unpaid_hours).map_err(ServiceError::Validation)?;
        validate_date_range(draft.start_date, draft.end_date).map_err(ServiceError::Validation)?;

        let policy = self.policies.time_off_submission;
        let lookup = self.store.get_worker(worker_id).await.map(Some);
        if matches!(policy.recover("time-off submission", lookup, || None)?, Some(None)) {
            return Err(ServiceError::WorkerNotFound);
        }

        draft.comments = draft
            .comments
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let new_request = NewTimeOffRequest {
            worker_id,
            draft,
            submitted_at: self.now(),
        };

        let result = self.store.insert_time_off(new_request.clone()).await;
        let request = policy.recover(
            "time-off submission",
            result,
            || TimeOffRequest::pending(Uuid::new_v4(), new_request),
        )?;

        info!("Worker {} submitted time-off request {}", worker_id, request.id);
        Ok(request)
    }

    /// List requests for one worker, the review queue, or everything
    pub async fn list_time_off(&self, filter: TimeOffFilter) -> ServiceResult<Vec<TimeOffRequest>> {
        let result = self.store.list_time_off(filter).await;
        let now = self.now();
        self.policies
            .time_off_listing
            .recover("time-off listing", result, || fallback_time_off(filter, now))
    }

    pub async fn approve_request(
        &self,
        request_id: Uuid,
        reviewer_id: Uuid,
    ) -> ServiceResult<ReviewReceipt> {
        let review = TimeOffReview::approve(reviewer_id, self.now());
        self.review(request_id, review).await
    }

    pub async fn deny_request(
        &self,
        request_id: Uuid,
        reviewer_id: Uuid,
        reason: Option<String>,
    ) -> ServiceResult<ReviewReceipt> {
        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let review = TimeOffReview::deny(reviewer_id, self.now(), reason);
        self.review(request_id, review).await
    }

    /// Resolve the reviewer's permission, then apply the review
    ///
    /// `Uuid::nil()` is the admin bypass identity. Both store calls degrade
    /// under the review policy into a receipt without a record.
    async fn review(&self, request_id: Uuid, review: TimeOffReview) -> ServiceResult<ReviewReceipt> {
        let status = review.status;
        let reviewer_id = review.reviewed_by;
        let policy = self.policies.time_off_review;

        let reviewer = if reviewer_id.is_nil() {
            Some(self.admin_identity())
        } else {
            let lookup = self.store.get_worker(reviewer_id).await.map(Some);
            match policy.recover("time-off review", lookup, || None)? {
                Some(found) => Some(found.ok_or(ServiceError::WorkerNotFound)?),
                None => None,
            }
        };

        let outcome = match reviewer {
            Some(reviewer) => {
                if !reviewer.is_active || !reviewer.role.can_review() {
                    warn!(
                        "Worker {} ({}) may not review time-off request {}",
                        reviewer.id, reviewer.role, request_id
                    );
                    return Err(ServiceError::NotAReviewer);
                }
                let result = self
                    .store
                    .review_time_off(request_id, review)
                    .await
                    .map(Some);
                policy.recover("time-off review", result, || None)?
            }
            None => None,
        };

        match outcome {
            Some(ReviewOutcome::Reviewed(request)) => {
                info!(
                    "Time-off request {} {} by {}",
                    request_id, request.status, reviewer_id
                );
                Ok(ReviewReceipt {
                    request_id,
                    status: request.status,
                    request: Some(request),
                })
            }
            Some(ReviewOutcome::NotFound) => Err(ServiceError::RequestNotFound),
            Some(ReviewOutcome::AlreadyReviewed(current)) => {
                Err(ServiceError::AlreadyReviewed(current))
            }
            None => Ok(ReviewReceipt {
                request_id,
                status,
                request: None,
            }),
        }
    }
}
