//! PostgreSQL provider against a live database
//!
//! Run with `DATABASE_URL` pointing at a disposable instance and
//! `--ignored`. Migrations are applied on connect.

use chrono::{NaiveDate, Utc};
use common::database::{DatabaseConfig, init_pool};
use uuid::Uuid;
use workforce::models::{
    NewTimeOffRequest, NewWorker, Role, TimeOffDraft, TimeOffReview, TimeOffStatus, TimeOffType,
};
use workforce::repositories::{PgStore, ReviewOutcome, StoreError, WorkforceStore};

async fn store() -> Result<PgStore, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?.ok_or("DATABASE_URL is not set")?;
    let store = PgStore::new(init_pool(&config).await?);
    store.run_migrations().await?;
    Ok(store)
}

fn new_worker(pin_digest: &str) -> NewWorker {
    NewWorker {
        pin_digest: pin_digest.to_string(),
        full_name: "Live Test".to_string(),
        role: Role::Worker,
        email: None,
        phone: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance and DATABASE_URL"]
async fn test_duplicate_pin_digest_is_a_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let store = store().await?;
    let digest = format!("live-{}", Uuid::new_v4());

    store.insert_worker(new_worker(&digest)).await?;
    let err = store.insert_worker(new_worker(&digest)).await.unwrap_err();

    assert!(matches!(err, StoreError::Conflict { .. }), "got {err:?}");
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance and DATABASE_URL"]
async fn test_review_resolves_missing_and_repeated() -> Result<(), Box<dyn std::error::Error>> {
    let store = store().await?;
    let worker = store
        .insert_worker(new_worker(&format!("live-{}", Uuid::new_v4())))
        .await?;
    let day = NaiveDate::from_ymd_opt(2026, 11, 2).ok_or("date")?;

    let request = store
        .insert_time_off(NewTimeOffRequest {
            worker_id: worker.id,
            draft: TimeOffDraft {
                request_type: TimeOffType::Personal,
                start_date: day,
                end_date: day,
                paid_hours: 8.0,
                unpaid_hours: 0.0,
                is_excused: false,
                is_planned: true,
                comments: None,
            },
            submitted_at: Utc::now(),
        })
        .await?;
    let reviewer = Uuid::nil();

    let outcome = store
        .review_time_off(request.id, TimeOffReview::approve(reviewer, Utc::now()))
        .await?;
    assert!(
        matches!(outcome, ReviewOutcome::Reviewed(ref r) if r.status == TimeOffStatus::Approved)
    );

    let again = store
        .review_time_off(request.id, TimeOffReview::deny(reviewer, Utc::now(), None))
        .await?;
    assert_eq!(again, ReviewOutcome::AlreadyReviewed(TimeOffStatus::Approved));

    let missing = store
        .review_time_off(Uuid::new_v4(), TimeOffReview::approve(reviewer, Utc::now()))
        .await?;
    assert_eq!(missing, ReviewOutcome::NotFound);

    Ok(())
}
