//! API service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiResult,
    models::{
        AuthenticateRequest, ClockOutRequest, HealthResponse, HistoryQuery, ProductionRequest,
        ReviewRequest, SetActiveRequest, SubmitTimeOffRequest, TimeOffQuery, VerifyCodeRequest,
        VerifyCodeResponse, WorkersQuery,
    },
};
use workforce::service::WorkerRegistration;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let worker_routes = Router::new()
        .route("/workers", get(list_workers).post(create_worker))
        .route("/workers/:id", get(get_worker))
        .route("/workers/:id/active", post(set_worker_active))
        .route("/workers/:id/status", get(worker_status))
        .route("/workers/:id/clock-in", post(clock_in))
        .route("/workers/:id/clock-out", post(clock_out))
        .route("/workers/:id/punches", get(punch_history))
        .route("/workers/:id/hours/week", get(weekly_hours))
        .route("/workers/:id/production", post(log_production))
        .route("/workers/:id/verification-codes", post(send_verification_code))
        .route("/workers/:id/verification-codes/verify", post(verify_code));

    let time_off_routes = Router::new()
        .route("/time-off", get(list_time_off).post(submit_time_off))
        .route("/time-off/:id/approve", post(approve_time_off))
        .route("/time-off/:id/deny", post(deny_time_off));

    Router::new()
        .route("/health", get(health_check))
        .route("/kiosk/authenticate", post(authenticate))
        .merge(worker_routes)
        .merge(time_off_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let storage_healthy = state.service.storage_healthy().await;
    let (code, status) = if storage_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            service: "punchclock-api",
            storage: state.service.storage_kind(),
            storage_healthy,
        }),
    )
}

/// Kiosk PIN login
pub async fn authenticate(
    State(state): State<AppState>,
    Json(payload): Json<AuthenticateRequest>,
) -> ApiResult<impl IntoResponse> {
    let session = state.service.authenticate_worker(&payload.pin).await?;
    Ok(Json(session))
}

pub async fn list_workers(
    State(state): State<AppState>,
    Query(query): Query<WorkersQuery>,
) -> ApiResult<impl IntoResponse> {
    let workers = state.service.list_workers(query.include_inactive).await?;
    Ok(Json(workers))
}

pub async fn create_worker(
    State(state): State<AppState>,
    Json(payload): Json<WorkerRegistration>,
) -> ApiResult<impl IntoResponse> {
    let worker = state.service.create_worker(payload).await?;
    Ok((StatusCode::CREATED, Json(worker)))
}

pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let worker = state.service.get_worker(id).await?;
    Ok(Json(worker))
}

pub async fn set_worker_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> ApiResult<impl IntoResponse> {
    let worker = state.service.set_worker_active(id, payload.active).await?;
    Ok(Json(worker))
}

pub async fn worker_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let status = state.service.worker_status(id).await?;
    Ok(Json(status))
}

pub async fn clock_in(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let punch = state.service.clock_in(id).await?;
    Ok((StatusCode::CREATED, Json(punch)))
}

pub async fn clock_out(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClockOutRequest>,
) -> ApiResult<impl IntoResponse> {
    let summary = state.service.clock_out(id, payload.last_clock_in).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Per-day punch pairs, newest date first
pub async fn punch_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<impl IntoResponse> {
    let pairs = state.service.punch_history(id, query.days()).await?;
    Ok(Json(pairs))
}

pub async fn weekly_hours(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let week = state.service.weekly_hours(id).await?;
    Ok(Json(week))
}

pub async fn log_production(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductionRequest>,
) -> ApiResult<impl IntoResponse> {
    let logs = state.service.log_production(id, payload.entries).await?;
    Ok((StatusCode::CREATED, Json(logs)))
}

/// Issue a verification code; the caller delivers it to the worker
pub async fn send_verification_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let issued = state.service.send_verification_code(id).await?;
    Ok((StatusCode::CREATED, Json(issued)))
}

pub async fn verify_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyCodeRequest>,
) -> ApiResult<impl IntoResponse> {
    state.service.verify_code(id, &payload.code).await?;
    Ok(Json(VerifyCodeResponse { verified: true }))
}

pub async fn submit_time_off(
    State(state): State<AppState>,
    Json(payload): Json<SubmitTimeOffRequest>,
) -> ApiResult<impl IntoResponse> {
    let request = state
        .service
        .submit_time_off(payload.worker_id, payload.draft)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List time-off requests by scope: `mine`, `pending` or `all`
pub async fn list_time_off(
    State(state): State<AppState>,
    Query(query): Query<TimeOffQuery>,
) -> ApiResult<impl IntoResponse> {
    let requests = state.service.list_time_off(query.filter()?).await?;
    Ok(Json(requests))
}

pub async fn approve_time_off(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let receipt = state
        .service
        .approve_request(id, payload.reviewer_id)
        .await?;
    Ok(Json(receipt))
}

pub async fn deny_time_off(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> ApiResult<impl IntoResponse> {
    let receipt = state
        .service
        .deny_request(id, payload.reviewer_id, payload.reason)
        .await?;
    Ok(Json(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::TimeOffScope;
    use std::sync::Arc;
    use workforce::demo::{DEMO_SUPERVISOR, DEMO_WORKER};
    use workforce::pin::{PinHashCost, PinHasher};
    use workforce::repositories::MemoryStore;
    use workforce::{FallbackPolicies, ServiceError, WorkforceService};

    fn state() -> AppState {
        let hasher = PinHasher::with_cost(
            "route-test-pepper",
            PinHashCost {
                memory_kib: 64,
                iterations: 1,
            },
        )
        .unwrap();
        let store = MemoryStore::seeded(&hasher, chrono::Utc::now()).unwrap();
        AppState {
            service: WorkforceService::new(
                Arc::new(store),
                Arc::new(mockable::DefaultClock),
                hasher,
                FallbackPolicies::default(),
            ),
        }
    }

    #[tokio::test]
    async fn test_router_builds() {
        let _router = create_router(state());
    }

    #[tokio::test]
    async fn test_health_reports_storage_mode() {
        let response = health_check(State(state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_unknown_pin() {
        let result = authenticate(
            State(state()),
            Json(AuthenticateRequest {
                pin: "987654".to_string(),
            }),
        )
        .await;

        let err = result.err().unwrap();
        assert!(matches!(err, ApiError::Service(ServiceError::InvalidPin)));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_clock_in_returns_created() {
        let response = clock_in(State(state()), Path(DEMO_WORKER.id))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_mine_listing_without_worker_is_bad_request() {
        let result = list_time_off(
            State(state()),
            Query(TimeOffQuery {
                scope: TimeOffScope::Mine,
                worker_id: None,
            }),
        )
        .await;

        let response = result.err().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_second_review_is_conflict() {
        let state = state();
        let pending = state
            .service
            .list_time_off(workforce::repositories::TimeOffFilter::Pending)
            .await
            .unwrap();
        let request_id = pending[0].id;

        let review = || ReviewRequest {
            reviewer_id: DEMO_SUPERVISOR.id,
            reason: None,
        };

        approve_time_off(State(state.clone()), Path(request_id), Json(review()))
            .await
            .unwrap();

        let err = deny_time_off(State(state), Path(request_id), Json(review()))
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
