//! Demo-mode fixtures
//!
//! Seed data for the in-memory store, and the substitute data served when a
//! degraded read hides a backend failure.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{
    NewTimeOffRequest, NewWorker, Role, TimeOffDraft, TimeOffRequest, TimeOffReview, TimeOffType,
    Worker,
};
use crate::pin::{PinHashError, PinHasher};
use crate::repositories::{TimeOffFilter, memory::select_time_off};

/// A seeded demo account and the PIN that unlocks it at the kiosk
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub id: Uuid,
    pub pin: &'static str,
    pub full_name: &'static str,
    pub role: Role,
}

pub const DEMO_WORKER: DemoAccount = DemoAccount {
    id: Uuid::from_u128(0x6f1c_2a4e_0001_4000_8000_0000_0000_0001),
    pin: "111111",
    full_name: "Jamie Rivera",
    role: Role::Worker,
};

pub const DEMO_SUPERVISOR: DemoAccount = DemoAccount {
    id: Uuid::from_u128(0x6f1c_2a4e_0001_4000_8000_0000_0000_0002),
    pin: "222222",
    full_name: "Sam Okafor",
    role: Role::Supervisor,
};

pub const DEMO_MANAGER: DemoAccount = DemoAccount {
    id: Uuid::from_u128(0x6f1c_2a4e_0001_4000_8000_0000_0000_0003),
    pin: "333333",
    full_name: "Priya Natarajan",
    role: Role::Manager,
};

pub const DEMO_ACCOUNTS: [DemoAccount; 3] = [DEMO_WORKER, DEMO_SUPERVISOR, DEMO_MANAGER];

const DEMO_PENDING_REQUEST: Uuid = Uuid::from_u128(0x6f1c_2a4e_0002_4000_8000_0000_0000_0001);
const DEMO_APPROVED_REQUEST: Uuid = Uuid::from_u128(0x6f1c_2a4e_0002_4000_8000_0000_0000_0002);

/// Demo workers with their PIN digests computed by `hasher`
pub fn demo_workers(hasher: &PinHasher, now: DateTime<Utc>) -> Result<Vec<Worker>, PinHashError> {
    DEMO_ACCOUNTS
        .iter()
        .map(|account| {
            let new_worker = NewWorker {
                pin_digest: hasher.digest(account.pin)?,
                full_name: account.full_name.to_string(),
                role: account.role,
                email: None,
                phone: None,
                created_at: now,
            };
            Ok(Worker::from_new(account.id, new_worker))
        })
        .collect()
}

/// One pending and one approved request for the demo worker
pub fn demo_time_off(now: DateTime<Utc>) -> Vec<TimeOffRequest> {
    let today = now.date_naive();

    let pending = TimeOffRequest::pending(
        DEMO_PENDING_REQUEST,
        NewTimeOffRequest {
            worker_id: DEMO_WORKER.id,
            draft: TimeOffDraft {
                request_type: TimeOffType::Vacation,
                start_date: today + Duration::days(14),
                end_date: today + Duration::days(18),
                paid_hours: 40.0,
                unpaid_hours: 0.0,
                is_excused: true,
                is_planned: true,
                comments: Some("Summer break".to_string()),
            },
            submitted_at: now - Duration::days(2),
        },
    );

    let mut approved = TimeOffRequest::pending(
        DEMO_APPROVED_REQUEST,
        NewTimeOffRequest {
            worker_id: DEMO_WORKER.id,
            draft: TimeOffDraft {
                request_type: TimeOffType::Sick,
                start_date: today - Duration::days(10),
                end_date: today - Duration::days(10),
                paid_hours: 8.0,
                unpaid_hours: 0.0,
                is_excused: true,
                is_planned: false,
                comments: None,
            },
            submitted_at: now - Duration::days(10),
        },
    );
    approved.apply_review(TimeOffReview::approve(
        DEMO_SUPERVISOR.id,
        now - Duration::days(9),
    ));

    vec![pending, approved]
}

/// Substitute listing served when a degraded time-off read fails
///
/// For a worker's own listing the demo requests are attributed to that
/// worker so their dashboard still renders.
pub fn fallback_time_off(filter: TimeOffFilter, now: DateTime<Utc>) -> Vec<TimeOffRequest> {
    let mut requests = demo_time_off(now);
    if let TimeOffFilter::Worker(worker_id) = filter {
        for request in &mut requests {
            request.worker_id = worker_id;
        }
    }
    select_time_off(requests.iter(), filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOffStatus;
    use crate::pin::test_hasher;

    #[test]
    fn test_demo_workers_are_active_and_hashed() {
        let hasher = test_hasher();
        let workers = demo_workers(&hasher, Utc::now()).unwrap();

        assert_eq!(workers.len(), 3);
        for (worker, account) in workers.iter().zip(DEMO_ACCOUNTS.iter()) {
            assert!(worker.is_active);
            assert_eq!(worker.pin_digest, hasher.digest(account.pin).unwrap());
        }
    }

    #[test]
    fn test_fallback_for_worker_is_attributed_to_them() {
        let worker_id = Uuid::new_v4();
        let requests = fallback_time_off(TimeOffFilter::Worker(worker_id), Utc::now());

        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.worker_id == worker_id));
    }

    #[test]
    fn test_fallback_pending_only_has_pending() {
        let requests = fallback_time_off(TimeOffFilter::Pending, Utc::now());

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].status, TimeOffStatus::Pending);
    }
}
