//! One-time verification codes

use chrono::Duration;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use super::WorkforceService;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{IssuedCode, NewVerificationCode};

/// Minutes an issued code stays valid
pub const CODE_TTL_MINUTES: i64 = 10;

fn generate_code() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{value:06}")
}

impl WorkforceService {
    /// Issue a fresh 6-digit code for the worker
    ///
    /// Delivery is left to the caller.
    pub async fn send_verification_code(&self, worker_id: Uuid) -> ServiceResult<IssuedCode> {
        self.require_worker(worker_id).await?;

        let now = self.now();
        let stored = self
            .store
            .insert_verification_code(NewVerificationCode {
                worker_id,
                code: generate_code(),
                expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
                created_at: now,
            })
            .await?;

        info!("Issued verification code for worker {}", worker_id);
        Ok(IssuedCode {
            worker_id,
            code: stored.code,
            expires_at: stored.expires_at,
        })
    }

    /// Check a code against the worker's most recently issued one
    ///
    /// A matching, unexpired code is consumed and cannot be used again.
    /// Issuing a new code supersedes every earlier one.
    pub async fn verify_code(&self, worker_id: Uuid, code: &str) -> ServiceResult<()> {
        let latest = self
            .store
            .latest_code(worker_id)
            .await?
            .filter(|latest| latest.used_at.is_none())
            .ok_or(ServiceError::CodeNotFound)?;

        if latest.code != code.trim() {
            warn!("Verification code mismatch for worker {}", worker_id);
            return Err(ServiceError::CodeMismatch);
        }

        let now = self.now();
        if latest.is_expired(now) {
            warn!("Expired verification code presented for worker {}", worker_id);
            return Err(ServiceError::CodeExpired);
        }

        self.store.mark_code_used(latest.id, now).await?;
        info!("Verified code for worker {}", worker_id);
        Ok(())
    }
}
