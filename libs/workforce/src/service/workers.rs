//! Worker management for the manager console

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::WorkforceService;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewWorker, Role, Worker};
use crate::pin::ADMIN_PIN;
use crate::repositories::StoreError;
use crate::validation::{validate_email, validate_full_name, validate_pin};

/// Details supplied when enrolling a worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRegistration {
    pub pin: String,
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn default_role() -> Role {
    Role::Worker
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl WorkforceService {
    /// Enroll a worker under a unique 6-digit PIN
    pub async fn create_worker(&self, registration: WorkerRegistration) -> ServiceResult<Worker> {
        validate_pin(&registration.pin).map_err(ServiceError::Validation)?;
        if registration.pin == ADMIN_PIN {
            return Err(ServiceError::Validation("PIN is reserved".to_string()));
        }

        let full_name = registration.full_name.trim().to_string();
        validate_full_name(&full_name).map_err(ServiceError::Validation)?;

        let email = non_blank(registration.email);
        if let Some(email) = &email {
            validate_email(email).map_err(ServiceError::Validation)?;
        }

        let new_worker = NewWorker {
            pin_digest: self.hasher.digest(&registration.pin)?,
            full_name,
            role: registration.role,
            email,
            phone: non_blank(registration.phone),
            created_at: self.now(),
        };

        match self.store.insert_worker(new_worker).await {
            Ok(worker) => {
                info!("Created worker {} with role {}", worker.id, worker.role);
                Ok(worker)
            }
            Err(StoreError::Conflict { .. }) => {
                warn!("Rejected worker enrollment with a PIN already in use");
                Err(ServiceError::PinInUse)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Workers ordered by name
    pub async fn list_workers(&self, include_inactive: bool) -> ServiceResult<Vec<Worker>> {
        Ok(self.store.list_workers(include_inactive).await?)
    }

    pub async fn get_worker(&self, worker_id: Uuid) -> ServiceResult<Worker> {
        self.require_worker(worker_id).await
    }

    /// Activate or soft-deactivate a worker; deactivated PINs stop working
    pub async fn set_worker_active(&self, worker_id: Uuid, active: bool) -> ServiceResult<Worker> {
        let worker = self
            .store
            .set_worker_active(worker_id, active, self.now())
            .await?
            .ok_or(ServiceError::WorkerNotFound)?;

        info!("Worker {} active set to {}", worker_id, active);
        Ok(worker)
    }
}
