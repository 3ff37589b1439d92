//! Worker model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::ParseVariantError;

/// Worker role, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Worker,
    Supervisor,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Worker => "worker",
            Role::Supervisor => "supervisor",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may approve or deny time-off requests
    pub fn can_review(&self) -> bool {
        *self >= Role::Supervisor
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "worker" => Ok(Role::Worker),
            "supervisor" => Ok(Role::Supervisor),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(ParseVariantError::new("role", other)),
        }
    }
}

/// Worker entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: Uuid,
    /// Keyed digest of the 6-digit PIN; never leaves the service
    #[serde(skip)]
    pub pin_digest: String,
    pub full_name: String,
    pub role: Role,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New worker creation payload
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub pin_digest: String,
    pub full_name: String,
    pub role: Role,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Worker {
    /// Materialise a freshly inserted, active worker
    pub fn from_new(id: Uuid, new: NewWorker) -> Self {
        Self {
            id,
            pin_digest: new.pin_digest,
            full_name: new.full_name,
            role: new.role,
            email: new.email,
            phone: new.phone,
            is_active: true,
            created_at: new.created_at,
            updated_at: new.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_storage_string() {
        for role in [Role::Worker, Role::Supervisor, Role::Manager, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_only_supervisors_and_above_review() {
        assert!(!Role::Worker.can_review());
        assert!(Role::Supervisor.can_review());
        assert!(Role::Manager.can_review());
        assert!(Role::Admin.can_review());
    }

    #[test]
    fn test_pin_digest_is_not_serialized() {
        let now = Utc::now();
        let worker = Worker::from_new(
            Uuid::new_v4(),
            NewWorker {
                pin_digest: "secret".to_string(),
                full_name: "Ada".to_string(),
                role: Role::Worker,
                email: None,
                phone: None,
                created_at: now,
            },
        );

        let json = serde_json::to_value(&worker).unwrap();
        assert!(json.get("pin_digest").is_none());
        assert_eq!(json["role"], "worker");
        assert_eq!(json["is_active"], true);
    }
}
