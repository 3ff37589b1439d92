//! Production log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored production log entry, write-only from the kiosk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionLogEntry {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub task_name: String,
    pub quantity: i32,
    pub timestamp: DateTime<Utc>,
}

/// One line submitted from the kiosk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionEntry {
    pub task_name: String,
    pub quantity: i32,
}

/// Production log insert payload
#[derive(Debug, Clone)]
pub struct NewProductionLog {
    pub worker_id: Uuid,
    pub task_name: String,
    pub quantity: i32,
    pub timestamp: DateTime<Utc>,
}
