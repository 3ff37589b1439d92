//! Punch model and derived per-day pairs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::ParseVariantError;

/// Direction of a punch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchType {
    In,
    Out,
}

impl PunchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchType::In => "IN",
            PunchType::Out => "OUT",
        }
    }
}

impl fmt::Display for PunchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PunchType {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(PunchType::In),
            "OUT" => Ok(PunchType::Out),
            other => Err(ParseVariantError::new("punch type", other)),
        }
    }
}

/// Punch entity, append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    pub id: Uuid,
    pub worker_id: Uuid,
    #[serde(rename = "type")]
    pub punch_type: PunchType,
    pub timestamp: DateTime<Utc>,
}

/// First IN and last OUT of a calendar date
///
/// Derived by [`crate::pairing::pair_punches`], never stored. `total_ms` is 0
/// unless both ends are present and may be negative when the day's last OUT
/// precedes its first IN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchPair {
    pub date: NaiveDate,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub total_ms: i64,
}

/// Current clock state of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStatus {
    pub is_clocked_in: bool,
    pub clock_in_time: Option<DateTime<Utc>>,
}

impl WorkerStatus {
    /// Derive the status from the worker's most recent punch
    pub fn from_latest(latest: Option<&Punch>) -> Self {
        match latest {
            Some(punch) if punch.punch_type == PunchType::In => Self {
                is_clocked_in: true,
                clock_in_time: Some(punch.timestamp),
            },
            _ => Self {
                is_clocked_in: false,
                clock_in_time: None,
            },
        }
    }
}
