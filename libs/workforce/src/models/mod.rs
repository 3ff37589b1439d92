//! Workforce domain models

pub mod production;
pub mod punch;
pub mod time_off;
pub mod verification;
pub mod worker;

use thiserror::Error;

// Re-export for convenience
pub use production::{NewProductionLog, ProductionEntry, ProductionLogEntry};
pub use punch::{Punch, PunchPair, PunchType, WorkerStatus};
pub use time_off::{
    NewTimeOffRequest, TimeOffDraft, TimeOffRequest, TimeOffReview, TimeOffStatus, TimeOffType,
};
pub use verification::{IssuedCode, NewVerificationCode, VerificationCode};
pub use worker::{NewWorker, Role, Worker};

/// Returned when a stored or submitted string does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseVariantError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
