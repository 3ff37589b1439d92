//! Application state shared across handlers

use workforce::WorkforceService;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: WorkforceService,
}
