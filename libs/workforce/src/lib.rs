//! Workforce time tracking
//!
//! Domain logic for a shop-floor kiosk: PIN login, clock in/out, production
//! logging, punch history and weekly hours, time-off requests and one-time
//! verification codes.
//!
//! # Modules
//!
//! - `duration`, `pairing`, `weekly`: pure calculations over punches
//! - `models`: domain entities and insert payloads
//! - `repositories`: the storage trait with in-memory and PostgreSQL providers
//! - `service`: validated operations over a store, used by the HTTP layer
//! - `fallback`: per-call-site handling of store failures

pub mod demo;
pub mod duration;
pub mod error;
pub mod fallback;
pub mod models;
pub mod pairing;
pub mod pin;
pub mod repositories;
pub mod service;
pub mod validation;
pub mod weekly;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use fallback::{FallbackPolicies, FallbackPolicy};
pub use service::WorkforceService;
