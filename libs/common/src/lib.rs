//! Common library for the Punchclock application
//!
//! This crate provides shared functionality used across the Punchclock
//! crates: PostgreSQL configuration, connection pooling, health checks and
//! database error types.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     if let Some(config) = DatabaseConfig::from_env()? {
//!         let pool = init_pool(&config).await?;
//!         println!("Database health check: {}", health_check(&pool).await);
//!     }
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
