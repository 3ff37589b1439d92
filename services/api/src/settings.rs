//! Service settings
//!
//! Read from built-in defaults overridden by `PUNCHCLOCK__*` environment
//! variables, e.g. `PUNCHCLOCK__BIND_ADDR` or
//! `PUNCHCLOCK__FALLBACK__TIME_OFF_REVIEW=fail_loud`.

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tracing::warn;
use workforce::FallbackPolicies;
use workforce::pin::{PinHashCost, PinHashError, PinHasher};

const DEFAULT_PIN_PEPPER: &str = "punchclock-demo-pepper";

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    /// Artificial delay added to each in-memory store operation
    pub demo_latency_ms: u64,
    pub pin_pepper: String,
    pub pin_hash_memory_kib: u32,
    pub pin_hash_iterations: u32,
    #[serde(default)]
    pub fallback: FallbackPolicies,
}

impl Settings {
    /// Load settings from defaults and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = PinHashCost::default();

        Config::builder()
            .set_default("bind_addr", "0.0.0.0:3001")?
            .set_default("demo_latency_ms", 0_i64)?
            .set_default("pin_pepper", DEFAULT_PIN_PEPPER)?
            .set_default("pin_hash_memory_kib", i64::from(defaults.memory_kib))?
            .set_default("pin_hash_iterations", i64::from(defaults.iterations))?
            .add_source(
                Environment::with_prefix("PUNCHCLOCK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn demo_latency(&self) -> Duration {
        Duration::from_millis(self.demo_latency_ms)
    }

    /// Build the PIN hasher from the configured pepper and costs
    pub fn pin_hasher(&self) -> Result<PinHasher, PinHashError> {
        if self.pin_pepper == DEFAULT_PIN_PEPPER {
            warn!("Using the built-in PIN pepper; set PUNCHCLOCK__PIN_PEPPER outside demo mode");
        }

        PinHasher::with_cost(
            &self.pin_pepper,
            PinHashCost {
                memory_kib: self.pin_hash_memory_kib,
                iterations: self.pin_hash_iterations,
            },
        )
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("demo_latency_ms", &self.demo_latency_ms)
            .field("pin_hash_memory_kib", &self.pin_hash_memory_kib)
            .field("pin_hash_iterations", &self.pin_hash_iterations)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
