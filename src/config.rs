//! Sync engine configuration.
//!
//! Timing knobs with environment-variable overrides. There are no config
//! files; defaults match the production behavior (500ms save debounce, 4s
//! checksum poll, five bootstrap attempts spaced 1s apart).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_POLL_INTERVAL_MS: u64 = 4000;
const DEFAULT_LOAD_RETRIES: u32 = 5;
const DEFAULT_LOAD_RETRY_DELAY_MS: u64 = 1000;

/// Parse an environment variable, falling back to `default` when unset or
/// unparsable.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Timing knobs for the sync engine.
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Quiet window before a scheduled save fires.
    pub debounce_ms: u64,
    /// Interval between remote checksum polls.
    pub poll_interval_ms: u64,
    /// Total load attempts while the store reports the board as absent.
    pub load_retries: u32,
    /// Fixed delay between bootstrap load attempts.
    pub load_retry_delay_ms: u64,
}

impl SyncConfig {
    /// Load config from environment variables, using defaults for anything
    /// unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            debounce_ms: env_parse("SYNC_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
            poll_interval_ms: env_parse("SYNC_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS),
            load_retries: env_parse("SYNC_LOAD_RETRIES", DEFAULT_LOAD_RETRIES),
            load_retry_delay_ms: env_parse("SYNC_LOAD_RETRY_DELAY_MS", DEFAULT_LOAD_RETRY_DELAY_MS),
        }
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn load_retry_delay(&self) -> Duration {
        Duration::from_millis(self.load_retry_delay_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            load_retries: DEFAULT_LOAD_RETRIES,
            load_retry_delay_ms: DEFAULT_LOAD_RETRY_DELAY_MS,
        }
    }
}
