use super::*;

#[test]
fn defaults_match_production_timings() {
    let config = SyncConfig::default();
    assert_eq!(config.debounce_ms, 500);
    assert_eq!(config.poll_interval_ms, 4000);
    assert_eq!(config.load_retries, 5);
    assert_eq!(config.load_retry_delay_ms, 1000);
}

#[test]
fn duration_helpers() {
    let config = SyncConfig::default();
    assert_eq!(config.debounce(), Duration::from_millis(500));
    assert_eq!(config.poll_interval(), Duration::from_millis(4000));
    assert_eq!(config.load_retry_delay(), Duration::from_millis(1000));
}

#[test]
fn env_parse_falls_back_when_unset() {
    assert_eq!(env_parse("BOARDSYNC_TEST_UNSET_KNOB", 42_u64), 42);
}

#[test]
fn from_env_without_overrides_equals_defaults() {
    let from_env = SyncConfig::from_env();
    let defaults = SyncConfig::default();
    assert_eq!(from_env.debounce_ms, defaults.debounce_ms);
    assert_eq!(from_env.poll_interval_ms, defaults.poll_interval_ms);
    assert_eq!(from_env.load_retries, defaults.load_retries);
    assert_eq!(from_env.load_retry_delay_ms, defaults.load_retry_delay_ms);
}
