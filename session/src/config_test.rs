use super::*;

#[test]
fn default_is_thirty_minutes_with_five_minute_warning() {
    let config = WatchdogConfig::default();
    assert_eq!(config.timeout(), Duration::from_secs(1800));
    assert_eq!(config.warning_lead(), Duration::from_secs(300));
    assert_eq!(config.warning_after(), Duration::from_secs(1500));
    assert_eq!(config.timeout_minutes(), 30);
    assert_eq!(config.warning_lead_minutes(), 5);
}

#[test]
fn millisecond_accessors_match_durations() {
    let config = WatchdogConfig::new(Duration::from_secs(10), Duration::from_secs(4)).expect("config");
    assert_eq!(config.timeout_ms(), 10_000);
    assert_eq!(config.warning_after_ms(), 6_000);
}

#[test]
fn zero_timeout_is_rejected() {
    let err = WatchdogConfig::new(Duration::ZERO, Duration::ZERO).expect_err("zero timeout");
    assert_eq!(err, ConfigError::ZeroTimeout);
}

#[test]
fn lead_equal_to_timeout_is_rejected() {
    let err = WatchdogConfig::new(Duration::from_secs(60), Duration::from_secs(60)).expect_err("lead too long");
    assert_eq!(err, ConfigError::LeadNotShorter { lead_ms: 60_000, timeout_ms: 60_000 });
}

#[test]
fn zero_lead_is_allowed() {
    let config = WatchdogConfig::new(Duration::from_secs(60), Duration::ZERO).expect("config");
    assert_eq!(config.warning_after(), config.timeout());
}
