//! Watchdog timing configuration.
//!
//! Both durations are fixed at construction. The warning timer fires at
//! `timeout - warning_lead`, so the lead must be strictly shorter than the
//! timeout for the warning to be reachable at all.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

/// Default idle period before forced logout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);
/// Default lead time between the warning prompt and the forced logout.
pub const DEFAULT_WARNING_LEAD: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("idle timeout must be greater than zero")]
    ZeroTimeout,
    #[error("warning lead ({lead_ms}ms) must be shorter than the idle timeout ({timeout_ms}ms)")]
    LeadNotShorter { lead_ms: u64, timeout_ms: u64 },
}

/// Timing parameters for [`crate::Watchdog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogConfig {
    timeout: Duration,
    warning_lead: Duration,
}

impl WatchdogConfig {
    /// Build a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `timeout` is zero or `warning_lead` is not
    /// strictly shorter than `timeout`.
    pub fn new(timeout: Duration, warning_lead: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if warning_lead >= timeout {
            return Err(ConfigError::LeadNotShorter {
                lead_ms: duration_ms(warning_lead),
                timeout_ms: duration_ms(timeout),
            });
        }
        Ok(Self { timeout, warning_lead })
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn warning_lead(&self) -> Duration {
        self.warning_lead
    }

    /// Delay from the last activity until the warning prompt.
    #[must_use]
    pub fn warning_after(&self) -> Duration {
        self.timeout - self.warning_lead
    }

    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        duration_ms(self.timeout)
    }

    #[must_use]
    pub fn warning_after_ms(&self) -> u64 {
        duration_ms(self.warning_after())
    }

    /// Whole minutes of the idle timeout, for user-facing messages.
    #[must_use]
    pub fn timeout_minutes(&self) -> u64 {
        self.timeout.as_secs() / 60
    }

    /// Whole minutes of warning lead, for the warning prompt copy.
    #[must_use]
    pub fn warning_lead_minutes(&self) -> u64 {
        self.warning_lead.as_secs() / 60
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, warning_lead: DEFAULT_WARNING_LEAD }
    }
}

pub(crate) fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
