//! Client configuration.
//!
//! DESIGN
//! ======
//! The API base is baked in at build time from `POINTS_API_BASE`; an empty
//! base means the backend is served from the same origin as the app.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use session::WatchdogConfig;

pub const DEFAULT_RANKING_INTERVAL: Duration = Duration::from_secs(30);
pub const LOGIN_PATH: &str = "/login";
pub const SIGN_UP_PATH: &str = "/sign-up";
pub const HOME_PATH: &str = "/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub ranking_interval: Duration,
    pub login_path: &'static str,
    pub home_path: &'static str,
    pub watchdog: WatchdogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            ranking_interval: DEFAULT_RANKING_INTERVAL,
            login_path: LOGIN_PATH,
            home_path: HOME_PATH,
            watchdog: WatchdogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build-time configuration.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::with_api_base(option_env!("POINTS_API_BASE").unwrap_or_default())
    }

    #[must_use]
    pub fn with_api_base(base: &str) -> Self {
        Self { api_base: normalize_base(base), ..Self::default() }
    }

    /// Absolute (or origin-relative) URL for an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_owned()
}

/// Process-wide configuration, resolved once.
#[must_use]
pub fn app() -> &'static AppConfig {
    static CONFIG: std::sync::LazyLock<AppConfig> = std::sync::LazyLock::new(AppConfig::from_build_env);
    &CONFIG
}
