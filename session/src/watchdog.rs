//! Idle-session watchdog: activity tracking, warning prompt, forced logout.
//!
//! DESIGN
//! ======
//! The watchdog is a pure state machine over millisecond timestamps. It never
//! touches a clock, timer, or storage itself; every operation returns the
//! [`Command`]s the host adapter must perform (arm timers, show or hide the
//! warning, perform the logout side effects).
//!
//! ```text
//!            activity / extend                 activity / extend
//!          +-------------------+             +------------------+
//!          v                   |             v                  |
//!      [Active] --warning timer--> [Warning] ---------------------+
//!          |                          |   \
//!   logout timer                logout timer  logout now
//!          |                          |       |
//!          v                          v       v
//!    [LoggedOut(Idle)] <--------------+   [LoggedOut(UserRequested)]
//! ```
//!
//! Timer callbacks carry the generation they were armed with. Re-arming bumps
//! the generation, so a timer that fires after being superseded is ignored
//! even if the host never cancelled it.
//!
//! A suspended tab can miss timers entirely. Every activity signal therefore
//! first checks elapsed wall time and logs out immediately if the idle period
//! has already passed.

#[cfg(test)]
#[path = "watchdog_test.rs"]
mod watchdog_test;

use serde::Serialize;

use crate::config::WatchdogConfig;

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutReason {
    /// No activity for the whole idle timeout.
    Idle,
    /// The user chose "log out now" from the warning prompt.
    UserRequested,
}

impl LogoutReason {
    /// Blocking notification shown before redirecting to login.
    #[must_use]
    pub fn message(self, config: &WatchdogConfig) -> String {
        match self {
            Self::Idle => format!(
                "You have been logged out automatically.\nThere was no activity for {} minutes, so your session was closed for security.",
                config.timeout_minutes()
            ),
            Self::UserRequested => "You have been logged out.".to_owned(),
        }
    }
}

/// Watchdog lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum WatchdogState {
    Active,
    Warning,
    LoggedOut(LogoutReason),
}

/// Side effects requested by the watchdog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace any armed timers with a warning timer and a logout timer.
    /// Either may be `None` when that deadline is already behind us.
    Arm { generation: u64, warning_in_ms: Option<u64>, logout_in_ms: u64 },
    /// Display the idle-warning prompt.
    ShowWarning,
    /// Dismiss the idle-warning prompt.
    HideWarning,
    /// Clear session keys, drop timers, notify, and redirect to login.
    Logout { reason: LogoutReason },
}

/// Debug snapshot of the session timers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub last_activity_ms: u64,
    pub idle_secs: u64,
    pub secs_until_logout: u64,
    pub warning_shown: bool,
    pub state: WatchdogState,
}

/// The idle-session state machine.
#[derive(Debug, Clone)]
pub struct Watchdog {
    config: WatchdogConfig,
    state: WatchdogState,
    last_activity_ms: u64,
    generation: u64,
}

impl Watchdog {
    /// Start tracking with `now_ms` as the first activity.
    #[must_use]
    pub fn start(config: WatchdogConfig, now_ms: u64) -> (Self, Vec<Command>) {
        let mut watchdog = Self { config, state: WatchdogState::Active, last_activity_ms: now_ms, generation: 0 };
        log::info!(
            "session watchdog started; auto-logout after {} minutes idle",
            config.timeout_minutes()
        );
        let arm = watchdog.arm(now_ms);
        (watchdog, vec![arm])
    }

    #[must_use]
    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> WatchdogState {
        self.state
    }

    #[must_use]
    pub fn is_logged_out(&self) -> bool {
        matches!(self.state, WatchdogState::LoggedOut(_))
    }

    #[must_use]
    pub fn warning_shown(&self) -> bool {
        self.state == WatchdogState::Warning
    }

    #[must_use]
    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    /// Generation of the currently armed timers.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A qualifying user-activity signal (pointer, key, scroll, touch, focus,
    /// tab becoming visible).
    pub fn record_activity(&mut self, now_ms: u64) -> Vec<Command> {
        if self.is_logged_out() {
            return Vec::new();
        }
        if self.idle_elapsed(now_ms) {
            log::info!("session idle period elapsed while timers were suspended");
            return self.logout(LogoutReason::Idle);
        }

        let mut commands = Vec::with_capacity(2);
        if self.state == WatchdogState::Warning {
            commands.push(Command::HideWarning);
        }
        self.state = WatchdogState::Active;
        self.last_activity_ms = self.last_activity_ms.max(now_ms);
        commands.push(self.arm(now_ms));
        commands
    }

    /// Record activity without re-arming.
    ///
    /// For hosts that coalesce bursts of signals: the armed timers stay as
    /// they are, and whichever fires first re-arms for the remainder because
    /// the idle period has not elapsed. No-op once logged out or idle.
    pub fn touch(&mut self, now_ms: u64) {
        if self.is_logged_out() || self.idle_elapsed(now_ms) {
            return;
        }
        self.last_activity_ms = self.last_activity_ms.max(now_ms);
    }

    /// "Extend session" from the warning prompt. Counts as activity.
    pub fn extend(&mut self, now_ms: u64) -> Vec<Command> {
        if self.state == WatchdogState::Warning {
            log::info!("session extended from warning prompt");
        }
        self.record_activity(now_ms)
    }

    /// The warning timer armed with `generation` fired.
    pub fn warning_elapsed(&mut self, generation: u64, now_ms: u64) -> Vec<Command> {
        if generation != self.generation || self.state != WatchdogState::Active {
            return Vec::new();
        }
        if self.idle_elapsed(now_ms) {
            return self.logout(LogoutReason::Idle);
        }
        if now_ms.saturating_sub(self.last_activity_ms) < self.config.warning_after_ms() {
            return vec![self.arm(now_ms)];
        }
        self.state = WatchdogState::Warning;
        log::info!(
            "session idle warning shown; logout in {} minutes",
            self.config.warning_lead_minutes()
        );
        vec![Command::ShowWarning]
    }

    /// The logout timer armed with `generation` fired.
    ///
    /// A timer that fires before the idle period has truly elapsed (clock
    /// skew, coarse timers) re-arms for the remainder instead of logging out.
    pub fn logout_elapsed(&mut self, generation: u64, now_ms: u64) -> Vec<Command> {
        if generation != self.generation || self.is_logged_out() {
            return Vec::new();
        }
        if !self.idle_elapsed(now_ms) {
            return vec![self.arm(now_ms)];
        }
        self.logout(LogoutReason::Idle)
    }

    /// "Log out now" from the warning prompt.
    pub fn logout_now(&mut self) -> Vec<Command> {
        self.logout(LogoutReason::UserRequested)
    }

    /// Snapshot for the console debug helper.
    #[must_use]
    pub fn info(&self, now_ms: u64) -> SessionInfo {
        let idle_ms = now_ms.saturating_sub(self.last_activity_ms);
        SessionInfo {
            last_activity_ms: self.last_activity_ms,
            idle_secs: idle_ms / 1000,
            secs_until_logout: self.config.timeout_ms().saturating_sub(idle_ms) / 1000,
            warning_shown: self.warning_shown(),
            state: self.state,
        }
    }

    fn idle_elapsed(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_activity_ms) >= self.config.timeout_ms()
    }

    fn arm(&mut self, now_ms: u64) -> Command {
        self.generation += 1;
        let idle_ms = now_ms.saturating_sub(self.last_activity_ms);
        let warning_at = self.config.warning_after_ms();
        let warning_in_ms = (self.state == WatchdogState::Active && idle_ms < warning_at).then(|| warning_at - idle_ms);
        Command::Arm {
            generation: self.generation,
            warning_in_ms,
            logout_in_ms: self.config.timeout_ms().saturating_sub(idle_ms),
        }
    }

    fn logout(&mut self, reason: LogoutReason) -> Vec<Command> {
        if self.is_logged_out() {
            return Vec::new();
        }
        let mut commands = Vec::with_capacity(2);
        if self.state == WatchdogState::Warning {
            commands.push(Command::HideWarning);
        }
        self.state = WatchdogState::LoggedOut(reason);
        self.generation += 1;
        log::info!("session logged out ({reason:?})");
        commands.push(Command::Logout { reason });
        commands
    }
}
