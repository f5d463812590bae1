//! End-to-end idle-timeout behavior with a simulated timer host.
//!
//! The host mirrors what the browser adapter does with each [`Command`]:
//! timers are recorded with their generation and fired in deadline order as
//! simulated time advances; `Logout` clears the session keys.

use session::{Command, Identity, KeyValueStore, LogoutReason, MemoryStore, SESSION_KEYS, Watchdog, WatchdogConfig};

const MIN: u64 = 60_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKind {
    Warning,
    Logout,
}

struct Host {
    now: u64,
    watchdog: Watchdog,
    timers: Vec<(u64, TimerKind, u64)>,
    store: MemoryStore,
    logouts: Vec<(u64, LogoutReason)>,
    warning_visible: bool,
}

impl Host {
    fn start(config: WatchdogConfig) -> Self {
        let store = MemoryStore::new();
        let mut identity = Identity::new("alice");
        identity.nickname = Some("Alice".to_owned());
        identity.points = Some(100);
        identity.save(&store);

        let (watchdog, commands) = Watchdog::start(config, 0);
        let mut host = Self { now: 0, watchdog, timers: Vec::new(), store, logouts: Vec::new(), warning_visible: false };
        host.apply(commands);
        host
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Arm { generation, warning_in_ms, logout_in_ms } => {
                    self.timers.clear();
                    if let Some(delay) = warning_in_ms {
                        self.timers.push((self.now + delay, TimerKind::Warning, generation));
                    }
                    self.timers.push((self.now + logout_in_ms, TimerKind::Logout, generation));
                }
                Command::ShowWarning => self.warning_visible = true,
                Command::HideWarning => self.warning_visible = false,
                Command::Logout { reason } => {
                    session::clear_session(&self.store);
                    self.timers.clear();
                    self.logouts.push((self.now, reason));
                }
            }
        }
    }

    fn advance_to(&mut self, until: u64) {
        loop {
            self.timers.sort_by_key(|(at, _, _)| *at);
            let Some(&(at, kind, generation)) = self.timers.first() else {
                break;
            };
            if at > until {
                break;
            }
            self.timers.remove(0);
            self.now = at;
            let commands = match kind {
                TimerKind::Warning => self.watchdog.warning_elapsed(generation, at),
                TimerKind::Logout => self.watchdog.logout_elapsed(generation, at),
            };
            self.apply(commands);
        }
        self.now = until;
    }

    fn activity(&mut self) {
        let commands = self.watchdog.record_activity(self.now);
        self.apply(commands);
    }
}

#[test]
fn idle_sessions_log_out_exactly_once_and_clear_keys() {
    for idle_minutes in [30, 31, 45, 120, 24 * 60] {
        let mut host = Host::start(WatchdogConfig::default());
        host.advance_to(idle_minutes * MIN);

        assert_eq!(host.logouts, vec![(30 * MIN, LogoutReason::Idle)], "idle {idle_minutes}m");
        for key in SESSION_KEYS {
            assert!(host.store.get(key).is_none(), "{key} survived logout");
        }
        assert!(!host.warning_visible);
    }
}

#[test]
fn warning_appears_before_logout() {
    let mut host = Host::start(WatchdogConfig::default());
    host.advance_to(25 * MIN - 1);
    assert!(!host.warning_visible);
    host.advance_to(25 * MIN);
    assert!(host.warning_visible);
    assert!(host.logouts.is_empty());
}

#[test]
fn activity_in_warning_restarts_full_timeout() {
    let mut host = Host::start(WatchdogConfig::default());
    host.advance_to(27 * MIN);
    assert!(host.warning_visible);

    host.activity();
    assert!(!host.warning_visible);

    host.advance_to(27 * MIN + 30 * MIN - 1);
    assert!(host.logouts.is_empty(), "logged out before a full timeout after activity");

    host.advance_to(27 * MIN + 30 * MIN);
    assert_eq!(host.logouts, vec![(57 * MIN, LogoutReason::Idle)]);
}

#[test]
fn steady_activity_keeps_session_alive() {
    let mut host = Host::start(WatchdogConfig::default());
    for minute in (10..=600).step_by(10) {
        host.advance_to(minute * MIN);
        host.activity();
    }
    assert!(host.logouts.is_empty());
    assert!(Identity::load(&host.store).is_some());
}

#[test]
fn activity_after_suspended_tab_logs_out_on_wake() {
    let mut host = Host::start(WatchdogConfig::default());
    // Simulate a suspended tab: time passes without timers firing.
    host.timers.clear();
    host.now = 50 * MIN;
    host.activity();
    assert_eq!(host.logouts, vec![(50 * MIN, LogoutReason::Idle)]);
    assert!(Identity::load(&host.store).is_none());
}
