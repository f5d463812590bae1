use std::time::Duration;

use super::*;

const MIN: u64 = 60_000;

fn config() -> WatchdogConfig {
    WatchdogConfig::default()
}

fn armed_generation(commands: &[Command]) -> u64 {
    commands
        .iter()
        .find_map(|c| match c {
            Command::Arm { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("arm command")
}

// =============================================================
// start / arm
// =============================================================

#[test]
fn start_arms_warning_and_logout_timers() {
    let (watchdog, commands) = Watchdog::start(config(), 1_000);
    assert_eq!(watchdog.state(), WatchdogState::Active);
    assert_eq!(
        commands,
        vec![Command::Arm { generation: 1, warning_in_ms: Some(25 * MIN), logout_in_ms: 30 * MIN }]
    );
}

#[test]
fn activity_rearms_with_new_generation() {
    let (mut watchdog, _) = Watchdog::start(config(), 0);
    let commands = watchdog.record_activity(10 * MIN);
    assert_eq!(
        commands,
        vec![Command::Arm { generation: 2, warning_in_ms: Some(25 * MIN), logout_in_ms: 30 * MIN }]
    );
    assert_eq!(watchdog.last_activity_ms(), 10 * MIN);
}

// =============================================================
// warning
// =============================================================

#[test]
fn warning_timer_moves_active_to_warning() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let generation = armed_generation(&commands);
    assert_eq!(watchdog.warning_elapsed(generation, 25 * MIN), vec![Command::ShowWarning]);
    assert_eq!(watchdog.state(), WatchdogState::Warning);
    assert!(watchdog.warning_shown());
}

#[test]
fn stale_warning_timer_is_ignored() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let stale = armed_generation(&commands);
    watchdog.record_activity(MIN);
    assert!(watchdog.warning_elapsed(stale, 25 * MIN).is_empty());
    assert_eq!(watchdog.state(), WatchdogState::Active);
}

#[test]
fn early_warning_timer_rearms_instead_of_warning() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let generation = armed_generation(&commands);
    let rearm = watchdog.warning_elapsed(generation, 20 * MIN);
    assert_eq!(
        rearm,
        vec![Command::Arm { generation: 2, warning_in_ms: Some(5 * MIN), logout_in_ms: 10 * MIN }]
    );
    assert_eq!(watchdog.state(), WatchdogState::Active);
}

#[test]
fn activity_during_warning_hides_warning_and_returns_to_active() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    watchdog.warning_elapsed(armed_generation(&commands), 25 * MIN);

    let commands = watchdog.record_activity(26 * MIN);
    assert_eq!(commands[0], Command::HideWarning);
    assert!(matches!(commands[1], Command::Arm { logout_in_ms, .. } if logout_in_ms == 30 * MIN));
    assert_eq!(watchdog.state(), WatchdogState::Active);
}

#[test]
fn extend_behaves_like_activity() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    watchdog.warning_elapsed(armed_generation(&commands), 25 * MIN);
    let commands = watchdog.extend(27 * MIN);
    assert_eq!(commands.first(), Some(&Command::HideWarning));
    assert_eq!(watchdog.state(), WatchdogState::Active);
    assert_eq!(watchdog.last_activity_ms(), 27 * MIN);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_timer_logs_out_idle_from_active() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let commands = watchdog.logout_elapsed(armed_generation(&commands), 30 * MIN);
    assert_eq!(commands, vec![Command::Logout { reason: LogoutReason::Idle }]);
    assert_eq!(watchdog.state(), WatchdogState::LoggedOut(LogoutReason::Idle));
}

#[test]
fn logout_timer_from_warning_hides_prompt_first() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let generation = armed_generation(&commands);
    watchdog.warning_elapsed(generation, 25 * MIN);
    let commands = watchdog.logout_elapsed(generation, 30 * MIN);
    assert_eq!(commands, vec![Command::HideWarning, Command::Logout { reason: LogoutReason::Idle }]);
}

#[test]
fn early_logout_timer_rearms_for_remainder() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let commands = watchdog.logout_elapsed(armed_generation(&commands), 29 * MIN);
    assert_eq!(
        commands,
        vec![Command::Arm { generation: 2, warning_in_ms: None, logout_in_ms: MIN }]
    );
    assert_eq!(watchdog.state(), WatchdogState::Active);
}

#[test]
fn touch_defers_logout_without_rearming() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let generation = armed_generation(&commands);
    watchdog.touch(500);
    assert_eq!(watchdog.generation(), generation);
    assert_eq!(watchdog.last_activity_ms(), 500);

    let commands = watchdog.logout_elapsed(generation, 30 * MIN);
    assert_eq!(
        commands,
        vec![Command::Arm { generation: generation + 1, warning_in_ms: None, logout_in_ms: 500 }]
    );
    assert_eq!(watchdog.state(), WatchdogState::Active);
}

#[test]
fn touch_after_idle_period_changes_nothing() {
    let (mut watchdog, _) = Watchdog::start(config(), 0);
    watchdog.touch(31 * MIN);
    assert_eq!(watchdog.last_activity_ms(), 0);
}

#[test]
fn logout_now_uses_requested_reason() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    watchdog.warning_elapsed(armed_generation(&commands), 25 * MIN);
    let commands = watchdog.logout_now();
    assert_eq!(
        commands,
        vec![Command::HideWarning, Command::Logout { reason: LogoutReason::UserRequested }]
    );
}

#[test]
fn logout_is_idempotent() {
    let (mut watchdog, commands) = Watchdog::start(config(), 0);
    let generation = armed_generation(&commands);
    assert_eq!(watchdog.logout_now().len(), 1);
    assert!(watchdog.logout_now().is_empty());
    assert!(watchdog.logout_elapsed(generation, 40 * MIN).is_empty());
    assert!(watchdog.record_activity(41 * MIN).is_empty());
    assert!(watchdog.extend(42 * MIN).is_empty());
    assert_eq!(watchdog.state(), WatchdogState::LoggedOut(LogoutReason::UserRequested));
}

#[test]
fn activity_after_missed_timers_logs_out_immediately() {
    let (mut watchdog, _) = Watchdog::start(config(), 0);
    let commands = watchdog.record_activity(45 * MIN);
    assert_eq!(commands, vec![Command::Logout { reason: LogoutReason::Idle }]);
}

#[test]
fn activity_with_backwards_clock_keeps_latest_timestamp() {
    let (mut watchdog, _) = Watchdog::start(config(), 10 * MIN);
    watchdog.record_activity(5 * MIN);
    assert_eq!(watchdog.last_activity_ms(), 10 * MIN);
}

// =============================================================
// messages / info
// =============================================================

#[test]
fn idle_message_mentions_configured_minutes() {
    let cfg = WatchdogConfig::new(Duration::from_secs(600), Duration::from_secs(60)).expect("config");
    let message = LogoutReason::Idle.message(&cfg);
    assert!(message.contains("10 minutes"), "{message}");
    assert_eq!(LogoutReason::UserRequested.message(&cfg), "You have been logged out.");
}

#[test]
fn info_reports_idle_and_remaining_time() {
    let (watchdog, _) = Watchdog::start(config(), 0);
    let info = watchdog.info(90_000);
    assert_eq!(info.idle_secs, 90);
    assert_eq!(info.secs_until_logout, 30 * 60 - 90);
    assert!(!info.warning_shown);
    assert_eq!(info.state, WatchdogState::Active);
}

#[test]
fn info_serializes_state_with_reason() {
    let (mut watchdog, _) = Watchdog::start(config(), 0);
    watchdog.logout_now();
    let json = serde_json::to_value(watchdog.info(MIN)).expect("json");
    assert_eq!(json["state"]["state"], "logged_out");
    assert_eq!(json["state"]["reason"], "user_requested");
    assert_eq!(json["secs_until_logout"], 29 * 60);
}
