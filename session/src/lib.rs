//! Idle-session watchdog and persisted identity for the points center client.
//!
//! This crate owns the session lifecycle independent of any page content:
//! which storage keys identify a logged-in user, when a watchdog should be
//! installed, and the idle -> warning -> forced-logout state machine. It has no
//! browser dependency; the `client` crate drives it with real timers, DOM
//! activity events, and `localStorage`.

pub mod config;
pub mod store;
pub mod watchdog;

pub use config::{ConfigError, WatchdogConfig};
pub use store::{Identity, KeyValueStore, MemoryStore, SESSION_KEYS, clear_session, should_install};
pub use watchdog::{Command, LogoutReason, SessionInfo, Watchdog, WatchdogState};
