//! Persisted session identity and the key/value seam it is stored behind.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser the store is `localStorage`; in tests it is [`MemoryStore`].
//! The three session keys are always written on login and always cleared
//! together on logout, never individually.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

/// Storage key holding the logged-in user's id.
pub const USER_ID_KEY: &str = "user_id";
/// Storage key holding the display name returned at login.
pub const NICKNAME_KEY: &str = "nickname";
/// Storage key caching the last server-reported point total.
pub const POINTS_KEY: &str = "points";

/// Every key that identifies a session. Cleared together on logout.
pub const SESSION_KEYS: [&str; 3] = [USER_ID_KEY, NICKNAME_KEY, POINTS_KEY];

/// Entry points that precede authentication. The watchdog never runs there.
pub const UNGUARDED_ROUTES: [&str; 2] = ["/login", "/sign-up"];

/// Minimal string key/value storage, shaped after `web_sys::Storage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// The logged-in user as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub nickname: Option<String>,
    pub points: Option<i64>,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), nickname: None, points: None }
    }

    /// Read the identity back; `None` when no non-empty user id is stored.
    pub fn load(store: &impl KeyValueStore) -> Option<Self> {
        let user_id = store.get(USER_ID_KEY).filter(|id| !id.trim().is_empty())?;
        let nickname = store.get(NICKNAME_KEY).filter(|n| !n.is_empty());
        let points = store.get(POINTS_KEY).and_then(|p| p.trim().parse::<i64>().ok());
        Some(Self { user_id, nickname, points })
    }

    /// Persist the identity. Absent optional fields remove their keys so a
    /// previous user's nickname never leaks into a new login.
    pub fn save(&self, store: &impl KeyValueStore) {
        store.set(USER_ID_KEY, &self.user_id);
        match &self.nickname {
            Some(nickname) => store.set(NICKNAME_KEY, nickname),
            None => store.remove(NICKNAME_KEY),
        }
        match self.points {
            Some(points) => store.set(POINTS_KEY, &points.to_string()),
            None => store.remove(POINTS_KEY),
        }
    }

    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.user_id)
    }
}

/// Cache the server-reported point total alongside the identity.
pub fn cache_points(store: &impl KeyValueStore, points: i64) {
    store.set(POINTS_KEY, &points.to_string());
}

/// Remove every session-identifying key.
pub fn clear_session(store: &impl KeyValueStore) {
    for key in SESSION_KEYS {
        store.remove(key);
    }
}

/// Whether `path` is a login/registration entry point.
#[must_use]
pub fn is_unguarded_route(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    UNGUARDED_ROUTES
        .iter()
        .any(|route| path == *route || path.strip_prefix(route).is_some_and(|rest| rest.starts_with('/')))
}

/// Whether a watchdog should be installed for a page at `path`.
///
/// Never on unguarded entry points; elsewhere only when an identity is
/// already persisted.
pub fn should_install(path: &str, store: &impl KeyValueStore) -> bool {
    !is_unguarded_route(path) && Identity::load(store).is_some()
}
