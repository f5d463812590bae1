#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::store::cache_points;
use session::{Identity, KeyValueStore, clear_session};

/// The logged-in user as last read from storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub identity: Option<Identity>,
}

impl AuthState {
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self { identity: Identity::load(store) }
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.user_id.as_str())
    }

    pub fn nickname(&self) -> Option<&str> {
        self.identity.as_ref().and_then(|identity| identity.nickname.as_deref())
    }

    pub fn points(&self) -> Option<i64> {
        self.identity.as_ref().and_then(|identity| identity.points)
    }

    /// Nickname when known, otherwise the user id.
    pub fn display_name(&self) -> Option<&str> {
        self.identity.as_ref().map(Identity::display_name)
    }

    /// Persist a successful login. The backend may not know a display name.
    pub fn sign_in(&mut self, store: &impl KeyValueStore, user_id: &str, nickname: Option<&str>) {
        let mut identity = Identity::new(user_id);
        identity.nickname = nickname.filter(|name| !name.is_empty()).map(str::to_owned);
        identity.save(store);
        self.identity = Some(identity);
    }

    /// Record a server-confirmed balance in memory and in the cache.
    pub fn update_points(&mut self, store: &impl KeyValueStore, points: i64) {
        cache_points(store, points);
        if let Some(identity) = self.identity.as_mut() {
            identity.points = Some(points);
        }
    }

    /// Clear every session key.
    pub fn sign_out(&mut self, store: &impl KeyValueStore) {
        clear_session(store);
        self.identity = None;
    }
}
