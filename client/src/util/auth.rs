//! Identity lookups for pages that need a logged-in user.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use panels::ApiError;
use session::{Identity, KeyValueStore};

use crate::config;
use crate::util::browser;
use crate::util::storage::LocalStore;

/// The stored identity, or `MissingIdentity` after sending the user to login.
///
/// # Errors
///
/// `ApiError::MissingIdentity` when no user id is stored.
pub fn require_user() -> Result<Identity, ApiError> {
    require_user_in(&LocalStore).inspect_err(|_| {
        log::info!("no stored identity; redirecting to login");
        browser::redirect(config::app().login_path);
    })
}

/// Same lookup against any store, without side effects.
///
/// # Errors
///
/// `ApiError::MissingIdentity` when no user id is stored.
pub fn require_user_in(store: &impl KeyValueStore) -> Result<Identity, ApiError> {
    Identity::load(store).ok_or(ApiError::MissingIdentity)
}
