use panels::api::LoginName;
use session::MemoryStore;

use super::*;

#[test]
fn sign_in_persists_identity() {
    let store = MemoryStore::new();
    let mut auth = AuthState::default();
    auth.sign_in(&store, "kim", Some("Kimchi"));
    assert_eq!(auth.user_id(), Some("kim"));
    assert_eq!(auth.nickname(), Some("Kimchi"));
    assert_eq!(AuthState::load(&store), auth);
}

#[test]
fn empty_nickname_is_not_stored() {
    let store = MemoryStore::new();
    let mut auth = AuthState::default();
    auth.sign_in(&store, "kim", Some(""));
    assert_eq!(auth.nickname(), None);
}

#[test]
fn login_without_server_name_greets_by_user_id() {
    let store = MemoryStore::new();
    let mut auth = AuthState::default();
    let reply: LoginName = serde_json::from_str(r#"{"user_name": null}"#).expect("reply");
    auth.sign_in(&store, "kim", reply.user_name.as_deref());
    assert_eq!(auth.nickname(), None);
    assert_eq!(auth.display_name(), Some("kim"));
    assert!(AuthState::load(&store).is_logged_in());
}

#[test]
fn display_name_prefers_nickname() {
    let store = MemoryStore::new();
    let mut auth = AuthState::default();
    assert_eq!(auth.display_name(), None);
    auth.sign_in(&store, "kim", Some("Kimchi"));
    assert_eq!(auth.display_name(), Some("Kimchi"));
}

#[test]
fn update_points_writes_cache() {
    let store = MemoryStore::new();
    let mut auth = AuthState::default();
    auth.sign_in(&store, "kim", Some("Kimchi"));
    auth.update_points(&store, 1_500);
    assert_eq!(auth.points(), Some(1_500));
    assert_eq!(AuthState::load(&store).points(), Some(1_500));
}

#[test]
fn sign_out_clears_every_key() {
    let store = MemoryStore::new();
    let mut auth = AuthState::default();
    auth.sign_in(&store, "kim", Some("Kimchi"));
    auth.update_points(&store, 10);
    auth.sign_out(&store);
    assert!(!auth.is_logged_in());
    assert!(store.is_empty());
}
