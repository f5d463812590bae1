use super::*;

fn logged_in_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.set(USER_ID_KEY, "alice");
    store.set(NICKNAME_KEY, "Alice");
    store.set(POINTS_KEY, "120");
    store
}

#[test]
fn identity_load_reads_all_keys() {
    let store = logged_in_store();
    let identity = Identity::load(&store).expect("identity");
    assert_eq!(identity.user_id, "alice");
    assert_eq!(identity.nickname.as_deref(), Some("Alice"));
    assert_eq!(identity.points, Some(120));
}

#[test]
fn identity_load_requires_non_blank_user_id() {
    let store = MemoryStore::new();
    assert!(Identity::load(&store).is_none());
    store.set(USER_ID_KEY, "   ");
    assert!(Identity::load(&store).is_none());
}

#[test]
fn identity_load_ignores_unparseable_points() {
    let store = logged_in_store();
    store.set(POINTS_KEY, "lots");
    let identity = Identity::load(&store).expect("identity");
    assert_eq!(identity.points, None);
}

#[test]
fn identity_save_removes_absent_optional_keys() {
    let store = logged_in_store();
    Identity::new("bob").save(&store);
    assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("bob"));
    assert!(store.get(NICKNAME_KEY).is_none());
    assert!(store.get(POINTS_KEY).is_none());
}

#[test]
fn display_name_falls_back_to_user_id() {
    let mut identity = Identity::new("carol");
    assert_eq!(identity.display_name(), "carol");
    identity.nickname = Some("Caz".to_owned());
    assert_eq!(identity.display_name(), "Caz");
}

#[test]
fn clear_session_removes_every_session_key_only() {
    let store = logged_in_store();
    store.set("theme", "dark");
    clear_session(&store);
    for key in SESSION_KEYS {
        assert!(store.get(key).is_none(), "{key} should be cleared");
    }
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    assert_eq!(store.len(), 1);
}

#[test]
fn cache_points_overwrites_cached_total() {
    let store = logged_in_store();
    cache_points(&store, 80);
    assert_eq!(Identity::load(&store).expect("identity").points, Some(80));
}

#[test]
fn unguarded_routes_match_exact_and_nested_paths() {
    assert!(is_unguarded_route("/login"));
    assert!(is_unguarded_route("/login/"));
    assert!(is_unguarded_route("/sign-up"));
    assert!(is_unguarded_route("/sign-up/done"));
    assert!(!is_unguarded_route("/"));
    assert!(!is_unguarded_route("/loginx"));
    assert!(!is_unguarded_route("/events"));
}

#[test]
fn should_install_requires_identity_and_guarded_route() {
    let empty = MemoryStore::new();
    assert!(!should_install("/events", &empty));

    let store = logged_in_store();
    assert!(should_install("/events", &store));
    assert!(should_install("/", &store));
    assert!(!should_install("/login", &store));
    assert!(!should_install("/sign-up", &store));
}
