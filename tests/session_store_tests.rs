//! Session store integration tests: persistence round-trips, degradation on
//! partial/corrupt state, cookie mirror lifecycle, and dashboard resolution.

use tempfile::tempdir;

use carelink::session::{resolve_dashboard_path, Role, SessionStore, UserIdentity};

fn sample_user(role: &str) -> UserIdentity {
    serde_json::from_str(&format!(
        r#"{{"id":"u-1","email":"sam@example.org","name":"Sam","role":"{}"}}"#,
        role
    ))
    .unwrap()
}

#[test]
fn save_then_load_returns_exact_user_and_token() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path());
    let user = sample_user("doctor");
    store.save("bearer-xyz", &user);

    let state = store.load();
    assert!(state.is_authenticated());
    assert_eq!(state.token.as_deref(), Some("bearer-xyz"));
    assert_eq!(state.user.unwrap(), user);
}

#[test]
fn save_survives_process_restart() {
    let dir = tempdir().unwrap();
    {
        let store = SessionStore::open(dir.path());
        store.save("bearer-xyz", &sample_user("nurse"));
    }
    // A fresh store over the same directory sees the session
    let store = SessionStore::open(dir.path());
    let state = store.load();
    assert!(state.is_authenticated());
    assert_eq!(state.user.unwrap().role, Role::Nurse);
}

#[test]
fn clear_then_load_is_unauthenticated_and_cookie_expired() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path());
    store.save("bearer-xyz", &sample_user("patient"));

    let cookie = store.clear();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(!store.load().is_authenticated());
    // idempotent
    let again = store.clear();
    assert_eq!(cookie, again);
}

#[test]
fn token_without_user_loads_as_unauthenticated() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path());
    store.save("bearer-xyz", &sample_user("staff"));
    std::fs::remove_file(dir.path().join("auth_user.json")).unwrap();

    let state = store.load();
    assert!(!state.is_authenticated());
    assert!(state.token.is_none());
    assert!(state.user.is_none());
}

#[test]
fn user_without_token_loads_as_unauthenticated() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path());
    store.save("bearer-xyz", &sample_user("staff"));
    std::fs::remove_file(dir.path().join("auth_token")).unwrap();

    assert!(!store.load().is_authenticated());
}

#[test]
fn corrupt_user_json_loads_as_unauthenticated() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path());
    store.save("bearer-xyz", &sample_user("admin"));
    std::fs::write(dir.path().join("auth_user.json"), "{\"id\": truncated").unwrap();

    assert!(!store.load().is_authenticated());
}

#[test]
fn save_refreshes_an_existing_session() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path());
    let user = sample_user("doctor");
    store.save("bearer-xyz", &user);
    store.save("bearer-xyz", &user.clone().with_profile_picture("http://cdn/x.png"));

    let state = store.load();
    assert_eq!(
        state.user.unwrap().profile_picture.as_deref(),
        Some("http://cdn/x.png")
    );
    assert_eq!(state.token.as_deref(), Some("bearer-xyz"));
}

#[test]
fn mirror_cookie_carries_lax_policy_and_day_lifetime() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path());
    let cookie = store.save("tok", &sample_user("patient"));
    assert!(cookie.starts_with("auth_token=tok;"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[test]
fn dashboard_resolution_is_total_over_roles() {
    let expected = [
        ("patient", "/patient/dashboard"),
        ("doctor", "/doctor/dashboard"),
        ("nurse", "/nurse/dashboard"),
        ("staff", "/staff/dashboard"),
        ("admin", "/admin/dashboard"),
        ("healthcare_manager", "/healthcare-manager/dashboard"),
        ("system_admin", "/system-admin/dashboard"),
        ("emergency_services", "/emergency/dashboard"),
    ];
    for (tag, path) in expected {
        assert_eq!(resolve_dashboard_path(tag), path, "role {}", tag);
    }
    assert_eq!(resolve_dashboard_path("intruder"), "/");
    assert_eq!(resolve_dashboard_path(""), "/");
}
