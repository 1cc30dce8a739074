use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::warn;

use crate::config::{AUTH_COOKIE, AUTH_COOKIE_MAX_AGE, TOKEN_KEY, USER_KEY};

use super::identity::UserIdentity;

/// Snapshot of "who is logged in". Authenticated only when both halves exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserIdentity>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// Durable session store: token and serialized user live as two key files
/// under a state directory, with the token mirrored into a cookie so the edge
/// guard can gate requests without reading the durable store.
///
/// All failure paths degrade to the unauthenticated default instead of
/// propagating. A broken session must never take the UI shell down with it.
pub struct SessionStore {
    /// None in restricted execution contexts with no writable storage;
    /// the store then operates on the in-memory snapshot only.
    state_dir: Option<PathBuf>,
    snapshot: RwLock<SessionState>,
}

impl SessionStore {
    /// Open (or create) the store under `dir`. If the directory cannot be
    /// created the store still works, durably disabled, as a no-op layer.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let state_dir = match fs::create_dir_all(&dir) {
            Ok(()) => Some(dir),
            Err(e) => {
                warn!(target: "session", "state dir {:?} unavailable, session persistence disabled: {}", dir, e);
                None
            }
        };
        let store = Self { state_dir, snapshot: RwLock::new(SessionState::default()) };
        let initial = store.read_durable();
        *store.snapshot.write() = initial;
        store
    }

    /// In-memory-only store for headless contexts (and tests).
    pub fn headless() -> Self {
        Self { state_dir: None, snapshot: RwLock::new(SessionState::default()) }
    }

    /// Persist a login: both keys written durably, snapshot refreshed, and the
    /// mirror cookie value returned for the host environment to set. Saving
    /// over an existing session is the refresh path (e.g. new picture URL).
    pub fn save(&self, token: &str, user: &UserIdentity) -> String {
        if let Some(dir) = &self.state_dir {
            let serialized = match serde_json::to_string(user) {
                Ok(s) => s,
                Err(e) => {
                    warn!(target: "session", "user serialization failed, durable save skipped: {}", e);
                    String::new()
                }
            };
            if !serialized.is_empty() {
                let wrote_user = write_key(dir, USER_KEY, &serialized);
                let wrote_token = wrote_user && write_key(dir, TOKEN_KEY, token);
                if !(wrote_user && wrote_token) {
                    // Never leave one half behind; partial state reads as logged out anyway,
                    // but stale halves would shadow the next login.
                    let _ = fs::remove_file(dir.join(TOKEN_KEY));
                    let _ = fs::remove_file(dir.join(USER_KEY));
                }
            }
        }
        let mut snap = self.snapshot.write();
        snap.token = Some(token.to_string());
        snap.user = Some(user.clone());
        mirror_cookie(token)
    }

    /// Current state: both halves present and the user payload parsing as a
    /// valid identity, else the unauthenticated default. Never errors.
    pub fn load(&self) -> SessionState {
        if self.state_dir.is_some() {
            let state = self.read_durable();
            *self.snapshot.write() = state.clone();
            state
        } else {
            self.snapshot.read().clone()
        }
    }

    /// Forget the session everywhere. Idempotent; returns the expired mirror
    /// cookie so the host environment can overwrite the live one.
    pub fn clear(&self) -> String {
        if let Some(dir) = &self.state_dir {
            let _ = fs::remove_file(dir.join(TOKEN_KEY));
            let _ = fs::remove_file(dir.join(USER_KEY));
        }
        *self.snapshot.write() = SessionState::default();
        expired_mirror_cookie()
    }

    /// Bearer resolution for the gateway: durable store first, then the
    /// mirrored cookie from a supplied Cookie header.
    pub fn bearer_token(&self, cookie_header: Option<&str>) -> Option<String> {
        if let Some(token) = self.load().token {
            return Some(token);
        }
        cookie_header.and_then(|h| parse_cookie(h, AUTH_COOKIE))
    }

    fn read_durable(&self) -> SessionState {
        let Some(dir) = &self.state_dir else { return SessionState::default() };
        let token = match fs::read_to_string(dir.join(TOKEN_KEY)) {
            Ok(t) if !t.trim().is_empty() => Some(t.trim().to_string()),
            _ => None,
        };
        let user = fs::read_to_string(dir.join(USER_KEY))
            .ok()
            .and_then(|raw| match serde_json::from_str::<UserIdentity>(&raw) {
                Ok(u) => Some(u),
                Err(e) => {
                    warn!(target: "session", "stored user payload unreadable, treating as logged out: {}", e);
                    None
                }
            });
        match (token, user) {
            (Some(token), Some(user)) => SessionState { token: Some(token), user: Some(user) },
            _ => SessionState::default(),
        }
    }
}

/// Temp-then-rename so a crash never leaves a half-written key.
fn write_key(dir: &Path, key: &str, value: &str) -> bool {
    let tmp = dir.join(format!("{}.tmp", key));
    let dst = dir.join(key);
    let ok = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &dst));
    if let Err(e) = ok {
        warn!(target: "session", "durable write of {} failed: {}", key, e);
        let _ = fs::remove_file(&tmp);
        return false;
    }
    true
}

/// Mirror cookie carrying the bearer token for edge-side gating.
pub fn mirror_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        AUTH_COOKIE, token, AUTH_COOKIE_MAX_AGE
    )
}

/// Expired form of the mirror cookie, not merely an absent one.
pub fn expired_mirror_cookie() -> String {
    format!(
        "{}=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; Max-Age=0; SameSite=Lax",
        AUTH_COOKIE
    )
}

/// Pull a single cookie value out of a Cookie request header.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    for part in header.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn user() -> UserIdentity {
        serde_json::from_str(r#"{"id":"u-9","email":"p@x.y","name":"Pat","role":"patient"}"#)
            .unwrap()
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        let cookie = store.save("tok-123", &user());
        assert!(cookie.starts_with("auth_token=tok-123;"));
        let state = store.load();
        assert!(state.is_authenticated());
        assert_eq!(state.token.as_deref(), Some("tok-123"));
        assert_eq!(state.user.unwrap().role, Role::Patient);
    }

    #[test]
    fn partial_state_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        store.save("tok-123", &user());
        std::fs::remove_file(dir.path().join(USER_KEY)).unwrap();
        assert!(!store.load().is_authenticated());
        assert!(store.load().token.is_none());
    }

    #[test]
    fn corrupt_user_payload_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        store.save("tok-123", &user());
        std::fs::write(dir.path().join(USER_KEY), "{not json").unwrap();
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn clear_is_idempotent_and_expires_cookie() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        store.save("tok-123", &user());
        let c1 = store.clear();
        let c2 = store.clear();
        assert_eq!(c1, c2);
        assert!(c1.contains("Expires=Thu, 01 Jan 1970"));
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn headless_store_keeps_session_in_memory_only() {
        let store = SessionStore::headless();
        store.save("tok-1", &user());
        assert!(store.load().is_authenticated());
        store.clear();
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn bearer_falls_back_to_mirror_cookie() {
        let store = SessionStore::headless();
        assert_eq!(
            store.bearer_token(Some("theme=dark; auth_token=abc; lang=en")),
            Some("abc".to_string())
        );
        store.save("durable-tok", &user());
        assert_eq!(
            store.bearer_token(Some("auth_token=abc")),
            Some("durable-tok".to_string())
        );
    }
}
