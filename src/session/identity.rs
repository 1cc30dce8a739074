use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// Authenticated user as issued by the backend at login. Owned exclusively by
/// the session store; the role is immutable once issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserIdentity {
    /// Refresh copy carrying a new profile picture URL, everything else kept.
    pub fn with_profile_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_backend_payload() {
        let u: UserIdentity = serde_json::from_str(
            r#"{"id":"u-1","email":"a@b.c","name":"A","role":"doctor"}"#,
        )
        .unwrap();
        assert_eq!(u.role, Role::Doctor);
        assert!(u.profile_picture.is_none());
        assert!(u.created_at.is_none());
    }

    #[test]
    fn rejects_unknown_role_tag() {
        let r = serde_json::from_str::<UserIdentity>(
            r#"{"id":"u-1","email":"a@b.c","name":"A","role":"wizard"}"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn picture_refresh_keeps_identity() {
        let u: UserIdentity = serde_json::from_str(
            r#"{"id":"u-1","email":"a@b.c","name":"A","role":"patient"}"#,
        )
        .unwrap();
        let v = u.clone().with_profile_picture("http://x/y.png");
        assert_eq!(v.id, u.id);
        assert_eq!(v.role, u.role);
        assert_eq!(v.profile_picture.as_deref(), Some("http://x/y.png"));
    }
}
