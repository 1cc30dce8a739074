use serde::{Deserialize, Serialize};

/// Closed set of role tags issued by the backend. A role never changes after
/// the backend issues it; unknown tags are handled by `resolve_dashboard_path`
/// rather than by widening this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Doctor,
    Nurse,
    Staff,
    Admin,
    HealthcareManager,
    SystemAdmin,
    EmergencyServices,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Patient,
        Role::Doctor,
        Role::Nurse,
        Role::Staff,
        Role::Admin,
        Role::HealthcareManager,
        Role::SystemAdmin,
        Role::EmergencyServices,
    ];

    /// Backend wire tag for this role.
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Staff => "staff",
            Role::Admin => "admin",
            Role::HealthcareManager => "healthcare_manager",
            Role::SystemAdmin => "system_admin",
            Role::EmergencyServices => "emergency_services",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.tag() == tag)
    }

    /// Dashboard route prefix each role lands on after login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Patient => "/patient/dashboard",
            Role::Doctor => "/doctor/dashboard",
            Role::Nurse => "/nurse/dashboard",
            Role::Staff => "/staff/dashboard",
            Role::Admin => "/admin/dashboard",
            Role::HealthcareManager => "/healthcare-manager/dashboard",
            Role::SystemAdmin => "/system-admin/dashboard",
            Role::EmergencyServices => "/emergency/dashboard",
        }
    }
}

/// Total mapping from an arbitrary role string to a dashboard route.
/// Unrecognized tags land on the root path.
pub fn resolve_dashboard_path(tag: &str) -> &'static str {
    match Role::from_tag(tag) {
        Some(role) => role.dashboard_path(),
        None => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_dashboard() {
        for role in Role::ALL {
            let path = resolve_dashboard_path(role.tag());
            assert_ne!(path, "/", "role {:?} must not fall back to root", role);
            assert!(path.starts_with('/'));
        }
    }

    #[test]
    fn unknown_role_falls_back_to_root() {
        assert_eq!(resolve_dashboard_path("superuser"), "/");
        assert_eq!(resolve_dashboard_path(""), "/");
        assert_eq!(resolve_dashboard_path("PATIENT"), "/");
    }

    #[test]
    fn tags_round_trip_through_serde() {
        for role in Role::ALL {
            let s = serde_json::to_string(&role).unwrap();
            assert_eq!(s, format!("\"{}\"", role.tag()));
            let back: Role = serde_json::from_str(&s).unwrap();
            assert_eq!(back, role);
        }
    }
}
