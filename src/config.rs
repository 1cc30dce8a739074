//! Environment-driven configuration for the gateway client and edge server.
//! Everything has a working default so a dev checkout runs with no setup.

use tracing::info;

/// Cookie mirroring the bearer token for edge-side visibility.
pub const AUTH_COOKIE: &str = "auth_token";
/// Mirror cookie lifetime in seconds (24h).
pub const AUTH_COOKIE_MAX_AGE: u64 = 86400;

/// Durable store key files under the state directory.
pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user.json";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Fixed backend origin all API paths are joined against.
    pub api_origin: String,
    /// Directory holding the durable session files.
    pub state_dir: String,
    /// Port the edge gate listens on.
    pub edge_port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_origin: "http://127.0.0.1:5000".to_string(),
            state_dir: ".carelink".to_string(),
            edge_port: 7878,
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let dfl = Self::default();
        let api_origin = std::env::var("CARELINK_API_ORIGIN").unwrap_or(dfl.api_origin);
        let state_dir = std::env::var("CARELINK_STATE_DIR").unwrap_or(dfl.state_dir);
        let edge_port = std::env::var("CARELINK_EDGE_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(dfl.edge_port);
        let cfg = Self { api_origin, state_dir, edge_port };
        info!(
            target: "startup",
            "carelink configuration: api_origin='{}', state_dir='{}', edge_port={}",
            cfg.api_origin, cfg.state_dir, cfg.edge_port
        );
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = GatewayConfig::default();
        assert!(cfg.api_origin.starts_with("http://"));
        assert_eq!(cfg.edge_port, 7878);
    }
}
