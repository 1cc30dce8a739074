//! Unified client error model for the API gateway.
//! Every gateway call resolves to a value or to exactly one of the three
//! error kinds below, so the UI layer can distinguish "server unreachable"
//! from "server said no" without inspecting message strings.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApiError {
    /// The request never reached the backend (connection refused, DNS, timeout).
    Network { message: String },
    /// Backend reachable, non-success status with a non-JSON body.
    Http { status: u16, body: String },
    /// Backend reachable, non-success status with a JSON body carrying an error field.
    Application { message: String },
}

impl ApiError {
    pub fn network<S: Into<String>>(msg: S) -> Self {
        ApiError::Network { message: msg.into() }
    }

    pub fn http<S: Into<String>>(status: u16, body: S) -> Self {
        ApiError::Http { status, body: body.into() }
    }

    pub fn application<S: Into<String>>(msg: S) -> Self {
        ApiError::Application { message: msg.into() }
    }

    /// Wrap a transport failure with the operator-facing availability hint.
    pub fn unreachable(detail: &str) -> Self {
        ApiError::Network {
            message: format!(
                "cannot reach the backend server; check that it is running and reachable ({})",
                detail
            ),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message } | ApiError::Application { message } => message.as_str(),
            ApiError::Http { body, .. } => body.as_str(),
        }
    }

    /// HTTP status carried by the failure, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network { message } => write!(f, "network: {}", message),
            ApiError::Http { status, body } => write!(f, "http {}: {}", status, body),
            ApiError::Application { message } => write!(f, "application: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_mentions_availability() {
        let e = ApiError::unreachable("connection refused");
        assert!(e.is_network());
        assert!(e.message().contains("check that it is running"));
        assert!(e.message().contains("connection refused"));
    }

    #[test]
    fn status_only_on_http() {
        assert_eq!(ApiError::http(500, "Internal Server Error").status(), Some(500));
        assert_eq!(ApiError::application("not found").status(), None);
        assert_eq!(ApiError::network("down").status(), None);
    }

    #[test]
    fn serde_tagging_round_trip() {
        let e = ApiError::http(404, "<html>nope</html>");
        let s = serde_json::to_string(&e).unwrap();
        assert!(s.contains("\"type\":\"http\""));
        let back: ApiError = serde_json::from_str(&s).unwrap();
        assert_eq!(back, e);
    }
}
