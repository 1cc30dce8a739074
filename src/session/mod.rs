//! Session persistence and identity model for the portal client.
//! Keep the public surface thin and split implementation across sub-modules.

mod role;
mod identity;
mod store;

pub use role::{Role, resolve_dashboard_path};
pub use identity::UserIdentity;
pub use store::{SessionStore, SessionState, parse_cookie};
