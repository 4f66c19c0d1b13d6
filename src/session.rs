//! Session value for a logged-in user
//!
//! Passed explicitly to each operation; there is no process-wide session
//! state.

/// Credentials and session token for the current user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// RPD login name
    pub user_name: String,
    /// Opaque session token issued by login
    pub token: String,
    /// Whether the user belongs to the dev group; `None` until checked
    pub admin: Option<bool>,
}

impl Session {
    /// Create a session for a user with the token issued by login
    pub fn new(user_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            token: token.into(),
            admin: None,
        }
    }

    /// True when a non-blank token is held
    pub fn is_logged_in(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
