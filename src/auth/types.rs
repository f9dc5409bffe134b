//! Session and credential types
//!
//! The bearer credential is issued by an external OAuth provider. This crate
//! only carries it; it never requests or refreshes tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a bearer token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is blank
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Signed-in user session, passed explicitly to anything that needs it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// User id in the collection store
    pub user_id: String,
    /// Whether the user has a record in the collection store
    #[serde(default = "default_in_database")]
    pub in_database: bool,
    /// Bearer credential from the OAuth session
    pub access_token: Credential,
    /// When the credential stops being valid, if known
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_in_database() -> bool {
    true
}

impl SessionContext {
    /// Create a session for a user with a bearer token
    pub fn new(user_id: impl Into<String>, access_token: Credential) -> Self {
        Self {
            user_id: user_id.into(),
            in_database: true,
            access_token,
            expires_at: None,
        }
    }

    /// Set an expiry on the credential
    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set a credential that expires in N seconds from now
    #[must_use]
    pub fn expires_in(self, seconds: i64) -> Self {
        self.with_expiry(Utc::now() + chrono::Duration::seconds(seconds))
    }

    /// Mark whether the user exists in the collection store
    #[must_use]
    pub fn in_database(mut self, in_database: bool) -> Self {
        self.in_database = in_database;
        self
    }

    /// Check if the credential is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }

    /// A session is usable when it has a non-blank, unexpired credential
    /// and the user is known to the collection store
    pub fn is_usable(&self) -> bool {
        self.in_database && !self.access_token.is_blank() && !self.is_expired()
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("BQD-secret-token");
        assert_eq!(format!("{cred:?}"), "Credential(***)");
        assert_eq!(cred.expose(), "BQD-secret-token");
    }

    #[test]
    fn test_session_not_expired() {
        let ctx = SessionContext::new("user-1", Credential::new("t")).expires_in(3600);
        assert!(!ctx.is_expired());
        assert!(ctx.is_usable());
    }

    #[test]
    fn test_session_expired() {
        let ctx = SessionContext::new("user-1", Credential::new("t")).expires_in(-100);
        assert!(ctx.is_expired());
        assert!(!ctx.is_usable());
    }

    #[test]
    fn test_session_no_expiration() {
        let ctx = SessionContext::new("user-1", Credential::new("t"));
        assert!(!ctx.is_expired());
    }

    #[test]
    fn test_session_not_in_database() {
        let ctx = SessionContext::new("user-1", Credential::new("t")).in_database(false);
        assert!(!ctx.is_usable());
    }

    #[test]
    fn test_session_deserialize_defaults() {
        let ctx: SessionContext =
            serde_json::from_str(r#"{"user_id":"u","access_token":"abc"}"#).unwrap();
        assert!(ctx.in_database);
        assert!(ctx.expires_at.is_none());
        assert_eq!(ctx.access_token.expose(), "abc");
    }
}
