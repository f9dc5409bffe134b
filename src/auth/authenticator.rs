//! Authenticator implementation
//!
//! Applies the session's bearer credential to outgoing requests.

use super::types::SessionContext;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Applies bearer authentication to HTTP requests
///
/// The session can be swapped after the caller re-authenticates; nothing
/// in here talks to the token issuer.
#[derive(Debug, Clone)]
pub struct Authenticator {
    session: Arc<RwLock<SessionContext>>,
}

impl Authenticator {
    /// Create a new authenticator for a session
    pub fn new(session: SessionContext) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Apply authentication to a request builder
    ///
    /// A blank or expired credential fails locally with `Unauthorized`
    /// so no request is sent with a token we already know is stale.
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let session = self.session.read().await;

        if session.access_token.is_blank() {
            return Err(Error::unauthorized("no access token in session"));
        }
        if session.is_expired() {
            debug!(user_id = %session.user_id, "credential expired, not sending request");
            return Err(Error::unauthorized("access token expired"));
        }

        Ok(req.bearer_auth(session.access_token.expose()))
    }

    /// Replace the session after the caller re-authenticated
    pub async fn replace_session(&self, session: SessionContext) {
        let mut current = self.session.write().await;
        *current = session;
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> SessionContext {
        self.session.read().await.clone()
    }
}
