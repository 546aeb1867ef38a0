//! Session gate
//!
//! Wraps the auth primitive to gate edit affordances. The state machine is
//! `Anonymous -> Authenticating -> Authenticated`, returning to `Anonymous`
//! on sign-out or failure. Every mutation path in the UI is conditioned on
//! this gate; when the backend is unconfigured nothing edit-related shows.

use crate::backend::{AuthSession, AuthUser, Client};
use camerata_common::{Error, Result};
use std::sync::RwLock;
use tracing::warn;

/// Authentication state visible to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated(AuthSession),
}

/// Process-wide session state, shared through the application context
pub struct SessionGate {
    state: RwLock<SessionState>,
}

impl SessionGate {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::Anonymous),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(SessionState::Anonymous)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state(), SessionState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        match self.state() {
            SessionState::Authenticated(session) => Some(session.user),
            _ => None,
        }
    }

    fn set_state(&self, state: SessionState) {
        if let Ok(mut guard) = self.state.write() {
            *guard = state;
        }
    }

    /// Sign in against the backend. Failure leaves the session anonymous
    /// and surfaces the service's message.
    pub(crate) async fn sign_in(
        &self,
        client: &Client,
        email: &str,
        password: &str,
    ) -> Result<AuthUser> {
        self.set_state(SessionState::Authenticating);

        match client.sign_in_with_password(email, password).await {
            Ok(session) => {
                let user = session.user.clone();
                self.set_state(SessionState::Authenticated(session));
                Ok(user)
            }
            Err(e) => {
                self.set_state(SessionState::Anonymous);
                warn!("Sign-in failed: {e}");
                Err(match e {
                    Error::Auth(message) => Error::Auth(message),
                    other => Error::Auth(other.to_string()),
                })
            }
        }
    }

    /// Clear the session. Remote logout is best-effort.
    pub(crate) async fn sign_out(&self, client: Option<&Client>) {
        self.set_state(SessionState::Anonymous);
        if let Some(client) = client {
            client.sign_out().await;
        }
    }
}
