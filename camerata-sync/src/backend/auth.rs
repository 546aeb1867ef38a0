//! Email/password authentication against the hosted auth service
//!
//! The service exposes a password grant yielding an opaque session object.
//! Wrong credentials surface as a human-readable message; the caller's
//! session state stays anonymous.

use super::Client;
use camerata_common::{Error, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Authenticated user, as returned by the auth service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Opaque session yielded by a successful sign-in
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

#[derive(serde::Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl Client {
    /// Sign in with email and password. On success the session token becomes
    /// the bearer for subsequent requests.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/v1/token", self.base_url());
        let response = self
            .authed(self.http.post(url))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth(super::extract_message(&body)));
        }

        let session: AuthSession = response.json().await?;
        self.set_access_token(Some(session.access_token.clone()));
        info!(user = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Sign out. The local token is always cleared; the remote logout is
    /// best-effort.
    pub async fn sign_out(&self) {
        let token = self.bearer();
        self.set_access_token(None);

        let url = format!("{}/auth/v1/logout", self.base_url());
        let result = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => info!("Signed out"),
            Ok(response) => warn!(status = %response.status(), "Remote logout rejected"),
            Err(e) => warn!("Remote logout failed: {e}"),
        }
    }
}
