//! Hosted backend client
//!
//! Speaks to the hosted data service over REST: point queries and mutations
//! keyed by table name and equality filters, an email/password auth
//! primitive, and an object-storage primitive. One client instance is
//! shared by every store; it is read-only after construction apart from the
//! session token, and each call is stateless, so concurrent use is safe.

pub mod auth;
pub mod query;
pub mod storage;

use camerata_common::config::BackendConfig;
use camerata_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;

pub use auth::{AuthSession, AuthUser};
pub use query::{Order, Query};

const USER_AGENT: &str = concat!("camerata/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the hosted data/auth/storage service
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    /// Session access token; requests fall back to the anon key when unset
    access_token: RwLock<Option<String>>,
}

impl Client {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            access_token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Bearer token for the current request: session token when signed in,
    /// else the public API key.
    fn bearer(&self) -> String {
        self.access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }

    pub(crate) fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }

    /// Fetch all rows matching `query`.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &Query) -> Result<Vec<T>> {
        debug!(table, "select");
        let response = self
            .authed(self.http.get(self.rest_url(table)))
            .query(&query.to_params())
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Single-row "maybe" fetch by equality filter; an empty result is
    /// `Ok(None)`, not an error.
    pub async fn select_maybe_single<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<T>> {
        let query = Query::new().eq(column, value).limit(1);
        let mut rows: Vec<T> = self.select(table, &query).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// Insert a row; no representation requested.
    pub async fn insert<P: Serialize>(&self, table: &str, payload: &P) -> Result<()> {
        debug!(table, "insert");
        let response = self
            .authed(self.http.post(self.rest_url(table)))
            .header("Prefer", "return=minimal")
            .json(payload)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Insert a row and return the created representation.
    pub async fn insert_returning<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        payload: &P,
    ) -> Result<T> {
        debug!(table, "insert returning");
        let response = self
            .authed(self.http.post(self.rest_url(table)))
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;

        let response = check_status(response).await?;
        let mut rows: Vec<T> = response.json().await?;
        if rows.is_empty() {
            return Err(Error::NotFound(format!(
                "insert into {table} returned no row"
            )));
        }
        Ok(rows.swap_remove(0))
    }

    /// Update the row with the given id.
    pub async fn update_by_id<P: Serialize>(&self, table: &str, id: &str, payload: &P) -> Result<()> {
        debug!(table, id, "update");
        let response = self
            .authed(self.http.patch(self.rest_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(payload)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Delete the row with the given id.
    pub async fn delete_by_id(&self, table: &str, id: &str) -> Result<()> {
        debug!(table, id, "delete");
        let response = self
            .authed(self.http.delete(self.rest_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Map a non-2xx response to `Error::Backend` with the service's message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Backend {
        status: status.as_u16(),
        message: extract_message(&body),
    })
}

/// Pull a human-readable message out of an error body. The service returns
/// JSON with one of a few message keys; fall back to the raw body.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    if body.is_empty() {
        "request failed".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::new(&BackendConfig {
            base_url: "https://demo.example.co/".to_string(),
            anon_key: "anon-key".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = test_client();
        assert_eq!(client.base_url(), "https://demo.example.co");
        assert_eq!(
            client.rest_url("events"),
            "https://demo.example.co/rest/v1/events"
        );
    }

    #[test]
    fn test_bearer_defaults_to_anon_key() {
        let client = test_client();
        assert_eq!(client.bearer(), "anon-key");

        client.set_access_token(Some("session-token".to_string()));
        assert_eq!(client.bearer(), "session-token");

        client.set_access_token(None);
        assert_eq!(client.bearer(), "anon-key");
    }

    #[test]
    fn test_extract_message_prefers_known_keys() {
        assert_eq!(
            extract_message(r#"{"message":"row level security violation"}"#),
            "row level security violation"
        );
        assert_eq!(
            extract_message(r#"{"error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(extract_message("plain failure"), "plain failure");
        assert_eq!(extract_message(""), "request failed");
    }
}
