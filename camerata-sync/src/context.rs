//! Application context
//!
//! Explicitly constructed composition root: reads configuration once at
//! startup and lands in `ready` (backend client constructed) or
//! `unconfigured` (fallback-only mode). Stores receive the context and talk
//! to the backend only through it. The backend handle is read-only after
//! init and each call is stateless, so sharing it across in-flight requests
//! needs no further coordination.

use crate::backend::{AuthUser, Client};
use crate::session::SessionGate;
use camerata_common::config::{resolve_backend_config, BackendConfig, TomlConfig};
use camerata_common::{Error, Result};
use std::sync::Arc;
use tracing::info;

pub struct AppContext {
    backend: Option<Arc<Client>>,
    session: SessionGate,
}

impl AppContext {
    /// Build the context from the process environment and config file.
    /// Missing configuration is a supported mode, not an error.
    pub fn init() -> Arc<Self> {
        let toml_config = TomlConfig::load();
        Self::from_config(resolve_backend_config(&toml_config))
    }

    /// Build the context from explicit configuration (composition roots and
    /// tests that do not want ambient environment reads).
    pub fn from_config(config: Option<BackendConfig>) -> Arc<Self> {
        let backend = match config {
            Some(config) => match Client::new(&config) {
                Ok(client) => {
                    info!(base_url = %client.base_url(), "Backend ready");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    // Treated like absent config: the site still works as a
                    // static brochure.
                    tracing::warn!("Backend client construction failed: {e}");
                    None
                }
            },
            None => None,
        };

        Arc::new(Self {
            backend,
            session: SessionGate::new(),
        })
    }

    /// Context with no backend: fallback-only mode.
    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            backend: None,
            session: SessionGate::new(),
        })
    }

    /// True only when backend connection parameters were present at init.
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Option<&Arc<Client>> {
        self.backend.as_ref()
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    /// Whether edit affordances should be shown at all.
    pub fn can_edit(&self) -> bool {
        self.is_configured() && self.session.is_authenticated()
    }

    /// Sign in; requires a configured backend.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let backend = self.backend.as_ref().ok_or(Error::NotConfigured)?;
        self.session.sign_in(backend, email, password).await
    }

    pub async fn sign_out(&self) {
        self.session
            .sign_out(self.backend.as_deref())
            .await;
    }
}
