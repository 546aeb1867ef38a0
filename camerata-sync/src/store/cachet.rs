//! Page-scoped cachet text store
//!
//! One free-text blob per page key, upserted; there is no delete. Loads go
//! through the generic remote-or-fallback path; saves are the canonical
//! two-phase optimistic write.

use crate::context::AppContext;
use crate::store::{load_or_fallback, Persistence, SourceOrigin};
use camerata_common::models::{CachetInsert, CachetRow, CachetUpdate};
use camerata_common::Result;
use serde::Deserialize;
use std::sync::Arc;

const CACHET_TABLE: &str = "project_cachet";

#[derive(Deserialize)]
struct IdRow {
    id: String,
}

pub struct CachetStore {
    ctx: Arc<AppContext>,
    page_key: String,
    fallback: String,
    /// Disabled pages never touch the network
    enabled: bool,
    text: String,
    source: SourceOrigin,
    loading: bool,
    saving: bool,
    error: Option<String>,
}

impl CachetStore {
    pub fn new(
        ctx: Arc<AppContext>,
        page_key: impl Into<String>,
        fallback: impl Into<String>,
        enabled: bool,
    ) -> Self {
        let fallback = fallback.into();
        Self {
            ctx,
            page_key: page_key.into(),
            text: fallback.clone(),
            fallback,
            enabled,
            source: SourceOrigin::Fallback,
            loading: enabled,
            saving: false,
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> SourceOrigin {
        self.source
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.ctx.is_configured()
    }

    /// Reload from the backend; empty or missing remote text falls back.
    pub async fn refresh(&mut self) {
        if !self.enabled {
            self.loading = false;
            return;
        }
        self.loading = true;

        let record = load_or_fallback::<_, CachetRow, _>(
            self.ctx.backend().map(|client| client.as_ref()),
            CACHET_TABLE,
            "page_key",
            &self.page_key,
            self.fallback.clone(),
            |row| row.cachet_text.filter(|text| !text.is_empty()),
        )
        .await;

        self.text = record.value;
        self.source = record.source;
        self.error = record.last_error;
        self.loading = false;
    }

    /// Set the cachet text. The local value updates immediately; the remote
    /// upsert (update if a record exists for the page key, else insert)
    /// follows when a backend is available.
    pub async fn update_cachet(&mut self, value: impl Into<String>) -> Result<Persistence> {
        self.error = None;
        self.text = value.into();

        if !self.enabled {
            return Ok(Persistence::LocalOnly);
        }
        let Some(client) = self.ctx.backend().cloned() else {
            return Ok(Persistence::LocalOnly);
        };

        self.saving = true;
        let result = self.upsert(&client).await;
        self.saving = false;

        match result {
            Ok(()) => {
                self.source = SourceOrigin::Remote;
                Ok(Persistence::Remote)
            }
            Err(e) => {
                // Optimistic local text stays; the caller must surface the
                // failed persistence.
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn upsert(&self, client: &crate::backend::Client) -> Result<()> {
        let existing = client
            .select_maybe_single::<IdRow>(CACHET_TABLE, "page_key", &self.page_key)
            .await?;

        match existing {
            Some(row) => {
                client
                    .update_by_id(
                        CACHET_TABLE,
                        &row.id,
                        &CachetUpdate {
                            cachet_text: self.text.clone(),
                        },
                    )
                    .await
            }
            None => {
                client
                    .insert(
                        CACHET_TABLE,
                        &CachetInsert {
                            page_key: self.page_key.clone(),
                            cachet_text: self.text.clone(),
                        },
                    )
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CachetStore {
        CachetStore::new(
            AppContext::unconfigured(),
            "progetti/duo-chitarra",
            "Testo statico del progetto.",
            true,
        )
    }

    #[tokio::test]
    async fn test_refresh_without_backend_serves_fallback() {
        let mut store = store();
        store.refresh().await;

        assert_eq!(store.text(), "Testo statico del progetto.");
        assert_eq!(store.source(), SourceOrigin::Fallback);
        assert!(store.error().is_none());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_update_without_backend_is_local_only() {
        let mut store = store();
        let persistence = store.update_cachet("Nuovo testo").await.unwrap();

        assert_eq!(persistence, Persistence::LocalOnly);
        assert_eq!(store.text(), "Nuovo testo");
        assert!(store.error().is_none());
        assert!(!store.saving());
    }

    #[tokio::test]
    async fn test_disabled_store_never_loads() {
        let mut store = CachetStore::new(AppContext::unconfigured(), "cv/generale", "Bio.", false);
        store.refresh().await;
        assert_eq!(store.text(), "Bio.");
        assert!(!store.loading());
    }
}
