//! Media gallery store
//!
//! Newest-first list of gallery items with admin mutations. Items whose URL
//! points into the managed storage bucket get their underlying object
//! cleaned up on delete; externally hosted items (e.g. video links) are
//! left alone.

use crate::backend::storage::object_path_from_public_url;
use crate::backend::{Order, Query};
use crate::context::AppContext;
use camerata_common::models::{GalleryItem, GalleryPayload, GalleryRow};
use camerata_common::{Error, Result};
use std::sync::Arc;
use tracing::warn;

const GALLERY_TABLE: &str = "gallery_items";

/// Storage bucket holding uploaded gallery media
pub const GALLERY_BUCKET: &str = "gallery";

pub struct GalleryStore {
    ctx: Arc<AppContext>,
    fallback: Vec<GalleryItem>,
    items: Vec<GalleryItem>,
    loading: bool,
    error: Option<String>,
}

impl GalleryStore {
    pub fn new(ctx: Arc<AppContext>, fallback: Vec<GalleryItem>) -> Self {
        let items = fallback.clone();
        Self {
            ctx,
            fallback,
            items,
            loading: true,
            error: None,
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.ctx.is_configured()
    }

    /// Reload the item list, newest first.
    pub async fn refresh(&mut self) {
        let Some(client) = self.ctx.backend().cloned() else {
            self.items = self.fallback.clone();
            self.error = None;
            self.loading = false;
            return;
        };

        self.loading = true;
        let query = Query::new().order("created_at", Order::Descending);
        match client.select::<GalleryRow>(GALLERY_TABLE, &query).await {
            Err(e) => {
                self.error = Some(e.to_string());
                self.items = self.fallback.clone();
            }
            Ok(rows) => {
                self.items = rows.into_iter().map(GalleryItem::from).collect();
                self.error = None;
            }
        }
        self.loading = false;
    }

    /// Insert a new item, then refresh. Returns the created item.
    pub async fn add_item(&mut self, payload: &GalleryPayload) -> Result<GalleryItem> {
        let client = self.backend()?;
        let row: GalleryRow = client.insert_returning(GALLERY_TABLE, payload).await?;
        let item = GalleryItem::from(row);
        self.refresh().await;
        Ok(item)
    }

    /// Update an existing item, then refresh.
    pub async fn update_item(&mut self, item_id: &str, payload: &GalleryPayload) -> Result<()> {
        let client = self.backend()?;
        client.update_by_id(GALLERY_TABLE, item_id, payload).await?;
        self.refresh().await;
        Ok(())
    }

    /// Delete an item, then refresh. If the item's media lives in the
    /// managed bucket, the object is removed too (best-effort; a stale
    /// object is preferable to a failed delete).
    pub async fn delete_item(&mut self, item_id: &str) -> Result<()> {
        let client = self.backend()?;

        let object_path = self
            .items
            .iter()
            .find(|item| item.id == item_id)
            .and_then(|item| object_path_from_public_url(&item.url, GALLERY_BUCKET));

        client.delete_by_id(GALLERY_TABLE, item_id).await?;

        if let Some(path) = object_path {
            if let Err(e) = client.remove_object(GALLERY_BUCKET, &path).await {
                warn!(path, "Gallery object cleanup failed: {e}");
            }
        }

        self.refresh().await;
        Ok(())
    }

    fn backend(&self) -> Result<Arc<crate::backend::Client>> {
        self.ctx.backend().cloned().ok_or(Error::NotConfigured)
    }
}
