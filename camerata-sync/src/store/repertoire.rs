//! Page-scoped repertoire list store
//!
//! An ordered list of composer/piece rows per page key. Edits apply to
//! local state immediately; persistence follows. Entries created locally
//! have no backend id until their insert completes, at which point the
//! generated id is back-filled into the matching entry — matched by the
//! entry's local correlation id, never by array position, so an interleaved
//! add or delete cannot misdirect the back-fill.

use crate::backend::{Client, Order, Query};
use crate::context::AppContext;
use crate::store::Persistence;
use camerata_common::models::repertoire::parse_year;
use camerata_common::models::{RepertoireEntry, RepertoireField, RepertoireItem, RepertoireRow};
use camerata_common::{Error, Result};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const REPERTOIRE_TABLE: &str = "project_repertoire";

pub struct RepertoireStore {
    ctx: Arc<AppContext>,
    page_key: String,
    fallback: Vec<RepertoireItem>,
    /// Disabled pages never touch the network
    enabled: bool,
    entries: Vec<RepertoireEntry>,
    loading: bool,
    saving: bool,
    error: Option<String>,
}

impl RepertoireStore {
    pub fn new(
        ctx: Arc<AppContext>,
        page_key: impl Into<String>,
        fallback: Vec<RepertoireItem>,
        enabled: bool,
    ) -> Self {
        let entries = normalize_fallback(&fallback);
        Self {
            ctx,
            page_key: page_key.into(),
            fallback,
            enabled,
            entries,
            loading: enabled,
            saving: false,
            error: None,
        }
    }

    pub fn entries(&self) -> &[RepertoireEntry] {
        &self.entries
    }

    pub fn page_key(&self) -> &str {
        &self.page_key
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

    /// Reload from the backend. An empty remote result (not an error)
    /// resets local state to the fallback list; a query error keeps the
    /// fallback and surfaces the message.
    pub async fn refresh(&mut self) {
        if !self.enabled {
            self.loading = false;
            return;
        }

        let Some(client) = self.ctx.backend().cloned() else {
            self.entries = normalize_fallback(&self.fallback);
            self.loading = false;
            return;
        };

        self.loading = true;
        let query = Query::new()
            .eq("page_key", &self.page_key)
            .order("sort_order", Order::Ascending)
            .order("created_at", Order::Ascending);

        match client.select::<RepertoireRow>(REPERTOIRE_TABLE, &query).await {
            Err(e) => {
                self.error = Some(e.to_string());
                self.entries = normalize_fallback(&self.fallback);
            }
            Ok(rows) if rows.is_empty() => {
                self.entries = normalize_fallback(&self.fallback);
                self.error = None;
            }
            Ok(rows) => {
                debug!(page_key = %self.page_key, rows = rows.len(), "repertoire refreshed");
                self.entries = rows
                    .into_iter()
                    .enumerate()
                    .map(|(position, row)| RepertoireEntry::from_row(row, position))
                    .collect();
                self.error = None;
            }
        }
        self.loading = false;
    }

    /// Edit one field of the entry at `index`. The local edit always
    /// applies; year fields coerce invalid or empty input to absent.
    /// Persisted entries issue an update, unpersisted ones an insert whose
    /// generated id is back-filled on completion.
    pub async fn update_field(
        &mut self,
        index: usize,
        field: RepertoireField,
        raw: &str,
    ) -> Result<Persistence> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| Error::InvalidInput(format!("no repertoire entry at index {index}")))?;
        self.error = None;

        match field {
            RepertoireField::ComposerFirstName => entry.composer.first_name = raw.to_string(),
            RepertoireField::ComposerLastName => entry.composer.last_name = raw.to_string(),
            RepertoireField::ComposerBirthYear => entry.composer.birth_year = parse_year(raw),
            RepertoireField::ComposerDeathYear => entry.composer.death_year = parse_year(raw),
            RepertoireField::PieceTitle => entry.piece_title = raw.to_string(),
            RepertoireField::CompositionYear => entry.composition_year = parse_year(raw),
        }
        entry.sort_order = index;

        let snapshot = entry.clone();
        self.persist_entry(snapshot, index).await
    }

    /// Append an empty entry at the end of the list, then persist it.
    pub async fn add_row(&mut self) -> Result<Persistence> {
        self.error = None;
        let index = self.entries.len();
        let entry = RepertoireEntry::empty(index);
        let snapshot = entry.clone();
        self.entries.push(entry);

        self.persist_entry(snapshot, index).await
    }

    /// Remove the entry at `index` and renumber the remainder to a
    /// contiguous zero-based sequence. Entries never persisted are simply
    /// dropped; persisted ones are deleted remotely by id.
    pub async fn delete_row(&mut self, index: usize) -> Result<Persistence> {
        if index >= self.entries.len() {
            return Err(Error::InvalidInput(format!(
                "no repertoire entry at index {index}"
            )));
        }
        self.error = None;

        let removed = self.entries.remove(index);
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.sort_order = position;
        }

        let Some(id) = removed.id else {
            return Ok(Persistence::LocalOnly);
        };
        if !self.enabled {
            return Ok(Persistence::LocalOnly);
        }
        let Some(client) = self.ctx.backend().cloned() else {
            return Ok(Persistence::LocalOnly);
        };

        self.saving = true;
        let result = client.delete_by_id(REPERTOIRE_TABLE, &id).await;
        self.saving = false;

        match result {
            Ok(()) => Ok(Persistence::Remote),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Phase 2 for an edited or appended entry: update when persisted,
    /// insert with id back-fill when not.
    async fn persist_entry(
        &mut self,
        snapshot: RepertoireEntry,
        sort_order: usize,
    ) -> Result<Persistence> {
        if !self.enabled {
            return Ok(Persistence::LocalOnly);
        }
        let Some(client) = self.ctx.backend().cloned() else {
            return Ok(Persistence::LocalOnly);
        };

        self.saving = true;
        let result = match &snapshot.id {
            Some(id) => self
                .persist_update(&client, id, &snapshot, sort_order)
                .await,
            None => {
                self.persist_insert(&client, &snapshot, sort_order, snapshot.local_id)
                    .await
            }
        };
        self.saving = false;

        match result {
            Ok(()) => Ok(Persistence::Remote),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn persist_update(
        &self,
        client: &Client,
        id: &str,
        snapshot: &RepertoireEntry,
        sort_order: usize,
    ) -> Result<()> {
        client
            .update_by_id(
                REPERTOIRE_TABLE,
                id,
                &snapshot.payload(&self.page_key, sort_order),
            )
            .await
    }

    async fn persist_insert(
        &mut self,
        client: &Client,
        snapshot: &RepertoireEntry,
        sort_order: usize,
        correlation: Uuid,
    ) -> Result<()> {
        let row: RepertoireRow = client
            .insert_returning(
                REPERTOIRE_TABLE,
                &snapshot.payload(&self.page_key, sort_order),
            )
            .await?;

        // Back-fill by correlation id; the entry may have moved (or gone)
        // while the insert was in flight.
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.local_id == correlation)
        {
            entry.id = Some(row.id);
            entry.created_at = row.created_at;
            entry.updated_at = row.updated_at;
        } else {
            debug!(page_key = %self.page_key, "inserted entry no longer present locally");
        }
        Ok(())
    }
}

/// Fallback entries take their array index as sort order.
fn normalize_fallback(fallback: &[RepertoireItem]) -> Vec<RepertoireEntry> {
    fallback
        .iter()
        .enumerate()
        .map(|(index, item)| RepertoireEntry::from_fallback(item, index))
        .collect()
}
