//! Event catalog
//!
//! Fetches all events ordered by start time and partitions them around a
//! single `now` into future (ascending) and past (descending, most recent
//! first). Event mutations are not optimistic: partition membership can
//! change on any edit, so each mutation persists remotely and then triggers
//! a full refresh.

use crate::backend::{Order, Query};
use crate::context::AppContext;
use crate::fallback;
use camerata_common::models::{EventForm, EventRecord, EventRow};
use camerata_common::{time, Error, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

const EVENTS_TABLE: &str = "events";

pub struct EventCatalog {
    ctx: Arc<AppContext>,
    future: Vec<EventRecord>,
    past: Vec<EventRecord>,
    loading: bool,
    /// Read failure surfaced alongside (empty) content
    error: Option<String>,
    /// Informational message for fallback mode; not an error state
    info: Option<String>,
}

impl EventCatalog {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            future: Vec::new(),
            past: Vec::new(),
            loading: true,
            error: None,
            info: None,
        }
    }

    pub fn future(&self) -> &[EventRecord] {
        &self.future
    }

    pub fn past(&self) -> &[EventRecord] {
        &self.past
    }

    /// Next upcoming event: head of the future partition.
    pub fn upcoming_event(&self) -> Option<&EventRecord> {
        self.future.first()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.ctx.is_configured()
    }

    /// Reload the catalog from the backend, or serve the demo event when no
    /// backend is configured.
    pub async fn refresh(&mut self) {
        self.loading = true;

        let Some(client) = self.ctx.backend().cloned() else {
            let now = time::now();
            self.future = vec![fallback::demo_event(now)];
            self.past = Vec::new();
            self.error = None;
            self.info = Some(fallback::UNCONFIGURED_MESSAGE.to_string());
            self.loading = false;
            return;
        };

        let query = Query::new().order("starts_at", Order::Ascending);
        match client.select::<EventRow>(EVENTS_TABLE, &query).await {
            Err(e) => {
                self.error = Some(e.to_string());
                self.future = Vec::new();
                self.past = Vec::new();
            }
            Ok(rows) => {
                // One `now` for the whole partition; comparing each event
                // against a fresh clock could split a refresh inconsistently.
                let now = time::now();
                let records: Vec<EventRecord> =
                    rows.into_iter().map(|row| row.into_record(now)).collect();
                let (future, past) = partition_events(records, now);
                debug!(future = future.len(), past = past.len(), "events refreshed");
                self.future = future;
                self.past = past;
                self.error = None;
                self.info = None;
            }
        }
        self.loading = false;
    }

    /// Create an event, then refresh. Fails fast on remote errors; the
    /// caller is responsible for user-facing display.
    pub async fn create_event(&mut self, form: &EventForm) -> Result<()> {
        let client = self.backend()?;
        client.insert(EVENTS_TABLE, &form.payload()).await?;
        self.refresh().await;
        Ok(())
    }

    /// Update an event, then refresh.
    pub async fn update_event(&mut self, event_id: &str, form: &EventForm) -> Result<()> {
        let client = self.backend()?;
        client
            .update_by_id(EVENTS_TABLE, event_id, &form.payload())
            .await?;
        self.refresh().await;
        Ok(())
    }

    /// Delete an event, then refresh.
    pub async fn delete_event(&mut self, event_id: &str) -> Result<()> {
        let client = self.backend()?;
        client.delete_by_id(EVENTS_TABLE, event_id).await?;
        self.refresh().await;
        Ok(())
    }

    fn backend(&self) -> Result<Arc<crate::backend::Client>> {
        self.ctx.backend().cloned().ok_or(Error::NotConfigured)
    }
}

/// Partition events around `now`: future (`starts_at >= now`) ascending,
/// past descending.
fn partition_events(
    records: Vec<EventRecord>,
    now: DateTime<Utc>,
) -> (Vec<EventRecord>, Vec<EventRecord>) {
    let (mut future, mut past): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|event| event.starts_at >= now);

    future.sort_by_key(|event| event.starts_at);
    past.sort_by_key(|event| std::cmp::Reverse(event.starts_at));

    (future, past)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(id: &str, starts_at: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: None,
            starts_at,
            address: None,
            is_free: true,
            price: None,
            external_url: None,
            location_url: None,
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_partition_covers_all_events() {
        let now = Utc::now();
        let records = vec![
            event("a", now - Duration::days(2)),
            event("b", now + Duration::days(1)),
            event("c", now - Duration::hours(1)),
            event("d", now + Duration::hours(3)),
        ];
        let total = records.len();

        let (future, past) = partition_events(records, now);
        assert_eq!(future.len() + past.len(), total);
        assert!(future.iter().all(|e| e.starts_at >= now));
        assert!(past.iter().all(|e| e.starts_at < now));
    }

    #[test]
    fn test_future_ascending_past_descending() {
        let now = Utc::now();
        let records = vec![
            event("far-future", now + Duration::days(30)),
            event("near-future", now + Duration::days(1)),
            event("recent-past", now - Duration::days(1)),
            event("old-past", now - Duration::days(30)),
        ];

        let (future, past) = partition_events(records, now);
        assert_eq!(future[0].id, "near-future");
        assert_eq!(future[1].id, "far-future");
        assert_eq!(past[0].id, "recent-past");
        assert_eq!(past[1].id, "old-past");
    }

    #[test]
    fn test_event_exactly_at_now_counts_as_future() {
        let now = Utc::now();
        let (future, past) = partition_events(vec![event("edge", now)], now);
        assert_eq!(future.len(), 1);
        assert!(past.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_refresh_serves_demo_event() {
        let mut catalog = EventCatalog::new(AppContext::unconfigured());
        catalog.refresh().await;

        assert_eq!(catalog.future().len(), 1);
        assert!(catalog.past().is_empty());
        assert_eq!(catalog.upcoming_event().unwrap().id, fallback::DEMO_EVENT_ID);
        assert!(catalog.error().is_none());
        assert!(catalog.info().is_some());
        assert!(!catalog.loading());
    }

    #[tokio::test]
    async fn test_unconfigured_mutations_are_rejected() {
        let mut catalog = EventCatalog::new(AppContext::unconfigured());
        let form = EventForm {
            title: "New".to_string(),
            starts_at: Utc::now(),
            ..Default::default()
        };

        assert!(matches!(
            catalog.create_event(&form).await,
            Err(Error::NotConfigured)
        ));
        assert!(matches!(
            catalog.delete_event("evt-1").await,
            Err(Error::NotConfigured)
        ));
    }

    #[test]
    fn test_upcoming_is_none_when_future_empty() {
        let catalog = EventCatalog::new(AppContext::unconfigured());
        assert!(catalog.upcoming_event().is_none());
    }
}
