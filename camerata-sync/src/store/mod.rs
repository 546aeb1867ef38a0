//! Content stores
//!
//! One pattern applied per content family: try to load authoritative state
//! from the backend, fall back to statically bundled content when the
//! backend is unconfigured, unreachable, or has no record; mutate local
//! state immediately and persist asynchronously.
//!
//! Saves are two-phase. Phase 1 (the local state transition) always
//! succeeds synchronously. Phase 2 (remote persistence) reports
//! [`Persistence`] or an error the caller must surface; the optimistic
//! local state is never rolled back, so a failed phase 2 means the UI shows
//! an edit that did not persist and must say so.

pub mod cachet;
pub mod events;
pub mod gallery;
pub mod repertoire;

use crate::backend::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use cachet::CachetStore;
pub use events::EventCatalog;
pub use gallery::GalleryStore;
pub use repertoire::RepertoireStore;

/// Where a loaded value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Remote,
    Fallback,
}

/// Outcome of phase 2 of a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// The remote write took
    Remote,
    /// No backend available; the edit exists only locally
    LocalOnly,
}

/// A loaded value together with its provenance. `value` is never absent:
/// when the remote fetch fails or yields nothing, it holds the statically
/// configured fallback for `key`.
#[derive(Debug, Clone)]
pub struct ContentRecord<T> {
    pub key: String,
    pub value: T,
    pub source: SourceOrigin,
    pub last_error: Option<String>,
}

impl<T> ContentRecord<T> {
    fn fallback(key: &str, value: T, last_error: Option<String>) -> Self {
        Self {
            key: key.to_string(),
            value,
            source: SourceOrigin::Fallback,
            last_error,
        }
    }

    fn remote(key: &str, value: T) -> Self {
        Self {
            key: key.to_string(),
            value,
            source: SourceOrigin::Remote,
            last_error: None,
        }
    }
}

/// Load a keyed record, falling back to `fallback` when the backend is
/// absent, the query errors (message attached), the result is empty, or
/// `decode` yields nothing.
pub async fn load_or_fallback<T, Row, F>(
    backend: Option<&Client>,
    table: &str,
    key_column: &str,
    key: &str,
    fallback: T,
    decode: F,
) -> ContentRecord<T>
where
    Row: DeserializeOwned,
    F: FnOnce(Row) -> Option<T>,
{
    let Some(client) = backend else {
        debug!(table, key, "no backend, serving fallback");
        return ContentRecord::fallback(key, fallback, None);
    };

    match client.select_maybe_single::<Row>(table, key_column, key).await {
        Err(e) => ContentRecord::fallback(key, fallback, Some(e.to_string())),
        Ok(None) => ContentRecord::fallback(key, fallback, None),
        Ok(Some(row)) => match decode(row) {
            Some(value) => ContentRecord::remote(key, value),
            None => ContentRecord::fallback(key, fallback, None),
        },
    }
}
