//! # Camerata Sync Library
//!
//! Content-synchronization layer for the site: every editable page section
//! (events, repertoire lists, cachet texts, gallery) loads authoritative
//! state from the hosted backend when one is configured and falls back to
//! statically bundled content otherwise. Mutations apply locally first
//! (optimistic) and persist remotely when the backend is available.
//!
//! Composition root is [`context::AppContext`]; stores never talk to the
//! backend except through the handle it carries.

pub mod backend;
pub mod context;
pub mod fallback;
pub mod session;
pub mod store;

pub use context::AppContext;
pub use session::{SessionGate, SessionState};
pub use store::{ContentRecord, Persistence, SourceOrigin};
