//! Data models for editable site content
//!
//! Each content family has a wire row type (what the backend returns),
//! a record type (what the stores hold), and where edits exist, a payload
//! type (what mutations send).

pub mod cachet;
pub mod event;
pub mod gallery;
pub mod repertoire;

pub use cachet::{CachetInsert, CachetRow, CachetText, CachetUpdate};
pub use event::{EventForm, EventPayload, EventRecord, EventRow};
pub use gallery::{GalleryItem, GalleryKind, GalleryPayload, GalleryRow};
pub use repertoire::{
    Composer, RepertoireEntry, RepertoireField, RepertoireItem, RepertoirePayload, RepertoireRow,
};
