//! Repertoire list models
//!
//! Repertoire entries are page-scoped ordered rows. At rest the entries for
//! a page form a contiguous zero-based `sort_order` sequence; the stores
//! re-derive it after every insert and delete.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Composer of a repertoire piece
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composer {
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// Statically bundled fallback entry for a page
#[derive(Debug, Clone, PartialEq)]
pub struct RepertoireItem {
    pub composer: Composer,
    pub piece_title: String,
    pub composition_year: Option<i32>,
}

/// Wire row for the `project_repertoire` table
#[derive(Debug, Clone, Deserialize)]
pub struct RepertoireRow {
    pub id: String,
    pub page_key: String,
    pub composer_first_name: String,
    pub composer_last_name: String,
    pub composer_birth_year: Option<i32>,
    pub composer_death_year: Option<i32>,
    pub piece_title: String,
    pub composition_year: Option<i32>,
    pub sort_order: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A repertoire entry as held by the store.
///
/// `local_id` is generated client-side when the entry enters local state and
/// never leaves the process; insert completions are correlated by it, so
/// concurrent edits that shift array positions cannot misdirect a back-fill.
/// An entry with no `id` has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RepertoireEntry {
    pub local_id: Uuid,
    pub id: Option<String>,
    pub sort_order: usize,
    pub composer: Composer,
    pub piece_title: String,
    pub composition_year: Option<i32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RepertoireEntry {
    /// Fresh empty entry appended at `sort_order`.
    pub fn empty(sort_order: usize) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id: None,
            sort_order,
            composer: Composer::default(),
            piece_title: String::new(),
            composition_year: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Entry from a persisted row; assigns a fresh local correlation id.
    pub fn from_row(row: RepertoireRow, position: usize) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id: Some(row.id),
            sort_order: row.sort_order.map(|o| o.max(0) as usize).unwrap_or(position),
            composer: Composer {
                first_name: row.composer_first_name,
                last_name: row.composer_last_name,
                birth_year: row.composer_birth_year,
                death_year: row.composer_death_year,
            },
            piece_title: row.piece_title,
            composition_year: row.composition_year,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Entry from a fallback item at its array index.
    pub fn from_fallback(item: &RepertoireItem, index: usize) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            id: None,
            sort_order: index,
            composer: item.composer.clone(),
            piece_title: item.piece_title.clone(),
            composition_year: item.composition_year,
            created_at: None,
            updated_at: None,
        }
    }

    /// Mutation payload for this entry at the given position.
    pub fn payload(&self, page_key: &str, sort_order: usize) -> RepertoirePayload {
        RepertoirePayload {
            page_key: page_key.to_string(),
            composer_first_name: self.composer.first_name.clone(),
            composer_last_name: self.composer.last_name.clone(),
            composer_birth_year: self.composer.birth_year,
            composer_death_year: self.composer.death_year,
            piece_title: self.piece_title.clone(),
            composition_year: self.composition_year,
            sort_order: sort_order as i64,
        }
    }
}

/// Mutation payload for the `project_repertoire` table
#[derive(Debug, Clone, Serialize)]
pub struct RepertoirePayload {
    pub page_key: String,
    pub composer_first_name: String,
    pub composer_last_name: String,
    pub composer_birth_year: Option<i32>,
    pub composer_death_year: Option<i32>,
    pub piece_title: String,
    pub composition_year: Option<i32>,
    pub sort_order: i64,
}

/// Editable fields of a repertoire entry.
///
/// Closed enum over the dotted field paths the edit table exposes; string
/// keys parse via `FromStr` so callers holding a path name cannot reach a
/// field that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepertoireField {
    ComposerFirstName,
    ComposerLastName,
    ComposerBirthYear,
    ComposerDeathYear,
    PieceTitle,
    CompositionYear,
}

impl RepertoireField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComposerFirstName => "composer.firstName",
            Self::ComposerLastName => "composer.lastName",
            Self::ComposerBirthYear => "composer.birthYear",
            Self::ComposerDeathYear => "composer.deathYear",
            Self::PieceTitle => "pieceTitle",
            Self::CompositionYear => "compositionYear",
        }
    }

    /// Whether this field coerces to a numeric year.
    pub fn is_year(&self) -> bool {
        matches!(
            self,
            Self::ComposerBirthYear | Self::ComposerDeathYear | Self::CompositionYear
        )
    }
}

impl FromStr for RepertoireField {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "composer.firstName" => Ok(Self::ComposerFirstName),
            "composer.lastName" => Ok(Self::ComposerLastName),
            "composer.birthYear" => Ok(Self::ComposerBirthYear),
            "composer.deathYear" => Ok(Self::ComposerDeathYear),
            "pieceTitle" => Ok(Self::PieceTitle),
            "compositionYear" => Ok(Self::CompositionYear),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown repertoire field: {other}"
            ))),
        }
    }
}

/// Coerce a raw year input. Empty or non-numeric input clears the field
/// rather than erroring.
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}
