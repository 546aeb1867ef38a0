//! Cachet text models
//!
//! One free-text blob per page key, upserted; there is no delete.

use serde::{Deserialize, Serialize};

/// Wire row for the `project_cachet` table
#[derive(Debug, Clone, Deserialize)]
pub struct CachetRow {
    pub id: String,
    pub page_key: String,
    pub cachet_text: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Cachet text for a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachetText {
    pub page_key: String,
    pub text: String,
}

/// Mutation payload for inserting a cachet record
#[derive(Debug, Clone, Serialize)]
pub struct CachetInsert {
    pub page_key: String,
    pub cachet_text: String,
}

/// Mutation payload for updating an existing cachet record
#[derive(Debug, Clone, Serialize)]
pub struct CachetUpdate {
    pub cachet_text: String,
}
