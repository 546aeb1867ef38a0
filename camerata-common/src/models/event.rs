//! Calendar event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire row for the `events` table.
///
/// Tolerates both snake_case and camelCase column spellings; older rows were
/// written before the schema was normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(alias = "startsAt")]
    pub starts_at: Option<String>,
    pub address: Option<String>,
    #[serde(alias = "isFree")]
    pub is_free: Option<bool>,
    pub price: Option<f64>,
    #[serde(alias = "externalUrl")]
    pub external_url: Option<String>,
    #[serde(alias = "locationUrl")]
    pub location_url: Option<String>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A calendar event as held by the event catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub address: Option<String>,
    pub is_free: bool,
    pub price: Option<f64>,
    pub external_url: Option<String>,
    pub location_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl EventRow {
    /// Map a wire row to a record. A missing or unparsable start time maps
    /// to `now`, matching the site's lenient treatment of legacy rows.
    pub fn into_record(self, now: DateTime<Utc>) -> EventRecord {
        let starts_at = self
            .starts_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);

        EventRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            starts_at,
            address: self.address,
            is_free: self.is_free.unwrap_or(false),
            price: self.price,
            external_url: self.external_url,
            location_url: self.location_url,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl EventRecord {
    /// Price with the free-event invariant applied: a free event has no
    /// price, regardless of what is stored.
    pub fn effective_price(&self) -> Option<f64> {
        if self.is_free {
            None
        } else {
            self.price
        }
    }
}

/// Values collected from the event form for create/update.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub address: Option<String>,
    pub is_free: bool,
    pub price: Option<f64>,
    pub external_url: Option<String>,
    pub location_url: Option<String>,
    pub image_url: Option<String>,
}

/// Mutation payload for the `events` table.
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub title: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub address: Option<String>,
    pub is_free: bool,
    pub price: Option<f64>,
    pub external_url: Option<String>,
    pub location_url: Option<String>,
    pub image_url: Option<String>,
}

impl EventForm {
    /// Build the wire payload, forcing `price` to null for free events.
    pub fn payload(&self) -> EventPayload {
        EventPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            starts_at: self.starts_at.to_rfc3339(),
            address: self.address.clone(),
            is_free: self.is_free,
            price: if self.is_free { None } else { self.price },
            external_url: self.external_url.clone(),
            location_url: self.location_url.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Parse an RFC 3339 timestamp, tolerating a trailing offset or `Z`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
