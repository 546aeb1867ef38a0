//! Media gallery models

use serde::{Deserialize, Serialize};

/// Kind of gallery item, driving type-appropriate rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryKind {
    Image,
    Video,
}

/// Wire row for the `gallery_items` table
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryRow {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: GalleryKind,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub created_at: Option<String>,
}

/// A gallery item as held by the gallery store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub kind: GalleryKind,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub created_at: Option<String>,
}

impl From<GalleryRow> for GalleryItem {
    fn from(row: GalleryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            kind: row.kind,
            url: row.url,
            thumbnail_url: row.thumbnail_url,
            created_at: row.created_at,
        }
    }
}

/// Mutation payload for the `gallery_items` table
#[derive(Debug, Clone, Serialize)]
pub struct GalleryPayload {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: GalleryKind,
    pub url: String,
    pub thumbnail_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&GalleryKind::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&GalleryKind::Video).unwrap(), "\"video\"");
    }

    #[test]
    fn test_row_uses_type_column() {
        let json = r#"{
            "id": "g1",
            "title": "Backstage",
            "type": "image",
            "url": "https://cdn.example.com/g1.jpg",
            "thumbnail_url": null,
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let row: GalleryRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind, GalleryKind::Image);
        let item = GalleryItem::from(row);
        assert_eq!(item.id, "g1");
    }
}
