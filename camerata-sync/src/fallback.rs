//! Statically bundled fallback content
//!
//! Shown whenever the backend is unreachable or unconfigured. The demo
//! event keeps the site presentable on a fresh deployment with no backend.

use camerata_common::models::EventRecord;
use chrono::{DateTime, Duration, Utc};

/// Id of the bundled demo event
pub const DEMO_EVENT_ID: &str = "preview-1";

/// Informational message shown alongside demo content
pub const UNCONFIGURED_MESSAGE: &str = "Backend not configured. Showing demo content.";

/// The single demo event: one day in the future relative to `now`.
pub fn demo_event(now: DateTime<Utc>) -> EventRecord {
    EventRecord {
        id: DEMO_EVENT_ID.to_string(),
        title: "Concerto demo".to_string(),
        description: Some("Replace this content by connecting a backend.".to_string()),
        starts_at: now + Duration::days(1),
        address: Some("Milano, Teatro Demo".to_string()),
        is_free: true,
        price: None,
        external_url: None,
        location_url: None,
        image_url: None,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_event_is_in_the_future() {
        let now = Utc::now();
        let event = demo_event(now);
        assert_eq!(event.id, DEMO_EVENT_ID);
        assert!(event.starts_at > now);
        assert!(event.is_free);
        assert_eq!(event.effective_price(), None);
    }
}
