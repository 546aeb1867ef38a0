//! Fallback-only mode integration tests
//!
//! With no backend configured the whole system must behave as a static
//! brochure: every store serves its bundled fallback content, mutations
//! stay local (or are rejected where no optimistic path exists), and no
//! edit affordance is available.

use camerata_common::models::{Composer, RepertoireField, RepertoireItem};
use camerata_common::Error;
use camerata_sync::fallback::DEMO_EVENT_ID;
use camerata_sync::store::{CachetStore, EventCatalog, RepertoireStore};
use camerata_sync::{AppContext, Persistence, SessionState, SourceOrigin};

fn repertoire_fallback() -> Vec<RepertoireItem> {
    vec![
        RepertoireItem {
            composer: Composer {
                first_name: "Antonio".to_string(),
                last_name: "Vivaldi".to_string(),
                birth_year: Some(1678),
                death_year: Some(1741),
            },
            piece_title: "Concerto in Do maggiore".to_string(),
            composition_year: None,
        },
        RepertoireItem {
            composer: Composer {
                first_name: "Gabriel".to_string(),
                last_name: "Fauré".to_string(),
                birth_year: Some(1845),
                death_year: Some(1924),
            },
            piece_title: "Élégie".to_string(),
            composition_year: Some(1880),
        },
    ]
}

#[tokio::test]
async fn unconfigured_event_catalog_serves_demo_event() {
    let ctx = AppContext::from_config(None);
    let mut catalog = EventCatalog::new(ctx);
    catalog.refresh().await;

    assert_eq!(catalog.future().len(), 1);
    assert!(catalog.past().is_empty());
    assert_eq!(catalog.upcoming_event().unwrap().id, DEMO_EVENT_ID);
    // Informational, not an error state.
    assert!(catalog.error().is_none());
    assert!(catalog.info().is_some());
}

#[tokio::test]
async fn unconfigured_cachet_serves_exact_fallback() {
    let ctx = AppContext::from_config(None);
    let mut cachet = CachetStore::new(ctx, "progetti/duo-piano", "Testo di riserva.", true);
    cachet.refresh().await;

    assert_eq!(cachet.text(), "Testo di riserva.");
    assert_eq!(cachet.source(), SourceOrigin::Fallback);
    assert!(cachet.error().is_none());
}

#[tokio::test]
async fn cachet_edit_stays_local_and_reports_it() {
    let ctx = AppContext::from_config(None);
    let mut cachet = CachetStore::new(ctx, "progetti/duo-piano", "Testo di riserva.", true);

    let persistence = cachet.update_cachet("Aggiornato dall'editor").await.unwrap();
    assert_eq!(persistence, Persistence::LocalOnly);
    assert_eq!(cachet.text(), "Aggiornato dall'editor");
}

#[tokio::test]
async fn repertoire_fallback_list_gets_contiguous_sort_orders() {
    let ctx = AppContext::from_config(None);
    let mut store = RepertoireStore::new(ctx, "progetti/solista", repertoire_fallback(), true);
    store.refresh().await;

    let orders: Vec<usize> = store.entries().iter().map(|e| e.sort_order).collect();
    assert_eq!(orders, vec![0, 1]);
}

#[tokio::test]
async fn repertoire_year_coercion_clears_on_empty_input() {
    let ctx = AppContext::from_config(None);
    let mut store = RepertoireStore::new(ctx, "progetti/solista", repertoire_fallback(), true);
    store.refresh().await;

    store
        .update_field(0, RepertoireField::ComposerBirthYear, "")
        .await
        .unwrap();
    assert_eq!(store.entries()[0].composer.birth_year, None);
}

#[tokio::test]
async fn repertoire_add_then_delete_is_idempotent() {
    let ctx = AppContext::from_config(None);
    let mut store = RepertoireStore::new(ctx, "progetti/solista", repertoire_fallback(), true);
    store.refresh().await;
    let before = store.entries().to_vec();

    store.add_row().await.unwrap();
    store.delete_row(before.len()).await.unwrap();

    assert_eq!(store.entries(), &before[..]);
    let orders: Vec<usize> = store.entries().iter().map(|e| e.sort_order).collect();
    assert_eq!(orders, (0..before.len()).collect::<Vec<_>>());
}

#[tokio::test]
async fn unconfigured_session_rejects_sign_in_and_hides_edits() {
    let ctx = AppContext::from_config(None);

    let result = ctx.sign_in("admin@example.com", "wrong-password").await;
    assert!(matches!(result, Err(Error::NotConfigured)));

    assert_eq!(ctx.session().state(), SessionState::Anonymous);
    assert!(ctx.session().current_user().is_none());
    assert!(!ctx.can_edit());
}
