//! Integration tests for the watched list stored in SQLite and driven
//! through the application state.
//!
//! Each test creates its own database for isolation.

use onedoc::app::App;
use onedoc::catalog::Catalog;
use onedoc::config::Config;
use onedoc::panel::PointerOverride;
use onedoc::preferences::PreferenceManager;
use onedoc::storage::{Database, KvStore};
use onedoc::watched::{WatchedSet, WATCHED_KEY};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Pointer override that does nothing; drags are not exercised here.
struct NoopPointer;

impl PointerOverride for NoopPointer {
    fn engage(&self) {}
    fn release(&self) {}
}

async fn test_db() -> Database {
    Database::open(":memory:").await.unwrap()
}

const CATALOG: &str = r#"
[[topics]]
id = "a"
name = "A"
icon = "info"
description = "Topic A"

[topics.detail]
title = "A Tools"
brief = "a"
video_ref = "/videos/a.mp4"
overview = "a"

[[videos]]
id = "1"
title = "Alpha"
description = "first"
video_ref = "/videos/1.mp4"
topic_id = "a"
tool = "T"
duration = "1:00"

[[videos]]
id = "2"
title = "Bravo"
description = "second"
video_ref = "/videos/2.mp4"
topic_id = "a"
tool = "T"
duration = "2:00"

[[videos]]
id = "3"
title = "Charlie"
description = "third"
video_ref = "/videos/3.mp4"
topic_id = "a"
tool = "T"
duration = "3:00"
"#;

async fn test_app(db: Database) -> App {
    let mut app = App::new(
        db,
        Arc::new(Catalog::from_toml_str(CATALOG).unwrap()),
        PreferenceManager::from_config(&Config::default()),
        Arc::new(NoopPointer),
    );
    app.load_watched().await;
    app
}

#[tokio::test]
async fn missing_key_loads_empty() {
    let db = test_db().await;
    let set = WatchedSet::load(&db).await.unwrap();
    assert!(set.is_empty());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let db = test_db().await;
    let mut set = WatchedSet::new();
    set.insert("3");
    set.insert("1");
    set.save(&db).await.unwrap();

    assert_eq!(
        KvStore::get(&db, WATCHED_KEY).await.unwrap().as_deref(),
        Some(r#"["1","3"]"#)
    );
    assert_eq!(WatchedSet::load(&db).await.unwrap(), set);
}

#[tokio::test]
async fn deleting_stored_list_resets_progress() {
    let db = test_db().await;
    let mut set = WatchedSet::new();
    set.insert("1");
    set.insert("2");
    set.save(&db).await.unwrap();

    assert!(db.delete_preference(WATCHED_KEY).await.unwrap());
    assert!(!db.delete_preference(WATCHED_KEY).await.unwrap());

    let app = test_app(db).await;
    assert!(app.watched.is_empty());
    assert_eq!(app.progress(), (0, 3));
}

#[tokio::test]
async fn malformed_value_loads_empty() {
    let db = test_db().await;
    KvStore::set(&db, WATCHED_KEY, "{not json").await.unwrap();
    assert!(WatchedSet::load(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn modal_scenario_persists_toggles() {
    let db = test_db().await;
    let mut app = test_app(db.clone()).await;

    assert!(app.open_video("2"));
    let modal = app.modal.as_ref().unwrap();
    assert_eq!(modal.previous(&app.catalog).map(|v| v.id.as_str()), Some("1"));
    assert_eq!(modal.next(&app.catalog).map(|v| v.id.as_str()), Some("3"));

    assert_eq!(app.toggle_watched().await.unwrap(), Some(true));
    assert!(app.is_watched("2"));
    assert!(WatchedSet::load(&db).await.unwrap().contains("2"));

    assert_eq!(app.toggle_watched().await.unwrap(), Some(false));
    assert!(!app.is_watched("2"));
    assert!(!WatchedSet::load(&db).await.unwrap().contains("2"));
}

#[tokio::test]
async fn watched_list_survives_restart() {
    let db = test_db().await;
    {
        let mut app = test_app(db.clone()).await;
        app.open_video("3");
        app.toggle_watched().await.unwrap();
    }

    let app = test_app(db).await;
    assert!(app.is_watched("3"));
    assert_eq!(app.progress(), (1, 3));
}

#[tokio::test]
async fn stale_ids_are_kept_but_not_counted() {
    let db = test_db().await;
    let mut set = WatchedSet::new();
    set.insert("1");
    set.insert("retired-video");
    set.save(&db).await.unwrap();

    let app = test_app(db).await;
    assert_eq!(app.watched.len(), 2);
    assert_eq!(app.progress(), (1, 3));
}
