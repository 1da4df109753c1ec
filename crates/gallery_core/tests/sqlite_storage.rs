use gallery_core::db::migrations::latest_version;
use gallery_core::db::{open_db, DbError};
use gallery_core::{
    KeyValueStore, MemoryKind, MemoryRecord, MemoryStore, Photo, SqliteKvStore, StorageError,
    DEFAULT_STORAGE_KEY,
};

#[test]
fn set_get_remove_in_memory() {
    let mut kv = SqliteKvStore::open_in_memory().unwrap();

    assert_eq!(kv.get("missing").unwrap(), None);
    kv.set("b", "1").unwrap();
    kv.set("a", "2").unwrap();
    kv.set("b", "3").unwrap();

    assert_eq!(kv.get("b").unwrap().as_deref(), Some("3"));
    assert_eq!(kv.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    assert!(kv.remove("a").unwrap());
    assert!(!kv.remove("a").unwrap());
}

#[test]
fn values_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.sqlite3");

    {
        let mut kv = SqliteKvStore::open(&path).unwrap();
        kv.set(DEFAULT_STORAGE_KEY, "{\"photos\":[]}").unwrap();
    }

    let kv = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        kv.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
        Some("{\"photos\":[]}")
    );
}

#[test]
fn store_state_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.sqlite3");

    let expected = {
        let mut store = MemoryStore::open(SqliteKvStore::open(&path).unwrap(), DEFAULT_STORAGE_KEY);
        store
            .create(MemoryRecord::Photo(Photo {
                title: "Lake".to_string(),
                date: "2024-08-01".to_string(),
                ..Photo::default()
            }))
            .unwrap();
        store.delete(MemoryKind::Video, 1).unwrap();
        store.state().clone()
    };

    let reopened = MemoryStore::open(SqliteKvStore::open(&path).unwrap(), DEFAULT_STORAGE_KEY);
    assert_eq!(reopened.state(), &expected);
    assert!(reopened.state().videos.is_empty());
}

#[test]
fn newer_schema_version_is_rejected_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = open_db(&path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = SqliteKvStore::open(&path).err().expect("open should fail");
    assert!(matches!(
        err,
        StorageError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
}
