//! Schema initializer tests

mod common;

use app_lib::infra::{get_connection, init_db};
use common::init_test_db;

fn table_names(db: &app_lib::infra::Database) -> Vec<String> {
    let conn = get_connection(db).unwrap();
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    let names = stmt
        .query_map([], |r| r.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}

#[test]
fn init_creates_users_and_posts_tables() {
    let db = init_test_db();
    let names = table_names(&db);
    assert!(names.contains(&"users".to_string()));
    assert!(names.contains(&"posts".to_string()));
    assert!(names.contains(&"schema_migrations".to_string()));
}

#[test]
fn init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("again.db");
    init_db(&path).unwrap();
    let db = init_db(&path).unwrap();

    let conn = get_connection(&db).unwrap();
    let versions: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_migrations", [], |r| r.get(0))
        .unwrap();
    assert_eq!(versions, 1);
}

#[test]
fn init_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("news.db");
    let db = init_db(&path).unwrap();
    assert!(path.exists());
    assert_eq!(db.path(), path.as_path());
}

#[test]
fn unreachable_storage_is_a_db_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a database file.
    let err = init_db(dir.path()).unwrap_err();
    assert_eq!(err.code(), "DB_ERROR");
}

#[test]
fn connections_enforce_foreign_keys() {
    let db = init_test_db();
    let conn = get_connection(&db).unwrap();
    let on: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |r| r.get(0))
        .unwrap();
    assert_eq!(on, 1);

    let orphan = conn.execute(
        "INSERT INTO posts (title, body, owner_id) VALUES ('t', 'b', 999)",
        [],
    );
    assert!(orphan.is_err());
}

#[test]
fn created_at_defaults_to_insert_time() {
    let db = init_test_db();
    let conn = get_connection(&db).unwrap();
    conn.execute("INSERT INTO users (name) VALUES ('Zed')", []).unwrap();
    conn.execute(
        "INSERT INTO posts (title, body, owner_id) VALUES ('t', 'b', 1)",
        [],
    )
    .unwrap();
    let created: String = conn
        .query_row("SELECT created_at FROM posts", [], |r| r.get(0))
        .unwrap();
    assert!(app_lib::domain::text::parse_timestamp(&created).is_some());
}
