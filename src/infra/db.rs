//! SQLite connection and migrations.

use crate::error::AppError;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Handle to the database file. Holds no connection; every store call
/// opens its own through [`get_connection`] and drops it before returning.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Initialize DB at path, run migrations, return the database handle.
pub fn init_db(db_path: &Path) -> Result<Database, AppError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Db(e.to_string()))?;
        }
    }
    let db = Database {
        path: db_path.to_path_buf(),
    };
    let mut conn = get_connection(&db)?;
    let applied = run_migrations(&mut conn)?;
    if applied > 0 {
        log::info!("Applied {} migration(s) to {:?}", applied, db_path);
    }
    Ok(db)
}

fn run_migrations(conn: &mut Connection) -> Result<usize, AppError> {
    let tx = conn.transaction()?;

    // Ensure schema_migrations exists (first run)
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

    let mut count = 0;
    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // Skip the INSERT into schema_migrations in the script - we do it ourselves
        let statements: Vec<&str> = sql
            .split(';')
            .map(strip_comments)
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"))
            .collect();
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        count += 1;
    }

    tx.commit()?;
    Ok(count)
}

fn strip_comments(chunk: &str) -> &str {
    let mut rest = chunk.trim();
    while rest.starts_with("--") {
        rest = match rest.find('\n') {
            Some(idx) => rest[idx + 1..].trim(),
            None => "",
        };
    }
    rest
}

/// Open a fresh connection for one store operation.
///
/// Foreign keys are off by default in SQLite; the post cascade depends on them.
pub fn get_connection(db: &Database) -> Result<Connection, AppError> {
    let conn = Connection::open(&db.path).map_err(|e| {
        AppError::Db(format!("cannot open database {:?}: {}", db.path, e))
    })?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}
