//! User use cases.

use crate::error::AppError;
use crate::infra::{get_connection, Database};
use rusqlite::{params, Connection, OptionalExtension, Row};

#[derive(Debug, Clone)]
pub struct UserCreateReq {
    pub name: String,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub contact: Option<String>,
}

/// Full overwrite of a user's mutable fields.
#[derive(Debug, Clone)]
pub struct UserUpdateReq {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub contact: Option<String>,
}

const USER_COLUMNS: &str = "id, name, email, age, contact";

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserDto> {
    Ok(UserDto {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        age: row.get(3)?,
        contact: row.get(4)?,
    })
}

fn validate(name: &str, age: Option<i64>) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if matches!(age, Some(a) if a < 0) {
        return Err(AppError::Validation("age must not be negative".into()));
    }
    Ok(name.to_string())
}

pub fn user_create(db: &Database, req: UserCreateReq) -> Result<UserDto, AppError> {
    let name = validate(&req.name, req.age)?;

    let conn = get_connection(db)?;
    conn.execute(
        "INSERT INTO users (name, email, age, contact) VALUES (?1, ?2, ?3, ?4)",
        params![&name, &req.email, req.age, &req.contact],
    )?;
    let id = conn.last_insert_rowid();
    log::info!("user created id={}", id);

    Ok(UserDto {
        id,
        name,
        email: req.email,
        age: req.age,
        contact: req.contact,
    })
}

/// All users in insertion order.
pub fn user_list(db: &Database) -> Result<Vec<UserDto>, AppError> {
    let conn = get_connection(db)?;
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
    let rows = stmt.query_map([], map_user)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn user_get(db: &Database, id: i64) -> Result<UserDto, AppError> {
    let conn = get_connection(db)?;
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id],
        map_user,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
}

/// Overwrites name, email, age and contact. A missing id changes nothing.
pub fn user_update(db: &Database, req: UserUpdateReq) -> Result<(), AppError> {
    let name = validate(&req.name, req.age)?;

    let conn = get_connection(db)?;
    let changed = conn.execute(
        "UPDATE users SET name = ?1, email = ?2, age = ?3, contact = ?4 WHERE id = ?5",
        params![&name, &req.email, req.age, &req.contact, req.id],
    )?;
    if changed == 0 {
        log::warn!("user update ignored: id={} does not exist", req.id);
    } else {
        log::info!("user updated id={}", req.id);
    }
    Ok(())
}

/// Deletes the user; the schema cascade removes every post they own.
pub fn user_delete(db: &Database, id: i64) -> Result<(), AppError> {
    let conn = get_connection(db)?;
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
    if changed == 0 {
        log::warn!("user delete ignored: id={} does not exist", id);
    } else {
        log::info!("user deleted id={} (posts cascaded)", id);
    }
    Ok(())
}

/// Every display name, ascending. Feeds the author selector.
pub fn user_names(db: &Database) -> Result<Vec<String>, AppError> {
    let conn = get_connection(db)?;
    let mut stmt = conn.prepare("SELECT name FROM users ORDER BY name ASC, id ASC")?;
    let rows = stmt.query_map([], |r| r.get(0))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn user_id_by_name(db: &Database, name: &str) -> Result<i64, AppError> {
    let conn = get_connection(db)?;
    resolve_author(&conn, name)
}

/// Display name to id. Names are not unique; the oldest user with the name wins.
pub(crate) fn resolve_author(conn: &Connection, name: &str) -> Result<i64, AppError> {
    conn.query_row(
        "SELECT id FROM users WHERE name = ?1 ORDER BY id LIMIT 1",
        [name],
        |r| r.get(0),
    )
    .optional()?
    .ok_or_else(|| AppError::AuthorNotFound(name.to_string()))
}

pub(crate) fn user_count(conn: &Connection) -> Result<i64, AppError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?)
}
