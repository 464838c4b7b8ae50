//! News post use cases: CRUD, author joins, per-user listing.

use crate::app::user::resolve_author;
use crate::domain::text::{format_timestamp, parse_timestamp};
use crate::error::AppError;
use crate::infra::{get_connection, Database};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Placeholder shown when a post's owner no longer resolves.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
/// Drill-down label when the user row is gone.
pub const FALLBACK_USER_LABEL: &str = "User";

#[derive(Debug, Clone)]
pub struct PostCreateReq {
    pub title: String,
    pub body: String,
    /// Display name of the author; resolved to a user id at insert time.
    pub author: String,
    /// `YYYY-MM-DD HH:MM:SS`; insertion time when absent.
    pub created_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PostUpdateReq {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthorDto {
    pub post: PostDto,
    /// `None` when the owner row no longer exists.
    pub author_name: Option<String>,
}

impl PostWithAuthorDto {
    /// Author name, or [`UNKNOWN_AUTHOR`] when the owner is gone.
    pub fn author_label(&self) -> &str {
        self.author_name.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

#[derive(Debug, Clone)]
pub struct UserPostsDto {
    pub user_id: i64,
    pub author_label: String,
    pub posts: Vec<PostDto>,
}

const POST_COLUMNS: &str = "p.id, p.title, p.body, p.created_at, p.owner_id";
const POST_ORDER: &str = "ORDER BY p.created_at DESC, p.id DESC";

fn map_post(row: &Row<'_>) -> rusqlite::Result<PostDto> {
    Ok(PostDto {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
        owner_id: row.get(4)?,
    })
}

fn map_post_with_author(row: &Row<'_>) -> rusqlite::Result<PostWithAuthorDto> {
    Ok(PostWithAuthorDto {
        post: map_post(row)?,
        author_name: row.get(5)?,
    })
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn post_get_conn(conn: &Connection, id: i64) -> Result<Option<PostDto>, AppError> {
    Ok(conn
        .query_row(
            &format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = ?1"),
            [id],
            map_post,
        )
        .optional()?)
}

/// Create a post. The author is looked up by display name each time.
pub fn post_create(db: &Database, req: PostCreateReq) -> Result<PostDto, AppError> {
    let title = required("title", &req.title)?;
    let body = required("body", &req.body)?;
    let author = required("author", &req.author)?;
    let created_at = match req.created_at.as_deref() {
        Some(raw) => Some(
            parse_timestamp(raw)
                .map(|ts| format_timestamp(&ts))
                .ok_or_else(|| AppError::Validation(format!("invalid created_at `{}`", raw)))?,
        ),
        None => None,
    };

    let conn = get_connection(db)?;
    let owner_id = resolve_author(&conn, &author)?;

    match created_at {
        Some(ts) => conn.execute(
            "INSERT INTO posts (title, body, created_at, owner_id) VALUES (?1, ?2, ?3, ?4)",
            params![&title, &body, &ts, owner_id],
        )?,
        None => conn.execute(
            "INSERT INTO posts (title, body, owner_id) VALUES (?1, ?2, ?3)",
            params![&title, &body, owner_id],
        )?,
    };
    let id = conn.last_insert_rowid();
    log::info!("post created id={} owner_id={}", id, owner_id);

    post_get_conn(&conn, id)?.ok_or_else(|| AppError::NotFound(format!("post {}", id)))
}

/// All posts, newest first.
pub fn post_list(db: &Database) -> Result<Vec<PostDto>, AppError> {
    let conn = get_connection(db)?;
    let mut stmt = conn.prepare(&format!("SELECT {POST_COLUMNS} FROM posts p {POST_ORDER}"))?;
    let rows = stmt.query_map([], map_post)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn post_get(db: &Database, id: i64) -> Result<PostDto, AppError> {
    let conn = get_connection(db)?;
    post_get_conn(&conn, id)?.ok_or_else(|| AppError::NotFound(format!("post {}", id)))
}

/// Overwrites title, body and owner. The author name is re-resolved; a missing
/// post id changes nothing.
pub fn post_update(db: &Database, req: PostUpdateReq) -> Result<(), AppError> {
    let title = required("title", &req.title)?;
    let body = required("body", &req.body)?;
    let author = required("author", &req.author)?;

    let conn = get_connection(db)?;
    let owner_id = resolve_author(&conn, &author)?;
    let changed = conn.execute(
        "UPDATE posts SET title = ?1, body = ?2, owner_id = ?3 WHERE id = ?4",
        params![&title, &body, owner_id, req.id],
    )?;
    if changed == 0 {
        log::warn!("post update ignored: id={} does not exist", req.id);
    } else {
        log::info!("post updated id={} owner_id={}", req.id, owner_id);
    }
    Ok(())
}

pub fn post_delete(db: &Database, id: i64) -> Result<(), AppError> {
    let conn = get_connection(db)?;
    let changed = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
    if changed == 0 {
        log::warn!("post delete ignored: id={} does not exist", id);
    } else {
        log::info!("post deleted id={}", id);
    }
    Ok(())
}

/// All posts newest first, each paired with its author's name.
pub fn post_list_with_author_names(db: &Database) -> Result<Vec<PostWithAuthorDto>, AppError> {
    let conn = get_connection(db)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {POST_COLUMNS}, u.name
         FROM posts p
         LEFT JOIN users u ON u.id = p.owner_id
         {POST_ORDER}"
    ))?;
    let rows = stmt.query_map([], map_post_with_author)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Single post with its author's name, for the full preview panel.
pub fn post_get_with_author(db: &Database, id: i64) -> Result<PostWithAuthorDto, AppError> {
    let conn = get_connection(db)?;
    conn.query_row(
        &format!(
            "SELECT {POST_COLUMNS}, u.name
             FROM posts p
             LEFT JOIN users u ON u.id = p.owner_id
             WHERE p.id = ?1"
        ),
        [id],
        map_post_with_author,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
}

/// Posts owned by `user_id`, newest first, with the owner's name looked up once.
pub fn post_list_by_user(db: &Database, user_id: i64) -> Result<UserPostsDto, AppError> {
    let conn = get_connection(db)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {POST_COLUMNS} FROM posts p WHERE p.owner_id = ?1 {POST_ORDER}"
    ))?;
    let rows = stmt.query_map([user_id], map_post)?;
    let mut posts = Vec::new();
    for r in rows {
        posts.push(r?);
    }

    let author_label: Option<String> = conn
        .query_row("SELECT name FROM users WHERE id = ?1", [user_id], |r| {
            r.get(0)
        })
        .optional()?;

    Ok(UserPostsDto {
        user_id,
        author_label: author_label.unwrap_or_else(|| FALLBACK_USER_LABEL.to_string()),
        posts,
    })
}

pub(crate) fn post_count(conn: &Connection) -> Result<i64, AppError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM posts", [], |r| r.get(0))?)
}
