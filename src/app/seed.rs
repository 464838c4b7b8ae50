//! Demo data inserted at startup into empty tables.

use crate::app::post::post_count;
use crate::app::user::user_count;
use crate::error::AppError;
use crate::infra::{get_connection, Database};
use rusqlite::params;

/// (name, email, age, contact)
pub const SAMPLE_USERS: &[(&str, &str, i64, &str)] = &[
    ("Alice", "alice@example.com", 25, "0123456789"),
    ("Bob", "bob@example.com", 30, "0123456790"),
    ("Charlie", "charlie@example.com", 28, "0123456791"),
    ("David", "david@example.com", 32, "0123456792"),
    ("Eva", "eva@example.com", 27, "0123456793"),
];

/// (title, body, created_at)
pub const SAMPLE_POSTS: &[(&str, &str, &str)] = &[
    (
        "New Species Discovered",
        "Scientists found a new species of frog deep inside the Amazon rainforest. This discovery could lead to more environmental studies.",
        "2025-11-03 09:00:00",
    ),
    (
        "Breakthrough in AI Art",
        "AI-generated illustrations are improving with advanced models, enabling highly realistic and creative outputs.",
        "2025-11-06 12:30:00",
    ),
    (
        "Solar Water Purification",
        "A solar-powered water purification device is now helping rural villages access clean drinking water.",
        "2025-11-10 14:15:00",
    ),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users_inserted: usize,
    pub posts_inserted: usize,
}

/// Fill empty tables with demo rows. Each table is only touched while empty,
/// so repeated runs insert nothing.
pub fn seed_sample_data(db: &Database) -> Result<SeedReport, AppError> {
    let users_inserted = seed_users(db)?;
    let posts_inserted = seed_posts(db)?;
    log::info!(
        "seed finished users_inserted={} posts_inserted={}",
        users_inserted,
        posts_inserted
    );
    Ok(SeedReport {
        users_inserted,
        posts_inserted,
    })
}

fn seed_users(db: &Database) -> Result<usize, AppError> {
    let mut conn = get_connection(db)?;
    if user_count(&conn)? > 0 {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    {
        let mut stmt =
            tx.prepare("INSERT INTO users (name, email, age, contact) VALUES (?1, ?2, ?3, ?4)")?;
        for (name, email, age, contact) in SAMPLE_USERS {
            stmt.execute(params![name, email, age, contact])?;
        }
    }
    tx.commit()?;
    Ok(SAMPLE_USERS.len())
}

/// Posts are dealt round-robin over the existing user ids in ascending order.
fn seed_posts(db: &Database) -> Result<usize, AppError> {
    let mut conn = get_connection(db)?;
    if post_count(&conn)? > 0 {
        return Ok(0);
    }

    let ids: Vec<i64> = conn
        .prepare("SELECT id FROM users ORDER BY id")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        log::warn!("seed skipped posts: no users to own them");
        return Ok(0);
    }

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO posts (title, body, created_at, owner_id) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (i, (title, body, created_at)) in SAMPLE_POSTS.iter().enumerate() {
            stmt.execute(params![title, body, created_at, ids[i % ids.len()]])?;
        }
    }
    tx.commit()?;
    Ok(SAMPLE_POSTS.len())
}
