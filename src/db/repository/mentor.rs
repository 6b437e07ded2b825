//! Mentor Repository

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};
use crate::db::guard;
use crate::db::models::{Mentor, MentorCreate, MentorUpdate, mentor::normalize_name};
use crate::utils::{now_millis, snowflake_id};

const MENTOR_SELECT: &str =
    "SELECT id, name, photo_url, specialization, created_at, updated_at FROM mentor";

/// Trainings referencing a mentor, labeled by title
const MENTOR_DEPENDENTS_SQL: &str = "SELECT t.title FROM training_mentor tm \
     JOIN training t ON t.id = tm.training_id WHERE tm.mentor_id = ?1";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Mentor>> {
    let sql = format!("{MENTOR_SELECT} ORDER BY name ASC");
    let rows = sqlx::query_as::<_, Mentor>(&sql).fetch_all(conn).await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Mentor>> {
    let sql = format!("{MENTOR_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Mentor>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Whether a mentor with this normalized name exists. Names are stored
/// normalized, so an exact comparison suffices.
async fn name_exists(
    conn: &mut SqliteConnection,
    normalized: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let found: Option<i64> = match exclude_id {
        Some(id) => {
            sqlx::query_scalar("SELECT id FROM mentor WHERE name = ? AND id != ? LIMIT 1")
                .bind(normalized)
                .bind(id)
                .fetch_optional(conn)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT id FROM mentor WHERE name = ? LIMIT 1")
                .bind(normalized)
                .fetch_optional(conn)
                .await?
        }
    };
    Ok(found.is_some())
}

pub async fn create(conn: &mut SqliteConnection, data: MentorCreate) -> RepoResult<Mentor> {
    let name = normalize_name(&data.name);
    if name.is_empty() {
        return Err(RepoError::Validation("name must not be empty".into()));
    }
    // Check-then-insert: the store carries no unique index for this name,
    // so two concurrent creates can both pass. Known and accepted window.
    if name_exists(conn, &name, None).await? {
        return Err(RepoError::Duplicate("Mentor already exists".into()));
    }

    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO mentor (id, name, photo_url, specialization, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(data.photo_url)
    .bind(data.specialization)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create mentor".into()))
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: MentorUpdate,
) -> RepoResult<Mentor> {
    let name = match data.name {
        Some(raw) => {
            let normalized = normalize_name(&raw);
            if normalized.is_empty() {
                return Err(RepoError::Validation("name must not be empty".into()));
            }
            if name_exists(conn, &normalized, Some(id)).await? {
                return Err(RepoError::Duplicate("Mentor already exists".into()));
            }
            Some(normalized)
        }
        None => None,
    };

    let mut sets: Vec<&str> = Vec::new();
    if name.is_some() {
        sets.push("name = ?");
    }
    if data.photo_url.is_some() {
        sets.push("photo_url = ?");
    }
    if data.specialization.is_some() {
        sets.push("specialization = ?");
    }

    if sets.is_empty() {
        return find_by_id(conn, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Mentor {id} not found")));
    }

    let sql = format!(
        "UPDATE mentor SET {}, updated_at = ? WHERE id = ?",
        sets.join(", ")
    );

    let mut query = sqlx::query(&sql);
    if let Some(v) = name {
        query = query.bind(v);
    }
    if let Some(v) = data.photo_url {
        query = query.bind(v);
    }
    if let Some(v) = data.specialization {
        query = query.bind(v);
    }
    query = query.bind(now_millis()).bind(id);

    let result = query.execute(&mut *conn).await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Mentor {id} not found")));
    }

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Mentor {id} not found")))
}

/// Delete a mentor, refused while any training still references them
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    if find_by_id(&mut *conn, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Mentor {id} not found")));
    }

    guard::check_deletable(
        &mut *conn,
        id,
        MENTOR_DEPENDENTS_SQL,
        "mentor",
        "assigned to",
        "training",
    )
    .await?;

    sqlx::query("DELETE FROM mentor WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}
