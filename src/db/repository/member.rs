//! Member Repository

use sqlx::SqliteConnection;
use sqlx::types::Json;

use super::{RepoError, RepoResult};
use crate::db::models::{Member, MemberCreate, MemberRole, MemberUpdate};
use crate::utils::{now_millis, snowflake_id};

const MEMBER_SELECT: &str = "SELECT id, name, photo_url, position, start_date, end_date, \
     social_media, contact_email, personal_email, contact_number, is_visible, role, \
     created_at, updated_at FROM member";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Member>(&sql).fetch_all(conn).await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

/// Visible members of one role, for the public team/intern pages
pub async fn find_visible_by_role(
    conn: &mut SqliteConnection,
    role: MemberRole,
) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE role = ? AND is_visible = 1 ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Member>(&sql)
        .bind(role)
        .fetch_all(conn)
        .await?;
    Ok(rows)
}

pub async fn find_visible_by_role_and_id(
    conn: &mut SqliteConnection,
    role: MemberRole,
    id: i64,
) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ? AND role = ? AND is_visible = 1");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .bind(role)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn create(conn: &mut SqliteConnection, data: MemberCreate) -> RepoResult<Member> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO member (id, name, photo_url, position, start_date, end_date, social_media, \
         contact_email, personal_email, contact_number, is_visible, role, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.name)
    .bind(data.photo_url)
    .bind(data.position)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.social_media.map(Json))
    .bind(data.contact_email)
    .bind(data.personal_email)
    .bind(data.contact_number)
    .bind(data.is_visible)
    .bind(data.role)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: MemberUpdate,
) -> RepoResult<Member> {
    // Build SET clauses only for fields present in the payload; double
    // options bind NULL when the caller sent an explicit null.
    let mut sets: Vec<&str> = Vec::new();
    if data.name.is_some() {
        sets.push("name = ?");
    }
    if data.photo_url.is_some() {
        sets.push("photo_url = ?");
    }
    if data.position.is_some() {
        sets.push("position = ?");
    }
    if data.start_date.is_some() {
        sets.push("start_date = ?");
    }
    if data.end_date.is_some() {
        sets.push("end_date = ?");
    }
    if data.social_media.is_some() {
        sets.push("social_media = ?");
    }
    if data.contact_email.is_some() {
        sets.push("contact_email = ?");
    }
    if data.personal_email.is_some() {
        sets.push("personal_email = ?");
    }
    if data.contact_number.is_some() {
        sets.push("contact_number = ?");
    }
    if data.is_visible.is_some() {
        sets.push("is_visible = ?");
    }
    if data.role.is_some() {
        sets.push("role = ?");
    }

    if sets.is_empty() {
        return find_by_id(conn, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")));
    }

    let sql = format!(
        "UPDATE member SET {}, updated_at = ? WHERE id = ?",
        sets.join(", ")
    );

    let mut query = sqlx::query(&sql);
    if let Some(v) = data.name {
        query = query.bind(v);
    }
    if let Some(v) = data.photo_url {
        query = query.bind(v);
    }
    if let Some(v) = data.position {
        query = query.bind(v);
    }
    if let Some(v) = data.start_date {
        query = query.bind(v);
    }
    if let Some(v) = data.end_date {
        query = query.bind(v);
    }
    if let Some(v) = data.social_media {
        query = query.bind(v.map(Json));
    }
    if let Some(v) = data.contact_email {
        query = query.bind(v);
    }
    if let Some(v) = data.personal_email {
        query = query.bind(v);
    }
    if let Some(v) = data.contact_number {
        query = query.bind(v);
    }
    if let Some(v) = data.is_visible {
        query = query.bind(v);
    }
    if let Some(v) = data.role {
        query = query.bind(v);
    }
    query = query.bind(now_millis()).bind(id);

    let result = query.execute(&mut *conn).await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id} not found")))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM member WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id} not found")));
    }
    Ok(())
}
