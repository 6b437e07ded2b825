//! Admin User Repository

use sqlx::SqliteConnection;

use super::RepoResult;
use crate::db::models::AdminUser;
use crate::utils::{now_millis, snowflake_id};

const ADMIN_SELECT: &str = "SELECT id, username, display_name, hash_pass, is_active, \
     created_at, updated_at FROM admin_user";

pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> RepoResult<Option<AdminUser>> {
    let sql = format!("{ADMIN_SELECT} WHERE username = ? LIMIT 1");
    let row = sqlx::query_as::<_, AdminUser>(&sql)
        .bind(username)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<AdminUser>> {
    let sql = format!("{ADMIN_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, AdminUser>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn count(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_user")
        .fetch_one(conn)
        .await?;
    Ok(total)
}

/// Insert the first admin account. Called from the boot seed when the
/// table is empty; `hash_pass` is already argon2-hashed.
pub async fn insert(
    conn: &mut SqliteConnection,
    username: &str,
    display_name: &str,
    hash_pass: &str,
) -> RepoResult<i64> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO admin_user (id, username, display_name, hash_pass, is_active, created_at, \
         updated_at) VALUES (?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(username)
    .bind(display_name)
    .bind(hash_pass)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(id)
}
