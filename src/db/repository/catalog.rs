//! Catalog Repositories (technologies and offerings)
//!
//! Flat name catalogs with duplicate-name checks at write time and
//! referential guards on delete. Technologies are referenced from both
//! projects and services, so their guard unions the two join tables.

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};
use crate::db::guard;
use crate::db::models::{CatalogCreate, ServiceOffering, ServiceTech};
use crate::utils::{now_millis, snowflake_id};

/// Parents referencing a technology, labeled by title/name
const TECH_DEPENDENTS_SQL: &str = "SELECT p.title FROM project_tech_map m \
     JOIN project p ON p.id = m.project_id WHERE m.tech_id = ?1 \
     UNION ALL \
     SELECT s.title FROM service_tech_map m \
     JOIN service s ON s.id = m.service_id WHERE m.tech_id = ?1";

/// Services referencing an offering
const OFFERING_DEPENDENTS_SQL: &str = "SELECT s.title FROM service_offering_map m \
     JOIN service s ON s.id = m.service_id WHERE m.offering_id = ?1";

// =============================================================================
// Technologies
// =============================================================================

pub async fn tech_find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<ServiceTech>> {
    let rows = sqlx::query_as::<_, ServiceTech>(
        "SELECT id, name, created_at, updated_at FROM service_tech ORDER BY name ASC",
    )
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn tech_find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<ServiceTech>> {
    let row = sqlx::query_as::<_, ServiceTech>(
        "SELECT id, name, created_at, updated_at FROM service_tech WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

pub async fn tech_create(
    conn: &mut SqliteConnection,
    data: CatalogCreate,
) -> RepoResult<ServiceTech> {
    // Check-then-insert, no store-level unique index (accepted race window)
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM service_tech WHERE name = ?")
        .bind(&data.name)
        .fetch_optional(&mut *conn)
        .await?;
    if existing.is_some() {
        return Err(RepoError::Duplicate("Service tech already exists".into()));
    }

    let now = now_millis();
    let id = snowflake_id();
    sqlx::query("INSERT INTO service_tech (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(&data.name)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await?;

    tech_find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service tech".into()))
}

/// Delete a technology, refused while any project or service references it
pub async fn tech_delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    if tech_find_by_id(&mut *conn, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Technology {id} not found")));
    }

    guard::check_deletable(
        &mut *conn,
        id,
        TECH_DEPENDENTS_SQL,
        "technology",
        "used by",
        "project/service",
    )
    .await?;

    sqlx::query("DELETE FROM service_tech WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

// =============================================================================
// Offerings
// =============================================================================

pub async fn offering_find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<ServiceOffering>> {
    let rows = sqlx::query_as::<_, ServiceOffering>(
        "SELECT id, name, created_at, updated_at FROM service_offering ORDER BY name ASC",
    )
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn offering_find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<ServiceOffering>> {
    let row = sqlx::query_as::<_, ServiceOffering>(
        "SELECT id, name, created_at, updated_at FROM service_offering WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

pub async fn offering_create(
    conn: &mut SqliteConnection,
    data: CatalogCreate,
) -> RepoResult<ServiceOffering> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM service_offering WHERE name = ?")
            .bind(&data.name)
            .fetch_optional(&mut *conn)
            .await?;
    if existing.is_some() {
        return Err(RepoError::Duplicate(
            "Service offering already exists".into(),
        ));
    }

    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO service_offering (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    offering_find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create service offering".into()))
}

/// Delete an offering, refused while any service references it
pub async fn offering_delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    if offering_find_by_id(&mut *conn, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Offering {id} not found")));
    }

    guard::check_deletable(
        &mut *conn,
        id,
        OFFERING_DEPENDENTS_SQL,
        "offering",
        "used by",
        "service",
    )
    .await?;

    sqlx::query("DELETE FROM service_offering WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}
