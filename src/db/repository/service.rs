//! Service Repository
//!
//! Services map to both catalogs (technologies and offerings) and share
//! the discount pricing rules with trainings.

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};
use crate::db::models::{Service, ServiceCreate, ServiceResponse, ServiceUpdate};
use crate::pricing;
use crate::utils::{now_millis, snowflake_id};

const SERVICE_SELECT: &str = "SELECT id, title, description, photo_url, base_price, \
     discount_value, discount_kind, created_at, updated_at FROM service";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Service>> {
    let sql = format!("{SERVICE_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Service>(&sql).fetch_all(conn).await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Service>> {
    let sql = format!("{SERVICE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Service>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn load_tech_names(conn: &mut SqliteConnection, id: i64) -> RepoResult<Vec<String>> {
    let rows: Vec<String> = sqlx::query_scalar(
        "SELECT st.name FROM service_tech_map m JOIN service_tech st ON st.id = m.tech_id \
         WHERE m.service_id = ? ORDER BY st.name",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn load_offering_names(conn: &mut SqliteConnection, id: i64) -> RepoResult<Vec<String>> {
    let rows: Vec<String> = sqlx::query_scalar(
        "SELECT so.name FROM service_offering_map m \
         JOIN service_offering so ON so.id = m.offering_id \
         WHERE m.service_id = ? ORDER BY so.name",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn replace_techs(
    conn: &mut SqliteConnection,
    service_id: i64,
    tech_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM service_tech_map WHERE service_id = ?")
        .bind(service_id)
        .execute(&mut *conn)
        .await?;

    for tech_id in tech_ids {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM service_tech WHERE id = ?")
            .bind(tech_id)
            .fetch_optional(&mut *conn)
            .await?;
        if exists.is_none() {
            return Err(RepoError::Validation(
                "One or more tech IDs are invalid".into(),
            ));
        }

        sqlx::query("INSERT INTO service_tech_map (id, service_id, tech_id) VALUES (?, ?, ?)")
            .bind(snowflake_id())
            .bind(service_id)
            .bind(tech_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

pub async fn replace_offerings(
    conn: &mut SqliteConnection,
    service_id: i64,
    offering_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM service_offering_map WHERE service_id = ?")
        .bind(service_id)
        .execute(&mut *conn)
        .await?;

    for offering_id in offering_ids {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM service_offering WHERE id = ?")
                .bind(offering_id)
                .fetch_optional(&mut *conn)
                .await?;
        if exists.is_none() {
            return Err(RepoError::Validation(
                "One or more offering IDs are invalid".into(),
            ));
        }

        sqlx::query(
            "INSERT INTO service_offering_map (id, service_id, offering_id) VALUES (?, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(service_id)
        .bind(offering_id)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn create(conn: &mut SqliteConnection, data: &ServiceCreate) -> RepoResult<i64> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO service (id, title, description, photo_url, base_price, discount_value, \
         discount_kind, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.photo_url)
    .bind(data.base_price)
    .bind(data.discount_value)
    .bind(data.discount_kind)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    replace_techs(&mut *conn, id, &data.tech_ids).await?;
    replace_offerings(&mut *conn, id, &data.offering_ids).await?;

    Ok(id)
}

pub async fn update(conn: &mut SqliteConnection, id: i64, data: &ServiceUpdate) -> RepoResult<()> {
    if find_by_id(&mut *conn, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Service {id} not found")));
    }

    let mut sets: Vec<&str> = Vec::new();
    if data.title.is_some() {
        sets.push("title = ?");
    }
    if data.description.is_some() {
        sets.push("description = ?");
    }
    if data.photo_url.is_some() {
        sets.push("photo_url = ?");
    }
    if data.base_price.is_some() {
        sets.push("base_price = ?");
    }
    if data.discount_value.is_some() {
        sets.push("discount_value = ?");
    }
    if data.discount_kind.is_some() {
        sets.push("discount_kind = ?");
    }

    if !sets.is_empty() {
        let sql = format!(
            "UPDATE service SET {}, updated_at = ? WHERE id = ?",
            sets.join(", ")
        );

        let mut query = sqlx::query(&sql);
        if let Some(v) = &data.title {
            query = query.bind(v);
        }
        if let Some(v) = &data.description {
            query = query.bind(v);
        }
        if let Some(v) = &data.photo_url {
            query = query.bind(v);
        }
        if let Some(v) = data.base_price {
            query = query.bind(v);
        }
        if let Some(v) = data.discount_value {
            query = query.bind(v);
        }
        if let Some(v) = data.discount_kind {
            query = query.bind(v);
        }
        query = query.bind(now_millis()).bind(id);
        query.execute(&mut *conn).await?;
    } else {
        sqlx::query("UPDATE service SET updated_at = ? WHERE id = ?")
            .bind(now_millis())
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    if let Some(tech_ids) = &data.tech_ids {
        replace_techs(&mut *conn, id, tech_ids).await?;
    }
    if let Some(offering_ids) = &data.offering_ids {
        replace_offerings(&mut *conn, id, offering_ids).await?;
    }

    Ok(())
}

/// Delete a service; both map tables cascade
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM service WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Service {id} not found")));
    }
    Ok(())
}

/// Assemble the response DTO from freshly persisted state, including the
/// derived effective price
pub async fn response(conn: &mut SqliteConnection, id: i64) -> RepoResult<ServiceResponse> {
    let service = find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Service {id} not found")))?;
    response_for(conn, service).await
}

pub async fn response_for(
    conn: &mut SqliteConnection,
    service: Service,
) -> RepoResult<ServiceResponse> {
    let techs = load_tech_names(&mut *conn, service.id).await?;
    let offerings = load_offering_names(&mut *conn, service.id).await?;

    let effective_price = pricing::effective_price_f64(
        service.base_price,
        service.discount_value,
        service.discount_kind,
    );

    Ok(ServiceResponse {
        id: service.id,
        title: service.title,
        description: service.description,
        photo_url: service.photo_url,
        techs,
        offerings,
        base_price: service.base_price,
        discount_value: service.discount_value,
        discount_kind: service.discount_kind,
        effective_price,
        created_at: service.created_at,
        updated_at: service.updated_at,
    })
}
