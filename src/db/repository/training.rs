//! Training Repository
//!
//! Trainings own an ordered benefit list and a mentor association set.
//! Collection updates are full replaces: delete the child rows, re-insert
//! with fresh 0..n positions.

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};
use crate::db::models::{Mentor, Training, TrainingCreate, TrainingResponse, TrainingUpdate};
use crate::pricing;
use crate::utils::{now_millis, snowflake_id};

const TRAINING_SELECT: &str = "SELECT id, title, description, photo_url, base_price, \
     discount_value, discount_kind, created_at, updated_at FROM training";

pub async fn count(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM training")
        .fetch_one(conn)
        .await?;
    Ok(total)
}

/// One page of trainings, newest first (1-based page upstream)
pub async fn find_page(
    conn: &mut SqliteConnection,
    limit: u32,
    offset: u32,
) -> RepoResult<Vec<Training>> {
    let sql = format!("{TRAINING_SELECT} ORDER BY created_at DESC LIMIT ? OFFSET ?");
    let rows = sqlx::query_as::<_, Training>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(conn)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Training>> {
    let sql = format!("{TRAINING_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Training>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn load_benefits(conn: &mut SqliteConnection, id: i64) -> RepoResult<Vec<String>> {
    let rows: Vec<String> = sqlx::query_scalar(
        "SELECT text FROM training_benefit WHERE training_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn load_mentors(conn: &mut SqliteConnection, id: i64) -> RepoResult<Vec<Mentor>> {
    let rows = sqlx::query_as::<_, Mentor>(
        "SELECT m.id, m.name, m.photo_url, m.specialization, m.created_at, m.updated_at \
         FROM training_mentor tm JOIN mentor m ON m.id = tm.mentor_id \
         WHERE tm.training_id = ? ORDER BY tm.position",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// Replace the benefit list, re-assigning positions 0..n
pub async fn replace_benefits(
    conn: &mut SqliteConnection,
    training_id: i64,
    benefits: &[String],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM training_benefit WHERE training_id = ?")
        .bind(training_id)
        .execute(&mut *conn)
        .await?;

    for (position, text) in benefits.iter().enumerate() {
        sqlx::query(
            "INSERT INTO training_benefit (id, training_id, text, position) VALUES (?, ?, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(training_id)
        .bind(text)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Replace the mentor associations, validating every referenced mentor
pub async fn replace_mentors(
    conn: &mut SqliteConnection,
    training_id: i64,
    mentor_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM training_mentor WHERE training_id = ?")
        .bind(training_id)
        .execute(&mut *conn)
        .await?;

    for (position, mentor_id) in mentor_ids.iter().enumerate() {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM mentor WHERE id = ?")
            .bind(mentor_id)
            .fetch_optional(&mut *conn)
            .await?;
        if exists.is_none() {
            return Err(RepoError::Validation(format!(
                "Mentor {mentor_id} does not exist"
            )));
        }

        sqlx::query(
            "INSERT INTO training_mentor (id, training_id, mentor_id, position) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(training_id)
        .bind(mentor_id)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn create(conn: &mut SqliteConnection, data: &TrainingCreate) -> RepoResult<i64> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO training (id, title, description, photo_url, base_price, discount_value, \
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

    replace_benefits(&mut *conn, id, &data.benefits).await?;
    replace_mentors(&mut *conn, id, &data.mentor_ids).await?;

    Ok(id)
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &TrainingUpdate,
) -> RepoResult<()> {
    if find_by_id(&mut *conn, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Training {id} not found")));
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
            "UPDATE training SET {}, updated_at = ? WHERE id = ?",
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
        // Collection-only updates still touch the modification timestamp
        sqlx::query("UPDATE training SET updated_at = ? WHERE id = ?")
            .bind(now_millis())
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    if let Some(benefits) = &data.benefits {
        replace_benefits(&mut *conn, id, benefits).await?;
    }
    if let Some(mentor_ids) = &data.mentor_ids {
        replace_mentors(&mut *conn, id, mentor_ids).await?;
    }

    Ok(())
}

/// Delete a training; benefit and mentor-link rows cascade
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM training WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Training {id} not found")));
    }
    Ok(())
}

/// Assemble the response DTO from freshly persisted state, including the
/// derived effective price
pub async fn response(conn: &mut SqliteConnection, id: i64) -> RepoResult<TrainingResponse> {
    let training = find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Training {id} not found")))?;
    response_for(conn, training).await
}

pub async fn response_for(
    conn: &mut SqliteConnection,
    training: Training,
) -> RepoResult<TrainingResponse> {
    let benefits = load_benefits(&mut *conn, training.id).await?;
    let mentors = load_mentors(&mut *conn, training.id).await?;

    let effective_price = pricing::effective_price_f64(
        training.base_price,
        training.discount_value,
        training.discount_kind,
    );

    Ok(TrainingResponse {
        id: training.id,
        title: training.title,
        description: training.description,
        photo_url: training.photo_url,
        base_price: training.base_price,
        discount_value: training.discount_value,
        discount_kind: training.discount_kind,
        effective_price,
        benefits,
        mentors,
        created_at: training.created_at,
        updated_at: training.updated_at,
    })
}
