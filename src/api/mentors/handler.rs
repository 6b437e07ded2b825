//! Mentor API Handlers
//!
//! The whole mentor surface is part of the admin console; there is no
//! public mentor listing.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{acquire, begin, commit, validate};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Mentor, MentorCreate, MentorUpdate};
use crate::db::repository::mentor;
use crate::utils::{AppError, AppResult};

/// GET /admin/mentors - all mentors, sorted by name
pub async fn list(
    State(state): State<ServerState>,
    _admin: CurrentUser,
) -> AppResult<Json<Vec<Mentor>>> {
    let mut conn = acquire(&state.pool).await?;
    let mentors = mentor::find_all(&mut conn).await?;
    Ok(Json(mentors))
}

/// POST /admin/mentors - create a mentor (name normalized + deduplicated)
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<MentorCreate>,
) -> AppResult<(StatusCode, Json<Mentor>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    let created = mentor::create(&mut tx, payload).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /admin/mentors/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Mentor>> {
    let mut conn = acquire(&state.pool).await?;
    let found = mentor::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Mentor not found"))?;
    Ok(Json(found))
}

/// PUT /admin/mentors/:id - partial update
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MentorUpdate>,
) -> AppResult<Json<Mentor>> {
    let mut tx = begin(&state.pool).await?;
    let updated = mentor::update(&mut tx, id, payload).await?;
    commit(tx).await?;

    Ok(Json(updated))
}

/// DELETE /admin/mentors/:id - refused while trainings reference the mentor
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    mentor::delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}
