//! Project API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{acquire, begin, commit, validate};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ProjectCreate, ProjectFeedbackCreate, ProjectResponse, ProjectUpdate};
use crate::db::repository::project;
use crate::utils::{AppError, AppResult};

/// POST /admin/projects - create a project with technology links
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<ProjectCreate>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    let id = project::create(&mut tx, &payload).await?;
    let response = project::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /admin/projects - all projects with techs and feedbacks
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProjectResponse>>> {
    let mut conn = acquire(&state.pool).await?;
    let rows = project::find_all(&mut conn).await?;

    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(project::response_for(&mut conn, row).await?);
    }
    Ok(Json(responses))
}

/// GET /admin/projects/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProjectResponse>> {
    let mut conn = acquire(&state.pool).await?;
    let found = project::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;
    let response = project::response_for(&mut conn, found).await?;
    Ok(Json(response))
}

/// PATCH /admin/projects/:id - partial update; tech links are replaced
/// wholesale when present
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProjectUpdate>,
) -> AppResult<Json<ProjectResponse>> {
    let mut tx = begin(&state.pool).await?;
    project::update(&mut tx, id, &payload).await?;
    let response = project::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok(Json(response))
}

/// DELETE /admin/projects/:id - feedbacks and tech links go with it
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    project::delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/projects/:id/feedbacks - attach client feedback
pub async fn add_feedback(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProjectFeedbackCreate>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    project::add_feedback(&mut tx, id, &payload).await?;
    let response = project::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /admin/projects/:id/feedbacks/:feedback_id
pub async fn delete_feedback(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path((id, feedback_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    project::delete_feedback(&mut tx, id, feedback_id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}
