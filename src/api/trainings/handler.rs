//! Training API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{acquire, begin, commit, validate};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{TrainingCreate, TrainingPage, TrainingResponse, TrainingUpdate};
use crate::db::repository::training;
use crate::utils::{AppError, AppResult};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// POST /admin/trainings - create a training with benefits and mentors
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<TrainingCreate>,
) -> AppResult<(StatusCode, Json<TrainingResponse>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    let id = training::create(&mut tx, &payload).await?;
    // Response comes from the freshly persisted rows, not the payload
    let response = training::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /admin/trainings - paginated listing (1-based page)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TrainingPage>> {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let mut conn = acquire(&state.pool).await?;
    let total = training::count(&mut conn).await?;
    let rows = training::find_page(&mut conn, page_size, (page - 1) * page_size).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(training::response_for(&mut conn, row).await?);
    }

    Ok(Json(TrainingPage {
        items,
        page,
        page_size,
        total,
    }))
}

/// GET /admin/trainings/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TrainingResponse>> {
    let mut conn = acquire(&state.pool).await?;
    let found = training::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Training program not found"))?;
    let response = training::response_for(&mut conn, found).await?;
    Ok(Json(response))
}

/// PUT /admin/trainings/:id - partial update; benefit and mentor lists
/// are replaced wholesale when present
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<TrainingUpdate>,
) -> AppResult<Json<TrainingResponse>> {
    let mut tx = begin(&state.pool).await?;
    training::update(&mut tx, id, &payload).await?;
    let response = training::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok(Json(response))
}

/// DELETE /admin/trainings/:id
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    training::delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}
