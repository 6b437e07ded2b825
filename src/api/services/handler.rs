//! Service API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{acquire, begin, commit, validate};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ServiceCreate, ServiceResponse, ServiceUpdate};
use crate::db::repository::service;
use crate::utils::{AppError, AppResult};

/// POST /admin/services - create a service with catalog links
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<(StatusCode, Json<ServiceResponse>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    let id = service::create(&mut tx, &payload).await?;
    let response = service::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /admin/services - all services with catalog names and pricing
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ServiceResponse>>> {
    let mut conn = acquire(&state.pool).await?;
    let rows = service::find_all(&mut conn).await?;

    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(service::response_for(&mut conn, row).await?);
    }
    Ok(Json(responses))
}

/// GET /admin/services/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ServiceResponse>> {
    let mut conn = acquire(&state.pool).await?;
    let found = service::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Service not found"))?;
    let response = service::response_for(&mut conn, found).await?;
    Ok(Json(response))
}

/// PATCH /admin/services/:id - partial update; tech and offering links
/// are replaced wholesale when present
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<ServiceResponse>> {
    let mut tx = begin(&state.pool).await?;
    service::update(&mut tx, id, &payload).await?;
    let response = service::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok(Json(response))
}

/// DELETE /admin/services/:id - both catalog maps cascade
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    service::delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}
