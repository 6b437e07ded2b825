//! Opportunity API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{acquire, begin, commit, validate};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    OpportunityCreate, OpportunityKind, OpportunityResponse, OpportunityUpdate,
};
use crate::db::repository::opportunity::{self, OpportunityFilter};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub kind: Option<OpportunityKind>,
    pub location: Option<String>,
    pub search: Option<String>,
}

/// POST /api/admin/opportunities - create a job or internship
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<OpportunityCreate>,
) -> AppResult<(StatusCode, Json<OpportunityResponse>)> {
    validate(&payload)?;
    // Kind/details mismatch fails here, before any row is written
    let details = payload.details()?;

    let mut tx = begin(&state.pool).await?;
    let id = opportunity::create(&mut tx, &payload, &details).await?;
    let response = opportunity::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/admin/opportunities - filtered listing, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OpportunityResponse>>> {
    let filter = OpportunityFilter {
        kind: query.kind,
        location: query.location,
        search: query.search,
    };

    let mut conn = acquire(&state.pool).await?;
    let rows = opportunity::find_filtered(&mut conn, &filter).await?;

    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(opportunity::response_for(&mut conn, row).await?);
    }
    Ok(Json(responses))
}

/// GET /api/admin/opportunities/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OpportunityResponse>> {
    let mut conn = acquire(&state.pool).await?;
    let found = opportunity::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Opportunity not found"))?;
    let response = opportunity::response_for(&mut conn, found).await?;
    Ok(Json(response))
}

/// PATCH /api/admin/opportunities/:id - partial update; the kind is
/// immutable and requirements are replaced wholesale when present
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OpportunityUpdate>,
) -> AppResult<Json<OpportunityResponse>> {
    let mut tx = begin(&state.pool).await?;
    opportunity::update(&mut tx, id, &payload).await?;
    let response = opportunity::response(&mut tx, id).await?;
    commit(tx).await?;

    Ok(Json(response))
}

/// DELETE /api/admin/opportunities/:id
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    opportunity::delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}
