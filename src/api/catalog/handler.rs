//! Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{acquire, begin, commit, validate};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CatalogCreate, ServiceOffering, ServiceTech};
use crate::db::repository::catalog;
use crate::utils::AppResult;

// =============================================================================
// Technologies
// =============================================================================

/// POST /admin/service-techs - create a technology name
pub async fn create_tech(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<CatalogCreate>,
) -> AppResult<(StatusCode, Json<ServiceTech>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    let created = catalog::tech_create(&mut tx, payload).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /admin/service-techs - all technologies
pub async fn list_techs(State(state): State<ServerState>) -> AppResult<Json<Vec<ServiceTech>>> {
    let mut conn = acquire(&state.pool).await?;
    let techs = catalog::tech_find_all(&mut conn).await?;
    Ok(Json(techs))
}

/// DELETE /admin/service-techs/:id - refused while projects or services
/// reference the technology
pub async fn delete_tech(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    catalog::tech_delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Offerings
// =============================================================================

/// POST /admin/service-offerings - create an offering name
pub async fn create_offering(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<CatalogCreate>,
) -> AppResult<(StatusCode, Json<ServiceOffering>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    let created = catalog::offering_create(&mut tx, payload).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /admin/service-offerings - all offerings
pub async fn list_offerings(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ServiceOffering>>> {
    let mut conn = acquire(&state.pool).await?;
    let offerings = catalog::offering_find_all(&mut conn).await?;
    Ok(Json(offerings))
}

/// DELETE /admin/service-offerings/:id - refused while services reference
/// the offering
pub async fn delete_offering(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = begin(&state.pool).await?;
    catalog::offering_delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(StatusCode::NO_CONTENT)
}
