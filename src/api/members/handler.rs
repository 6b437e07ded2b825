//! Member API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::api::{acquire, begin, commit, validate};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Member, MemberCreate, MemberRole, MemberUpdate};
use crate::db::repository::member;
use crate::utils::{AppError, AppResult};

/// POST /admin/members - create a member (team or intern)
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Json(payload): Json<MemberCreate>,
) -> AppResult<(StatusCode, Json<Member>)> {
    validate(&payload)?;

    let mut tx = begin(&state.pool).await?;
    let created = member::create(&mut tx, payload).await?;
    commit(tx).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /admin/members - all members, hidden ones included
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let mut conn = acquire(&state.pool).await?;
    let members = member::find_all(&mut conn).await?;
    Ok(Json(members))
}

/// GET /admin/members/teams - visible team members
pub async fn list_teams(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let mut conn = acquire(&state.pool).await?;
    let members = member::find_visible_by_role(&mut conn, MemberRole::Team).await?;
    Ok(Json(members))
}

/// GET /admin/members/interns - visible interns
pub async fn list_interns(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let mut conn = acquire(&state.pool).await?;
    let members = member::find_visible_by_role(&mut conn, MemberRole::Intern).await?;
    Ok(Json(members))
}

/// GET /admin/members/team/:id - one visible team member
pub async fn get_team_member(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Member>> {
    let mut conn = acquire(&state.pool).await?;
    let found = member::find_visible_by_role_and_id(&mut conn, MemberRole::Team, id)
        .await?
        .ok_or_else(|| AppError::not_found("Team member not found"))?;
    Ok(Json(found))
}

/// GET /admin/members/intern/:id - one visible intern
pub async fn get_intern_member(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Member>> {
    let mut conn = acquire(&state.pool).await?;
    let found = member::find_visible_by_role_and_id(&mut conn, MemberRole::Intern, id)
        .await?
        .ok_or_else(|| AppError::not_found("Intern not found"))?;
    Ok(Json(found))
}

/// GET /admin/members/:id - any member, visible or hidden
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Member>> {
    let mut conn = acquire(&state.pool).await?;
    let found = member::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("Member not found"))?;
    Ok(Json(found))
}

/// PATCH /admin/members/:id - partial update
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MemberUpdate>,
) -> AppResult<Json<Member>> {
    let mut tx = begin(&state.pool).await?;
    let updated = member::update(&mut tx, id, payload).await?;
    commit(tx).await?;

    Ok(Json(updated))
}

/// DELETE /admin/members/:id
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let mut tx = begin(&state.pool).await?;
    member::delete(&mut tx, id).await?;
    commit(tx).await?;

    Ok(Json(json!({ "message": "Member deleted successfully" })))
}
