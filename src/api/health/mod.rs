//! Health API

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Value, json};

use crate::api::acquire;
use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(health))
        .route("/health/db", get(db_health))
}

/// GET / - liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /health/db - database reachability
async fn db_health(State(state): State<ServerState>) -> AppResult<Json<Value>> {
    let mut conn = acquire(&state.pool).await?;
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| crate::utils::AppError::database(e.to_string()))?;
    Ok(Json(json!({ "status": "ok", "database": "reachable" })))
}
