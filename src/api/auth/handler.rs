//! Authentication Handlers
//!
//! Login and current-admin lookup.

use std::time::Duration;

use axum::{Json, extract::State};

use crate::api::acquire;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{AdminInfo, LoginRequest, LoginResponse};
use crate::db::repository::admin_user;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /admin/auth/login - authenticate and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let mut conn = acquire(&state.pool).await?;
    let user = admin_user::find_by_username(&mut conn, &req.username).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(user) => {
            if !user.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = user
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            user
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(user.id, &user.username, &user.display_name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user.id, username = %user.username, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        user: AdminInfo::from(user),
    }))
}

/// GET /admin/auth/me - current admin info
pub async fn me(State(state): State<ServerState>, admin: CurrentUser) -> AppResult<Json<AdminInfo>> {
    let mut conn = acquire(&state.pool).await?;
    let user = admin_user::find_by_id(&mut conn, admin.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Admin {}", admin.id)))?;
    Ok(Json(AdminInfo::from(user)))
}
