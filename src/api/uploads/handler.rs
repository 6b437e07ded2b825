//! Upload Handlers
//!
//! Two paths to the media providers:
//! - `/signature`: signed payload for browser-to-CDN direct uploads; the
//!   file bytes never pass through this server.
//! - `/image`: server-proxied upload to the bucket provider, with size and
//!   MIME preconditions enforced before any outbound traffic.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::storage::{StorageClient, signature};
use crate::utils::{AppError, AppResult, now_secs};

/// Folder parameter included in every signed upload
const SIGNED_UPLOAD_FOLDER: &str = "uploads";

/// Signed direct-upload payload for the frontend
#[derive(Debug, Serialize)]
pub struct SignaturePayload {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub timestamp: i64,
    pub signature: String,
    pub folder: String,
}

/// Proxy upload response
#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub image_url: String,
}

/// POST /admin/uploads/signature - signed upload authorization
pub async fn signature(
    State(state): State<ServerState>,
    _admin: CurrentUser,
) -> AppResult<Json<SignaturePayload>> {
    let media = &state.config.media_signing;

    // Missing secret is a deployment problem, not a client error
    let secret = media.api_secret.as_deref().ok_or_else(|| {
        AppError::configuration("CDN API secret is not set; check the .env file")
    })?;

    let timestamp = now_secs();
    let signature = signature::sign(timestamp, Some(SIGNED_UPLOAD_FOLDER), secret);

    Ok(Json(SignaturePayload {
        cloud_name: media.cloud_name.clone(),
        api_key: media.api_key.clone(),
        timestamp,
        signature,
        folder: SIGNED_UPLOAD_FOLDER.to_string(),
    }))
}

/// POST /admin/uploads/image - proxy an image to the storage provider
pub async fn upload_image(
    State(state): State<ServerState>,
    _admin: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadImageResponse>> {
    let mut file_data: Option<(Vec<u8>, String, String)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_default();
        let bytes = field.bytes().await?.to_vec();
        file_data = Some((bytes, filename, content_type));
        break;
    }

    let (bytes, filename, content_type) =
        file_data.ok_or_else(|| AppError::validation("No 'file' field found"))?;

    // Preconditions run before the provider is contacted at all
    StorageClient::validate_image(&bytes, &content_type)?;

    let image_url = state
        .storage
        .upload_image(bytes, &filename, &content_type)
        .await?;

    tracing::info!(filename = %filename, url = %image_url, "Image uploaded to storage provider");

    Ok(Json(UploadImageResponse { image_url }))
}
