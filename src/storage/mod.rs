//! Object-storage collaborator
//!
//! Two upload paths:
//! - [`signature`]: signed payload for browser-to-CDN direct uploads; file
//!   bytes never cross this server.
//! - [`StorageClient`]: server-proxied upload to the bucket provider under
//!   service credentials. Size and MIME preconditions run before any
//!   network call; provider failures surface as `AppError::Upstream` with
//!   the provider message passed through.

pub mod signature;

use serde::Deserialize;
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::utils::AppError;

/// Maximum accepted image payload (bytes)
pub const MAX_IMAGE_SIZE: usize = 1_000_000;

#[derive(Clone)]
pub struct StorageClient {
    config: StorageConfig,
    client: reqwest::Client,
}

/// Provider create-file response; only the generated id matters here
#[derive(Debug, Deserialize)]
struct CreatedFile {
    #[serde(rename = "$id")]
    id: String,
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Validate an image payload before any provider traffic
    pub fn validate_image(data: &[u8], content_type: &str) -> Result<(), AppError> {
        if !content_type.starts_with("image/") {
            return Err(AppError::validation("Invalid image type"));
        }
        if data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::validation("Image too large (max 1MB allowed)"));
        }
        Ok(())
    }

    /// Upload image bytes under server credentials, returning the public
    /// view URL of the stored file.
    ///
    /// Callers must run [`Self::validate_image`] first; this method only
    /// does the network hop.
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<String, AppError> {
        let file_id = Uuid::new_v4().simple().to_string();

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::validation(format!("Invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .text("fileId", file_id)
            .part("file", part);

        let url = format!(
            "{}/storage/buckets/{}/files",
            self.config.endpoint, self.config.bucket_id
        );

        // The provider call is the only thing caught here; anything else
        // propagates as a generic 500.
        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", &self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(target: "upstream", %status, body = %body, "Storage upload rejected");
            return Err(AppError::upstream(format!(
                "Storage provider returned {status}: {body}"
            )));
        }

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Malformed provider response: {e}")))?;

        Ok(self.view_url(&created.id))
    }

    /// Public view URL for a stored file
    pub fn view_url(&self, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.config.endpoint, self.config.bucket_id, file_id, self.config.project_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> StorageClient {
        StorageClient::new(StorageConfig {
            endpoint: "https://cloud.example.com/v1".to_string(),
            project_id: "proj1".to_string(),
            api_key: "key".to_string(),
            bucket_id: "bucket1".to_string(),
        })
    }

    #[test]
    fn test_oversized_image_rejected_before_upload() {
        let data = vec![0u8; MAX_IMAGE_SIZE + 1];
        assert!(StorageClient::validate_image(&data, "image/png").is_err());
    }

    #[test]
    fn test_non_image_content_type_rejected() {
        assert!(StorageClient::validate_image(b"abc", "application/pdf").is_err());
        assert!(StorageClient::validate_image(b"abc", "image/jpeg").is_ok());
    }

    #[test]
    fn test_view_url_shape() {
        let url = test_client().view_url("file42");
        assert_eq!(
            url,
            "https://cloud.example.com/v1/storage/buckets/bucket1/files/file42/view?project=proj1"
        );
    }
}
