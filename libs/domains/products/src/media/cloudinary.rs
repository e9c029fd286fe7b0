//! Cloudinary upload API client.
//!
//! Uses signed uploads: the request carries the API key, a unix timestamp
//! and a SHA-256 signature over the signed parameters plus the API secret.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default, env_required};
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{MediaError, MediaResult, MediaUploader, UploadedMedia};
use crate::models::ImageUpload;

pub const DEFAULT_FOLDER: &str = "imgs-products-store";
const DEFAULT_API_URL: &str = "https://api.cloudinary.com/v1_1";

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder new product images are placed in
    pub folder: String,
    pub api_url: String,
    pub upload_timeout_secs: u64,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: DEFAULT_FOLDER.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            upload_timeout_secs: 30,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("folder", &self.folder)
            .field("api_url", &self.api_url)
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .finish()
    }
}

impl FromEnv for CloudinaryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cloud_name: env_required("CLOUDINARY_CLOUD_NAME")?,
            api_key: env_required("CLOUDINARY_API_KEY")?,
            api_secret: env_required("CLOUDINARY_API_SECRET")?,
            folder: env_or_default("CLOUDINARY_FOLDER", DEFAULT_FOLDER),
            api_url: env_or_default("CLOUDINARY_API_URL", DEFAULT_API_URL),
            upload_timeout_secs: env_parse_or_default("CLOUDINARY_UPLOAD_TIMEOUT_SECS", "30")?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Signs `params` the way the upload API expects: sorted `key=value` pairs
/// joined by `&`, with the secret appended, hashed with SHA-256.
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    format!("{:x}", Sha256::digest(format!("{}{}", to_sign, api_secret)))
}

#[derive(Clone)]
pub struct CloudinaryUploader {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> MediaResult<Self> {
        let client = Client::builder()
            .timeout(config.upload_timeout())
            .build()
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, image: &ImageUpload, folder: &str) -> MediaResult<UploadedMedia> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("folder", folder), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let mut file = Part::bytes(image.data.clone())
            .file_name(image.file_name.clone().unwrap_or_else(|| "upload".to_string()));
        if let Some(content_type) = &image.content_type {
            file = file
                .mime_str(content_type)
                .map_err(|e| MediaError::Transport(e.to_string()))?;
        }

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        debug!(bytes = image.data.len(), folder, "Uploading image");

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MediaError::Timeout(self.config.upload_timeout())
                } else {
                    MediaError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => format!("media host returned {}", status),
            };
            warn!(status = %status, "Image upload rejected: {}", message);
            return Err(MediaError::Rejected(message));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        info!(public_id = %uploaded.public_id, "Uploaded image");

        Ok(UploadedMedia {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Multipart,
        http::StatusCode,
        response::IntoResponse,
        routing::post,
    };
    use std::collections::HashMap;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn accept_upload(mut multipart: Multipart) -> impl IntoResponse {
        let mut fields = HashMap::new();
        let mut file_len = 0;
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                file_len = field.bytes().await.unwrap().len();
            } else {
                fields.insert(name, field.text().await.unwrap());
            }
        }

        let signature = sign(
            &[
                ("folder", fields["folder"].as_str()),
                ("timestamp", fields["timestamp"].as_str()),
            ],
            "secret",
        );
        if fields["signature"] != signature || fields["api_key"] != "key" || file_len == 0 {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": {"message": "Invalid Signature"}})),
            );
        }

        (
            StatusCode::OK,
            Json(serde_json::json!({
                "public_id": format!("{}/abc123", fields["folder"]),
                "secure_url": format!("https://res.example.com/{}/abc123.png", fields["folder"]),
            })),
        )
    }

    fn config(api_url: String) -> CloudinaryConfig {
        CloudinaryConfig::new("demo", "key", "secret").with_api_url(api_url)
    }

    #[test]
    fn test_sign_sorts_params_and_appends_secret() {
        let signature = sign(
            &[("timestamp", "1700000000"), ("folder", "imgs-products-store")],
            "abcd",
        );
        assert_eq!(
            signature,
            "fb269beb5bd1d4c777c3dedb6865ed0bedd501413d3ac06de9dc159422a14f54"
        );
    }

    #[test]
    fn test_upload_url() {
        let config = config("https://api.cloudinary.com/v1_1/".to_string());
        assert_eq!(
            config.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", CloudinaryConfig::new("demo", "key", "top-secret"));
        assert!(!rendered.contains("top-secret"));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_CLOUD_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", Some("key")),
                ("CLOUDINARY_API_SECRET", Some("secret")),
                ("CLOUDINARY_FOLDER", None),
                ("CLOUDINARY_API_URL", None),
                ("CLOUDINARY_UPLOAD_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = CloudinaryConfig::from_env().unwrap();
                assert_eq!(config.cloud_name, "demo");
                assert_eq!(config.folder, DEFAULT_FOLDER);
                assert_eq!(config.api_url, DEFAULT_API_URL);
                assert_eq!(config.upload_timeout(), Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_from_env_requires_credentials() {
        temp_env::with_vars(
            [
                ("CLOUDINARY_CLOUD_NAME", Some("demo")),
                ("CLOUDINARY_API_KEY", None::<&str>),
                ("CLOUDINARY_API_SECRET", Some("secret")),
            ],
            || {
                let err = CloudinaryConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "CLOUDINARY_API_KEY"));
            },
        );
    }

    #[tokio::test]
    async fn test_upload_signed_request() {
        let base = spawn_stub(Router::new().route("/demo/image/upload", post(accept_upload))).await;
        let uploader = CloudinaryUploader::new(config(base)).unwrap();

        let image = ImageUpload {
            file_name: Some("lamp.png".to_string()),
            content_type: Some("image/png".to_string()),
            data: b"\x89PNG".to_vec(),
        };
        let uploaded = uploader.upload(&image, "imgs-products-store").await.unwrap();

        assert_eq!(uploaded.public_id, "imgs-products-store/abc123");
        assert_eq!(
            uploaded.secure_url,
            "https://res.example.com/imgs-products-store/abc123.png"
        );
    }

    #[tokio::test]
    async fn test_upload_rejection_carries_host_message() {
        let base = spawn_stub(Router::new().route("/demo/image/upload", post(accept_upload))).await;
        let config = CloudinaryConfig::new("demo", "key", "wrong").with_api_url(base);
        let uploader = CloudinaryUploader::new(config).unwrap();

        let err = uploader
            .upload(&ImageUpload::new(b"data".to_vec()), "shop")
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Rejected(ref msg) if msg == "Invalid Signature"));
    }

    #[tokio::test]
    async fn test_upload_rejection_without_json_body() {
        let base = spawn_stub(Router::new().route(
            "/demo/image/upload",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
        ))
        .await;
        let uploader = CloudinaryUploader::new(config(base)).unwrap();

        let err = uploader
            .upload(&ImageUpload::new(b"data".to_vec()), "shop")
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Rejected(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_upload_timeout() {
        let base = spawn_stub(Router::new().route(
            "/demo/image/upload",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                StatusCode::OK
            }),
        ))
        .await;
        let mut config = config(base);
        config.upload_timeout_secs = 1;
        let uploader = CloudinaryUploader::new(config).unwrap();

        let err = uploader
            .upload(&ImageUpload::new(b"data".to_vec()), "shop")
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Timeout(_)));
        assert_eq!(err.to_string(), "Image upload timed out after 1s");
    }

    #[tokio::test]
    async fn test_upload_unreachable_host() {
        let uploader = CloudinaryUploader::new(config("http://127.0.0.1:1".to_string())).unwrap();

        let err = uploader
            .upload(&ImageUpload::new(b"data".to_vec()), "shop")
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Transport(_)));
    }
}
