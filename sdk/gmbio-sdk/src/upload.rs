//! Avatar pinning.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

use crate::core::constants::{DEFAULT_PINATA_GATEWAY, PINATA_PIN_FILE_URL};

/// 5 MiB
pub const MAX_AVATAR_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_AVATAR_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only JPEG, PNG, and WEBP files are allowed.")]
    UnsupportedType(String),

    #[error("File size must be less than 5MB.")]
    TooLarge(usize),

    #[error("Pinata API keys missing. Provide them in env vars or via the UI.")]
    MissingCredentials,

    #[error("Pinata upload failed. Response: {0}")]
    NonJsonResponse(String),

    #[error("Pinata upload failed: {0}")]
    Rejected(String),

    #[error("Failed to upload avatar: {0}")]
    Http(#[from] reqwest::Error),
}

/// An image staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    /// MIME type as reported by the picker
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        if !ALLOWED_AVATAR_TYPES.contains(&self.content_type.as_str()) {
            return Err(UploadError::UnsupportedType(self.content_type.clone()));
        }
        if self.bytes.len() > MAX_AVATAR_SIZE {
            return Err(UploadError::TooLarge(self.bytes.len()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedAvatar {
    /// Content hash (CID)
    pub hash: String,
    /// Gateway URL for the content
    pub url: String,
}

#[async_trait]
pub trait AvatarPinner: Send + Sync {
    async fn pin(&self, file: &AvatarFile) -> Result<PinnedAvatar, UploadError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinataCredentials {
    pub api_key: String,
    pub secret_key: String,
}

/// Pinata `pinFileToIPFS` client.
#[derive(Debug, Clone)]
pub struct PinataPinner {
    client: Client,
    credentials: Option<PinataCredentials>,
    endpoint: String,
    gateway: String,
}

impl PinataPinner {
    pub fn new(credentials: Option<PinataCredentials>) -> Self {
        Self {
            client: Client::new(),
            credentials,
            endpoint: PINATA_PIN_FILE_URL.to_string(),
            gateway: DEFAULT_PINATA_GATEWAY.to_string(),
        }
    }

    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = gateway.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn gateway_url(&self, hash: &str) -> String {
        format!("{}/ipfs/{}", self.gateway, hash)
    }

    fn build_form(file: &AvatarFile) -> Result<Form, UploadError> {
        let now = chrono::Utc::now();
        let metadata = json!({
            "name": format!("Avatar Upload - {}", now.to_rfc3339()),
            "keyvalues": {
                "type": "avatar",
                "timestamp": now.timestamp_millis().to_string(),
            },
        });
        let options = json!({ "cidVersion": 1 });

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;

        Ok(Form::new()
            .part("file", part)
            .text("pinataMetadata", metadata.to_string())
            .text("pinataOptions", options.to_string()))
    }

    async fn upload(&self, file: &AvatarFile) -> Result<PinnedAvatar, UploadError> {
        file.validate()?;
        let credentials = self
            .credentials
            .as_ref()
            .filter(|c| !c.api_key.is_empty() && !c.secret_key.is_empty())
            .ok_or(UploadError::MissingCredentials)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("pinata_api_key", &credentials.api_key)
            .header("pinata_secret_api_key", &credentials.secret_key)
            .multipart(Self::build_form(file)?)
            .send()
            .await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        if !is_json {
            let text = response.text().await?;
            return Err(UploadError::NonJsonResponse(text));
        }

        let body: Value = response.json().await?;
        if !status.is_success() {
            let reason = match body.get("error") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(UploadError::Rejected(reason));
        }

        let hash = body
            .get("IpfsHash")
            .and_then(Value::as_str)
            .ok_or_else(|| UploadError::Rejected("response has no IpfsHash".to_string()))?
            .to_string();
        let url = self.gateway_url(&hash);

        info!(%hash, %url, "Avatar uploaded to Pinata");
        Ok(PinnedAvatar { hash, url })
    }
}

#[async_trait]
impl AvatarPinner for PinataPinner {
    async fn pin(&self, file: &AvatarFile) -> Result<PinnedAvatar, UploadError> {
        self.upload(file).await.map_err(|e| {
            error!("Avatar upload error: {}", e);
            e
        })
    }
}
