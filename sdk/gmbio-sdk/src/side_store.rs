//! Avatar URL side-store.
//!
//! Off-chain map from a profile PDA (base58) to the pinned avatar URL. One
//! record per PDA; writes replace the URL in place and concurrent writers
//! race with last-writer-wins.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use crate::error::{GmBioError, Result};
use crate::utils::derive_profile_pda;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRecord {
    /// Profile PDA, base58
    pub pda: String,
    pub pinata_url: String,
}

#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Stored avatar URL for the owner's profile, if any
    async fn get(&self, owner: &Pubkey, program_id: &Pubkey) -> Result<Option<String>>;

    /// Insert or replace the avatar URL for the owner's profile
    async fn put(&self, owner: &Pubkey, program_id: &Pubkey, url: &str) -> Result<AvatarRecord>;
}

/// Side-store key for an owner: the base58 profile PDA
pub fn avatar_key(owner: &Pubkey, program_id: &Pubkey) -> String {
    derive_profile_pda(program_id, owner).0.to_string()
}

//=============================================================================
// In-memory backend
//=============================================================================

/// Process-local store. Backs the side-store service and tests.
#[derive(Debug, Default)]
pub struct MemoryAvatarStore {
    records: DashMap<String, String>,
}

impl MemoryAvatarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_by_pda(&self, pda: &str) -> Option<String> {
        self.records.get(pda).map(|r| r.value().clone())
    }

    pub fn upsert(&self, pda: String, url: String) -> AvatarRecord {
        match self.records.insert(pda.clone(), url.clone()) {
            Some(previous) => debug!(%pda, %previous, "Avatar record updated"),
            None => debug!(%pda, "Avatar record created"),
        }
        AvatarRecord {
            pda,
            pinata_url: url,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl AvatarStore for MemoryAvatarStore {
    async fn get(&self, owner: &Pubkey, program_id: &Pubkey) -> Result<Option<String>> {
        Ok(self.get_by_pda(&avatar_key(owner, program_id)))
    }

    async fn put(&self, owner: &Pubkey, program_id: &Pubkey, url: &str) -> Result<AvatarRecord> {
        Ok(self.upsert(avatar_key(owner, program_id), url.to_string()))
    }
}

//=============================================================================
// HTTP backend
//=============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchUrlRequest {
    pub user_public_key: Option<String>,
    pub program_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FetchUrlResponse {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUrlRequest {
    pub user_public_key: Option<String>,
    pub program_id: Option<String>,
    pub pinata_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreUrlResponse {
    pub pda: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client for the side-store service (`/api/fetchUrl`, `/api/storeUrl`).
#[derive(Debug, Clone)]
pub struct HttpAvatarStore {
    client: Client,
    base_url: String,
}

impl HttpAvatarStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<B: Serialize + ?Sized, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GmBioError::SideStore(format!("POST {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            warn!(%url, %status, "Side-store request failed: {}", message);
            return Err(GmBioError::SideStore(message));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| GmBioError::SideStore(format!("Invalid response from {url}: {e}")))
    }
}

#[async_trait]
impl AvatarStore for HttpAvatarStore {
    async fn get(&self, owner: &Pubkey, program_id: &Pubkey) -> Result<Option<String>> {
        let body = FetchUrlRequest {
            user_public_key: Some(owner.to_string()),
            program_id: Some(program_id.to_string()),
        };
        let response: FetchUrlResponse = self.post("/api/fetchUrl", &body).await?;
        Ok(response.url.filter(|u| !u.is_empty()))
    }

    async fn put(&self, owner: &Pubkey, program_id: &Pubkey, url: &str) -> Result<AvatarRecord> {
        let body = StoreUrlRequest {
            user_public_key: Some(owner.to_string()),
            program_id: Some(program_id.to_string()),
            pinata_url: Some(url.to_string()),
        };
        let response: StoreUrlResponse = self.post("/api/storeUrl", &body).await?;
        Ok(AvatarRecord {
            pda: response.pda,
            pinata_url: response.url,
        })
    }
}
