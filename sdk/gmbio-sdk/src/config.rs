use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::core::constants::{
    DEFAULT_APP_URL, DEFAULT_PINATA_GATEWAY, DEFAULT_PROGRAM_ID, DEFAULT_RPC_URL,
    DEFAULT_SIDE_STORE_URL,
};
use crate::error::{GmBioError, Result};
use crate::upload::PinataCredentials;

pub const ENV_RPC_URL: &str = "GMBIO_RPC_URL";
pub const ENV_PROGRAM_ID: &str = "GMBIO_PROGRAM_ID";
pub const ENV_SIDE_STORE_URL: &str = "GMBIO_SIDE_STORE_URL";
pub const ENV_APP_URL: &str = "GMBIO_APP_URL";
pub const ENV_PINATA_API_KEY: &str = "PINATA_API_KEY";
pub const ENV_PINATA_SECRET_KEY: &str = "PINATA_SECRET_KEY";
pub const ENV_PINATA_GATEWAY: &str = "GMBIO_PINATA_GATEWAY";

/// Client configuration. Every field has a devnet default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GmBioConfig {
    pub rpc_url: String,

    /// Base58 program id
    pub program_id: String,

    pub side_store_url: String,

    /// Public base URL used for share links
    pub app_url: String,

    pub pinata_gateway: String,

    pub pinata_api_key: Option<String>,

    pub pinata_secret_key: Option<String>,
}

impl Default for GmBioConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            side_store_url: DEFAULT_SIDE_STORE_URL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            pinata_gateway: DEFAULT_PINATA_GATEWAY.to_string(),
            pinata_api_key: None,
            pinata_secret_key: None,
        }
    }
}

impl GmBioConfig {
    /// Defaults overridden by any variables set in the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get(ENV_RPC_URL) {
            config.rpc_url = v;
        }
        if let Some(v) = get(ENV_PROGRAM_ID) {
            config.program_id = v;
        }
        if let Some(v) = get(ENV_SIDE_STORE_URL) {
            config.side_store_url = v;
        }
        if let Some(v) = get(ENV_APP_URL) {
            config.app_url = v;
        }
        if let Some(v) = get(ENV_PINATA_GATEWAY) {
            config.pinata_gateway = v;
        }
        config.pinata_api_key = get(ENV_PINATA_API_KEY);
        config.pinata_secret_key = get(ENV_PINATA_SECRET_KEY);
        config
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(self.program_id.trim())
            .map_err(|e| GmBioError::Config(format!("program id {:?}: {}", self.program_id, e)))
    }

    /// Both Pinata keys, when both are set
    pub fn pinata_credentials(&self) -> Option<PinataCredentials> {
        match (&self.pinata_api_key, &self.pinata_secret_key) {
            (Some(api_key), Some(secret_key)) => Some(PinataCredentials {
                api_key: api_key.clone(),
                secret_key: secret_key.clone(),
            }),
            _ => None,
        }
    }
}
