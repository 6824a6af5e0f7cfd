use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use tracing::warn;

use crate::basic::controller::ProfileController;
use crate::basic::display::{render_profile, share_url, ProfileView};
use crate::basic::reader;
use crate::config::GmBioConfig;
use crate::core::connection::{RpcConnection, SolConnection};
use crate::error::Result;
use crate::side_store::{AvatarStore, HttpAvatarStore};
use crate::types::Profile;
use crate::upload::{AvatarPinner, PinataPinner};

/// Entry point bundling the injected services for one program deployment.
#[derive(Clone)]
pub struct GmBioClient {
    connection: Arc<dyn SolConnection>,
    side_store: Arc<dyn AvatarStore>,
    pinner: Arc<dyn AvatarPinner>,
    program_id: Pubkey,
    app_url: String,
}

impl GmBioClient {
    pub fn new(
        connection: Arc<dyn SolConnection>,
        side_store: Arc<dyn AvatarStore>,
        pinner: Arc<dyn AvatarPinner>,
        program_id: Pubkey,
    ) -> Self {
        Self {
            connection,
            side_store,
            pinner,
            program_id,
            app_url: crate::core::constants::DEFAULT_APP_URL.to_string(),
        }
    }

    /// RPC connection, HTTP side-store and Pinata pinner built from `config`.
    pub fn from_config(config: &GmBioConfig) -> Result<Self> {
        let program_id = config.program_id()?;
        let pinner = PinataPinner::new(config.pinata_credentials())
            .with_gateway(config.pinata_gateway.clone());

        Ok(Self::new(
            Arc::new(RpcConnection::new(config.rpc_url.clone())),
            Arc::new(HttpAvatarStore::new(config.side_store_url.clone())),
            Arc::new(pinner),
            program_id,
        )
        .with_app_url(config.app_url.clone()))
    }

    pub fn with_app_url(mut self, app_url: impl Into<String>) -> Self {
        self.app_url = app_url.into();
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn connection(&self) -> &dyn SolConnection {
        self.connection.as_ref()
    }

    pub fn side_store(&self) -> &dyn AvatarStore {
        self.side_store.as_ref()
    }

    pub async fn try_fetch_profile_by_owner(&self, owner: &Pubkey) -> Result<Option<Profile>> {
        reader::try_fetch_profile_by_owner(self.connection(), &self.program_id, owner).await
    }

    pub async fn try_fetch_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        reader::try_fetch_profile_by_username(self.connection(), &self.program_id, username).await
    }

    pub async fn fetch_profile_by_owner(&self, owner: &Pubkey) -> Option<Profile> {
        reader::fetch_profile_by_owner(self.connection(), &self.program_id, owner).await
    }

    pub async fn fetch_profile_by_username(&self, username: &str) -> Option<Profile> {
        reader::fetch_profile_by_username(self.connection(), &self.program_id, username).await
    }

    /// Side-store avatar URL; failures are logged and read as none.
    pub async fn avatar_url(&self, owner: &Pubkey) -> Option<String> {
        self.side_store
            .get(owner, &self.program_id)
            .await
            .unwrap_or_else(|e| {
                warn!(%owner, "Failed to fetch avatar URL: {}", e);
                None
            })
    }

    /// Profile page view for `username`, or none if it is not registered.
    pub async fn resolve_view(&self, username: &str) -> Option<ProfileView> {
        let profile = self.fetch_profile_by_username(username).await?;
        let avatar = self.avatar_url(&profile.owner).await;
        Some(render_profile(&profile, avatar.as_deref()))
    }

    pub fn share_url(&self, username: &str) -> Result<String> {
        share_url(&self.app_url, username)
    }

    /// A form controller sharing this client's services
    pub fn controller(&self) -> ProfileController {
        ProfileController::new(
            self.connection.clone(),
            self.side_store.clone(),
            self.pinner.clone(),
            self.program_id,
        )
    }
}
