//! Profile submission.
//!
//! A submit is a short saga over three services that share no transaction:
//! the program, the pinning service and the avatar side-store. Once the
//! on-chain write has landed nothing is rolled back; a failed avatar step
//! after that point is returned as a [`ReconcileTask`] for an external job.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use tracing::{error, info, warn};

use crate::advanced::builders::TransactionBuilder;
use crate::advanced::instructions;
use crate::basic::form::{CreatePlan, FormMode, ProfileChanges, ProfileForm, SubmitPlan};
use crate::basic::reader::try_fetch_profile_by_owner;
use crate::core::connection::SolConnection;
use crate::core::signer::ProfileSigner;
use crate::error::{GmBioError, Result};
use crate::side_store::AvatarStore;
use crate::types::Profile;
use crate::upload::{AvatarFile, AvatarPinner, PinnedAvatar};
use crate::utils::derive_profile_pda;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Created,
    Updated,
    NoChanges,
}

/// Avatar state that must be repaired out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileTask {
    /// Profile PDA, base58
    pub pda: String,
    /// Set when the file was pinned but the side-store write failed
    pub pinata_url: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub kind: SubmitKind,
    /// Set when an on-chain write was sent
    pub signature: Option<Signature>,
    pub avatar: Option<PinnedAvatar>,
    pub reconcile: Option<ReconcileTask>,
}

impl SubmitOutcome {
    fn no_changes() -> Self {
        Self {
            kind: SubmitKind::NoChanges,
            signature: None,
            avatar: None,
            reconcile: None,
        }
    }
}

/// Owns the form for the connected wallet and runs submissions.
pub struct ProfileController {
    connection: Arc<dyn SolConnection>,
    side_store: Arc<dyn AvatarStore>,
    pinner: Arc<dyn AvatarPinner>,
    program_id: Pubkey,
    signer: Option<Arc<dyn ProfileSigner>>,
    form: ProfileForm,
    avatar_url: Option<String>,
}

impl ProfileController {
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
            signer: None,
            form: ProfileForm::new(),
            avatar_url: None,
        }
    }

    /// Attach a wallet and load its profile, if any. The form switches to
    /// update mode when a profile exists and is reset to create otherwise.
    ///
    /// A failed read leaves the controller disconnected, never holding one
    /// wallet's signer next to another wallet's form.
    pub async fn connect(&mut self, signer: Arc<dyn ProfileSigner>) -> Result<Option<Profile>> {
        let owner = signer.pubkey();

        let existing =
            match try_fetch_profile_by_owner(self.connection.as_ref(), &self.program_id, &owner)
                .await
            {
                Ok(existing) => existing,
                Err(e) => {
                    warn!(%owner, "Failed to load profile on connect: {}", e);
                    self.disconnect();
                    return Err(e);
                },
            };

        self.avatar_url = match &existing {
            Some(_) => self
                .side_store
                .get(&owner, &self.program_id)
                .await
                .unwrap_or_else(|e| {
                    warn!(%owner, "Failed to fetch avatar URL: {}", e);
                    None
                }),
            None => None,
        };

        match &existing {
            Some(profile) => {
                info!(%owner, username = %profile.username, "Loaded existing profile");
                self.form.load_profile(profile.clone());
            },
            None => {
                info!(%owner, "No profile yet");
                self.form = ProfileForm::new();
            },
        }
        self.signer = Some(signer);
        Ok(existing)
    }

    pub fn disconnect(&mut self) {
        self.signer = None;
        self.avatar_url = None;
        self.form = ProfileForm::new();
    }

    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    pub fn wallet(&self) -> Option<Pubkey> {
        self.signer.as_ref().map(|s| s.pubkey())
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    /// Side-store avatar URL for the connected profile, as last known
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Create-mode gate, including the wallet check.
    pub fn is_form_valid(&self) -> bool {
        self.form.is_form_valid(self.is_connected())
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let signer = self.signer.clone().ok_or(GmBioError::WalletNotConnected)?;

        match self.form.plan()? {
            SubmitPlan::NoChanges => {
                info!("No changes to submit");
                Ok(SubmitOutcome::no_changes())
            },
            SubmitPlan::Create(plan) => self.submit_create(signer, plan).await,
            SubmitPlan::Update(changes) => self.submit_update(signer, changes).await,
        }
    }

    /// On-chain create first; the avatar follows and can only produce a
    /// reconcile task from here on.
    async fn submit_create(
        &mut self,
        signer: Arc<dyn ProfileSigner>,
        plan: CreatePlan,
    ) -> Result<SubmitOutcome> {
        let owner = signer.pubkey();
        let ix = instructions::create_profile(
            &self.program_id,
            &owner,
            plan.username.clone(),
            plan.bio.clone(),
            plan.links.clone(),
        )?;
        let signature = TransactionBuilder::new(self.connection.as_ref(), signer.as_ref())
            .with_instruction(ix)
            .send()
            .await?;
        info!(%owner, username = %plan.username, %signature, "Profile created");

        let (avatar, reconcile) = match &plan.avatar {
            Some(file) => self.attach_avatar_after_write(&owner, file).await,
            None => (None, None),
        };

        self.form.load_profile(Profile {
            owner,
            username: plan.username,
            bio: plan.bio,
            links: plan.links,
            avatar: avatar.as_ref().map(|a| a.url.clone()),
        });

        Ok(SubmitOutcome {
            kind: SubmitKind::Created,
            signature: Some(signature),
            avatar,
            reconcile,
        })
    }

    /// Avatar first, then the on-chain update only when bio or links changed.
    async fn submit_update(
        &mut self,
        signer: Arc<dyn ProfileSigner>,
        changes: ProfileChanges,
    ) -> Result<SubmitOutcome> {
        let owner = signer.pubkey();

        let avatar = match &changes.avatar {
            Some(file) => {
                let pinned = self.pinner.pin(file).await?;
                self.side_store
                    .put(&owner, &self.program_id, &pinned.url)
                    .await?;
                info!(%owner, url = %pinned.url, "Avatar updated");
                self.avatar_url = Some(pinned.url.clone());
                self.form.clear_avatar();
                Some(pinned)
            },
            None => None,
        };

        let signature = if changes.touches_chain() {
            let ix = instructions::update_profile(
                &self.program_id,
                &owner,
                changes.bio.clone(),
                changes.links.clone(),
            )?;
            let signature = TransactionBuilder::new(self.connection.as_ref(), signer.as_ref())
                .with_instruction(ix)
                .send()
                .await?;
            info!(%owner, %signature, "Profile updated");
            Some(signature)
        } else {
            None
        };

        if let FormMode::Update(current) = self.form.mode() {
            let mut next = current.clone();
            if let Some(bio) = changes.bio {
                next.bio = bio;
            }
            if let Some(links) = changes.links {
                next.links = links;
            }
            if let Some(a) = &avatar {
                next.avatar = Some(a.url.clone());
            }
            self.form.load_profile(next);
        }

        Ok(SubmitOutcome {
            kind: SubmitKind::Updated,
            signature,
            avatar,
            reconcile: None,
        })
    }

    async fn attach_avatar_after_write(
        &mut self,
        owner: &Pubkey,
        file: &AvatarFile,
    ) -> (Option<PinnedAvatar>, Option<ReconcileTask>) {
        let pda = derive_profile_pda(&self.program_id, owner).0.to_string();

        let pinned = match self.pinner.pin(file).await {
            Ok(pinned) => pinned,
            Err(e) => {
                error!(%pda, "Avatar upload failed after profile write: {}", e);
                return (
                    None,
                    Some(ReconcileTask {
                        pda,
                        pinata_url: None,
                        reason: e.to_string(),
                    }),
                );
            },
        };

        match self.side_store.put(owner, &self.program_id, &pinned.url).await {
            Ok(_) => {
                self.avatar_url = Some(pinned.url.clone());
                (Some(pinned), None)
            },
            Err(e) => {
                error!(%pda, url = %pinned.url, "Side-store write failed after profile write: {}", e);
                let task = ReconcileTask {
                    pda,
                    pinata_url: Some(pinned.url.clone()),
                    reason: e.to_string(),
                };
                (Some(pinned), Some(task))
            },
        }
    }
}
