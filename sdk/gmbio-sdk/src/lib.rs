pub mod advanced;
pub mod basic;
pub mod config;
pub mod core;
pub mod error;
pub mod link;
pub mod side_store;
pub mod types;
pub mod upload;
pub mod utils;

pub use crate::basic::client::GmBioClient;
pub use crate::basic::controller::{ProfileController, ReconcileTask, SubmitKind, SubmitOutcome};
pub use crate::basic::display::{render_profile, share_url, AvatarDisplay, ProfileView};
pub use crate::basic::form::{FormMode, LinkField, ProfileForm, SubmitPlan};
pub use crate::config::GmBioConfig;
pub use crate::core::connection::SolConnection;
pub use crate::core::signer::ProfileSigner;
pub use crate::error::{GmBioError, Result};
pub use crate::link::{classify, LinkType};
pub use crate::side_store::{AvatarStore, HttpAvatarStore, MemoryAvatarStore};
pub use crate::types::{LinkEntry, Profile};
pub use crate::upload::{AvatarFile, AvatarPinner, PinataPinner, PinnedAvatar, UploadError};
pub use crate::utils::{derive_profile_pda, derive_username_pda};

pub mod state {
    pub use gmbio_state::{
        ProfileError, ProfileInstruction, UserProfile, UsernameRegistry, MAX_BIO_LEN, MAX_LINKS,
        MAX_LINK_LEN, MAX_USERNAME_LEN,
    };
}
