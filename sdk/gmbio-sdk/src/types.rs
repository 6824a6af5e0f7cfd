use gmbio_state::UserProfile;
use solana_sdk::pubkey::Pubkey;

/// A resolved profile, normalized from the on-chain account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Wallet that owns the profile
    pub owner: Pubkey,

    /// Immutable handle, also the key of the username registry
    pub username: String,

    pub bio: String,

    /// Link URLs in display order
    pub links: Vec<String>,

    /// Avatar URL, when known. The on-chain account carries none; the
    /// side-store URL is attached by callers that look it up.
    pub avatar: Option<String>,
}

impl From<UserProfile> for Profile {
    fn from(account: UserProfile) -> Self {
        Self {
            owner: Pubkey::new_from_array(account.owner),
            username: account.username,
            bio: account.bio,
            links: account.links,
            avatar: None,
        }
    }
}

/// One editable link row in the profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkEntry {
    /// Shown in the editor only; not stored on-chain
    pub title: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Both title and URL are non-blank
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}
