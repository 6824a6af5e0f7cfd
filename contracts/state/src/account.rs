//! Profile and username registry accounts.

use borsh::{BorshDeserialize, BorshSerialize};
use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

use crate::error::{ProfileError, ProfileStateError};
use crate::validation::{validate_bio, validate_links};
use crate::{MAX_BIO_LEN, MAX_LINKS, MAX_LINK_LEN, MAX_USERNAME_LEN};

/// Account type discriminators: `sha256("account:<Name>")[..8]`.
pub struct AccountDiscriminator;

impl AccountDiscriminator {
    pub const LEN: usize = 8;
    pub const USER_PROFILE: [u8; 8] = [0x20, 0x25, 0x77, 0xcd, 0xb3, 0xb4, 0x0d, 0xc2];
    pub const USERNAME_REGISTRY: [u8; 8] = [0x91, 0xd9, 0xcf, 0x7e, 0x23, 0x72, 0x8a, 0x12];
}

/// On-chain profile.
///
/// PDA Seeds: ["profile", owner]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Wallet that created and controls the profile
    pub owner: Pubkey,

    /// Immutable after creation
    pub username: String,

    pub bio: String,

    /// Ordered link URLs
    pub links: Vec<String>,
}

impl UserProfile {
    /// Fixed allocation: discriminator + owner + username + bio + links
    /// = 8 + 32 + (4 + 32) + (4 + 280) + 4 + 8 * (4 + 128) = 1420 bytes
    pub const SPACE: usize = AccountDiscriminator::LEN
        + 32
        + 4
        + MAX_USERNAME_LEN
        + 4
        + MAX_BIO_LEN
        + 4
        + MAX_LINKS * (4 + MAX_LINK_LEN);

    pub fn new(owner: Pubkey, username: String, bio: String, links: Vec<String>) -> Self {
        Self {
            owner,
            username,
            bio,
            links,
        }
    }

    /// Decode from raw account data. Zero padding after the payload is ignored.
    pub fn load(data: &[u8]) -> Result<Self, ProgramError> {
        let payload = check_discriminator(data, &AccountDiscriminator::USER_PROFILE)?;
        Self::deserialize(&mut &payload[..])
            .map_err(|_| ProfileStateError::AccountDidNotDeserialize.into())
    }

    /// Encode into raw account data, discriminator included.
    pub fn store(&self, data: &mut [u8]) -> Result<(), ProgramError> {
        write_account(data, &AccountDiscriminator::USER_PROFILE, self)
    }

    /// Apply an `update_profile` call. Only provided fields change; nothing
    /// changes if any provided field is invalid.
    pub fn apply_update(
        &mut self,
        bio: Option<String>,
        links: Option<Vec<String>>,
    ) -> Result<(), ProfileError> {
        if let Some(b) = bio.as_deref() {
            validate_bio(b)?;
        }
        if let Some(ls) = links.as_deref() {
            validate_links(ls)?;
        }

        if let Some(b) = bio {
            self.bio = b;
        }
        if let Some(ls) = links {
            self.links = ls;
        }
        Ok(())
    }
}

/// Maps a username to the wallet that registered it.
///
/// PDA Seeds: ["username", utf8(username)]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernameRegistry {
    pub owner: Pubkey,
}

impl UsernameRegistry {
    /// discriminator + owner = 40 bytes
    pub const SPACE: usize = AccountDiscriminator::LEN + 32;

    pub fn load(data: &[u8]) -> Result<Self, ProgramError> {
        let payload = check_discriminator(data, &AccountDiscriminator::USERNAME_REGISTRY)?;
        Self::deserialize(&mut &payload[..])
            .map_err(|_| ProfileStateError::AccountDidNotDeserialize.into())
    }

    pub fn store(&self, data: &mut [u8]) -> Result<(), ProgramError> {
        write_account(data, &AccountDiscriminator::USERNAME_REGISTRY, self)
    }
}

fn check_discriminator<'a>(data: &'a [u8], expected: &[u8; 8]) -> Result<&'a [u8], ProgramError> {
    if data.len() < AccountDiscriminator::LEN {
        return Err(ProfileStateError::AccountDidNotDeserialize.into());
    }
    let (disc, payload) = data.split_at(AccountDiscriminator::LEN);
    if disc != expected {
        return Err(ProfileStateError::AccountDiscriminatorMismatch.into());
    }
    Ok(payload)
}

fn write_account<T: BorshSerialize>(
    data: &mut [u8],
    discriminator: &[u8; 8],
    value: &T,
) -> Result<(), ProgramError> {
    let payload =
        borsh::to_vec(value).map_err(|_| ProgramError::from(ProfileStateError::AccountDidNotSerialize))?;
    let end = AccountDiscriminator::LEN + payload.len();
    if end > data.len() {
        return Err(ProfileStateError::AccountDidNotSerialize.into());
    }
    data[..AccountDiscriminator::LEN].copy_from_slice(discriminator);
    data[AccountDiscriminator::LEN..end].copy_from_slice(&payload);
    // Shrinking updates must not leave stale bytes behind the payload
    data[end..].fill(0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserProfile {
        UserProfile::new(
            [7u8; 32],
            "tQDR".to_string(),
            "AHYs".to_string(),
            vec!["Qufq".into(), "lOav".into(), "xydK".into(), "lyHad".into()],
        )
    }

    #[test]
    fn test_space_matches_fixed_allocation() {
        assert_eq!(UserProfile::SPACE, 1420);
        assert_eq!(UsernameRegistry::SPACE, 40);
    }

    #[test]
    fn test_store_then_load_with_padding() {
        let mut data = vec![0u8; UserProfile::SPACE];
        let profile = sample();
        profile.store(&mut data).unwrap();
        assert_eq!(&data[..8], &AccountDiscriminator::USER_PROFILE);
        assert_eq!(UserProfile::load(&data).unwrap(), profile);
    }

    #[test]
    fn test_max_sized_profile_fits() {
        let profile = UserProfile::new(
            [1u8; 32],
            "u".repeat(MAX_USERNAME_LEN),
            "b".repeat(MAX_BIO_LEN),
            vec!["l".repeat(MAX_LINK_LEN); MAX_LINKS],
        );
        let mut data = vec![0u8; UserProfile::SPACE];
        assert!(profile.store(&mut data).is_ok());
    }

    #[test]
    fn test_shrinking_update_clears_tail() {
        let mut data = vec![0u8; UserProfile::SPACE];
        let mut profile = sample();
        profile.bio = "x".repeat(200);
        profile.store(&mut data).unwrap();

        profile.bio = "short".to_string();
        profile.store(&mut data).unwrap();
        let used = 8 + borsh::to_vec(&profile).unwrap().len();
        assert!(data[used..].iter().all(|b| *b == 0));
        assert_eq!(UserProfile::load(&data).unwrap().bio, "short");
    }

    #[test]
    fn test_wrong_discriminator_rejected() {
        let mut data = vec![0u8; UserProfile::SPACE];
        sample().store(&mut data).unwrap();
        let err = UsernameRegistry::load(&data).unwrap_err();
        assert_eq!(
            err,
            ProgramError::from(ProfileStateError::AccountDiscriminatorMismatch)
        );
    }

    #[test]
    fn test_short_data_rejected() {
        assert!(UserProfile::load(&[0x20, 0x25]).is_err());
    }

    #[test]
    fn test_apply_update_partial() {
        let mut profile = sample();
        profile
            .apply_update(Some("Updated bio".to_string()), None)
            .unwrap();
        assert_eq!(profile.bio, "Updated bio");
        assert_eq!(profile.links.len(), 4);

        let links = vec!["https://example.com".to_string(), "https://solana.com".to_string()];
        profile.apply_update(None, Some(links.clone())).unwrap();
        assert_eq!(profile.links, links);
        assert_eq!(profile.username, "tQDR");
    }

    #[test]
    fn test_apply_update_is_all_or_nothing() {
        let mut profile = sample();
        let res = profile.apply_update(
            Some("new".to_string()),
            Some(vec!["x".to_string(); MAX_LINKS + 1]),
        );
        assert_eq!(res, Err(ProfileError::TooManyLinks));
        assert_eq!(profile.bio, "AHYs");
    }

    #[test]
    fn test_registry_store_load() {
        let mut data = vec![0u8; UsernameRegistry::SPACE];
        let owner: [u8; 32] = rand::random();
        let registry = UsernameRegistry { owner };
        registry.store(&mut data).unwrap();
        assert_eq!(UsernameRegistry::load(&data).unwrap().owner, owner);
    }
}
