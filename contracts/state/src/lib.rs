//! gm.bio State Module
//!
//! Account layouts, PDA seeds and the instruction wire format shared by the
//! on-chain profile program and the client SDK.
//!
//! Accounts and instructions use Anchor-compatible framing (an 8-byte
//! `sha256` prefix followed by Borsh), so programs and clients written
//! against either side of the stack interoperate.

pub mod account;
pub mod error;
pub mod instruction;
pub mod validation;

use pinocchio::pubkey::Pubkey;
use pinocchio_pubkey::declare_id;

pub use account::{AccountDiscriminator, UserProfile, UsernameRegistry};
pub use error::{ProfileError, ProfileStateError};
pub use instruction::{InstructionDiscriminator, ProfileInstruction};

declare_id!("7EiXfcfkDh4eQWTWhrUNydZroe6sQiZzxryfbSwS1ddf");

/// Maximum username length in bytes.
pub const MAX_USERNAME_LEN: usize = 32;

/// Maximum bio length in bytes.
pub const MAX_BIO_LEN: usize = 280;

/// Maximum number of links per profile.
pub const MAX_LINKS: usize = 8;

/// Maximum length of a single link in bytes.
pub const MAX_LINK_LEN: usize = 128;

/// Seed prefix for the profile PDA: ["profile", owner]
pub const PROFILE_SEED: &[u8] = b"profile";

/// Seed prefix for the username registry PDA: ["username", utf8(username)]
pub const USERNAME_SEED: &[u8] = b"username";

/// Generate PDA seeds for a profile account
pub fn profile_seeds(owner: &Pubkey) -> [&[u8]; 2] {
    [PROFILE_SEED, owner.as_ref()]
}

/// Generate profile PDA seeds with bump
pub fn profile_seeds_with_bump<'a>(owner: &'a Pubkey, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [PROFILE_SEED, owner.as_ref(), bump]
}

/// Generate PDA seeds for a username registry account
pub fn username_seeds(username: &str) -> [&[u8]; 2] {
    [USERNAME_SEED, username.as_bytes()]
}

/// Generate username registry PDA seeds with bump
pub fn username_seeds_with_bump<'a>(username: &'a str, bump: &'a [u8]) -> [&'a [u8]; 3] {
    [USERNAME_SEED, username.as_bytes(), bump]
}
