//! gm.bio Instruction Definitions
//!
//! Wire format: `sha256("global:<name>")[..8]` followed by the Borsh-encoded
//! arguments.

use borsh::{BorshDeserialize, BorshSerialize};
use pinocchio::program_error::ProgramError;

use crate::error::ProfileStateError;

/// Instruction discriminators
pub struct InstructionDiscriminator;

impl InstructionDiscriminator {
    pub const LEN: usize = 8;
    pub const CREATE_PROFILE: [u8; 8] = [0xe1, 0xcd, 0xea, 0x8f, 0x11, 0xba, 0x32, 0xdc];
    pub const UPDATE_PROFILE: [u8; 8] = [0x62, 0x43, 0x63, 0xce, 0x56, 0x73, 0xaf, 0x01];
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
struct CreateProfileArgs {
    username: String,
    bio: String,
    links: Vec<String>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
struct UpdateProfileArgs {
    bio: Option<String>,
    links: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileInstruction {
    /// Create a profile and claim a username
    ///
    /// Accounts:
    /// 0. `[writable, signer]` User (owner and payer)
    /// 1. `[writable]` Profile (PDA: ["profile", user])
    /// 2. `[writable]` Username registry (PDA: ["username", username])
    /// 3. `[]` System program
    CreateProfile {
        username: String,
        bio: String,
        links: Vec<String>,
    },

    /// Replace the bio and/or links of an existing profile
    ///
    /// Accounts:
    /// 0. `[writable, signer]` User (must be the profile owner)
    /// 1. `[writable]` Profile (PDA: ["profile", user])
    UpdateProfile {
        bio: Option<String>,
        links: Option<Vec<String>>,
    },
}

impl ProfileInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < InstructionDiscriminator::LEN {
            return Err(ProfileStateError::InstructionFallbackNotFound.into());
        }
        let (disc, mut args) = input.split_at(InstructionDiscriminator::LEN);
        let malformed = |_| ProgramError::from(ProfileStateError::InstructionDidNotDeserialize);

        if disc == InstructionDiscriminator::CREATE_PROFILE {
            let a = CreateProfileArgs::deserialize(&mut args).map_err(malformed)?;
            Ok(ProfileInstruction::CreateProfile {
                username: a.username,
                bio: a.bio,
                links: a.links,
            })
        } else if disc == InstructionDiscriminator::UPDATE_PROFILE {
            let a = UpdateProfileArgs::deserialize(&mut args).map_err(malformed)?;
            Ok(ProfileInstruction::UpdateProfile {
                bio: a.bio,
                links: a.links,
            })
        } else {
            Err(ProfileStateError::InstructionFallbackNotFound.into())
        }
    }

    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let (disc, args) = match self {
            ProfileInstruction::CreateProfile {
                username,
                bio,
                links,
            } => (
                InstructionDiscriminator::CREATE_PROFILE,
                borsh::to_vec(&CreateProfileArgs {
                    username: username.clone(),
                    bio: bio.clone(),
                    links: links.clone(),
                }),
            ),
            ProfileInstruction::UpdateProfile { bio, links } => (
                InstructionDiscriminator::UPDATE_PROFILE,
                borsh::to_vec(&UpdateProfileArgs {
                    bio: bio.clone(),
                    links: links.clone(),
                }),
            ),
        };
        let args = args.map_err(|_| ProfileStateError::InstructionDidNotSerialize)?;

        let mut data = Vec::with_capacity(InstructionDiscriminator::LEN + args.len());
        data.extend_from_slice(&disc);
        data.extend_from_slice(&args);
        Ok(data)
    }
}
