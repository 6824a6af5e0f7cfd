use pinocchio::program_error::ProgramError;

/// Errors raised by the profile program's own checks.
///
/// Codes follow Anchor's custom error numbering (6000 + variant index) so
/// existing clients decode them unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Username exceeds [`crate::MAX_USERNAME_LEN`]
    UsernameTooLong = 6000,
    /// Bio exceeds [`crate::MAX_BIO_LEN`]
    BioTooLong,
    /// More than [`crate::MAX_LINKS`] links
    TooManyLinks,
    /// A link exceeds [`crate::MAX_LINK_LEN`]
    LinkTooLong,
    /// Signer does not own the profile
    Unauthorized,
}

impl ProfileError {
    pub fn message(&self) -> &'static str {
        match self {
            ProfileError::UsernameTooLong => "Username too long",
            ProfileError::BioTooLong => "Bio too long",
            ProfileError::TooManyLinks => "Too many links",
            ProfileError::LinkTooLong => "Link too long",
            ProfileError::Unauthorized => "Unauthorized",
        }
    }

    /// Map a raw custom error code back to a profile error.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            6000 => Some(ProfileError::UsernameTooLong),
            6001 => Some(ProfileError::BioTooLong),
            6002 => Some(ProfileError::TooManyLinks),
            6003 => Some(ProfileError::LinkTooLong),
            6004 => Some(ProfileError::Unauthorized),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<ProfileError> for ProgramError {
    fn from(e: ProfileError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

/// Error types related to account and instruction framing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProfileStateError {
    /// Data shorter than the 8-byte discriminator
    AccountDidNotDeserialize = 3003,
    /// Discriminator does not match the expected account type
    AccountDiscriminatorMismatch = 3002,
    /// Serialized account does not fit the allocated space
    AccountDidNotSerialize = 3004,
    /// Unknown instruction discriminator
    InstructionFallbackNotFound = 101,
    /// Instruction arguments failed to decode
    InstructionDidNotDeserialize = 102,
    /// Instruction arguments failed to encode
    InstructionDidNotSerialize = 103,
}

impl From<ProfileStateError> for ProgramError {
    fn from(e: ProfileStateError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
