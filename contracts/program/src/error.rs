//! gm.bio Program Error Types
//!
//! Account-constraint failures. Codes match Anchor's framework errors.

use pinocchio::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GmBioProgramError {
    #[error("A mut constraint was violated")]
    ConstraintMut = 2000,

    #[error("A signer constraint was violated")]
    ConstraintSigner = 2002,

    #[error("A seeds constraint was violated")]
    ConstraintSeeds = 2006,

    #[error("The given account is owned by a different program than expected")]
    AccountOwnedByWrongProgram = 3007,

    #[error("Program ID was not as expected")]
    InvalidProgramId = 3008,

    #[error("The program expected this account to be already initialized")]
    AccountNotInitialized = 3012,
}

impl From<GmBioProgramError> for ProgramError {
    fn from(e: GmBioProgramError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
