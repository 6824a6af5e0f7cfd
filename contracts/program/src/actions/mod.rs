pub mod create_profile;
pub mod update_profile;

pub use create_profile::*;
pub use update_profile::*;

use crate::error::GmBioProgramError;
use pinocchio::{
    account_info::AccountInfo,
    instruction::Signer,
    pubkey::Pubkey,
    sysvars::{rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer};

/// `user` must sign and be writable (it pays rent on create).
pub fn check_user(user: &AccountInfo) -> ProgramResult {
    if !user.is_signer() {
        return Err(GmBioProgramError::ConstraintSigner.into());
    }
    if !user.is_writable() {
        return Err(GmBioProgramError::ConstraintMut.into());
    }
    Ok(())
}

pub fn check_writable(account: &AccountInfo) -> ProgramResult {
    if !account.is_writable() {
        return Err(GmBioProgramError::ConstraintMut.into());
    }
    Ok(())
}

pub fn check_key_match(account: &AccountInfo, expected: &Pubkey) -> ProgramResult {
    if account.key() != expected {
        return Err(GmBioProgramError::ConstraintSeeds.into());
    }
    Ok(())
}

/// Allocate `space` bytes at the PDA `account` and hand it to `owner`.
///
/// An address that already holds lamports cannot go through `CreateAccount`,
/// so it is topped up to rent exemption, allocated and assigned instead.
pub fn create_pda_account(
    payer: &AccountInfo,
    account: &AccountInfo,
    space: usize,
    owner: &Pubkey,
    signers: &[Signer],
) -> ProgramResult {
    let required = Rent::get()?.minimum_balance(space);
    let current = account.lamports();

    if current == 0 {
        return CreateAccount {
            from: payer,
            to: account,
            lamports: required,
            space: space as u64,
            owner,
        }
        .invoke_signed(signers);
    }

    if required > current {
        Transfer {
            from: payer,
            to: account,
            lamports: required - current,
        }
        .invoke()?;
    }
    Allocate {
        account,
        space: space as u64,
    }
    .invoke_signed(signers)?;
    Assign { account, owner }.invoke_signed(signers)
}
