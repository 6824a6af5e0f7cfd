//! UpdateProfile instruction handler

use gmbio_state::{profile_seeds, ProfileError, UserProfile};
use pinocchio::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::{find_program_address, Pubkey},
    ProgramResult,
};

use super::{check_key_match, check_user, check_writable};
use crate::error::GmBioProgramError;

pub fn process_update_profile(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    bio: Option<String>,
    links: Option<Vec<String>>,
) -> ProgramResult {
    let [user, profile_account, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    check_user(user)?;
    check_writable(profile_account)?;

    if profile_account.data_is_empty() {
        return Err(GmBioProgramError::AccountNotInitialized.into());
    }
    if profile_account.owner() != program_id {
        return Err(GmBioProgramError::AccountOwnedByWrongProgram.into());
    }

    let (expected_profile, _) = find_program_address(&profile_seeds(user.key()), program_id);
    check_key_match(profile_account, &expected_profile)?;

    let mut profile_data = profile_account.try_borrow_mut_data()?;
    let mut profile = UserProfile::load(&profile_data)?;

    if &profile.owner != user.key() {
        return Err(ProfileError::Unauthorized.into());
    }

    profile.apply_update(bio, links)?;
    profile.store(&mut profile_data)?;

    msg!("Profile updated: {}", profile.username);
    Ok(())
}
