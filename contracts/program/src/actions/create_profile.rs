//! CreateProfile instruction handler

use gmbio_state::{
    profile_seeds, profile_seeds_with_bump, username_seeds, username_seeds_with_bump,
    validation::validate_create, UserProfile, UsernameRegistry,
};
use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    msg,
    program_error::ProgramError,
    pubkey::{find_program_address, Pubkey},
    ProgramResult,
};

use super::{check_key_match, check_user, check_writable, create_pda_account};
use crate::error::GmBioProgramError;

pub fn process_create_profile(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    username: String,
    bio: String,
    links: Vec<String>,
) -> ProgramResult {
    let [user, profile_account, registry_account, system_program, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    check_user(user)?;
    check_writable(profile_account)?;
    check_writable(registry_account)?;
    if system_program.key() != &pinocchio_system::ID {
        return Err(GmBioProgramError::InvalidProgramId.into());
    }

    validate_create(&username, &bio, &links)?;

    let (expected_profile, profile_bump) =
        find_program_address(&profile_seeds(user.key()), program_id);
    check_key_match(profile_account, &expected_profile)?;

    let (expected_registry, registry_bump) =
        find_program_address(&username_seeds(&username), program_id);
    check_key_match(registry_account, &expected_registry)?;

    // A second profile per wallet, or a taken username, stops here. Lamports
    // sent to a free address do not count.
    if !profile_account.data_is_empty() || !registry_account.data_is_empty() {
        return Err(ProgramError::AccountAlreadyInitialized);
    }

    let profile_bump_arr = [profile_bump];
    let profile_signer_seeds = profile_seeds_with_bump(user.key(), &profile_bump_arr);
    let profile_seed_list = [
        Seed::from(profile_signer_seeds[0]),
        Seed::from(profile_signer_seeds[1]),
        Seed::from(profile_signer_seeds[2]),
    ];
    create_pda_account(
        user,
        profile_account,
        UserProfile::SPACE,
        program_id,
        &[Signer::from(&profile_seed_list)],
    )?;

    let registry_bump_arr = [registry_bump];
    let registry_signer_seeds = username_seeds_with_bump(&username, &registry_bump_arr);
    let registry_seed_list = [
        Seed::from(registry_signer_seeds[0]),
        Seed::from(registry_signer_seeds[1]),
        Seed::from(registry_signer_seeds[2]),
    ];
    create_pda_account(
        user,
        registry_account,
        UsernameRegistry::SPACE,
        program_id,
        &[Signer::from(&registry_seed_list)],
    )?;

    {
        let mut registry_data = registry_account.try_borrow_mut_data()?;
        UsernameRegistry { owner: *user.key() }.store(&mut registry_data)?;
    }

    msg!("Profile created: {}", username);

    let mut profile_data = profile_account.try_borrow_mut_data()?;
    UserProfile::new(*user.key(), username, bio, links).store(&mut profile_data)?;

    Ok(())
}
