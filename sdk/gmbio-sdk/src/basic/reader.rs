//! Profile lookups.
//!
//! The `try_` functions separate a missing account (`Ok(None)`) from RPC
//! or decoding failures. The plain variants collapse every failure into
//! `None` and log it.

use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use crate::core::connection::SolConnection;
use crate::error::Result;
use crate::types::Profile;
use crate::utils::{
    derive_profile_pda, derive_username_pda, fetch_program_account, parse_profile,
    parse_username_owner,
};

pub async fn try_fetch_profile_by_owner(
    connection: &dyn SolConnection,
    program_id: &Pubkey,
    owner: &Pubkey,
) -> Result<Option<Profile>> {
    let (profile_pda, _) = derive_profile_pda(program_id, owner);
    match fetch_program_account(connection, program_id, &profile_pda).await? {
        Some(data) => parse_profile(&data).map(Some),
        None => {
            debug!(%owner, %profile_pda, "No profile for owner");
            Ok(None)
        },
    }
}

/// Registry lookup followed by the owner's profile.
pub async fn try_fetch_profile_by_username(
    connection: &dyn SolConnection,
    program_id: &Pubkey,
    username: &str,
) -> Result<Option<Profile>> {
    let (registry_pda, _) = derive_username_pda(program_id, username);
    let Some(data) = fetch_program_account(connection, program_id, &registry_pda).await? else {
        debug!(username, "Username not registered");
        return Ok(None);
    };
    let owner = parse_username_owner(&data)?;
    try_fetch_profile_by_owner(connection, program_id, &owner).await
}

pub async fn fetch_profile_by_owner(
    connection: &dyn SolConnection,
    program_id: &Pubkey,
    owner: &Pubkey,
) -> Option<Profile> {
    try_fetch_profile_by_owner(connection, program_id, owner)
        .await
        .unwrap_or_else(|e| {
            warn!(%owner, "Error fetching profile: {}", e);
            None
        })
}

pub async fn fetch_profile_by_username(
    connection: &dyn SolConnection,
    program_id: &Pubkey,
    username: &str,
) -> Option<Profile> {
    try_fetch_profile_by_username(connection, program_id, username)
        .await
        .unwrap_or_else(|e| {
            warn!(username, "Error fetching profile by username: {}", e);
            None
        })
}
