use crate::core::connection::SolConnection;
use crate::error::{GmBioError, Result};
use crate::types::Profile;
use gmbio_state::{UserProfile, UsernameRegistry, PROFILE_SEED, USERNAME_SEED};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

//=============================================================================
// PDA Derivation Helpers
//=============================================================================

/// Derive the profile PDA from program ID and owner wallet
pub fn derive_profile_pda(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PROFILE_SEED, owner.as_ref()], program_id)
}

/// Derive the username registry PDA from program ID and username
pub fn derive_username_pda(program_id: &Pubkey, username: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USERNAME_SEED, username.as_bytes()], program_id)
}

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Fetch raw account data owned by `program_id`.
///
/// `Ok(None)` when the account does not exist, or holds only lamports and
/// has not been allocated yet.
pub async fn fetch_program_account(
    connection: &dyn SolConnection,
    program_id: &Pubkey,
    address: &Pubkey,
) -> Result<Option<Vec<u8>>> {
    let account = connection
        .get_account(address)
        .await
        .map_err(|e| GmBioError::Connection(e.to_string()))?;

    match account {
        None => Ok(None),
        Some(account) if account.data.is_empty() && system_program::check_id(&account.owner) => {
            Ok(None)
        },
        Some(account) if account.owner != *program_id => Err(GmBioError::InvalidAccountData(
            format!("{} is owned by {}, not {}", address, account.owner, program_id),
        )),
        Some(account) => Ok(Some(account.data)),
    }
}

/// Parse a profile account
pub fn parse_profile(data: &[u8]) -> Result<Profile> {
    UserProfile::load(data)
        .map(Profile::from)
        .map_err(|e| GmBioError::InvalidAccountData(format!("Failed to parse profile: {:?}", e)))
}

/// Parse a username registry account, returning the registered owner
pub fn parse_username_owner(data: &[u8]) -> Result<Pubkey> {
    UsernameRegistry::load(data)
        .map(|r| Pubkey::new_from_array(r.owner))
        .map_err(|e| {
            GmBioError::InvalidAccountData(format!("Failed to parse username registry: {:?}", e))
        })
}
