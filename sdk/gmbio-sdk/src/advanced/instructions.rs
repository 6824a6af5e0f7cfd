use gmbio_state::ProfileInstruction;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::error::{GmBioError, Result};
use crate::utils::{derive_profile_pda, derive_username_pda};

fn encode(instruction: &ProfileInstruction) -> Result<Vec<u8>> {
    instruction
        .pack()
        .map_err(|e| GmBioError::SerializationError(format!("{e:?}")))
}

pub fn create_profile(
    program_id: &Pubkey,
    user: &Pubkey,
    username: String,
    bio: String,
    links: Vec<String>,
) -> Result<Instruction> {
    let (profile_pda, _) = derive_profile_pda(program_id, user);
    let (registry_pda, _) = derive_username_pda(program_id, &username);

    let instruction = ProfileInstruction::CreateProfile {
        username,
        bio,
        links,
    };

    let accounts = vec![
        AccountMeta::new(*user, true),
        AccountMeta::new(profile_pda, false),
        AccountMeta::new(registry_pda, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: encode(&instruction)?,
    })
}

/// `None` leaves the field unchanged on-chain.
pub fn update_profile(
    program_id: &Pubkey,
    user: &Pubkey,
    bio: Option<String>,
    links: Option<Vec<String>>,
) -> Result<Instruction> {
    let (profile_pda, _) = derive_profile_pda(program_id, user);

    let instruction = ProfileInstruction::UpdateProfile { bio, links };

    let accounts = vec![
        AccountMeta::new(*user, true),
        AccountMeta::new(profile_pda, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: encode(&instruction)?,
    })
}
