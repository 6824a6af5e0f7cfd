//! Instruction Processor
//!
//! Thin dispatcher that routes instructions to individual handlers.

use gmbio_state::ProfileInstruction;
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

use crate::actions;

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = ProfileInstruction::unpack(instruction_data).map_err(|e| {
        msg!("Failed to unpack instruction: {:?}", e);
        e
    })?;
    match instruction {
        ProfileInstruction::CreateProfile {
            username,
            bio,
            links,
        } => {
            msg!("Instruction: CreateProfile");
            actions::process_create_profile(program_id, accounts, username, bio, links)
        },
        ProfileInstruction::UpdateProfile { bio, links } => {
            msg!("Instruction: UpdateProfile");
            actions::process_update_profile(program_id, accounts, bio, links)
        },
    }
}
