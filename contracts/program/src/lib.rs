//! gm.bio Profile Program - Main Entry Point
//!
//! Link-in-bio profiles keyed by owner, with a one-per-name username
//! registry for lookups by handle.

extern crate alloc;

pub mod actions;
pub mod error;
pub mod processor;

pub use gmbio_state::{check_id, id, ID};

#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint {
    use pinocchio::{account_info::AccountInfo, entrypoint, pubkey::Pubkey, ProgramResult};

    entrypoint!(process_instruction);

    fn process_instruction(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        crate::processor::process_instruction(program_id, accounts, instruction_data)
    }
}
