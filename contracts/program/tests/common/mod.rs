//! Common test utilities for the gm.bio program tests

#![allow(dead_code)]

use std::path::PathBuf;

use gmbio_sdk::advanced::instructions;
use gmbio_sdk::core::constants::DEFAULT_PROGRAM_ID;
use gmbio_sdk::utils::{parse_profile, parse_username_owner};
use gmbio_sdk::Profile;
use litesvm::LiteSVM;
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    system_instruction,
    transaction::{Transaction, TransactionError},
};

/// Build output of `cargo build-sbf --manifest-path contracts/program/Cargo.toml`
pub const PROGRAM_SO_ENV: &str = "GMBIO_PROGRAM_SO";

pub struct TestContext {
    pub svm: LiteSVM,
    pub payer: Keypair,
}

impl TestContext {
    pub fn new(program_path: &PathBuf) -> anyhow::Result<Self> {
        let mut svm = LiteSVM::new();
        svm.add_program_from_file(DEFAULT_PROGRAM_ID, program_path)
            .map_err(|e| {
                anyhow::anyhow!("Failed to load program from {}: {:?}", program_path.display(), e)
            })?;

        let payer = Keypair::new();
        svm.airdrop(&payer.pubkey(), 10_000_000_000)
            .map_err(|e| anyhow::anyhow!("Failed to airdrop: {:?}", e))?;

        Ok(Self { svm, payer })
    }

    /// Fresh wallet holding `lamports`
    pub fn wallet(&mut self, lamports: u64) -> anyhow::Result<Keypair> {
        let wallet = Keypair::new();
        self.svm
            .airdrop(&wallet.pubkey(), lamports)
            .map_err(|e| anyhow::anyhow!("Failed to airdrop: {:?}", e))?;
        Ok(wallet)
    }

    pub fn send(&mut self, ix: Instruction, signer: &Keypair) -> Result<(), TransactionError> {
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&signer.pubkey()),
            &[signer],
            self.svm.latest_blockhash(),
        );
        self.svm
            .send_transaction(tx)
            .map(|_| ())
            .map_err(|failed| failed.err)
    }

    /// Plain system transfer, used to pre-fund derived addresses.
    pub fn transfer(&mut self, to: &Pubkey, lamports: u64) -> anyhow::Result<()> {
        let payer = self.payer.insecure_clone();
        let ix = system_instruction::transfer(&payer.pubkey(), to, lamports);
        self.send(ix, &payer)
            .map_err(|e| anyhow::anyhow!("Failed to transfer: {:?}", e))
    }

    pub fn create_profile(
        &mut self,
        user: &Keypair,
        username: &str,
        bio: &str,
        links: &[&str],
    ) -> Result<(), TransactionError> {
        let ix = instructions::create_profile(
            &DEFAULT_PROGRAM_ID,
            &user.pubkey(),
            username.to_string(),
            bio.to_string(),
            links.iter().map(|l| l.to_string()).collect(),
        )
        .expect("instruction encodes");
        self.send(ix, user)
    }

    pub fn update_profile(
        &mut self,
        user: &Keypair,
        bio: Option<&str>,
        links: Option<&[&str]>,
    ) -> Result<(), TransactionError> {
        let ix = instructions::update_profile(
            &DEFAULT_PROGRAM_ID,
            &user.pubkey(),
            bio.map(str::to_string),
            links.map(|l| l.iter().map(|s| s.to_string()).collect()),
        )
        .expect("instruction encodes");
        self.send(ix, user)
    }

    pub fn profile(&self, address: &Pubkey) -> Option<Profile> {
        let account = self.svm.get_account(address)?;
        parse_profile(&account.data).ok()
    }

    pub fn registry_owner(&self, address: &Pubkey) -> Option<Pubkey> {
        let account = self.svm.get_account(address)?;
        parse_username_owner(&account.data).ok()
    }
}

/// Path to the built program, when there is one.
pub fn program_path() -> Option<PathBuf> {
    let path = std::env::var(PROGRAM_SO_ENV).map(PathBuf::from).unwrap_or_else(|_| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/deploy/gmbio_program.so")
    });
    path.exists().then_some(path)
}

/// Test context backed by the built program. Returns `None`, after saying
/// so, when the program has not been built for SBF yet.
pub fn setup_test_context() -> Option<TestContext> {
    let Some(path) = program_path() else {
        eprintln!(
            "skipping: gmbio_program.so not found; run `cargo build-sbf` or set {}",
            PROGRAM_SO_ENV
        );
        return None;
    };
    match TestContext::new(&path) {
        Ok(ctx) => Some(ctx),
        Err(e) => panic!("{e}"),
    }
}

pub fn custom_error(code: u32) -> TransactionError {
    TransactionError::InstructionError(0, InstructionError::Custom(code))
}
