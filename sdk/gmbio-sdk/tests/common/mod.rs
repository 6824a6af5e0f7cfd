#![allow(dead_code)]

use async_trait::async_trait;
use gmbio_sdk::side_store::{AvatarRecord, AvatarStore, MemoryAvatarStore};
use gmbio_sdk::upload::{AvatarFile, AvatarPinner, PinnedAvatar, UploadError};
use gmbio_sdk::{derive_profile_pda, derive_username_pda, GmBioError, ProfileController};
use gmbio_state::validation::validate_create;
use gmbio_state::{ProfileInstruction, UserProfile, UsernameRegistry};
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    system_program,
    transaction::Transaction,
};
use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gmbio_sdk::core::connection::SolConnection;

type BoxError = Box<dyn Error + Send + Sync>;

/// In-memory ledger that runs the profile instructions against the same
/// account layouts and checks the program uses.
pub struct MockLedger {
    pub program_id: Pubkey,
    accounts: Mutex<HashMap<Pubkey, Account>>,
    blockhash: Hash,
    sends: AtomicUsize,
    reads: AtomicUsize,
    offline: AtomicBool,
}

impl MockLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            accounts: Mutex::new(HashMap::new()),
            blockhash: Hash::new_unique(),
            sends: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
        }
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn insert_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    /// Send lamports to an address without allocating it.
    pub fn fund(&self, address: Pubkey, lamports: u64) {
        self.insert_account(
            address,
            Account {
                lamports,
                data: Vec::new(),
                owner: system_program::id(),
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    fn program_account(&self, data: Vec<u8>) -> Account {
        Account {
            lamports: 1_000_000,
            data,
            owner: self.program_id,
            executable: false,
            rent_epoch: 0,
        }
    }

    fn execute(
        &self,
        accounts: &mut HashMap<Pubkey, Account>,
        keys: &[Pubkey],
        signers: &[bool],
        data: &[u8],
    ) -> Result<(), String> {
        let ix = ProfileInstruction::unpack(data).map_err(|e| format!("{e:?}"))?;
        let user = *keys.first().ok_or("not enough account keys")?;
        if !signers.first().copied().unwrap_or(false) {
            return Err("user must sign".into());
        }

        match ix {
            ProfileInstruction::CreateProfile {
                username,
                bio,
                links,
            } => {
                if keys.len() < 4 {
                    return Err("not enough account keys".into());
                }
                if keys[3] != system_program::id() {
                    return Err("invalid system program".into());
                }
                validate_create(&username, &bio, &links).map_err(|e| e.to_string())?;

                let (profile_pda, _) = derive_profile_pda(&self.program_id, &user);
                let (registry_pda, _) = derive_username_pda(&self.program_id, &username);
                if keys[1] != profile_pda || keys[2] != registry_pda {
                    return Err("A seeds constraint was violated".into());
                }
                // Lamports alone do not claim an address
                let in_use = |key: &Pubkey| {
                    accounts
                        .get(key)
                        .is_some_and(|a| !a.data.is_empty() || a.owner != system_program::id())
                };
                if in_use(&profile_pda) || in_use(&registry_pda) {
                    return Err("account already in use".into());
                }

                let mut registry_data = vec![0u8; UsernameRegistry::SPACE];
                UsernameRegistry {
                    owner: user.to_bytes(),
                }
                .store(&mut registry_data)
                .map_err(|e| format!("{e:?}"))?;

                let mut profile_data = vec![0u8; UserProfile::SPACE];
                UserProfile::new(user.to_bytes(), username, bio, links)
                    .store(&mut profile_data)
                    .map_err(|e| format!("{e:?}"))?;

                accounts.insert(registry_pda, self.program_account(registry_data));
                accounts.insert(profile_pda, self.program_account(profile_data));
                Ok(())
            },
            ProfileInstruction::UpdateProfile { bio, links } => {
                let profile_key = *keys.get(1).ok_or("not enough account keys")?;
                let (profile_pda, _) = derive_profile_pda(&self.program_id, &user);
                if profile_key != profile_pda {
                    return Err("A seeds constraint was violated".into());
                }
                let account = accounts
                    .get_mut(&profile_pda)
                    .ok_or("account not initialized")?;

                let mut profile = UserProfile::load(&account.data).map_err(|e| format!("{e:?}"))?;
                if profile.owner != user.to_bytes() {
                    return Err("Unauthorized".into());
                }
                profile.apply_update(bio, links).map_err(|e| e.to_string())?;
                profile
                    .store(&mut account.data)
                    .map_err(|e| format!("{e:?}"))
            },
        }
    }
}

#[async_trait]
impl SolConnection for MockLedger {
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, BoxError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        tx.verify().map_err(|e| format!("signature verification failed: {e}"))?;
        if tx.message.recent_blockhash != self.blockhash {
            return Err("Blockhash not found".into());
        }

        let keys = &tx.message.account_keys;
        let signers: Vec<bool> = (0..keys.len()).map(|i| tx.message.is_signer(i)).collect();

        // All-or-nothing: run against a copy and commit on success
        let mut accounts = self.accounts.lock().unwrap();
        let mut staged = accounts.clone();
        for ix in &tx.message.instructions {
            let program = keys[ix.program_id_index as usize];
            if program != self.program_id {
                return Err(format!("unknown program {program}").into());
            }
            let ix_keys: Vec<Pubkey> = ix.accounts.iter().map(|&i| keys[i as usize]).collect();
            let ix_signers: Vec<bool> = ix.accounts.iter().map(|&i| signers[i as usize]).collect();
            self.execute(&mut staged, &ix_keys, &ix_signers, &ix.data)?;
        }
        *accounts = staged;

        Ok(tx.signatures[0])
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, BoxError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok(self.accounts.lock().unwrap().get(pubkey).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, BoxError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok(self.blockhash)
    }
}

/// Pins nothing; hands out sequential gateway URLs.
#[derive(Default)]
pub struct MockPinner {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl MockPinner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvatarPinner for MockPinner {
    async fn pin(&self, file: &AvatarFile) -> Result<PinnedAvatar, UploadError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        file.validate()?;
        if self.fail.load(Ordering::SeqCst) {
            return Err(UploadError::Rejected("Invalid API key".into()));
        }
        let hash = format!("bafymock{n}");
        Ok(PinnedAvatar {
            url: format!("https://gateway.pinata.cloud/ipfs/{hash}"),
            hash,
        })
    }
}

/// Memory store with call counters and switchable write failures.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryAvatarStore,
    gets: AtomicUsize,
    puts: AtomicUsize,
    fail_puts: AtomicBool,
}

impl CountingStore {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn set_failing_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvatarStore for CountingStore {
    async fn get(&self, owner: &Pubkey, program_id: &Pubkey) -> gmbio_sdk::Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(owner, program_id).await
    }

    async fn put(
        &self,
        owner: &Pubkey,
        program_id: &Pubkey,
        url: &str,
    ) -> gmbio_sdk::Result<AvatarRecord> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(GmBioError::SideStore("database unavailable".into()));
        }
        self.inner.put(owner, program_id, url).await
    }
}

pub struct TestContext {
    pub ledger: Arc<MockLedger>,
    pub store: Arc<CountingStore>,
    pub pinner: Arc<MockPinner>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(MockLedger::new(gmbio_sdk::core::constants::DEFAULT_PROGRAM_ID)),
            store: Arc::new(CountingStore::default()),
            pinner: Arc::new(MockPinner::default()),
        }
    }

    pub fn controller(&self) -> ProfileController {
        ProfileController::new(
            self.ledger.clone(),
            self.store.clone(),
            self.pinner.clone(),
            self.ledger.program_id,
        )
    }

    pub fn client(&self) -> gmbio_sdk::GmBioClient {
        gmbio_sdk::GmBioClient::new(
            self.ledger.clone(),
            self.store.clone(),
            self.pinner.clone(),
            self.ledger.program_id,
        )
    }
}

pub fn png(bytes: usize) -> AvatarFile {
    AvatarFile::new("avatar.png", "image/png", vec![0x89; bytes])
}
