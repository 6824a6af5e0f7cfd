use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};

/// Abstraction for the connected wallet.
/// This allows the SDK to work with:
/// 1. Local Keypairs (Backend/CLI/tests)
/// 2. Wallet Adapters (Frontend - the wallet signs the serialized message)
#[async_trait]
pub trait ProfileSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign a serialized transaction message.
    /// Returns Err if the wallet declined or failed.
    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String>;
}

#[async_trait]
impl ProfileSigner for Keypair {
    fn pubkey(&self) -> Pubkey {
        Signer::pubkey(self)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String> {
        Signer::try_sign_message(self, message).map_err(|e| e.to_string())
    }
}
