use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::error::Error;

#[async_trait]
pub trait SolConnection: Send + Sync {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>>;
    /// `Ok(None)` means the account does not exist.
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>>;
    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>>;
}

/// JSON-RPC backed connection. Transactions are confirmed before returning.
pub struct RpcConnection {
    client: RpcClient,
}

impl RpcConnection {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.into(), CommitmentConfig::confirmed()),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl SolConnection for RpcConnection {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>> {
        Ok(self.client.send_and_confirm_transaction(tx).await?)
    }

    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .get_account_with_commitment(pubkey, self.client.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, Box<dyn Error + Send + Sync>> {
        Ok(self.client.get_latest_blockhash().await?)
    }
}
