//! Transaction assembly for a single profile instruction.

use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use tracing::{debug, info};

use crate::core::connection::SolConnection;
use crate::core::signer::ProfileSigner;
use crate::error::{GmBioError, Result};

/// Builds, signs and sends a one-instruction transaction paid by the signer.
pub struct TransactionBuilder<'a> {
    connection: &'a dyn SolConnection,
    signer: &'a dyn ProfileSigner,
    instructions: Vec<Instruction>,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(connection: &'a dyn SolConnection, signer: &'a dyn ProfileSigner) -> Self {
        Self {
            connection,
            signer,
            instructions: Vec::new(),
        }
    }

    pub fn with_instruction(mut self, ix: Instruction) -> Self {
        self.instructions.push(ix);
        self
    }

    /// Unsigned transaction with a fresh blockhash
    pub async fn build_transaction(&self) -> Result<Transaction> {
        let payer = self.signer.pubkey();
        let mut tx = Transaction::new_unsigned(Message::new(&self.instructions, Some(&payer)));
        tx.message.recent_blockhash = self
            .connection
            .get_latest_blockhash()
            .await
            .map_err(|e| GmBioError::Connection(e.to_string()))?;
        Ok(tx)
    }

    pub async fn sign(&self, mut tx: Transaction) -> Result<Transaction> {
        let signature = self
            .signer
            .sign_message(&tx.message_data())
            .await
            .map_err(GmBioError::Signing)?;
        match tx.signatures.first_mut() {
            Some(slot) => *slot = signature,
            None => return Err(GmBioError::Signing("transaction has no signer slot".into())),
        }
        Ok(tx)
    }

    /// Build, sign and send; returns once the connection reports confirmation.
    pub async fn send(self) -> Result<Signature> {
        if self.instructions.is_empty() {
            return Err(GmBioError::Transaction("no instructions to send".into()));
        }
        let tx = self.build_transaction().await?;
        let tx = self.sign(tx).await?;
        debug!(payer = %self.signer.pubkey(), "Sending transaction");

        let signature = self
            .connection
            .send_transaction(&tx)
            .await
            .map_err(|e| GmBioError::Transaction(e.to_string()))?;
        info!(%signature, "Transaction confirmed");
        Ok(signature)
    }
}
