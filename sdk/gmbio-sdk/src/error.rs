use thiserror::Error;

use crate::upload::UploadError;

/// SDK-specific error types for gm.bio operations
#[derive(Debug, Error)]
pub enum GmBioError {
    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Instruction encoding failed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A write was attempted without a connected wallet
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Form state failed local validation; nothing was sent
    #[error("Invalid profile form: {0}")]
    Validation(String),

    /// The wallet refused or failed to sign
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The transaction was rejected or could not be confirmed
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Avatar pinning failed
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Avatar side-store request failed
    #[error("Side-store error: {0}")]
    SideStore(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, GmBioError>;
