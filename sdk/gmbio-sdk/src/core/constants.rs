use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

// Default Program ID (Devnet)
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("7EiXfcfkDh4eQWTWhrUNydZroe6sQiZzxryfbSwS1ddf");

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

pub const DEFAULT_SIDE_STORE_URL: &str = "http://127.0.0.1:8787";

pub const DEFAULT_APP_URL: &str = "https://gm.bio";

pub const PINATA_PIN_FILE_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

pub const DEFAULT_PINATA_GATEWAY: &str = "https://gateway.pinata.cloud";
