use starknet::core::types::Felt;
use std::env;
use std::error::Error;

/// Operator environment, loaded once at startup from the process environment
/// (a `.env` file is read beforehand if present).
pub struct Config {
    pub rpc_url: String,
    pub account_address: Felt,
    pub private_key: Felt,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let rpc_url = env::var("STARKNET_RPC_URL").map_err(|_| "STARKNET_RPC_URL must be set")?;
        let account_address = env::var("ACCOUNT_ADDRESS")
            .map_err(|_| "ACCOUNT_ADDRESS must be set")
            .and_then(|v| Felt::from_hex(&v).map_err(|_| "ACCOUNT_ADDRESS is not a valid address"))?;
        let private_key = env::var("ACCOUNT_PRIVATE_KEY")
            .map_err(|_| "ACCOUNT_PRIVATE_KEY must be set")
            .and_then(|v| Felt::from_hex(&v).map_err(|_| "ACCOUNT_PRIVATE_KEY is not a valid key"))?;
        Ok(Config {
            rpc_url,
            account_address,
            private_key,
        })
    }
}
