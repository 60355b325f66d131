use starknet::accounts::{ExecutionEncoding, SingleOwnerAccount};
use starknet::core::types::{BlockId, BlockTag};
use starknet::providers::jsonrpc::HttpTransport;
use starknet::providers::{JsonRpcClient, Provider};
use starknet::signers::{LocalWallet, SigningKey};
use std::error::Error;

use crate::config::Config;

pub type OpsAccount = SingleOwnerAccount<JsonRpcClient<HttpTransport>, LocalWallet>;

/// Build the signing account on the shared RPC handle. The chain id is taken
/// from the connected node so the same binary works against mainnet, testnet
/// or a devnet fork.
pub async fn load_account(
    provider: JsonRpcClient<HttpTransport>,
    config: &Config,
) -> Result<OpsAccount, Box<dyn Error>> {
    let chain_id = provider.chain_id().await?;
    let signer = LocalWallet::from(SigningKey::from_secret_scalar(config.private_key));
    let mut account = SingleOwnerAccount::new(
        provider,
        signer,
        config.account_address,
        chain_id,
        ExecutionEncoding::New,
    );
    account.set_block_id(BlockId::Tag(BlockTag::Pending));
    Ok(account)
}
