//! Declare-and-deploy flow for the vault contract. Each step blocks on the
//! previous transaction's acceptance before continuing; any failure aborts
//! the whole flow.

use colored::Colorize;
use starknet::accounts::Account;
use starknet::contract::ContractFactory;
use starknet::core::types::contract::{CompiledClass, SierraClass};
use starknet::core::types::{BlockId, BlockTag, Felt, StarknetError};
use starknet::providers::jsonrpc::HttpTransport;
use starknet::providers::{JsonRpcClient, Provider, ProviderError};
use starknet::signers::SigningKey;
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::cli::{DeployArgs, UpgradeArgs};
use crate::config::Config;
use crate::tick_math::{price_to_tick, sort_tokens, Bounds, PoolKey};
use crate::utils::{parse_felt, rpc_client, wait_for_transaction};
use crate::vault::{build_upgrade_call, FeeSettings, InitValues, ManagedPool, VaultParams};
use crate::wallet::{load_account, OpsAccount};

pub async fn run_deploy(config: &Config, args: &DeployArgs) -> Result<(), Box<dyn Error>> {
    let (token0, token1) = sort_tokens(parse_felt(&args.token0)?, parse_felt(&args.token1)?);
    println!("token0: {token0:#x}");
    println!("token1: {token1:#x}");

    let pool_key = PoolKey::new(token0, token1, args.fee, args.tick_spacing, Felt::ZERO);
    let lower = price_to_tick(
        args.min_price,
        true,
        args.tick_spacing,
        args.token0_decimals,
        args.token1_decimals,
    )?;
    let upper = price_to_tick(
        args.max_price,
        false,
        args.tick_spacing,
        args.token0_decimals,
        args.token1_decimals,
    )?;
    let bounds = Bounds::new(lower, upper);
    if !bounds.is_ordered() {
        return Err("lower bound exceeds upper bound; check the price range".into());
    }
    println!(
        "bounds: [{}, {}] (tick spacing {})",
        lower.index(),
        upper.index(),
        args.tick_spacing
    );

    let params = VaultParams {
        name: args.name.clone(),
        symbol: args.symbol.clone(),
        access_control: parse_felt(&args.access_control)?,
        positions: parse_felt(&args.positions)?,
        positions_nft: parse_felt(&args.positions_nft)?,
        core: parse_felt(&args.core)?,
        oracle: parse_felt(&args.oracle)?,
        fee_settings: FeeSettings {
            fee_bps: args.fee_bps,
            collector: parse_felt(&args.fee_collector)?,
        },
        init_values: InitValues {
            init0: args.init0,
            init1: args.init1,
        },
        managed_pools: vec![ManagedPool::new(pool_key, bounds)],
    };

    let provider = rpc_client(&config.rpc_url)?;
    let account = load_account(provider.clone(), config).await?;

    let class_hash = declare_class(&provider, &account, &args.sierra_path, &args.casm_path).await?;
    println!("class hash: {class_hash:#x}");

    let factory = ContractFactory::new(class_hash, account);
    let salt = SigningKey::from_random().secret_scalar();
    let deployment = factory.deploy_v3(params.constructor_calldata(), salt, false);
    let deployed_address = deployment.deployed_address();
    let result = deployment.send().await?;
    println!("Deploy tx: {:#x}", result.transaction_hash);
    wait_for_transaction(&provider, result.transaction_hash).await?;

    println!(
        "{}",
        format!("Vault deployed at {deployed_address:#x}").green()
    );
    Ok(())
}

/// Replace a deployed vault's implementation: declare the new class, then
/// invoke `upgrade` with its hash. Timelock scheduling stays with the
/// governance tooling; this submits the direct call.
pub async fn run_upgrade(config: &Config, args: &UpgradeArgs) -> Result<(), Box<dyn Error>> {
    let vault = parse_felt(&args.vault)?;
    let provider = rpc_client(&config.rpc_url)?;
    let account = load_account(provider.clone(), config).await?;

    let class_hash = declare_class(&provider, &account, &args.sierra_path, &args.casm_path).await?;
    println!("class hash: {class_hash:#x}");

    let call = build_upgrade_call(vault, class_hash);
    let result = account.execute_v3(vec![call]).send().await?;
    println!("Upgrade tx: {:#x}", result.transaction_hash);
    wait_for_transaction(&provider, result.transaction_hash).await?;
    println!("{}", "Upgrade done.".green());
    Ok(())
}

/// Declare the vault class from its on-disk artifacts, skipping the
/// transaction when the node already knows the class hash.
async fn declare_class(
    provider: &JsonRpcClient<HttpTransport>,
    account: &OpsAccount,
    sierra_path: &Path,
    casm_path: &Path,
) -> Result<Felt, Box<dyn Error>> {
    let sierra: SierraClass = serde_json::from_reader(File::open(sierra_path)?)?;
    let class_hash = sierra.class_hash()?;

    match provider
        .get_class(BlockId::Tag(BlockTag::Pending), class_hash)
        .await
    {
        Ok(_) => {
            println!("Class {class_hash:#x} already declared, skipping declaration.");
            return Ok(class_hash);
        }
        Err(ProviderError::StarknetError(StarknetError::ClassHashNotFound)) => {}
        Err(err) => return Err(err.into()),
    }

    let casm: CompiledClass = serde_json::from_reader(File::open(casm_path)?)?;
    let compiled_class_hash = casm.class_hash()?;

    let result = account
        .declare_v3(Arc::new(sierra.flatten()?), compiled_class_hash)
        .send()
        .await?;
    println!("Declare tx: {:#x}", result.transaction_hash);
    wait_for_transaction(provider, result.transaction_hash).await?;
    Ok(class_hash)
}
