//! Lifecycle actions against an already-deployed vault: deposit, rebalance,
//! harvest and a read-only status report.

use colored::Colorize;
use starknet::accounts::Account;
use starknet::macros::selector;
use std::error::Error;

use crate::cli::{DepositArgs, HarvestArgs, RebalanceArgs, StatusArgs};
use crate::config::Config;
use crate::tick_math::{price_to_tick, Bounds};
use crate::utils::{
    call_contract, format_units, parse_felt, read_payload_file, rpc_client, u256_from_words,
    wait_for_transaction,
};
use crate::vault::{
    build_deposit_calls, build_harvest_call, build_rebalance_call, decode_managed_pools, SwapParams,
};
use crate::wallet::load_account;

pub async fn run_deposit(config: &Config, args: &DepositArgs) -> Result<(), Box<dyn Error>> {
    let vault = parse_felt(&args.vault)?;
    let token0 = parse_felt(&args.token0)?;
    let token1 = parse_felt(&args.token1)?;
    let receiver = match &args.receiver {
        Some(addr) => parse_felt(addr)?,
        None => config.account_address,
    };

    let calls = build_deposit_calls(vault, token0, token1, args.amount0, args.amount1, receiver);
    println!(
        "Depositing {} token0 wei and {} token1 wei for {receiver:#x}",
        args.amount0, args.amount1
    );

    let provider = rpc_client(&config.rpc_url)?;
    let account = load_account(provider.clone(), config).await?;
    let result = account.execute_v3(calls).send().await?;
    println!("Deposit tx: {:#x}", result.transaction_hash);
    wait_for_transaction(&provider, result.transaction_hash).await?;
    println!("{}", "Deposit done.".green());
    Ok(())
}

pub async fn run_rebalance(config: &Config, args: &RebalanceArgs) -> Result<(), Box<dyn Error>> {
    let vault = parse_felt(&args.vault)?;

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
    println!("New bounds: [{}, {}]", lower.index(), upper.index());

    let mut swap = SwapParams::new(
        parse_felt(&args.token_from)?,
        parse_felt(&args.token_to)?,
        vault,
    );
    swap.amount = args.swap_amount;
    swap.min_received = args.min_received;
    if let Some(path) = &args.swap_file {
        swap.routes = read_payload_file(path)?;
        println!("Loaded {} route words from {}", swap.routes.len(), path.display());
    }

    let call = build_rebalance_call(vault, &bounds, &swap);
    let provider = rpc_client(&config.rpc_url)?;
    let account = load_account(provider.clone(), config).await?;
    let result = account.execute_v3(vec![call]).send().await?;
    println!("Rebalance tx: {:#x}", result.transaction_hash);
    wait_for_transaction(&provider, result.transaction_hash).await?;
    println!("{}", "Rebalance done.".green());
    Ok(())
}

pub async fn run_harvest(config: &Config, args: &HarvestArgs) -> Result<(), Box<dyn Error>> {
    let vault = parse_felt(&args.vault)?;
    let Some(path) = &args.payload_file else {
        println!("{}", "No harvest payload provided; nothing to harvest.".yellow());
        return Ok(());
    };

    let payload = read_payload_file(path)?;
    println!("Submitting harvest payload ({} words)", payload.len());

    let call = build_harvest_call(vault, payload);
    let provider = rpc_client(&config.rpc_url)?;
    let account = load_account(provider.clone(), config).await?;
    let result = account.execute_v3(vec![call]).send().await?;
    println!("Harvest tx: {:#x}", result.transaction_hash);
    wait_for_transaction(&provider, result.transaction_hash).await?;
    println!("{}", "Harvest done.".green());
    Ok(())
}

pub async fn run_status(config: &Config, args: &StatusArgs) -> Result<(), Box<dyn Error>> {
    let vault = parse_felt(&args.vault)?;
    let holder = match &args.account {
        Some(addr) => parse_felt(addr)?,
        None => config.account_address,
    };

    let provider = rpc_client(&config.rpc_url)?;
    let shares = u256_from_words(
        &call_contract(&provider, vault, selector!("balance_of"), vec![holder]).await?,
    )?;
    let supply =
        u256_from_words(&call_contract(&provider, vault, selector!("total_supply"), vec![]).await?)?;

    println!(
        "Vault {vault:#x}\n\
        - Shares held by {holder:#x}: {}\n\
        - Total supply: {}",
        format_units(shares, 18),
        format_units(supply, 18)
    );
    if supply > 0 {
        println!("- Share of vault: {:.4}%", shares as f64 / supply as f64 * 100.0);
    }

    let pools = decode_managed_pools(
        &call_contract(&provider, vault, selector!("get_managed_pools"), vec![]).await?,
    )?;
    for pool in &pools {
        println!(
            "- Pool {:#x} / {:#x}: bounds [{}, {}], position nft {}",
            pool.pool_key.token0,
            pool.pool_key.token1,
            pool.bounds.lower.index(),
            pool.bounds.upper.index(),
            pool.nft_id
        );
    }
    Ok(())
}
