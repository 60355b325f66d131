use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Declare the vault contract class and deploy an instance for a pool.
    Deploy(DeployArgs),
    /// Deposit both pool tokens into a deployed vault.
    Deposit(DepositArgs),
    /// Move a vault's liquidity to a new price range.
    Rebalance(RebalanceArgs),
    /// Submit an off-chain harvest payload to a vault.
    Harvest(HarvestArgs),
    /// Declare a new vault class and point a deployed vault at it.
    Upgrade(UpgradeArgs),
    /// Show share balance and total supply for a vault.
    Status(StatusArgs),
}

#[derive(clap::Args, Debug)]
pub struct DeployArgs {
    #[arg(long, default_value = constants::XSTRK, help = "First pool token address. The pair is sorted canonically before use.\n")]
    pub token0: String,

    #[arg(long, default_value = constants::STRK, help = "Second pool token address.\n")]
    pub token1: String,

    #[arg(
        long,
        default_value_t = 34028236692093847977029636859101184,
        help = "Pool fee as a 128-bit fixed-point fraction.\n"
    )]
    pub fee: u128,

    #[arg(long, default_value_t = 200, help = "Pool tick spacing.\n")]
    pub tick_spacing: u32,

    #[arg(long, help = "Lower bound of the position range, token1 per token0.\n")]
    pub min_price: f64,

    #[arg(long, help = "Upper bound of the position range, token1 per token0.\n")]
    pub max_price: f64,

    #[arg(long, default_value_t = 18)]
    pub token0_decimals: u8,

    #[arg(long, default_value_t = 18)]
    pub token1_decimals: u8,

    #[arg(long, help = "Vault share token name.\n")]
    pub name: String,

    #[arg(long, help = "Vault share token symbol.\n")]
    pub symbol: String,

    #[arg(long, default_value_t = 1000, help = "Performance fee in basis points.\n")]
    pub fee_bps: u64,

    #[arg(long, default_value = constants::DEFAULT_FEE_COLLECTOR, help = "Performance fee recipient.\n")]
    pub fee_collector: String,

    #[arg(long, help = "Access control contract governing the vault.\n")]
    pub access_control: String,

    #[arg(long, help = "Price oracle contract the vault reads.\n")]
    pub oracle: String,

    #[arg(long, default_value = constants::EKUBO_POSITIONS)]
    pub positions: String,

    #[arg(long, default_value = constants::EKUBO_POSITIONS_NFT)]
    pub positions_nft: String,

    #[arg(long, default_value = constants::EKUBO_CORE)]
    pub core: String,

    #[arg(
        long,
        default_value_t = 1_000_000_000_000_000_000,
        help = "Initial token0 amount (wei) anchoring the share price.\n"
    )]
    pub init0: u128,

    #[arg(long, default_value_t = 1_000_000_000_000_000_000)]
    pub init1: u128,

    #[arg(
        long,
        default_value = "target/dev/cl_vault_ConcLiquidityVault.contract_class.json",
        help = "Path to the Sierra class artifact.\n"
    )]
    pub sierra_path: PathBuf,

    #[arg(
        long,
        default_value = "target/dev/cl_vault_ConcLiquidityVault.compiled_contract_class.json",
        help = "Path to the compiled (CASM) class artifact.\n"
    )]
    pub casm_path: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct DepositArgs {
    #[arg(long, help = "Deployed vault address.\n")]
    pub vault: String,

    #[arg(long, default_value = constants::XSTRK)]
    pub token0: String,

    #[arg(long, default_value = constants::STRK)]
    pub token1: String,

    #[arg(long, help = "token0 amount in wei.\n")]
    pub amount0: u128,

    #[arg(long, help = "token1 amount in wei.\n")]
    pub amount1: u128,

    #[arg(long, help = "Share recipient. Defaults to the operator account.\n")]
    pub receiver: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RebalanceArgs {
    #[arg(long, help = "Deployed vault address.\n")]
    pub vault: String,

    #[arg(long, help = "New lower price, token1 per token0. Rounded down to the grid.\n")]
    pub min_price: f64,

    #[arg(long, help = "New upper price, token1 per token0. Rounded up to the grid.\n")]
    pub max_price: f64,

    #[arg(long, default_value_t = 200, help = "Pool tick spacing.\n")]
    pub tick_spacing: u32,

    #[arg(long, default_value_t = 18)]
    pub token0_decimals: u8,

    #[arg(long, default_value_t = 18)]
    pub token1_decimals: u8,

    #[arg(long, default_value = constants::XSTRK, help = "Token sold to rebalance inventory.\n")]
    pub token_from: String,

    #[arg(long, default_value = constants::STRK, help = "Token bought to rebalance inventory.\n")]
    pub token_to: String,

    #[arg(long, default_value_t = 0, help = "Amount of token_from to swap, in wei.\n")]
    pub swap_amount: u128,

    #[arg(long, default_value_t = 0, help = "Minimum token_to received, in wei.\n")]
    pub min_received: u128,

    #[arg(
        long,
        help = "JSON file with the pre-encoded route span from the routing service. Omit for an empty route.\n"
    )]
    pub swap_file: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct HarvestArgs {
    #[arg(long, help = "Deployed vault address.\n")]
    pub vault: String,

    #[arg(
        long,
        help = "JSON file with the pre-encoded claim proof and swap data from the rewards service.\n"
    )]
    pub payload_file: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct UpgradeArgs {
    #[arg(long, help = "Deployed vault address.\n")]
    pub vault: String,

    #[arg(
        long,
        default_value = "target/dev/cl_vault_ConcLiquidityVault.contract_class.json",
        help = "Path to the new Sierra class artifact.\n"
    )]
    pub sierra_path: PathBuf,

    #[arg(
        long,
        default_value = "target/dev/cl_vault_ConcLiquidityVault.compiled_contract_class.json",
        help = "Path to the new compiled (CASM) class artifact.\n"
    )]
    pub casm_path: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    #[arg(long, help = "Deployed vault address.\n")]
    pub vault: String,

    #[arg(long, help = "Account to report shares for. Defaults to the operator account.\n")]
    pub account: Option<String>,
}
