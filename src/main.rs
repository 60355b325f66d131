mod actions;
mod calldata;
mod cli;
mod config;
mod constants;
mod deploy;
mod tick_math;
mod utils;
mod vault;
mod wallet;

use clap::Parser;
use cli::{Args, Command};
use colored::Colorize;
use config::Config;
use dotenv::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let args = Args::parse();

    println!(
        "\n\
        =====================\n\
        🌊 CL Vault Operations\n\
        =====================\n"
    );

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", format!("Error: {}", err).red());
            std::process::exit(1);
        }
    };

    let result = match &args.command {
        Command::Deploy(deploy_args) => deploy::run_deploy(&config, deploy_args).await,
        Command::Deposit(deposit_args) => actions::run_deposit(&config, deposit_args).await,
        Command::Rebalance(rebalance_args) => actions::run_rebalance(&config, rebalance_args).await,
        Command::Harvest(harvest_args) => actions::run_harvest(&config, harvest_args).await,
        Command::Upgrade(upgrade_args) => deploy::run_upgrade(&config, upgrade_args).await,
        Command::Status(status_args) => actions::run_status(&config, status_args).await,
    };

    if let Err(err) = result {
        eprintln!("{}", format!("Error: {}", err).red());
        std::process::exit(1);
    }
}
