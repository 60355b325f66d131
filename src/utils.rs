use colored::Colorize;
use starknet::core::types::{BlockId, BlockTag, ExecutionResult, Felt, FunctionCall};
use starknet::providers::jsonrpc::HttpTransport;
use starknet::providers::{JsonRpcClient, Provider, Url};
use std::error::Error;
use std::fs;
use std::path::Path;
use tokio::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;

pub fn rpc_client(rpc_url: &str) -> Result<JsonRpcClient<HttpTransport>, Box<dyn Error>> {
    let url = Url::parse(rpc_url).map_err(|_| "STARKNET_RPC_URL is not a valid URL")?;
    Ok(JsonRpcClient::new(HttpTransport::new(url)))
}

/// Parse a CLI-supplied address or felt, accepting hex with a `0x` prefix.
pub fn parse_felt(value: &str) -> Result<Felt, Box<dyn Error>> {
    Felt::from_hex(value).map_err(|_| format!("invalid address or felt: {value}").into())
}

/// Poll for a transaction receipt until the node has one, then check the
/// execution result. Receipts for a just-submitted hash are routinely not
/// found for a few seconds, so lookups retry with backoff; a reverted
/// execution is terminal and surfaces the revert reason.
pub async fn wait_for_transaction(
    provider: &JsonRpcClient<HttpTransport>,
    tx_hash: Felt,
) -> Result<(), Box<dyn Error>> {
    println!("Waiting for transaction {tx_hash:#x}");
    let receipt = Retry::spawn(
        ExponentialBackoff::from_millis(500)
            .max_delay(Duration::from_secs(5))
            .take(60),
        || async { provider.get_transaction_receipt(tx_hash).await },
    )
    .await?;

    match receipt.receipt.execution_result() {
        ExecutionResult::Succeeded => {
            println!("{}", "Transaction accepted.".green());
            Ok(())
        }
        ExecutionResult::Reverted { reason } => {
            Err(format!("transaction {tx_hash:#x} reverted: {reason}").into())
        }
    }
}

/// Read-only contract call against the pending block.
pub async fn call_contract(
    provider: &JsonRpcClient<HttpTransport>,
    contract_address: Felt,
    entry_point_selector: Felt,
    calldata: Vec<Felt>,
) -> Result<Vec<Felt>, Box<dyn Error>> {
    let result = provider
        .call(
            FunctionCall {
                contract_address,
                entry_point_selector,
                calldata,
            },
            BlockId::Tag(BlockTag::Pending),
        )
        .await?;
    Ok(result)
}

/// Load a JSON array of hex felts, e.g. a pre-encoded route span or harvest
/// payload produced by an off-chain service.
pub fn read_payload_file(path: &Path) -> Result<Vec<Felt>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let words: Vec<String> = serde_json::from_str(&raw)?;
    words.iter().map(|w| parse_felt(w)).collect()
}

/// Interpret a two-word `u256` return value. Amounts past 2^128 never occur
/// for token quantities, so a populated high limb is treated as an error.
pub fn u256_from_words(words: &[Felt]) -> Result<u128, Box<dyn Error>> {
    if words.len() < 2 {
        return Err("expected a u256 (two felts) in the call result".into());
    }
    if words[1] != Felt::ZERO {
        return Err("u256 value exceeds 128 bits".into());
    }
    felt_to_u128(words[0])
}

pub fn felt_to_u128(value: Felt) -> Result<u128, Box<dyn Error>> {
    let bytes = value.to_bytes_be();
    if bytes[..16].iter().any(|b| *b != 0) {
        return Err("felt value exceeds 128 bits".into());
    }
    Ok(u128::from_be_bytes(bytes[16..].try_into()?))
}

/// Scale a wei amount into display units.
pub fn format_units(amount: u128, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}
