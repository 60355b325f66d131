//! Value objects passed to the vault contract's constructor and entrypoints,
//! plus the pure call builders the lifecycle commands submit. Everything here
//! is assembled locally and handed to the chain once; nothing is persisted.

use starknet::core::types::{Call, Felt};
use starknet::macros::selector;
use std::error::Error;

use crate::calldata::{
    serialize_bounds, serialize_byte_array, serialize_pool_key, serialize_span, serialize_u256,
};
use crate::tick_math::{Bounds, PoolKey, Tick};
use crate::utils::felt_to_u128;

/// Performance fee configuration: fee in basis points plus its recipient.
#[derive(Debug, Clone)]
pub struct FeeSettings {
    pub fee_bps: u64,
    pub collector: Felt,
}

/// Seed amounts (in wei) used to anchor the initial share price.
#[derive(Debug, Clone, Copy)]
pub struct InitValues {
    pub init0: u128,
    pub init1: u128,
}

/// A vault-managed position: pool key, active bounds and the position NFT id.
/// `nft_id` starts at zero and is populated by the contract once the position
/// is minted on-chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedPool {
    pub pool_key: PoolKey,
    pub bounds: Bounds,
    pub nft_id: u64,
}

impl ManagedPool {
    pub fn new(pool_key: PoolKey, bounds: Bounds) -> Self {
        ManagedPool {
            pool_key,
            bounds,
            nft_id: 0,
        }
    }

    fn serialize(&self, out: &mut Vec<Felt>) {
        serialize_pool_key(out, &self.pool_key);
        serialize_bounds(out, &self.bounds);
        out.push(Felt::from(self.nft_id));
    }
}

/// Full constructor argument set for a vault deployment.
#[derive(Debug, Clone)]
pub struct VaultParams {
    pub name: String,
    pub symbol: String,
    pub access_control: Felt,
    pub positions: Felt,
    pub positions_nft: Felt,
    pub core: Felt,
    pub oracle: Felt,
    pub fee_settings: FeeSettings,
    pub init_values: InitValues,
    pub managed_pools: Vec<ManagedPool>,
}

impl VaultParams {
    /// Lower the parameter set to the constructor calldata vector, in the
    /// order the contract declares its arguments.
    pub fn constructor_calldata(&self) -> Vec<Felt> {
        let mut out = vec![];
        serialize_byte_array(&mut out, &self.name);
        serialize_byte_array(&mut out, &self.symbol);
        out.push(self.access_control);
        out.push(self.positions);
        out.push(self.positions_nft);
        out.push(self.core);
        out.push(self.oracle);
        serialize_u256(&mut out, self.fee_settings.fee_bps as u128);
        out.push(self.fee_settings.collector);
        serialize_u256(&mut out, self.init_values.init0);
        serialize_u256(&mut out, self.init_values.init1);

        let mut pools = vec![];
        for pool in &self.managed_pools {
            pool.serialize(&mut pools);
        }
        serialize_span(&mut out, self.managed_pools.len(), &pools);
        out
    }
}

/// Swap parameters forwarded to the vault's rebalance entrypoint. Route
/// discovery lives in an external routing service; `routes` carries its
/// pre-encoded output (a serialized span, length word included) and defaults
/// to the empty span.
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub token_from: Felt,
    pub token_to: Felt,
    pub amount: u128,
    pub min_received: u128,
    pub beneficiary: Felt,
    pub routes: Vec<Felt>,
}

impl SwapParams {
    pub fn new(token_from: Felt, token_to: Felt, beneficiary: Felt) -> Self {
        SwapParams {
            token_from,
            token_to,
            amount: 0,
            min_received: 0,
            beneficiary,
            routes: vec![Felt::ZERO],
        }
    }

    fn serialize(&self, out: &mut Vec<Felt>) {
        out.push(self.token_from);
        serialize_u256(out, self.amount);
        out.push(self.token_to);
        serialize_u256(out, self.min_received);
        out.push(self.beneficiary);
        out.extend_from_slice(&self.routes);
    }
}

/// Build the approve + deposit multicall for a two-token deposit.
pub fn build_deposit_calls(
    vault: Felt,
    token0: Felt,
    token1: Felt,
    amount0: u128,
    amount1: u128,
    receiver: Felt,
) -> Vec<Call> {
    let mut deposit_calldata = vec![];
    serialize_u256(&mut deposit_calldata, amount0);
    serialize_u256(&mut deposit_calldata, amount1);
    deposit_calldata.push(receiver);

    vec![
        build_approve_call(token0, vault, amount0),
        build_approve_call(token1, vault, amount1),
        Call {
            to: vault,
            selector: selector!("deposit"),
            calldata: deposit_calldata,
        },
    ]
}

fn build_approve_call(token: Felt, spender: Felt, amount: u128) -> Call {
    let mut calldata = vec![spender];
    serialize_u256(&mut calldata, amount);
    Call {
        to: token,
        selector: selector!("approve"),
        calldata,
    }
}

/// Build the rebalance call: new bounds followed by the swap parameters.
pub fn build_rebalance_call(vault: Felt, bounds: &Bounds, swap: &SwapParams) -> Call {
    let mut calldata = vec![];
    serialize_bounds(&mut calldata, bounds);
    swap.serialize(&mut calldata);
    Call {
        to: vault,
        selector: selector!("rebalance"),
        calldata,
    }
}

/// Build the harvest call from a pre-encoded payload (claim proof and swap
/// data produced by the off-chain rewards service).
pub fn build_harvest_call(vault: Felt, payload: Vec<Felt>) -> Call {
    Call {
        to: vault,
        selector: selector!("harvest"),
        calldata: payload,
    }
}

/// Build the upgrade call pointing the vault at a newly declared class.
pub fn build_upgrade_call(vault: Felt, class_hash: Felt) -> Call {
    Call {
        to: vault,
        selector: selector!("upgrade"),
        calldata: vec![class_hash],
    }
}

fn decode_tick(mag: Felt, sign: Felt) -> Result<Tick, Box<dyn Error>> {
    let mag: u32 = felt_to_u128(mag)?
        .try_into()
        .map_err(|_| "tick magnitude exceeds 32 bits")?;
    let sign = if sign == Felt::ZERO {
        false
    } else if sign == Felt::ONE {
        true
    } else {
        return Err("tick sign flag must be 0 or 1".into());
    };
    Ok(Tick::from_parts(mag, sign))
}

/// Decode the length-prefixed managed-pool span returned by the vault's
/// `get_managed_pools` view. Inverse of [`ManagedPool::serialize`].
pub fn decode_managed_pools(words: &[Felt]) -> Result<Vec<ManagedPool>, Box<dyn Error>> {
    // pool key (5) + bounds (4) + nft id (1)
    const POOL_WORDS: usize = 10;

    let count = felt_to_u128(*words.first().ok_or("empty managed pool data")?)? as usize;
    let body = &words[1..];
    if body.len() != count * POOL_WORDS {
        return Err("truncated managed pool data".into());
    }

    let mut pools = Vec::with_capacity(count);
    for chunk in body.chunks_exact(POOL_WORDS) {
        let fee = felt_to_u128(chunk[2])?;
        let tick_spacing: u32 = felt_to_u128(chunk[3])?
            .try_into()
            .map_err(|_| "tick spacing exceeds 32 bits")?;
        let pool_key = PoolKey::new(chunk[0], chunk[1], fee, tick_spacing, chunk[4]);
        let bounds = Bounds::new(
            decode_tick(chunk[5], chunk[6])?,
            decode_tick(chunk[7], chunk[8])?,
        );
        let nft_id: u64 = felt_to_u128(chunk[9])?
            .try_into()
            .map_err(|_| "nft id exceeds 64 bits")?;
        pools.push(ManagedPool {
            pool_key,
            bounds,
            nft_id,
        });
    }
    Ok(pools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick_math::{PoolKey, Tick};

    fn sample_pool() -> ManagedPool {
        let key = PoolKey::new(
            Felt::from_hex_unchecked("0x123"),
            Felt::from_hex_unchecked("0x456"),
            34_028_236_692_093_847_977_029_636_859_101_184,
            200,
            Felt::ZERO,
        );
        let bounds = Bounds::new(Tick::new(-600), Tick::new(800));
        ManagedPool::new(key, bounds)
    }

    #[test]
    fn test_managed_pool_layout() {
        let mut out = vec![];
        sample_pool().serialize(&mut out);
        // pool key (5) + bounds (4) + nft id (1)
        assert_eq!(out.len(), 10);
        assert_eq!(out[5], Felt::from(600u32));
        assert_eq!(out[6], Felt::ONE);
        assert_eq!(out[7], Felt::from(800u32));
        assert_eq!(out[8], Felt::ZERO);
        assert_eq!(out[9], Felt::ZERO);
    }

    #[test]
    fn test_constructor_calldata_shape() {
        let params = VaultParams {
            name: "Ekubo xSTRK/STRK".to_string(),
            symbol: "exSTRK".to_string(),
            access_control: Felt::from_hex_unchecked("0x1"),
            positions: Felt::from_hex_unchecked("0x2"),
            positions_nft: Felt::from_hex_unchecked("0x3"),
            core: Felt::from_hex_unchecked("0x4"),
            oracle: Felt::from_hex_unchecked("0x5"),
            fee_settings: FeeSettings {
                fee_bps: 1000,
                collector: Felt::from_hex_unchecked("0x6"),
            },
            init_values: InitValues {
                init0: 1_000_000_000_000_000_000,
                init1: 1_000_000_000_000_000_000,
            },
            managed_pools: vec![sample_pool()],
        };
        let calldata = params.constructor_calldata();
        // Two short byte arrays (3 each), five addresses, fee settings (3),
        // init values (4), then a length-prefixed pool span (1 + 10).
        assert_eq!(calldata.len(), 3 + 3 + 5 + 3 + 4 + 1 + 10);
        // Span length prefix sits right before the serialized pool.
        assert_eq!(calldata[18], Felt::ONE);
    }

    #[test]
    fn test_deposit_multicall() {
        let vault = Felt::from_hex_unchecked("0xa0");
        let token0 = Felt::from_hex_unchecked("0x111");
        let token1 = Felt::from_hex_unchecked("0x222");
        let receiver = Felt::from_hex_unchecked("0x333");
        let calls = build_deposit_calls(vault, token0, token1, 5, 7, receiver);
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].to, token0);
        assert_eq!(calls[0].calldata, vec![vault, Felt::from(5u8), Felt::ZERO]);
        assert_eq!(calls[1].to, token1);
        assert_eq!(calls[1].calldata, vec![vault, Felt::from(7u8), Felt::ZERO]);
        assert_eq!(calls[2].to, vault);
        assert_eq!(
            calls[2].calldata,
            vec![
                Felt::from(5u8),
                Felt::ZERO,
                Felt::from(7u8),
                Felt::ZERO,
                receiver
            ]
        );
    }

    #[test]
    fn test_upgrade_call_layout() {
        let vault = Felt::from_hex_unchecked("0xaaa");
        let class_hash = Felt::from_hex_unchecked("0xbeef");
        let call = build_upgrade_call(vault, class_hash);
        assert_eq!(call.to, vault);
        assert_eq!(call.calldata, vec![class_hash]);
    }

    #[test]
    fn test_managed_pool_decode_round_trip() {
        let mut pool = sample_pool();
        pool.nft_id = 7;
        let mut words = vec![Felt::ONE];
        pool.serialize(&mut words);
        assert_eq!(decode_managed_pools(&words).unwrap(), vec![pool]);
    }

    #[test]
    fn test_managed_pool_decode_rejects_bad_data() {
        assert!(decode_managed_pools(&[]).is_err());

        // Length prefix promises one pool but the body is short.
        let mut words = vec![Felt::ONE];
        sample_pool().serialize(&mut words);
        words.pop();
        assert!(decode_managed_pools(&words).is_err());

        // Sign flag outside {0, 1}.
        let mut words = vec![Felt::ONE];
        sample_pool().serialize(&mut words);
        words[7] = Felt::from(2u8);
        assert!(decode_managed_pools(&words).is_err());
    }

    #[test]
    fn test_rebalance_call_layout() {
        let vault = Felt::from_hex_unchecked("0xaaa");
        let bounds = Bounds::new(Tick::new(-27_598_600), Tick::new(-27_592_600));
        let swap = SwapParams::new(
            Felt::from_hex_unchecked("0x111"),
            Felt::from_hex_unchecked("0x222"),
            vault,
        );
        let call = build_rebalance_call(vault, &bounds, &swap);
        assert_eq!(call.to, vault);
        // bounds (4) + token_from (1) + amount (2) + token_to (1) +
        // min_received (2) + beneficiary (1) + empty route span (1)
        assert_eq!(call.calldata.len(), 12);
        assert_eq!(call.calldata[0], Felt::from(27_598_600u32));
        assert_eq!(call.calldata[1], Felt::ONE);
        assert_eq!(*call.calldata.last().unwrap(), Felt::ZERO);
    }
}
