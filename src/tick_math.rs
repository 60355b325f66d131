use starknet::core::types::Felt;
use thiserror::Error;

/// Logarithmic base of the tick grid: each tick moves the price by 0.0001%.
pub const TICK_BASE: f64 = 1.000001;

/// Largest tick magnitude representable by the pool contracts. Matches the
/// on-chain bound for a 128-bit sqrt-ratio range.
pub const MAX_TICK_MAG: i32 = 88_722_883;

/// Ticks within this distance of an integer are treated as landing exactly on
/// it before rounding, so that float jitter in the log computation cannot flip
/// a floor/ceil across a grid boundary. The intrinsic error of the `ln`-based
/// conversion is below 1e-8 ticks.
const TICK_SNAP_EPSILON: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum TickMathError {
    #[error("price must be positive and finite, got {0}")]
    InvalidPrice(f64),
    #[error("tick spacing must be positive")]
    InvalidTickSpacing,
    #[error("tick {0} exceeds the representable range")]
    TickOutOfRange(i64),
}

/// A discrete price coordinate on the pool's logarithmic grid.
///
/// Stored as a native signed index. The chain-side representation is a
/// magnitude/sign pair (the on-chain integer type has no native sign), which
/// is produced only at the calldata boundary via [`Tick::to_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick(i32);

impl Tick {
    pub fn new(index: i32) -> Self {
        Tick(index)
    }

    pub fn index(&self) -> i32 {
        self.0
    }

    /// Decompose into the on-chain magnitude/sign encoding. Zero encodes with
    /// a cleared sign flag.
    pub fn to_parts(&self) -> (u32, bool) {
        (self.0.unsigned_abs(), self.0 < 0)
    }

    /// Rebuild a tick from its magnitude/sign encoding.
    pub fn from_parts(mag: u32, sign: bool) -> Self {
        if sign {
            Tick(-(mag as i32))
        } else {
            Tick(mag as i32)
        }
    }
}

/// An ordered pair of ticks delimiting a liquidity position's price range.
///
/// Construction performs no validation: callers are responsible for ensuring
/// `lower <= upper` (see [`Bounds::is_ordered`]) before the pair reaches the
/// chain, where a reversed range identifies an empty or invalid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub lower: Tick,
    pub upper: Tick,
}

impl Bounds {
    pub fn new(lower: Tick, upper: Tick) -> Self {
        Bounds { lower, upper }
    }

    pub fn is_ordered(&self) -> bool {
        self.lower <= self.upper
    }
}

/// Identifies a trading pool by its token pair, fee tier, tick spacing and
/// optional extension contract.
///
/// `token0` and `token1` must already be in canonical ascending order (see
/// [`sort_tokens`]); a reversed pair silently identifies a different, likely
/// nonexistent, pool. The constructor does not sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolKey {
    pub token0: Felt,
    pub token1: Felt,
    pub fee: u128,
    pub tick_spacing: u32,
    pub extension: Felt,
}

impl PoolKey {
    pub fn new(token0: Felt, token1: Felt, fee: u128, tick_spacing: u32, extension: Felt) -> Self {
        PoolKey {
            token0,
            token1,
            fee,
            tick_spacing,
            extension,
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.token0 <= self.token1
    }
}

/// Return the two token addresses in canonical ascending order, comparing
/// them as unsigned field integers. Stable for equal inputs.
pub fn sort_tokens(token0: Felt, token1: Felt) -> (Felt, Felt) {
    if token0 <= token1 {
        (token0, token1)
    } else {
        (token1, token0)
    }
}

/// Convert a human-readable price into a tick aligned to `tick_spacing`.
///
/// The price is expressed as token1 per token0 in display units; it is first
/// adjusted for the decimal difference between the two tokens, then mapped to
/// the continuous tick `ln(adjusted) / ln(1.000001)`. `round_down` selects
/// floor over ceiling for that continuous value, after which the result is
/// snapped down to the nearest multiple of `tick_spacing` (floor division, so
/// negative ticks also snap toward negative infinity).
///
/// # Parameters
/// - `price` - The display price, token1 per token0. Must be positive.
/// - `round_down` - Floor the continuous tick when true, ceil when false.
/// - `tick_spacing` - The pool's tick spacing. Must be nonzero.
/// - `token0_decimals` / `token1_decimals` - Decimal precision of each token.
///
/// # Errors
/// Fails with [`TickMathError`] on a non-positive or non-finite price, a zero
/// tick spacing, or a result outside the representable tick range. Invalid
/// input never propagates as NaN.
pub fn price_to_tick(
    price: f64,
    round_down: bool,
    tick_spacing: u32,
    token0_decimals: u8,
    token1_decimals: u8,
) -> Result<Tick, TickMathError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(TickMathError::InvalidPrice(price));
    }
    if tick_spacing == 0 {
        return Err(TickMathError::InvalidTickSpacing);
    }

    let adjusted_price =
        price * 10f64.powi(token1_decimals as i32) / 10f64.powi(token0_decimals as i32);
    if !adjusted_price.is_finite() || adjusted_price <= 0.0 {
        return Err(TickMathError::InvalidPrice(price));
    }

    let mut continuous = adjusted_price.ln() / TICK_BASE.ln();
    let nearest = continuous.round();
    if (continuous - nearest).abs() < TICK_SNAP_EPSILON {
        continuous = nearest;
    }
    let rounded = if round_down {
        continuous.floor()
    } else {
        continuous.ceil()
    };
    let unaligned = rounded as i64;

    let snapped = unaligned.div_euclid(tick_spacing as i64) * tick_spacing as i64;
    if snapped.unsigned_abs() > MAX_TICK_MAG as u64 {
        return Err(TickMathError::TickOutOfRange(snapped));
    }
    Ok(Tick(snapped as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn tick_to_adjusted_price(index: i32) -> f64 {
        TICK_BASE.powi(index)
    }

    #[test]
    fn test_unit_price_is_tick_zero() {
        let tick = price_to_tick(1.0, false, 200, 18, 18).unwrap();
        assert_eq!(tick.index(), 0);
        assert_eq!(tick.to_parts(), (0, false));
    }

    #[test]
    fn test_round_down_does_not_exceed_price() {
        // xSTRK/USDC style pair: 18 vs 6 decimals shifts the grid by 1e-12.
        let adjusted = 1.033e-12;
        let tick = price_to_tick(1.033, true, 200, 18, 6).unwrap();
        assert!(tick.index() < 0);
        assert_eq!(tick.index() % 200, 0);
        let (mag, sign) = tick.to_parts();
        assert!(sign);
        assert_eq!(mag % 200, 0);
        // The snapped tick sits on the grid point closest to, but not above,
        // the adjusted price.
        assert!(tick_to_adjusted_price(tick.index()) <= adjusted * (1.0 + 1e-9));
        assert!(tick_to_adjusted_price(tick.index() + 200) > adjusted);
    }

    #[test]
    fn test_rounding_direction() {
        // 1.117 does not land on an integer tick, so with unit spacing the
        // two directions straddle it.
        let down = price_to_tick(1.117, true, 1, 18, 18).unwrap();
        let up = price_to_tick(1.117, false, 1, 18, 18).unwrap();
        assert_eq!(up.index() - down.index(), 1);

        // With a coarse spacing both roundings can land on the same grid
        // point; the ordering still holds.
        let down = price_to_tick(1.117, true, 200, 18, 18).unwrap();
        let up = price_to_tick(1.117, false, 200, 18, 18).unwrap();
        assert!(down <= up);
    }

    #[test]
    fn test_boundary_price_is_jitter_stable() {
        // A price sitting exactly on a spacing multiple must convert
        // identically under float jitter at representable precision.
        let boundary_price = tick_to_adjusted_price(400);
        for jitter in [1.0, 1.0 - 1e-14, 1.0 + 1e-14] {
            let tick = price_to_tick(boundary_price * jitter, true, 200, 18, 18).unwrap();
            assert_eq!(tick.index(), 400, "jitter {jitter} moved the tick");
        }
    }

    #[test]
    fn test_adjusted_price_round_trip_accuracy() {
        let tick = price_to_tick(1.1, true, 1, 18, 18).unwrap();
        assert_relative_eq!(
            tick_to_adjusted_price(tick.index()),
            1.1,
            max_relative = 1e-5
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            price_to_tick(0.0, true, 200, 18, 18),
            Err(TickMathError::InvalidPrice(0.0))
        );
        assert_eq!(
            price_to_tick(-1.5, true, 200, 18, 18),
            Err(TickMathError::InvalidPrice(-1.5))
        );
        assert!(matches!(
            price_to_tick(f64::NAN, true, 200, 18, 18),
            Err(TickMathError::InvalidPrice(_))
        ));
        assert_eq!(
            price_to_tick(1.0, true, 0, 18, 18),
            Err(TickMathError::InvalidTickSpacing)
        );
    }

    #[test]
    fn test_tick_parts_encoding() {
        assert_eq!(Tick::new(-27_598_600).to_parts(), (27_598_600, true));
        assert_eq!(Tick::new(27_598_600).to_parts(), (27_598_600, false));
        assert_eq!(Tick::new(0).to_parts(), (0, false));
    }

    #[test]
    fn test_bounds_ordering_helper() {
        let ordered = Bounds::new(Tick::new(-200), Tick::new(400));
        assert!(ordered.is_ordered());
        let reversed = Bounds::new(Tick::new(400), Tick::new(-200));
        assert!(!reversed.is_ordered());
        let degenerate = Bounds::new(Tick::new(0), Tick::new(0));
        assert!(degenerate.is_ordered());
    }

    #[test]
    fn test_sort_tokens() {
        let a = Felt::from_hex_unchecked("0x123");
        let b = Felt::from_hex_unchecked("0xabc");
        assert_eq!(sort_tokens(a, b), (a, b));
        assert_eq!(sort_tokens(b, a), (a, b));
        assert_eq!(sort_tokens(a, a), (a, a));
    }

    proptest! {
        #[test]
        fn prop_tick_is_multiple_of_spacing(
            price in 1e-12f64..1e12,
            spacing in 1u32..=1000,
            round_down: bool,
        ) {
            let tick = price_to_tick(price, round_down, spacing, 18, 18).unwrap();
            prop_assert_eq!(tick.index().rem_euclid(spacing as i32), 0);
            let (mag, sign) = tick.to_parts();
            prop_assert_eq!(mag % spacing, 0);
            prop_assert_eq!(sign, tick.index() < 0);
        }

        #[test]
        fn prop_round_down_never_exceeds_round_up(
            price in 1e-12f64..1e12,
            spacing in 1u32..=1000,
        ) {
            let down = price_to_tick(price, true, spacing, 18, 18).unwrap();
            let up = price_to_tick(price, false, spacing, 18, 18).unwrap();
            prop_assert!(down <= up);
        }

        #[test]
        fn prop_parts_round_trip(index in -MAX_TICK_MAG..=MAX_TICK_MAG) {
            let tick = Tick::new(index);
            let (mag, sign) = tick.to_parts();
            prop_assert_eq!(Tick::from_parts(mag, sign), tick);
        }

        #[test]
        fn prop_sort_tokens_is_commutative(a in any::<u64>(), b in any::<u64>()) {
            let a = Felt::from(a);
            let b = Felt::from(b);
            let sorted = sort_tokens(a, b);
            prop_assert_eq!(sorted, sort_tokens(b, a));
            prop_assert_eq!(sorted, sort_tokens(sorted.0, sorted.1));
            prop_assert!(sorted.0 <= sorted.1);
        }
    }
}
