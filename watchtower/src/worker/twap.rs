use alloy::primitives::U256;
use num_bigint::BigUint;
use num_traits::Pow;
use thiserror::Error;

const PRICE_SCALE: u64 = 1_000_000_000_000_000_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TwapError {
    #[error("Expected 2 tick cumulatives, got {0}")]
    MissingObservations(usize),

    #[error("TWAP window must be non-zero")]
    EmptyWindow,
}

/// Time weighted average tick between the first two observations, rounded towards negative infinity.
pub fn average_tick(tick_cumulatives: &[i64], window_seconds: u32) -> Result<i64, TwapError> {
    let [oldest, newest] = tick_cumulatives else {
        return Err(TwapError::MissingObservations(tick_cumulatives.len()));
    };
    if window_seconds == 0 {
        return Err(TwapError::EmptyWindow);
    }
    let delta = i128::from(*newest) - i128::from(*oldest);
    // |delta| / window always fits back into an i64
    Ok(delta.div_euclid(i128::from(window_seconds)) as i64)
}

/// Price of the pool's base token in 18 decimal fixed point: `1e18 * 10000^tick / 10001^tick`.
///
/// Negative ticks are priced as the exact reciprocal `1e18 * 10001^|tick| / 10000^|tick|`. Oracle
/// nodes whose integer exponentiation maps a negative exponent to 1 report exactly 1e18 for every
/// negative tick instead, so submissions for such ticks differ between the two.
pub fn tick_to_price(tick: i64) -> U256 {
    let scale = BigUint::from(PRICE_SCALE);
    let exponent = tick.unsigned_abs();
    let numerator: BigUint = Pow::pow(BigUint::from(10_001u32), exponent);
    let denominator: BigUint = Pow::pow(BigUint::from(10_000u32), exponent);

    let price = if tick >= 0 {
        // 1.0001^tick in fixed point (never below 1e18), then inverted
        let ratio = &numerator * &scale / &denominator;
        &scale * &scale / ratio
    } else {
        &scale * numerator / denominator
    };

    biguint_to_u256(&price)
}

fn biguint_to_u256(value: &BigUint) -> U256 {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return U256::MAX;
    }
    U256::from_be_slice(&bytes)
}
