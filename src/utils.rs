//! Arithmetic helpers for the outcome market core

use crate::error::MarketError;
use crate::state::FEE_RANGE;

/// Safe addition for i64
pub fn safe_add_i64(a: i64, b: i64) -> Result<i64, MarketError> {
    a.checked_add(b).ok_or(MarketError::ArithmeticOverflow)
}

/// Safe subtraction for i64
pub fn safe_sub_i64(a: i64, b: i64) -> Result<i64, MarketError> {
    a.checked_sub(b).ok_or(MarketError::ArithmeticOverflow)
}

/// Safe addition for u64
pub fn safe_add_u64(a: u64, b: u64) -> Result<u64, MarketError> {
    a.checked_add(b).ok_or(MarketError::ArithmeticOverflow)
}

/// Safe subtraction for u64
pub fn safe_sub_u64(a: u64, b: u64) -> Result<u64, MarketError> {
    a.checked_sub(b).ok_or(MarketError::ArithmeticOverflow)
}

/// Fee as i64, for signed cost arithmetic
pub fn fee_to_signed(fee: u64) -> Result<i64, MarketError> {
    i64::try_from(fee).map_err(|_| MarketError::ArithmeticOverflow)
}

/// Protocol fee on a trade's gross cost magnitude.
///
/// `fee = gross_abs * fee_numerator / FEE_RANGE`, truncating. The
/// intermediate widens to u128 so no input can overflow.
pub fn calculate_fee(gross_abs: u64, fee_numerator: u32) -> u64 {
    ((gross_abs as u128) * (fee_numerator as u128) / (FEE_RANGE as u128)) as u64
}
