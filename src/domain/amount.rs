//! Amount scaling between raw chain units and decimal strings.
//!
//! Raw amounts are unbounded integers (Tezos `nat`). The gateway's responses
//! carry them as fixed-precision decimal strings scaled by each token's
//! `decimals`; human-entered amounts travel the other way when building an
//! approval.

use num_bigint::BigUint;
use num_traits::One;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure while converting a human-entered decimal amount to raw units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid decimal amount: {0}")]
    Invalid(String),
    #[error("negative amounts are not representable on chain")]
    Negative,
    #[error("amount has more precision than {decimals} decimals")]
    ExcessPrecision { decimals: u32 },
    #[error("amount is too large to convert")]
    Overflow,
    #[error("decimal scale {0} is not supported")]
    UnsupportedScale(u32),
}

/// Render a raw integer amount as a decimal string scaled by `decimals`.
///
/// The fractional part is zero-padded to exactly `decimals` digits, so
/// 1000000 mutez at scale 6 renders as `"1.000000"`. At scale 0 the plain
/// integer string is returned.
pub fn format_amount(raw: &BigUint, decimals: u32) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    let base = BigUint::from(10u32).pow(decimals);
    let whole = raw / &base;
    let frac = raw % &base;
    format!("{whole}.{frac:0>width$}", frac = frac.to_string(), width = decimals as usize)
}

/// Parse a human-entered decimal string into raw units at scale `decimals`.
///
/// Rejects negative values, values carrying more fractional digits than the
/// token supports, and values that do not fit the conversion range.
pub fn parse_amount(text: &str, decimals: u32) -> Result<BigUint, AmountError> {
    // Decimal's own scale limit; registry validation keeps real tokens far
    // below this.
    if decimals > 28 {
        return Err(AmountError::UnsupportedScale(decimals));
    }

    let amount: Decimal = text
        .trim()
        .parse()
        .map_err(|_| AmountError::Invalid(text.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative);
    }

    let base = Decimal::from_i128_with_scale(10i128.pow(decimals), 0);
    let scaled = amount
        .checked_mul(base)
        .ok_or(AmountError::Overflow)?
        .normalize();
    if scaled.fract() != Decimal::ZERO {
        return Err(AmountError::ExcessPrecision { decimals });
    }

    let units = scaled.to_u128().ok_or(AmountError::Overflow)?;
    Ok(BigUint::from(units))
}

/// The "unlimited approval" sentinel: the maximum unsigned 256-bit value.
pub fn max_approval_amount() -> BigUint {
    (BigUint::one() << 256usize) - BigUint::one()
}
