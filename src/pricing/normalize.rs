use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid price {input:?}: {reason}")]
    Invalid { input: String, reason: String },

    #[error("price {0:?} does not fit in minor units")]
    OutOfRange(String),
}

/// Convert a decimal price string into whole minor currency units.
///
/// Digits past the second decimal place are truncated toward zero. Either
/// `.` or `,` is accepted as the decimal separator.
pub fn normalize(raw: &str) -> Result<i64, NormalizeError> {
    let decimal = parse_decimal(raw)?;

    decimal
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| scaled.trunc())
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| NormalizeError::OutOfRange(raw.to_string()))
}

fn parse_decimal(raw: &str) -> Result<Decimal, NormalizeError> {
    let invalid = |reason: &str| NormalizeError::Invalid {
        input: raw.to_string(),
        reason: reason.to_string(),
    };

    if raw.is_empty() {
        return Err(invalid("empty string"));
    }

    // sign? digits ([.,] digits)?
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (whole, fraction) = match unsigned.find(|c| c == '.' || c == ',') {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected digits before the decimal separator"));
    }

    let fraction = match fraction {
        Some(f) if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(invalid("expected digits after the decimal separator"));
        }
        Some(f) => f,
        None => "",
    };

    // Only two fractional digits survive truncation; cutting the text here
    // keeps long fractions from being rounded by the decimal parser
    let cents = &fraction[..fraction.len().min(2)];
    let text = if cents.is_empty() {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, cents)
    };

    Decimal::from_str(&text).map_err(|_| NormalizeError::OutOfRange(raw.to_string()))
}
