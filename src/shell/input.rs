use std::str::FromStr;

use thiserror::Error;

/// Malformed user input. Always recovered by the shell, never fatal.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("expected {expected}, got {raw:?}")]
    Malformed { expected: &'static str, raw: String },
    #[error("{0} cannot be negative")]
    Negative(&'static str),
}

fn parse_number<T: FromStr>(raw: &str, expected: &'static str) -> Result<T, InputError> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| InputError::Malformed {
        expected,
        raw: trimmed.to_string(),
    })
}

/// Non-negative whole number (ids, quantities, thresholds, menu choices).
pub fn parse_count(raw: &str) -> Result<u32, InputError> {
    if raw.trim().starts_with('-') && raw.trim().parse::<i64>().is_ok() {
        return Err(InputError::Negative("value"));
    }
    parse_number(raw, "a whole number")
}

/// Signed stock change such as `+5` or `-3`.
pub fn parse_delta(raw: &str) -> Result<i64, InputError> {
    parse_number(raw.trim().trim_start_matches('+'), "a whole number")
}

/// Non-negative finite price.
pub fn parse_price(raw: &str) -> Result<f64, InputError> {
    let price: f64 = parse_number(raw.trim().trim_start_matches('$'), "a price")?;
    if !price.is_finite() {
        return Err(InputError::Malformed {
            expected: "a price",
            raw: raw.trim().to_string(),
        });
    }
    if price < 0.0 {
        return Err(InputError::Negative("price"));
    }
    Ok(price)
}
