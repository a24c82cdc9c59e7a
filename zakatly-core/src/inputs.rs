use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::types::ZakatError;

/// Upper bound applied to every monetary amount and weight.
///
/// Keeps every intermediate product of the engine within `Decimal` range.
pub const MAX_INPUT_AMOUNT: Decimal = dec!(1000000000000000);

/// Trait for converting various types into `Decimal` for Zakat calculations.
///
/// This trait allows callers to pass `i32`, `f64`, `&str`, etc. directly into
/// constructors without wrapping them in `dec!()` or `Decimal::from()`.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError>;
}

impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Ok(self)
    }
}

macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    // Go through the shortest round-trip text form so 0.1 stays 0.1.
                    Decimal::from_str(&self.to_string())
                        .or_else(|_| Decimal::from_scientific(&format!("{:e}", self)))
                        .map_err(|_| ZakatError::invalid_input("number", format!("invalid float value: {}", self)))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| ZakatError::invalid_input("number", format!("invalid string format: {}", e)))
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        self.as_str().into_zakat_decimal()
    }
}

/// Clamps an amount into `[0, MAX_INPUT_AMOUNT]`.
pub fn clamp_amount(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(MAX_INPUT_AMOUNT)
}

/// Converts any supported value into a sanitized amount.
///
/// Anything that fails to convert counts as zero, negatives are clamped to
/// zero, and oversized values are capped.
pub fn sanitize_amount(value: impl IntoZakatDecimal) -> Decimal {
    match value.into_zakat_decimal() {
        Ok(v) => clamp_amount(v),
        Err(e) => {
            tracing::debug!("Treating unparsable amount as zero: {}", e);
            Decimal::ZERO
        }
    }
}

/// Parses free-form text from an input field.
///
/// Thousands separators (`,` and `_`) are ignored. Empty or non-numeric text
/// is zero.
pub fn parse_amount_lenient(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    sanitize_amount(cleaned.as_str())
}
