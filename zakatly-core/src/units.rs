//! Weight units and gold purity.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::types::ZakatError;

/// 1 vori (tola/bhori) in grams.
pub const GRAMS_PER_VORI: Decimal = dec!(11.66);

/// Mass unit a metal holding is entered in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum WeightUnit {
    #[default]
    #[strum(to_string = "gram", serialize = "g", serialize = "grams")]
    Gram,
    #[strum(to_string = "vori", serialize = "tola", serialize = "bhori")]
    Vori,
}

impl WeightUnit {
    /// Normalizes `amount` of this unit to grams.
    pub fn to_grams(self, amount: Decimal) -> Decimal {
        match self {
            WeightUnit::Gram => amount,
            WeightUnit::Vori => amount * GRAMS_PER_VORI,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Gram => "g",
            WeightUnit::Vori => "vori",
        }
    }
}

/// Gold purity, in parts out of 24.
///
/// Only the four purities sold in practice are accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum Karat {
    #[default]
    #[strum(to_string = "24K")]
    K24,
    #[strum(to_string = "22K")]
    K22,
    #[strum(to_string = "21K")]
    K21,
    #[strum(to_string = "18K")]
    K18,
}

impl Karat {
    pub fn parts(self) -> u32 {
        match self {
            Karat::K24 => 24,
            Karat::K22 => 22,
            Karat::K21 => 21,
            Karat::K18 => 18,
        }
    }

    /// Scales a 24K price per gram to this purity: `(price / 24) * karat`.
    pub fn scale_rate(self, price_per_gram_24k: Decimal) -> Decimal {
        (price_per_gram_24k / dec!(24)) * Decimal::from(self.parts())
    }
}

impl TryFrom<u32> for Karat {
    type Error = ZakatError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            24 => Ok(Karat::K24),
            22 => Ok(Karat::K22),
            21 => Ok(Karat::K21),
            18 => Ok(Karat::K18),
            other => Err(ZakatError::invalid_input(
                "gold_karat",
                format!("unsupported karat {} (expected 24, 22, 21 or 18)", other),
            )),
        }
    }
}

impl From<Karat> for u32 {
    fn from(karat: Karat) -> Self {
        karat.parts()
    }
}

impl std::str::FromStr for Karat {
    type Err = ZakatError;

    /// Accepts `22`, `22k` and `22K`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches(['k', 'K']);
        let parts: u32 = digits
            .parse()
            .map_err(|_| ZakatError::invalid_input("gold_karat", format!("not a karat: '{}'", s)))?;
        Karat::try_from(parts)
    }
}
