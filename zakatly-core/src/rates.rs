//! Market rates and the live/fallback quote wrapper.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::inputs::IntoZakatDecimal;
use crate::types::ZakatError;

/// Largest accepted price per gram, for either metal.
pub const MAX_RATE_PER_GRAM: Decimal = dec!(1000000000);

/// Current price per gram of 24K gold and of silver, in the local currency.
///
/// Both prices are strictly positive; the only way to build one is through
/// [`MarketRates::new`] or the [`MarketRates::FALLBACK`] constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketRates {
    gold_price_per_gram_24k: Decimal,
    silver_price_per_gram: Decimal,
}

impl MarketRates {
    /// Rates used whenever the live feed cannot be reached.
    pub const FALLBACK: MarketRates = MarketRates {
        gold_price_per_gram_24k: dec!(9500),
        silver_price_per_gram: dec!(125),
    };

    pub fn new(
        gold_price_per_gram_24k: impl IntoZakatDecimal,
        silver_price_per_gram: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        let gold = validate_rate("gold", gold_price_per_gram_24k.into_zakat_decimal()?)?;
        let silver = validate_rate("silver", silver_price_per_gram.into_zakat_decimal()?)?;

        Ok(Self {
            gold_price_per_gram_24k: gold,
            silver_price_per_gram: silver,
        })
    }

    pub fn gold_price_per_gram_24k(&self) -> Decimal {
        self.gold_price_per_gram_24k
    }

    pub fn silver_price_per_gram(&self) -> Decimal {
        self.silver_price_per_gram
    }
}

impl Default for MarketRates {
    fn default() -> Self {
        Self::FALLBACK
    }
}

fn validate_rate(metal: &str, value: Decimal) -> Result<Decimal, ZakatError> {
    if value <= Decimal::ZERO || value > MAX_RATE_PER_GRAM {
        return Err(ZakatError::InvalidRate {
            metal: metal.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}

#[derive(Deserialize)]
struct RawMarketRates {
    gold_price_per_gram_24k: Decimal,
    silver_price_per_gram: Decimal,
}

impl<'de> Deserialize<'de> for MarketRates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawMarketRates::deserialize(deserializer)?;
        MarketRates::new(raw.gold_price_per_gram_24k, raw.silver_price_per_gram)
            .map_err(serde::de::Error::custom)
    }
}

/// Where the rates in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    /// Entered by the user instead of fetched.
    Manual,
    Fallback,
}

/// Rates paired with their provenance.
///
/// A failed fetch is not an error for the caller: it becomes a `Fallback`
/// carrying [`MarketRates::FALLBACK`] and the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum RateQuote {
    Live {
        rates: MarketRates,
        fetched_at: DateTime<Utc>,
    },
    Manual {
        rates: MarketRates,
    },
    Fallback {
        rates: MarketRates,
        reason: String,
    },
}

impl RateQuote {
    pub fn live(rates: MarketRates) -> Self {
        RateQuote::Live {
            rates,
            fetched_at: Utc::now(),
        }
    }

    pub fn manual(rates: MarketRates) -> Self {
        RateQuote::Manual { rates }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        RateQuote::Fallback {
            rates: MarketRates::FALLBACK,
            reason: reason.into(),
        }
    }

    pub fn rates(&self) -> &MarketRates {
        match self {
            RateQuote::Live { rates, .. } | RateQuote::Manual { rates } | RateQuote::Fallback { rates, .. } => rates,
        }
    }

    pub fn source(&self) -> RateSource {
        match self {
            RateQuote::Live { .. } => RateSource::Live,
            RateQuote::Manual { .. } => RateSource::Manual,
            RateQuote::Fallback { .. } => RateSource::Fallback,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source() == RateSource::Live
    }
}

impl Default for RateQuote {
    fn default() -> Self {
        RateQuote::fallback("rates not fetched yet")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_reject_non_positive() {
        assert!(MarketRates::new(0, 125).is_err());
        assert!(MarketRates::new(9500, -1).is_err());
        assert!(MarketRates::new(dec!(0.0001), dec!(0.0001)).is_ok());
    }

    #[test]
    fn test_rates_reject_absurd_values() {
        let err = MarketRates::new(dec!(1000000001), 125).unwrap_err();
        assert!(matches!(err, ZakatError::InvalidRate { ref metal, .. } if metal == "gold"));
    }

    #[test]
    fn test_fallback_constant() {
        assert_eq!(MarketRates::FALLBACK.gold_price_per_gram_24k(), dec!(9500));
        assert_eq!(MarketRates::FALLBACK.silver_price_per_gram(), dec!(125));
        assert_eq!(MarketRates::default(), MarketRates::FALLBACK);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: MarketRates =
            serde_json::from_str(r#"{"gold_price_per_gram_24k": 10000, "silver_price_per_gram": 130.5}"#).unwrap();
        assert_eq!(ok.silver_price_per_gram(), dec!(130.5));

        let bad = serde_json::from_str::<MarketRates>(r#"{"gold_price_per_gram_24k": 0, "silver_price_per_gram": 1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_quote_provenance() {
        let quote = RateQuote::fallback("timeout");
        assert!(!quote.is_live());
        assert_eq!(quote.rates(), &MarketRates::FALLBACK);

        let live = RateQuote::live(MarketRates::new(10000, 130).unwrap());
        assert_eq!(live.source(), RateSource::Live);
        assert_eq!(live.rates().gold_price_per_gram_24k(), dec!(10000));

        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains(r#""source":"fallback""#));

        let manual = RateQuote::manual(MarketRates::new(12000, 130).unwrap());
        assert_eq!(manual.source(), RateSource::Manual);
        assert!(!manual.is_live());
        let json = serde_json::to_string(&manual).unwrap();
        assert!(json.contains(r#""source":"manual""#));
        assert_eq!(serde_json::from_str::<RateQuote>(&json).unwrap(), manual);
    }
}
