//! Rate provider abstraction.
//!
//! The core [`RateProvider`] trait yields a [`MarketRates`] or fails. Callers
//! never see that failure directly: [`fetch_with_fallback`] turns it into a
//! [`RateQuote::Fallback`] carrying [`MarketRates::FALLBACK`].

use tracing::{info, warn};

use zakatly_core::inputs::IntoZakatDecimal;
use zakatly_core::rates::{MarketRates, RateQuote};
use zakatly_core::types::ZakatError;

/// Trait for fetching current metal rates.
///
/// Implementors can fetch rates from various sources:
/// - Static values for testing or manual overrides
/// - REST APIs (GoldAPI, ...)
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches current rates. Returns `Err(ZakatError)` if they cannot be obtained.
    async fn fetch_rates(&self) -> Result<MarketRates, ZakatError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "rate-provider"
    }
}

#[async_trait::async_trait]
impl<P: RateProvider + ?Sized> RateProvider for Box<P> {
    async fn fetch_rates(&self) -> Result<MarketRates, ZakatError> {
        (**self).fetch_rates().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A static rate provider.
///
/// Useful when you want to:
/// - Run unit tests with fixed rates
/// - Use rates supplied by the user instead of the live feed
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    rates: MarketRates,
}

impl StaticRateProvider {
    pub fn new(
        gold_price_per_gram_24k: impl IntoZakatDecimal,
        silver_price_per_gram: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        Ok(Self {
            rates: MarketRates::new(gold_price_per_gram_24k, silver_price_per_gram)?,
        })
    }

    pub fn from_rates(rates: MarketRates) -> Self {
        Self { rates }
    }
}

#[async_trait::async_trait]
impl RateProvider for StaticRateProvider {
    async fn fetch_rates(&self) -> Result<MarketRates, ZakatError> {
        Ok(self.rates)
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Asks `provider` once and never fails.
///
/// Success becomes [`RateQuote::Live`]; any error is logged and becomes
/// [`RateQuote::Fallback`]. No retry is attempted.
pub async fn fetch_with_fallback<P: RateProvider + ?Sized>(provider: &P) -> RateQuote {
    match provider.fetch_rates().await {
        Ok(rates) => {
            info!(
                provider = provider.name(),
                gold = %rates.gold_price_per_gram_24k(),
                silver = %rates.silver_price_per_gram(),
                "fetched live rates"
            );
            RateQuote::live(rates)
        }
        Err(e) => {
            warn!(provider = provider.name(), "Rate feed failed, using fallback rates: {}", e);
            RateQuote::fallback(e.to_string())
        }
    }
}
