use crate::engine::ZakatEngine;
use crate::holdings::Holdings;
use crate::rates::MarketRates;
use crate::types::ComputationResult;

/// Anything that can be valued against a set of market rates.
pub trait CalculateZakat {
    /// Derives a fresh result. Implementations must be total.
    fn calculate_zakat(&self, rates: &MarketRates) -> ComputationResult;
}

impl CalculateZakat for Holdings {
    fn calculate_zakat(&self, rates: &MarketRates) -> ComputationResult {
        ZakatEngine::new().compute(rates, self)
    }
}
