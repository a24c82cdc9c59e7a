//! Form-like calculator state.
//!
//! A session owns the current [`Holdings`] snapshot and [`RateQuote`]. Each
//! setter returns a newly computed [`ComputationResult`]; nothing derived is
//! stored between calls.

use crate::engine::ZakatEngine;
use crate::holdings::Holdings;
use crate::inputs::{IntoZakatDecimal, parse_amount_lenient};
use crate::rates::RateQuote;
use crate::types::ComputationResult;
use crate::units::{Karat, WeightUnit};

/// The four numeric fields of the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Cash,
    Gold,
    Silver,
    Debts,
}

#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    holdings: Holdings,
    quote: RateQuote,
    engine: ZakatEngine,
}

impl CalculatorSession {
    /// Starts with empty holdings and the given quote.
    pub fn new(quote: RateQuote) -> Self {
        Self {
            holdings: Holdings::new(),
            quote,
            engine: ZakatEngine::new(),
        }
    }

    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    pub fn quote(&self) -> &RateQuote {
        &self.quote
    }

    /// Recomputes from the current snapshot.
    pub fn result(&self) -> ComputationResult {
        self.engine.compute(self.quote.rates(), &self.holdings)
    }

    /// Replaces the rates in use. The latest call wins.
    pub fn apply_rates(&mut self, quote: RateQuote) -> ComputationResult {
        tracing::debug!(source = ?quote.source(), "applying rate quote");
        self.quote = quote;
        self.result()
    }

    pub fn set_cash(&mut self, cash: impl IntoZakatDecimal) -> ComputationResult {
        self.holdings.set_cash(cash);
        self.result()
    }

    pub fn set_gold(&mut self, amount: impl IntoZakatDecimal) -> ComputationResult {
        self.holdings.set_gold_amount(amount);
        self.result()
    }

    pub fn set_gold_unit(&mut self, unit: WeightUnit) -> ComputationResult {
        self.holdings.set_gold_unit(unit);
        self.result()
    }

    pub fn set_gold_karat(&mut self, karat: Karat) -> ComputationResult {
        self.holdings.set_gold_karat(karat);
        self.result()
    }

    pub fn set_silver(&mut self, amount: impl IntoZakatDecimal) -> ComputationResult {
        self.holdings.set_silver_amount(amount);
        self.result()
    }

    pub fn set_silver_unit(&mut self, unit: WeightUnit) -> ComputationResult {
        self.holdings.set_silver_unit(unit);
        self.result()
    }

    pub fn set_debts(&mut self, debts: impl IntoZakatDecimal) -> ComputationResult {
        self.holdings.set_debts(debts);
        self.result()
    }

    /// Applies raw text typed into one of the numeric fields.
    pub fn set_field_text(&mut self, field: AmountField, raw: &str) -> ComputationResult {
        let amount = parse_amount_lenient(raw);
        match field {
            AmountField::Cash => self.set_cash(amount),
            AmountField::Gold => self.set_gold(amount),
            AmountField::Silver => self.set_silver(amount),
            AmountField::Debts => self.set_debts(amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::MarketRates;
    use crate::types::round_money;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_session_starts_empty_on_fallback() {
        let session = CalculatorSession::default();
        assert!(!session.quote().is_live());
        assert_eq!(session.result().zakat_payable, Decimal::ZERO);
    }

    #[test]
    fn test_each_mutation_recomputes() {
        let mut session = CalculatorSession::new(RateQuote::fallback("offline"));

        let r1 = session.set_cash(50000);
        assert!(!r1.is_eligible);

        let r2 = session.set_silver(30);
        assert_eq!(r2.total_assets, dec!(53750));

        let r3 = session.set_silver_unit(WeightUnit::Vori);
        // 30 vori = 349.8 g -> 43725
        assert_eq!(r3.silver_value, dec!(43725));
        assert!(r3.is_eligible);

        let r4 = session.set_field_text(AmountField::Debts, "100,000");
        assert_eq!(r4.net_wealth, dec!(-6275));
        assert!(!r4.is_eligible);

        // Earlier results are untouched snapshots.
        assert!(r3.is_eligible);
    }

    #[test]
    fn test_garbage_text_counts_as_zero() {
        let mut session = CalculatorSession::default();
        session.set_cash(1000);
        let result = session.set_field_text(AmountField::Cash, "1k");
        assert_eq!(result.total_assets, Decimal::ZERO);
    }

    #[test]
    fn test_latest_rates_win() {
        let mut session = CalculatorSession::new(RateQuote::fallback("offline"));
        session.set_gold_karat(Karat::K18);
        session.set_gold(10);

        let live = RateQuote::live(MarketRates::new(12000, 150).unwrap());
        let result = session.apply_rates(live);
        assert_eq!(result.gold_value, dec!(90000));
        assert_eq!(result.nisab_threshold, dec!(91854));
        assert!(session.quote().is_live());

        let result = session.apply_rates(RateQuote::fallback("stale"));
        // 9500 / 24 does not terminate, so compare at cent precision.
        assert_eq!(round_money(result.gold_value), dec!(71250));
    }
}
