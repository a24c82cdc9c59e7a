use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::{IntoZakatDecimal, sanitize_amount};
use crate::units::{Karat, WeightUnit};

/// What the user owns and owes.
///
/// Every amount is kept in `[0, MAX_INPUT_AMOUNT]`: the setters and
/// deserialization clamp instead of failing, so a `Holdings` value is always
/// valid engine input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawHoldings")]
pub struct Holdings {
    cash: Decimal,
    gold_amount: Decimal,
    gold_unit: WeightUnit,
    gold_karat: Karat,
    silver_amount: Decimal,
    silver_unit: WeightUnit,
    debts: Decimal,
}

impl Holdings {
    /// Empty holdings: all zeros, grams, 24K.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cash(mut self, cash: impl IntoZakatDecimal) -> Self {
        self.set_cash(cash);
        self
    }

    pub fn with_gold(mut self, amount: impl IntoZakatDecimal, unit: WeightUnit, karat: Karat) -> Self {
        self.set_gold_amount(amount);
        self.gold_unit = unit;
        self.gold_karat = karat;
        self
    }

    pub fn with_silver(mut self, amount: impl IntoZakatDecimal, unit: WeightUnit) -> Self {
        self.set_silver_amount(amount);
        self.silver_unit = unit;
        self
    }

    pub fn with_debts(mut self, debts: impl IntoZakatDecimal) -> Self {
        self.set_debts(debts);
        self
    }

    pub fn set_cash(&mut self, cash: impl IntoZakatDecimal) {
        self.cash = sanitize_amount(cash);
    }

    pub fn set_gold_amount(&mut self, amount: impl IntoZakatDecimal) {
        self.gold_amount = sanitize_amount(amount);
    }

    pub fn set_gold_unit(&mut self, unit: WeightUnit) {
        self.gold_unit = unit;
    }

    pub fn set_gold_karat(&mut self, karat: Karat) {
        self.gold_karat = karat;
    }

    pub fn set_silver_amount(&mut self, amount: impl IntoZakatDecimal) {
        self.silver_amount = sanitize_amount(amount);
    }

    pub fn set_silver_unit(&mut self, unit: WeightUnit) {
        self.silver_unit = unit;
    }

    pub fn set_debts(&mut self, debts: impl IntoZakatDecimal) {
        self.debts = sanitize_amount(debts);
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn gold_amount(&self) -> Decimal {
        self.gold_amount
    }

    pub fn gold_unit(&self) -> WeightUnit {
        self.gold_unit
    }

    pub fn gold_karat(&self) -> Karat {
        self.gold_karat
    }

    pub fn silver_amount(&self) -> Decimal {
        self.silver_amount
    }

    pub fn silver_unit(&self) -> WeightUnit {
        self.silver_unit
    }

    pub fn debts(&self) -> Decimal {
        self.debts
    }

    /// Gold weight normalized to grams.
    pub fn gold_grams(&self) -> Decimal {
        self.gold_unit.to_grams(self.gold_amount)
    }

    /// Silver weight normalized to grams.
    pub fn silver_grams(&self) -> Decimal {
        self.silver_unit.to_grams(self.silver_amount)
    }

}

/// Wire shape of [`Holdings`]; amounts are clamped on the way in.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawHoldings {
    cash: Decimal,
    gold_amount: Decimal,
    gold_unit: WeightUnit,
    gold_karat: Karat,
    silver_amount: Decimal,
    silver_unit: WeightUnit,
    debts: Decimal,
}

impl From<RawHoldings> for Holdings {
    fn from(raw: RawHoldings) -> Self {
        Holdings {
            cash: sanitize_amount(raw.cash),
            gold_amount: sanitize_amount(raw.gold_amount),
            gold_unit: raw.gold_unit,
            gold_karat: raw.gold_karat,
            silver_amount: sanitize_amount(raw.silver_amount),
            silver_unit: raw.silver_unit,
            debts: sanitize_amount(raw.debts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::MAX_INPUT_AMOUNT;
    use crate::rates::MarketRates;
    use crate::traits::CalculateZakat;
    use rust_decimal_macros::dec;

    #[test]
    fn test_starts_empty() {
        let h = Holdings::new();
        assert_eq!(h.cash(), Decimal::ZERO);
        assert_eq!(h.gold_amount(), Decimal::ZERO);
        assert_eq!(h.gold_unit(), WeightUnit::Gram);
        assert_eq!(h.gold_karat(), Karat::K24);
        assert_eq!(h.debts(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_inputs_are_clamped() {
        let h = Holdings::new()
            .with_cash(-100)
            .with_gold(-5, WeightUnit::Vori, Karat::K22)
            .with_silver(dec!(-0.5), WeightUnit::Gram)
            .with_debts(-1);
        assert_eq!(h.cash(), Decimal::ZERO);
        assert_eq!(h.gold_amount(), Decimal::ZERO);
        assert_eq!(h.silver_amount(), Decimal::ZERO);
        assert_eq!(h.debts(), Decimal::ZERO);
        assert_eq!(h.gold_karat(), Karat::K22);
    }

    #[test]
    fn test_non_numeric_text_is_zero() {
        let mut h = Holdings::new().with_cash(500);
        h.set_cash("twelve");
        assert_eq!(h.cash(), Decimal::ZERO);
    }

    #[test]
    fn test_gram_normalization() {
        let h = Holdings::new()
            .with_gold(2, WeightUnit::Vori, Karat::K24)
            .with_silver(50, WeightUnit::Gram);
        assert_eq!(h.gold_grams(), dec!(23.32));
        assert_eq!(h.silver_grams(), dec!(50));
    }

    #[test]
    fn test_deserialize_clamps_amounts() {
        let json = r#"{"cash": "-10", "gold_amount": "100000000000000000000", "gold_karat": 21}"#;
        let h: Holdings = serde_json::from_str(json).unwrap();
        assert_eq!(h.cash(), Decimal::ZERO);
        assert_eq!(h.gold_amount(), MAX_INPUT_AMOUNT);
        assert_eq!(h.gold_karat(), Karat::K21);
        assert_eq!(h.silver_unit(), WeightUnit::Gram);
    }

    #[test]
    fn test_deserialized_extremes_stay_computable() {
        let negative: Holdings = serde_json::from_str(r#"{"cash": "-500000"}"#).unwrap();
        let result = negative.calculate_zakat(&MarketRates::FALLBACK);
        assert_eq!(result.total_assets, Decimal::ZERO);

        let huge: Holdings =
            serde_json::from_str(r#"{"gold_amount": "70000000000000000000000000000", "gold_unit": "vori"}"#).unwrap();
        assert_eq!(huge.gold_amount(), MAX_INPUT_AMOUNT);
        let result = huge.calculate_zakat(&MarketRates::FALLBACK);
        assert!(result.is_eligible);
        assert!(result.gold_value > MAX_INPUT_AMOUNT);
    }
}
