//! # Zakat Engine
//!
//! Pure mapping from current market rates and holdings to the financial
//! summary. The engine has no failure modes: [`Holdings`] is already clamped
//! and [`MarketRates`] is already positive and bounded, so every step below
//! stays inside `Decimal` range.
//!
//! ## Nisab
//! The threshold is the value of 612.36 g (52.5 tola) of silver. Wealth
//! exactly at the threshold is eligible.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::holdings::Holdings;
use crate::rates::MarketRates;
use crate::types::{CalculationStep, ComputationResult};
use crate::units::WeightUnit;

/// Silver weight defining the Nisab (52.5 tola).
pub const NISAB_SILVER_GRAMS: Decimal = dec!(612.36);

/// 2.5% of eligible net wealth.
pub const ZAKAT_RATE: Decimal = dec!(0.025);

/// Stateless calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZakatEngine;

impl ZakatEngine {
    pub fn new() -> Self {
        Self
    }

    /// Nisab value at the given silver price.
    pub fn nisab_threshold(rates: &MarketRates) -> Decimal {
        rates.silver_price_per_gram() * NISAB_SILVER_GRAMS
    }

    pub fn compute(&self, rates: &MarketRates, holdings: &Holdings) -> ComputationResult {
        let mut trace = Vec::new();

        let effective_gold_rate_per_gram = holdings.gold_karat().scale_rate(rates.gold_price_per_gram_24k());

        // 1-2. Gold
        let gold_grams = holdings.gold_grams();
        let gold_value = gold_grams * effective_gold_rate_per_gram;
        trace.push(CalculationStep::initial(
            format!("Gold ({} {})", holdings.gold_amount(), holdings.gold_unit().symbol()),
            holdings.gold_amount(),
        ));
        if holdings.gold_unit() == WeightUnit::Vori {
            trace.push(CalculationStep::result("Gold Weight (grams)", gold_grams));
        }
        trace.push(CalculationStep::multiply(
            format!("Gold Rate per gram ({})", holdings.gold_karat()),
            effective_gold_rate_per_gram,
        ));
        trace.push(CalculationStep::result("Gold Value", gold_value));

        // 3-4. Silver
        let silver_grams = holdings.silver_grams();
        let silver_value = silver_grams * rates.silver_price_per_gram();
        trace.push(CalculationStep::initial(
            format!("Silver ({} {})", holdings.silver_amount(), holdings.silver_unit().symbol()),
            holdings.silver_amount(),
        ));
        if holdings.silver_unit() == WeightUnit::Vori {
            trace.push(CalculationStep::result("Silver Weight (grams)", silver_grams));
        }
        trace.push(CalculationStep::multiply("Silver Rate per gram", rates.silver_price_per_gram()));
        trace.push(CalculationStep::result("Silver Value", silver_value));

        // 5-6. Totals
        let total_assets = holdings.cash() + gold_value + silver_value;
        trace.push(CalculationStep::initial("Cash & Savings", holdings.cash()));
        trace.push(CalculationStep::add("Gold Value", gold_value));
        trace.push(CalculationStep::add("Silver Value", silver_value));
        trace.push(CalculationStep::result("Total Assets", total_assets));

        let net_wealth = total_assets - holdings.debts();
        trace.push(CalculationStep::subtract("Debts & Liabilities", holdings.debts()));
        trace.push(CalculationStep::result("Net Wealth", net_wealth));

        // 7-9. Nisab and amount due
        let nisab_threshold = Self::nisab_threshold(rates);
        trace.push(CalculationStep::compare("Nisab Threshold (612.36g silver)", nisab_threshold));

        let is_eligible = net_wealth >= nisab_threshold;
        let zakat_payable = if is_eligible {
            net_wealth * ZAKAT_RATE
        } else {
            Decimal::ZERO
        };

        if is_eligible {
            trace.push(CalculationStep::rate("Applied Rate (2.5%)", ZAKAT_RATE));
            trace.push(CalculationStep::result("Zakat Payable", zakat_payable));
        } else {
            trace.push(CalculationStep::info("Net Wealth below Nisab - No Zakat Due"));
        }

        debug!(
            %total_assets,
            %net_wealth,
            %nisab_threshold,
            is_eligible,
            %zakat_payable,
            "computed zakat"
        );

        ComputationResult {
            effective_gold_rate_per_gram,
            gold_value,
            silver_value,
            total_assets,
            net_wealth,
            nisab_threshold,
            is_eligible,
            zakat_payable,
            calculation_trace: trace,
        }
    }
}
