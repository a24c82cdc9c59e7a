//! Terminal rendering of rates and results.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use zakatly_core::prelude::*;
use zakatly_core::types::round_money;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl Row {
    fn new(item: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            value: value.into(),
        }
    }
}

fn money(currency: &str, amount: rust_decimal::Decimal) -> String {
    format!("{} {:.2}", currency, round_money(amount))
}

pub fn render_rates(quote: &RateQuote, currency: &str) -> String {
    let rates = quote.rates();
    let source = match quote {
        RateQuote::Live { fetched_at, .. } => format!("live ({})", fetched_at.format("%Y-%m-%d %H:%M UTC")),
        RateQuote::Manual { .. } => "manual".to_string(),
        RateQuote::Fallback { reason, .. } => format!("default ({})", reason),
    };

    let rows = vec![
        Row::new("Gold 24K / gram", money(currency, rates.gold_price_per_gram_24k())),
        Row::new("Silver / gram", money(currency, rates.silver_price_per_gram())),
        Row::new("Nisab (612.36 g silver)", money(currency, ZakatEngine::nisab_threshold(rates))),
        Row::new("Source", source),
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_result(holdings: &Holdings, result: &ComputationResult, currency: &str) -> String {
    let status = if result.is_eligible {
        "ELIGIBLE".green().bold().to_string()
    } else {
        "NOT ELIGIBLE".red().bold().to_string()
    };

    let rows = vec![
        Row::new("Cash & Savings", money(currency, holdings.cash())),
        Row::new(
            format!(
                "Gold {} {} ({})",
                holdings.gold_amount().normalize(),
                holdings.gold_unit().symbol(),
                holdings.gold_karat()
            ),
            money(currency, result.gold_value),
        ),
        Row::new(
            format!(
                "Silver {} {}",
                holdings.silver_amount().normalize(),
                holdings.silver_unit().symbol()
            ),
            money(currency, result.silver_value),
        ),
        Row::new("Total Assets", money(currency, result.total_assets)),
        Row::new("Debts & Liabilities", money(currency, holdings.debts())),
        Row::new("Net Wealth", money(currency, result.net_wealth)),
        Row::new("Nisab Threshold", money(currency, result.nisab_threshold)),
        Row::new("Status", status),
        Row::new("Zakat Payable", format!("{} {}", currency, result.format_amount())),
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_table_lists_figures() {
        colored::control::set_override(false);
        let holdings = Holdings::new()
            .with_gold(10, WeightUnit::Gram, Karat::K22)
            .with_debts(83);
        let result = holdings.calculate_zakat(&MarketRates::FALLBACK);
        let table = render_result(&holdings, &result, "BDT");

        assert!(table.contains("Gold 10 g (22K)"));
        assert!(table.contains("BDT 87083.33"));
        assert!(table.contains("BDT 87000.33"));
        assert!(table.contains("ELIGIBLE"));
        assert!(table.contains("BDT 2175.01"));
    }

    #[test]
    fn test_rates_table_shows_fallback_reason() {
        colored::control::set_override(false);
        let table = render_rates(&RateQuote::fallback("offline mode"), "BDT");
        assert!(table.contains("BDT 9500.00"));
        assert!(table.contains("BDT 76545.00"));
        assert!(table.contains("default (offline mode)"));
    }

    #[test]
    fn test_rates_table_labels_manual_rates() {
        let quote = RateQuote::manual(MarketRates::new(12000, 130).unwrap());
        let table = render_rates(&quote, "BDT");
        assert!(table.contains("BDT 12000.00"));
        assert!(table.contains("manual"));
        assert!(!table.contains("live"));
    }
}
