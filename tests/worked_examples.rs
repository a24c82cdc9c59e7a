use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakatly::core::types::round_money;
use zakatly::prelude::*;

#[test]
fn test_ten_grams_of_22k_gold() {
    let holdings = Holdings::new().with_gold(dec!(10), WeightUnit::Gram, Karat::K22);
    let result = holdings.calculate_zakat(&MarketRates::FALLBACK);

    assert_eq!(round_money(result.effective_gold_rate_per_gram), dec!(8708.33));
    assert_eq!(round_money(result.gold_value), dec!(87083.33));
    assert_eq!(round_money(result.net_wealth), dec!(87083.33));
    assert_eq!(result.nisab_threshold, dec!(76545));
    assert!(result.is_eligible);
    assert_eq!(round_money(result.zakat_payable), dec!(2177.08));
    assert_eq!(result.summary(), "Eligible - Due: 2177.08");
}

#[test]
fn test_debts_exceeding_cash() {
    let holdings = Holdings::new().with_cash(dec!(1000)).with_debts(dec!(5000));
    let result = holdings.calculate_zakat(&MarketRates::FALLBACK);

    assert_eq!(result.net_wealth, dec!(-4000));
    assert!(!result.is_eligible);
    assert_eq!(result.zakat_payable, Decimal::ZERO);
    assert_eq!(result.summary(), "Not Eligible - Due: 0.00");
}

#[test]
fn test_mixed_holdings_in_vori() {
    // 2 vori of 21K gold, 10 vori of silver, some cash and a loan.
    let rates = MarketRates::new(dec!(9600), dec!(120)).unwrap();
    let holdings = Holdings::new()
        .with_cash(dec!(25000))
        .with_gold(dec!(2), WeightUnit::Vori, Karat::K21)
        .with_silver(dec!(10), WeightUnit::Vori)
        .with_debts(dec!(15000));

    let result = ZakatEngine.compute(&rates, &holdings);

    // 9600 / 24 * 21 = 8400 per gram; 23.32 g
    assert_eq!(result.effective_gold_rate_per_gram, dec!(8400));
    assert_eq!(result.gold_value, dec!(195888));
    // 116.6 g * 120
    assert_eq!(result.silver_value, dec!(13992));
    assert_eq!(result.total_assets, dec!(234880));
    assert_eq!(result.net_wealth, dec!(219880));
    assert_eq!(result.nisab_threshold, dec!(73483.2));
    assert!(result.is_eligible);
    assert_eq!(result.zakat_payable, dec!(5497));
}

#[test]
fn test_negative_inputs_count_as_zero() {
    let holdings = Holdings::new()
        .with_cash(dec!(-100))
        .with_gold(-5, WeightUnit::Gram, Karat::K24)
        .with_debts("-20");

    let result = holdings.calculate_zakat(&MarketRates::FALLBACK);
    assert_eq!(result.total_assets, Decimal::ZERO);
    assert_eq!(result.net_wealth, Decimal::ZERO);
    assert!(!result.is_eligible);
}

#[test]
fn test_trace_mentions_every_stage() {
    let holdings = Holdings::new()
        .with_cash(dec!(100000))
        .with_silver(dec!(1), WeightUnit::Vori);
    let result = holdings.calculate_zakat(&MarketRates::FALLBACK);

    let explanation = result.explain();
    for label in ["Gold Value", "Silver Weight (grams)", "Total Assets", "Net Wealth", "Nisab Threshold", "Zakat Payable"] {
        assert!(explanation.contains(label), "missing '{}' in:\n{}", label, explanation);
    }
}
