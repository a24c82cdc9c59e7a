use colored::Colorize;
use inquire::{Select, Text};
use zakatly_core::prelude::*;

/// Runs the guided calculator form.
///
/// Each answer is applied to `session` and the recomputed status is printed
/// straight away.
pub fn run_wizard_mode(session: &mut CalculatorSession) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n{}", "ZAKAT CALCULATOR".bright_cyan().bold());
    println!("{}", "Leave a field empty for zero. Press Ctrl+C at any time to exit.".dimmed());
    println!();

    let cash = amount_prompt("Cash & Savings:")?;
    report(&session.set_field_text(AmountField::Cash, &cash));

    println!("\n{}", "--- Gold ---".bright_yellow());
    let gold = amount_prompt("Gold weight:")?;
    report(&session.set_field_text(AmountField::Gold, &gold));
    if !session.holdings().gold_amount().is_zero() {
        let unit = Select::new("Gold unit:", vec![WeightUnit::Gram, WeightUnit::Vori]).prompt()?;
        session.set_gold_unit(unit);
        let karat = Select::new("Purity (Karat):", vec![Karat::K24, Karat::K22, Karat::K21, Karat::K18]).prompt()?;
        report(&session.set_gold_karat(karat));
    }

    println!("\n{}", "--- Silver ---".bright_white());
    let silver = amount_prompt("Silver weight:")?;
    report(&session.set_field_text(AmountField::Silver, &silver));
    if !session.holdings().silver_amount().is_zero() {
        let unit = Select::new("Silver unit:", vec![WeightUnit::Gram, WeightUnit::Vori]).prompt()?;
        report(&session.set_silver_unit(unit));
    }

    println!("\n{}", "--- Liabilities ---".bright_red());
    let debts = amount_prompt("Debts & Liabilities:")?;
    report(&session.set_field_text(AmountField::Debts, &debts));

    println!("\n{}", "Form complete.".bold());
    Ok(())
}

fn amount_prompt(label: &str) -> Result<String, inquire::InquireError> {
    Text::new(label)
        .with_placeholder("0.00")
        .with_help_message("Negative or non-numeric values count as zero")
        .prompt()
}

fn report(result: &ComputationResult) {
    let line = format!("  -> {}", result.summary());
    if result.is_eligible {
        println!("{}", line.green());
    } else {
        println!("{}", line.dimmed());
    }
}
