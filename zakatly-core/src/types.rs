use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of arithmetic a [`CalculationStep`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Subtract,
    Multiply,
    Compare,
    Rate,
    Result,
    Info,
}

impl Operation {
    fn symbol(&self) -> &'static str {
        match self {
            Operation::Initial | Operation::Info => " ",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply | Operation::Rate => "x",
            Operation::Result => "=",
            Operation::Compare => "?",
        }
    }
}

/// Represents a single step in the Zakat calculation process.
///
/// The engine records one step per line of its algorithm so that a user can
/// verify how the payable amount was reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with(description: impl Into<String>, amount: Option<Decimal>, operation: Operation) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Initial)
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Add)
    }

    pub fn subtract(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Subtract)
    }

    pub fn multiply(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Multiply)
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Compare)
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with(description, Some(rate), Operation::Rate)
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Result)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::with(description, None, Operation::Info)
    }
}

/// Rounds a monetary amount to 2 decimal places, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The financial summary derived from one snapshot of rates and holdings.
///
/// A result is never patched: every change to the inputs produces a new one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputationResult {
    /// 24K price scaled to the selected karat.
    pub effective_gold_rate_per_gram: Decimal,
    pub gold_value: Decimal,
    pub silver_value: Decimal,
    /// Cash plus both metal valuations.
    pub total_assets: Decimal,
    /// Total assets minus debts. Negative when debts exceed assets.
    pub net_wealth: Decimal,
    /// Value of the silver Nisab at the current silver price.
    pub nisab_threshold: Decimal,
    /// Whether `net_wealth >= nisab_threshold` (inclusive).
    pub is_eligible: bool,
    pub zakat_payable: Decimal,
    /// Step-by-step trace of how this result was derived.
    pub calculation_trace: Vec<CalculationStep>,
}

impl ComputationResult {
    /// Returns the Zakat payable formatted with 2 decimal places.
    pub fn format_amount(&self) -> String {
        format!("{:.2}", round_money(self.zakat_payable))
    }

    /// Returns a concise status string.
    /// Format: "{Eligible/Not Eligible} - Due: {Amount}"
    pub fn summary(&self) -> String {
        let status = if self.is_eligible { "Eligible" } else { "Not Eligible" };
        format!("{} - Due: {}", status, self.format_amount())
    }

    /// Generates a human-readable, step-by-step explanation of the result.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let _ = writeln!(&mut output, "Zakat calculation:");
        let _ = writeln!(&mut output, "{:-<50}", "");

        let width = self
            .calculation_trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in &self.calculation_trace {
            match (step.operation, step.amount) {
                (Operation::Info, _) | (_, None) => {
                    let _ = writeln!(&mut output, "  INFO: {}", step.description);
                }
                (Operation::Rate, Some(amount)) => {
                    let _ = writeln!(
                        &mut output,
                        "  {:<width$} : {} {:>14.3}",
                        step.description,
                        step.operation.symbol(),
                        amount,
                    );
                }
                (operation, Some(amount)) => {
                    let _ = writeln!(
                        &mut output,
                        "  {:<width$} : {} {:>14.2}",
                        step.description,
                        operation.symbol(),
                        round_money(amount),
                    );
                }
            }
        }

        let _ = writeln!(&mut output, "{:-<50}", "");
        if self.is_eligible {
            let _ = writeln!(&mut output, "Status: ELIGIBLE");
            let _ = writeln!(&mut output, "Amount Due: {}", self.format_amount());
        } else {
            let _ = writeln!(&mut output, "Status: NOT ELIGIBLE");
        }

        output
    }
}

impl std::fmt::Display for ComputationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Net Wealth: {:.2} | Nisab: {:.2}",
            round_money(self.net_wealth),
            round_money(self.nisab_threshold)
        )?;
        if self.is_eligible {
            write!(f, "Status: ELIGIBLE ({} due)", self.format_amount())
        } else {
            write!(f, "Status: NOT ELIGIBLE")
        }
    }
}

/// Errors raised at the edges of the calculator.
///
/// The engine itself never fails; these come from input parsing, rate
/// validation, the price feed and exporters.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ZakatError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid {metal} rate: {value} (must be > 0 and <= 1000000000 per gram)")]
    InvalidRate { metal: String, value: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate feed error: {0}")]
    RateFeed(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ZakatError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ZakatError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ZakatError {
    fn from(e: std::io::Error) -> Self {
        ZakatError::Export(e.to_string())
    }
}
