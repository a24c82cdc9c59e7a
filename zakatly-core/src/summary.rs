//! Exportable summaries of a calculation.
//!
//! An exporter receives a [`ZakatSummary`] (the holdings, the result derived
//! from them, and when/at which rates it was computed) and writes a complete
//! document to any `io::Write`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::holdings::Holdings;
use crate::rates::{RateQuote, RateSource};
use crate::types::{ComputationResult, ZakatError, round_money};

pub const DEFAULT_CURRENCY: &str = "BDT";

/// Everything an exported document needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZakatSummary {
    pub date: NaiveDate,
    pub currency: String,
    pub quote: RateQuote,
    pub holdings: Holdings,
    pub result: ComputationResult,
}

impl ZakatSummary {
    pub fn new(date: NaiveDate, quote: RateQuote, holdings: Holdings, result: ComputationResult) -> Self {
        Self {
            date,
            currency: DEFAULT_CURRENCY.to_string(),
            quote,
            holdings,
            result,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn rate_source(&self) -> RateSource {
        self.quote.source()
    }
}

/// Renders a [`ZakatSummary`] into a document.
pub trait SummaryExporter {
    /// Suggested file name for the document.
    fn file_name(&self) -> &str;

    fn export(&self, summary: &ZakatSummary, out: &mut dyn Write) -> Result<(), ZakatError>;

    /// Convenience wrapper collecting the document into memory.
    fn export_to_vec(&self, summary: &ZakatSummary) -> Result<Vec<u8>, ZakatError> {
        let mut buf = Vec::new();
        self.export(summary, &mut buf)?;
        Ok(buf)
    }
}

/// Plain-text summary, one labelled figure per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSummaryExporter;

impl SummaryExporter for TextSummaryExporter {
    fn file_name(&self) -> &str {
        "Zakat_Summary.txt"
    }

    fn export(&self, summary: &ZakatSummary, out: &mut dyn Write) -> Result<(), ZakatError> {
        let cur = summary.currency.as_str();
        let h = &summary.holdings;
        let r = &summary.result;
        let rates = summary.quote.rates();
        let source = match summary.rate_source() {
            RateSource::Live => "live",
            RateSource::Manual => "manual",
            RateSource::Fallback => "default",
        };

        writeln!(out, "Zakat Summary - ZAKAT.LY")?;
        writeln!(out, "Date: {}", summary.date.format("%Y-%m-%d"))?;
        writeln!(
            out,
            "Rates ({}): Gold 24K {} {:.2}/g | Silver {} {:.2}/g",
            source,
            cur,
            round_money(rates.gold_price_per_gram_24k()),
            cur,
            round_money(rates.silver_price_per_gram()),
        )?;
        writeln!(out)?;
        writeln!(out, "Cash & Savings: {} {:.2}", cur, round_money(h.cash()))?;
        writeln!(
            out,
            "Gold: {} {} ({}) = {} {:.2}",
            h.gold_amount().normalize(),
            h.gold_unit().symbol(),
            h.gold_karat(),
            cur,
            round_money(r.gold_value),
        )?;
        writeln!(
            out,
            "Silver: {} {} = {} {:.2}",
            h.silver_amount().normalize(),
            h.silver_unit().symbol(),
            cur,
            round_money(r.silver_value),
        )?;
        writeln!(out, "Debts: {} {:.2}", cur, round_money(h.debts()))?;
        writeln!(out, "Net Wealth: {} {:.2}", cur, round_money(r.net_wealth))?;
        writeln!(out, "Nisab Threshold: {} {:.2}", cur, round_money(r.nisab_threshold))?;
        writeln!(
            out,
            "Status: {}",
            if r.is_eligible { "Eligible" } else { "Not Eligible" }
        )?;
        writeln!(out, "Total Zakat Payable: {} {}", cur, r.format_amount())?;
        Ok(())
    }
}

/// Pretty-printed JSON of the whole [`ZakatSummary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSummaryExporter;

impl SummaryExporter for JsonSummaryExporter {
    fn file_name(&self) -> &str {
        "Zakat_Summary.json"
    }

    fn export(&self, summary: &ZakatSummary, out: &mut dyn Write) -> Result<(), ZakatError> {
        serde_json::to_writer_pretty(&mut *out, summary)
            .map_err(|e| ZakatError::Export(format!("Failed to serialize summary: {}", e)))?;
        writeln!(out)?;
        Ok(())
    }
}
