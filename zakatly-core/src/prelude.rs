//! Prelude module for zakatly-core.
//!
//! ```rust
//! use zakatly_core::prelude::*;
//! ```

pub use crate::engine::{NISAB_SILVER_GRAMS, ZAKAT_RATE, ZakatEngine};
pub use crate::holdings::Holdings;
pub use crate::inputs::{IntoZakatDecimal, parse_amount_lenient};
pub use crate::rates::{MarketRates, RateQuote, RateSource};
pub use crate::session::{AmountField, CalculatorSession};
pub use crate::summary::{JsonSummaryExporter, SummaryExporter, TextSummaryExporter, ZakatSummary};
pub use crate::traits::CalculateZakat;
pub use crate::types::{CalculationStep, ComputationResult, ZakatError};
pub use crate::units::{GRAMS_PER_VORI, Karat, WeightUnit};
