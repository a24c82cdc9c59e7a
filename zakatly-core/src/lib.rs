//! # zakatly-core
//!
//! Value types and arithmetic for the Zakat calculator: market rates, holdings,
//! unit conversion, the [`engine::ZakatEngine`], a form-like
//! [`session::CalculatorSession`] and summary exporters.

pub mod engine;
pub mod holdings;
pub mod inputs;
pub mod prelude;
pub mod rates;
pub mod session;
pub mod summary;
pub mod traits;
pub mod types;
pub mod units;

pub use engine::{NISAB_SILVER_GRAMS, ZAKAT_RATE, ZakatEngine};
pub use holdings::Holdings;
pub use rates::{MarketRates, RateQuote, RateSource};
pub use types::{ComputationResult, ZakatError};
