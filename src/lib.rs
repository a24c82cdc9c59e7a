//! # Zakatly
//!
//! A precise Zakat calculator for cash, gold and silver.
//!
//! - Gold purity in karats (24K, 22K, 21K, 18K) with weights in grams or vori
//! - Silver-based Nisab (612.36 g) and the 2.5% rate
//! - Live gold/silver rates with automatic fallback to defaults
//! - Text and JSON summaries
//!
//! ```rust
//! use zakatly::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let holdings = Holdings::new()
//!     .with_cash(dec!(10000))
//!     .with_gold(dec!(10), WeightUnit::Gram, Karat::K22)
//!     .with_debts(dec!(2000));
//!
//! let result = holdings.calculate_zakat(&MarketRates::FALLBACK);
//! assert!(result.is_eligible);
//! println!("{}", result.summary());
//! ```

pub mod prelude;

pub use zakatly_core as core;
pub use zakatly_core::{
    ComputationResult, Holdings, MarketRates, NISAB_SILVER_GRAMS, RateQuote, RateSource, ZAKAT_RATE, ZakatEngine,
    ZakatError,
};

#[cfg(feature = "providers")]
pub use zakatly_providers as providers;
