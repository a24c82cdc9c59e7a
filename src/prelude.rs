//! Everything needed for a typical calculation.
//!
//! ```rust
//! use zakatly::prelude::*;
//! ```

pub use zakatly_core::prelude::*;

#[cfg(feature = "providers")]
pub use zakatly_providers::{RateProvider, StaticRateProvider, fetch_with_fallback};

#[cfg(feature = "live-pricing")]
pub use zakatly_providers::{GoldApiConfig, GoldApiRateProvider};
