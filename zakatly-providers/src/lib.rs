//! # zakatly-providers
//!
//! Where the calculator's market rates come from. [`RateProvider`] is the seam;
//! [`fetch_with_fallback`] is the only call site most applications need.

pub mod pricing;

#[cfg(feature = "live-pricing")]
pub mod goldapi;

pub use pricing::{RateProvider, StaticRateProvider, fetch_with_fallback};

#[cfg(feature = "live-pricing")]
pub use goldapi::{GOLDAPI_BASE_URL, GoldApiConfig, GoldApiRateProvider};
