//! Live rates from the GoldAPI (`goldapi.io`) REST service.
//!
//! Two requests are issued concurrently, one per metal:
//! `GET {base}/XAU/{currency}` and `GET {base}/XAG/{currency}`, both with an
//! `x-access-token` header. Gold is read from `price_gram_24k`, silver from
//! `price_gram`; a quote missing its field keeps the default rates.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use zakatly_core::rates::MarketRates;
use zakatly_core::types::ZakatError;

use crate::pricing::RateProvider;

pub const GOLDAPI_BASE_URL: &str = "https://www.goldapi.io/api";
pub const GOLD_SYMBOL: &str = "XAU";
pub const SILVER_SYMBOL: &str = "XAG";

/// Connection settings for [`GoldApiRateProvider`].
#[derive(Debug, Clone)]
pub struct GoldApiConfig {
    pub base_url: String,
    pub access_token: String,
    /// ISO currency code the prices are quoted in.
    pub currency: String,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout_seconds: Option<u64>,
}

impl GoldApiConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: GOLDAPI_BASE_URL.to_string(),
            access_token: access_token.into(),
            currency: zakatly_core::summary::DEFAULT_CURRENCY.to_string(),
            timeout_seconds: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// `{base}/{symbol}/{currency}` with any trailing slash on the base removed.
    pub fn metal_url(&self, symbol: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            symbol,
            self.currency.to_uppercase()
        )
    }
}

/// The subset of a GoldAPI response the calculator reads.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MetalQuote {
    #[serde(default)]
    price_gram_24k: Option<Decimal>,
    #[serde(default)]
    price_gram: Option<Decimal>,
    #[serde(default)]
    error: Option<String>,
}

impl MetalQuote {
    fn gold_per_gram(&self) -> Result<Decimal, ZakatError> {
        self.price_gram_24k
            .ok_or_else(|| missing_field(GOLD_SYMBOL, "price_gram_24k", self.error.as_deref()))
    }

    fn silver_per_gram(&self) -> Result<Decimal, ZakatError> {
        self.price_gram
            .ok_or_else(|| missing_field(SILVER_SYMBOL, "price_gram", self.error.as_deref()))
    }
}

fn missing_field(symbol: &str, field: &str, api_error: Option<&str>) -> ZakatError {
    match api_error {
        Some(msg) => ZakatError::RateFeed(format!("{} quote has no '{}': {}", symbol, field, msg)),
        None => ZakatError::RateFeed(format!("{} quote has no '{}'", symbol, field)),
    }
}

/// Builds validated rates from the two metal quotes.
pub(crate) fn rates_from_quotes(gold: &MetalQuote, silver: &MetalQuote) -> Result<MarketRates, ZakatError> {
    let rates = MarketRates::new(gold.gold_per_gram()?, silver.silver_per_gram()?)
        .map_err(|e| ZakatError::RateFeed(format!("feed returned unusable prices: {}", e)))?;
    Ok(rates)
}

/// Fetches gold and silver rates from GoldAPI.
pub struct GoldApiRateProvider {
    client: reqwest::Client,
    config: GoldApiConfig,
}

impl GoldApiRateProvider {
    pub fn new(config: GoldApiConfig) -> Result<Self, ZakatError> {
        if config.access_token.trim().is_empty() {
            return Err(ZakatError::Configuration("GoldAPI access token is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ZakatError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GoldApiConfig {
        &self.config
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<MetalQuote, ZakatError> {
        let url = self.config.metal_url(symbol);
        debug!(%url, "requesting metal quote");

        let response = self
            .client
            .get(&url)
            .header("x-access-token", &self.config.access_token)
            .send()
            .await
            .map_err(|e| ZakatError::Network(format!("GoldAPI {} request failed: {}", symbol, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<MetalQuote>(&body)
                .ok()
                .and_then(|q| q.error)
                .unwrap_or(body);
            return Err(ZakatError::RateFeed(format!(
                "GoldAPI {} returned HTTP {}: {}",
                symbol,
                status.as_u16(),
                detail
            )));
        }

        response
            .json::<MetalQuote>()
            .await
            .map_err(|e| ZakatError::RateFeed(format!("Failed to parse GoldAPI {} response: {}", symbol, e)))
    }
}

#[async_trait::async_trait]
impl RateProvider for GoldApiRateProvider {
    async fn fetch_rates(&self) -> Result<MarketRates, ZakatError> {
        let (gold, silver) =
            futures::future::try_join(self.fetch_quote(GOLD_SYMBOL), self.fetch_quote(SILVER_SYMBOL)).await?;
        rates_from_quotes(&gold, &silver)
    }

    fn name(&self) -> &str {
        "goldapi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::fetch_with_fallback;
    use rust_decimal_macros::dec;

    fn quote(json: &str) -> MetalQuote {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_metal_url() {
        let config = GoldApiConfig::new("token").with_base_url("http://localhost:8080/api/").with_currency("usd");
        assert_eq!(config.metal_url(GOLD_SYMBOL), "http://localhost:8080/api/XAU/USD");
        assert_eq!(GoldApiConfig::new("t").metal_url(SILVER_SYMBOL), "https://www.goldapi.io/api/XAG/BDT");
    }

    #[test]
    fn test_parses_feed_numbers() {
        let gold = quote(r#"{"metal":"XAU","currency":"BDT","price":295000.5,"price_gram_24k":9484.62,"price_gram_22k":8694.24}"#);
        let silver = quote(r#"{"metal":"XAG","currency":"BDT","price_gram":118.4}"#);
        let rates = rates_from_quotes(&gold, &silver).unwrap();
        assert_eq!(rates.gold_price_per_gram_24k(), dec!(9484.62));
        assert_eq!(rates.silver_price_per_gram(), dec!(118.4));
    }

    #[test]
    fn test_silver_requires_price_gram() {
        let gold = quote(r#"{"price_gram_24k":9500}"#);
        let silver = quote(r#"{"price_gram_24k":121.7}"#);
        let err = rates_from_quotes(&gold, &silver).unwrap_err();
        assert!(matches!(err, ZakatError::RateFeed(ref m) if m.contains("price_gram")));
    }

    #[test]
    fn test_missing_fields_are_errors() {
        let gold = quote(r#"{"error":"Invalid API Key"}"#);
        let silver = quote(r#"{"price_gram":120}"#);
        let err = rates_from_quotes(&gold, &silver).unwrap_err();
        assert!(matches!(err, ZakatError::RateFeed(ref m) if m.contains("Invalid API Key")));

        let silver_missing = quote(r#"{}"#);
        assert!(rates_from_quotes(&quote(r#"{"price_gram_24k":9500}"#), &silver_missing).is_err());
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let gold = quote(r#"{"price_gram_24k":0}"#);
        let silver = quote(r#"{"price_gram":120}"#);
        assert!(rates_from_quotes(&gold, &silver).is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(GoldApiRateProvider::new(GoldApiConfig::new("  ")).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_feed_falls_back() {
        let config = GoldApiConfig::new("token")
            .with_base_url("http://127.0.0.1:9/api")
            .with_timeout_seconds(Some(5));
        let provider = GoldApiRateProvider::new(config).unwrap();

        let quote = fetch_with_fallback(&provider).await;
        assert!(!quote.is_live());
        assert_eq!(quote.rates(), &MarketRates::FALLBACK);
    }

    /// Serves every connection with the same canned HTTP response.
    async fn canned_feed(status: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{}/api", addr)
    }

    fn provider_at(base_url: String) -> GoldApiRateProvider {
        GoldApiRateProvider::new(
            GoldApiConfig::new("token")
                .with_base_url(base_url)
                .with_timeout_seconds(Some(5)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_http_error_detail_reaches_fallback_reason() {
        let base = canned_feed("403 Forbidden", r#"{"error":"Invalid API Key"}"#).await;
        let provider = provider_at(base);

        let err = provider.fetch_rates().await.unwrap_err();
        assert!(matches!(err, ZakatError::RateFeed(_)));

        let quote = fetch_with_fallback(&provider).await;
        match quote {
            zakatly_core::rates::RateQuote::Fallback { rates, reason } => {
                assert_eq!(rates, MarketRates::FALLBACK);
                assert!(reason.contains("HTTP 403"), "reason: {}", reason);
                assert!(reason.contains("Invalid API Key"), "reason: {}", reason);
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let base = canned_feed("200 OK", "<html>maintenance</html>").await;
        let provider = provider_at(base);

        let err = provider.fetch_rates().await.unwrap_err();
        assert!(matches!(err, ZakatError::RateFeed(ref m) if m.contains("Failed to parse GoldAPI")));

        let quote = fetch_with_fallback(&provider).await;
        assert!(!quote.is_live());
        assert_eq!(quote.rates(), &MarketRates::FALLBACK);
    }

    #[tokio::test]
    #[ignore] // needs network access and a real token in ZAKATLY_GOLDAPI_TOKEN
    async fn test_goldapi_live() {
        let token = std::env::var("ZAKATLY_GOLDAPI_TOKEN").expect("token not set");
        let provider = GoldApiRateProvider::new(GoldApiConfig::new(token)).unwrap();
        let rates = provider.fetch_rates().await.expect("Failed to fetch live rates");
        assert!(rates.gold_price_per_gram_24k() > Decimal::ZERO);
    }
}
