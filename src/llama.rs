//! DefiLlama API Integration
//!
//! Fetches historical TVL for a protocol slug and validates it into a
//! [`TvlSeries`].
//!
//! ## API Reference
//!
//! Endpoint: https://api.llama.fi/protocol/{slug}
//! Returns: protocol object whose `tvl` field is an array of
//! `{ "date": <unix seconds>, "totalLiquidityUSD": <float> }`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sol_adoption::llama::{DefiLlamaClient, TvlSource};
//!
//! let client = DefiLlamaClient::new(&config)?;
//! match client.fetch_tvl("orca").await {
//!     SeriesLookup::Available(series) => println!("{} points", series.len()),
//!     SeriesLookup::NoData(reason) => println!("no data: {}", reason),
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::series::{NoDataReason, SeriesLookup, TvlPoint, TvlSeries};

/// Anything that can produce a protocol's TVL history
///
/// Implementations never fail: every problem is reported as
/// [`SeriesLookup::NoData`].
#[async_trait]
pub trait TvlSource: Send + Sync {
    async fn fetch_tvl(&self, slug: &str) -> SeriesLookup;

    /// Source name for logging
    fn source_name(&self) -> &'static str;
}

/// HTTP client for the DefiLlama protocol endpoint
pub struct DefiLlamaClient {
    client: reqwest::Client,
    api_base: String,
}

impl DefiLlamaClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn protocol_url(&self, slug: &str) -> String {
        format!("{}/protocol/{}", self.api_base, slug)
    }

    /// Fetch and validate one protocol's TVL history
    ///
    /// # Returns
    /// * `Ok(TvlSeries)` - non-empty, date-ordered series
    /// * `Err(NoDataReason)` - HTTP, transport or payload problem
    pub async fn fetch_protocol_tvl(&self, slug: &str) -> Result<TvlSeries, NoDataReason> {
        if slug.trim().is_empty() {
            return Err(NoDataReason::EmptySlug);
        }

        let url = self.protocol_url(slug);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NoDataReason::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NoDataReason::HttpStatus(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| NoDataReason::Transport(e.to_string()))?;

        parse_tvl_payload(&body)
    }
}

#[async_trait]
impl TvlSource for DefiLlamaClient {
    async fn fetch_tvl(&self, slug: &str) -> SeriesLookup {
        let result = self.fetch_protocol_tvl(slug).await;
        match &result {
            Ok(series) => log::debug!("{}: {} TVL points", slug, series.len()),
            Err(reason) => log::warn!("⚠️  No TVL data for {}: {}", slug, reason),
        }
        result.into()
    }

    fn source_name(&self) -> &'static str {
        "defillama"
    }
}

/// Validate a `/protocol/{slug}` response body
pub fn parse_tvl_payload(body: &[u8]) -> Result<TvlSeries, NoDataReason> {
    let root: Value = serde_json::from_slice(body)
        .map_err(|e| NoDataReason::MalformedPayload(e.to_string()))?;

    let entries = root
        .get("tvl")
        .and_then(Value::as_array)
        .ok_or(NoDataReason::MissingTvlField)?;

    if entries.is_empty() {
        return Err(NoDataReason::EmptySeries);
    }

    let mut points = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let tvl = entry
            .get("totalLiquidityUSD")
            .and_then(Value::as_f64)
            .ok_or(NoDataReason::MissingLiquidity { index })?;

        let point = entry
            .get("date")
            .and_then(epoch_seconds)
            .and_then(|ts| TvlPoint::from_unix(ts, tvl))
            .ok_or(NoDataReason::InvalidDate { index })?;

        points.push(point);
    }

    TvlSeries::new(points).ok_or(NoDataReason::EmptySeries)
}

// Integer Unix seconds only; floats and strings are rejected
fn epoch_seconds(value: &Value) -> Option<i64> {
    value.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_payload() {
        let body = br#"{
            "name": "Orca",
            "tvl": [
                {"date": 1700086400, "totalLiquidityUSD": 210.5},
                {"date": 1700000000, "totalLiquidityUSD": 200}
            ]
        }"#;

        let series = parse_tvl_payload(body).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first().total_liquidity_usd, 200.0);
        assert_eq!(series.latest().total_liquidity_usd, 210.5);
        assert_eq!(series.latest().date.timestamp(), 1_700_086_400);
    }

    #[test]
    fn test_missing_tvl_field() {
        assert_eq!(
            parse_tvl_payload(br#"{"name": "Orca"}"#),
            Err(NoDataReason::MissingTvlField)
        );
        assert_eq!(
            parse_tvl_payload(br#"{"tvl": 12.0}"#),
            Err(NoDataReason::MissingTvlField)
        );
    }

    #[test]
    fn test_empty_tvl_list() {
        assert_eq!(parse_tvl_payload(br#"{"tvl": []}"#), Err(NoDataReason::EmptySeries));
    }

    #[test]
    fn test_missing_liquidity_column() {
        let body = br#"{"tvl": [{"date": 1700000000, "totalLiquidityUSD": 1.0}, {"date": 1700086400}]}"#;
        assert_eq!(
            parse_tvl_payload(body),
            Err(NoDataReason::MissingLiquidity { index: 1 })
        );

        let body = br#"{"tvl": [{"date": 1700000000, "totalLiquidityUSD": "lots"}]}"#;
        assert_eq!(
            parse_tvl_payload(body),
            Err(NoDataReason::MissingLiquidity { index: 0 })
        );
    }

    #[test]
    fn test_invalid_date() {
        let body = br#"{"tvl": [{"date": null, "totalLiquidityUSD": 1.0}]}"#;
        assert_eq!(parse_tvl_payload(body), Err(NoDataReason::InvalidDate { index: 0 }));
    }

    #[test]
    fn test_non_integer_date_rejected() {
        let body = br#"{"tvl": [{"date": "1700000000", "totalLiquidityUSD": 1.0}]}"#;
        assert_eq!(parse_tvl_payload(body), Err(NoDataReason::InvalidDate { index: 0 }));

        let body = br#"{"tvl": [
            {"date": 1700000000, "totalLiquidityUSD": 1.0},
            {"date": 1700086400.5, "totalLiquidityUSD": 2.0}
        ]}"#;
        assert_eq!(parse_tvl_payload(body), Err(NoDataReason::InvalidDate { index: 1 }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_tvl_payload(br#"{"tvl": ["#),
            Err(NoDataReason::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_slug_skips_request() {
        let client = DefiLlamaClient::new(&DashboardConfig::default()).unwrap();
        assert_eq!(
            client.fetch_tvl("  ").await,
            SeriesLookup::NoData(NoDataReason::EmptySlug)
        );
    }

    #[tokio::test]
    #[ignore] // Run only when testing with live API
    async fn test_fetch_live_protocol() {
        let client = DefiLlamaClient::new(&DashboardConfig::default()).unwrap();

        let series = client.fetch_protocol_tvl("orca").await.unwrap();
        assert!(series.len() > 14);
        assert!(series.latest().total_liquidity_usd > 0.0);
    }
}
