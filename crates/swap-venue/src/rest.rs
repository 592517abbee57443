//! REST client for a Binance-style spot venue.
//!
//! Speaks the spot testnet surface the system was built against:
//! `GET /api/v3/depth` for snapshots and `POST /api/v3/order` for
//! market orders, api key in the `X-MBX-APIKEY` header.
//!
//! # Order placement is unsigned
//!
//! The venue requires a `timestamp` parameter and an HMAC-SHA256
//! request signature on `/api/v3/order`; this client does not carry a
//! secret key and sends neither, so its execution path only works
//! against endpoints that skip signature checks. Depth snapshots are
//! public and unaffected. Callers needing live execution must front
//! this client with a signing proxy or swap in an [`ExecutionProvider`]
//! that signs.

use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{VenueError, VenueResult};
use crate::provider::{BoxFuture, DepthProvider, ExecutionProvider};
use swap_core::{BookLevel, DepthSnapshot, ExecutionReport, Side};

/// Default timeout for venue requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the venue REST API.
#[derive(Debug, Clone)]
pub struct VenueRestConfig {
    /// Base URL, e.g. "https://testnet.binance.vision".
    pub base_url: String,
    /// API key sent with order placement.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl VenueRestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Raw depth response: string-encoded `[price, qty]` level arrays.
#[derive(Debug, Deserialize)]
struct RawDepth {
    asks: Vec<(String, String)>,
    bids: Vec<(String, String)>,
}

/// Raw order response. Only the fields the settlement path needs.
#[derive(Debug, Deserialize)]
struct RawOrder {
    #[serde(rename = "orderId")]
    order_id: u64,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "cummulativeQuoteQty")]
    cummulative_quote_qty: Option<String>,
}

/// Client implementing both venue providers over HTTP.
///
/// See the module docs for the signing limitation on order placement.
pub struct VenueRestClient {
    client: Client,
    config: VenueRestConfig,
}

impl VenueRestClient {
    /// Create a new client.
    pub fn new(config: VenueRestConfig) -> VenueResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VenueError::HttpClient(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    async fn fetch_depth(&self, symbol: &str, limit: u32) -> VenueResult<DepthSnapshot> {
        let url = format!("{}/api/v3/depth", self.config.base_url);
        debug!(symbol, limit, "Fetching depth snapshot");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("limit", &limit.to_string())])
            .send()
            .await
            .map_err(|e| VenueError::Transport(format!("depth request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VenueError::Rejected(format!("depth {status}: {body}")));
        }

        let raw: RawDepth = response
            .json()
            .await
            .map_err(|e| VenueError::Malformed(format!("depth body: {e}")))?;

        Ok(DepthSnapshot {
            asks: parse_levels(&raw.asks)?,
            bids: parse_levels(&raw.bids)?,
        })
    }

    async fn submit_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> VenueResult<ExecutionReport> {
        let url = format!("{}/api/v3/order", self.config.base_url);
        debug!(symbol, %side, %quantity, "Placing market order");

        let mut request = self.client.post(&url).query(&[
            ("symbol", symbol),
            ("side", side.as_str()),
            ("type", "MARKET"),
            ("quantity", &quantity.to_string()),
        ]);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        // Once the request is on the wire the outcome of a failure is
        // unknown; the order may have executed. Never map these onto a
        // retryable error.
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                VenueError::Transport(format!("order request not sent: {e}"))
            } else {
                warn!(symbol, %side, "Order outcome unknown: {e}");
                VenueError::AmbiguousOutcome(format!("order request failed: {e}"))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VenueError::Rejected(format!("order {status}: {body}")));
        }

        let raw: RawOrder = response
            .json()
            .await
            .map_err(|e| VenueError::AmbiguousOutcome(format!("order body unreadable: {e}")))?;

        let executed = raw
            .cummulative_quote_qty
            .as_deref()
            .ok_or_else(|| VenueError::Malformed("order response missing fill".to_string()))
            .and_then(parse_amount)?;

        if executed <= Decimal::ZERO {
            let status = raw.status.unwrap_or_default();
            return Err(VenueError::Rejected(format!(
                "order {id} not filled (status {status})",
                id = raw.order_id
            )));
        }

        Ok(ExecutionReport {
            order_ref: raw.order_id.to_string(),
            executed_subtotal: executed,
        })
    }
}

fn parse_levels(raw: &[(String, String)]) -> VenueResult<Vec<BookLevel>> {
    raw.iter()
        .map(|(price, qty)| {
            Ok(BookLevel {
                price: parse_amount(price)?,
                quantity: parse_amount(qty)?,
            })
        })
        .collect()
}

fn parse_amount(s: &str) -> VenueResult<Decimal> {
    s.parse()
        .map_err(|e| VenueError::Malformed(format!("bad decimal {s:?}: {e}")))
}

impl DepthProvider for VenueRestClient {
    fn depth(&self, symbol: &str, limit: u32) -> BoxFuture<'_, VenueResult<DepthSnapshot>> {
        let symbol = symbol.to_string();
        Box::pin(async move { self.fetch_depth(&symbol, limit).await })
    }
}

impl ExecutionProvider for VenueRestClient {
    fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> BoxFuture<'_, VenueResult<ExecutionReport>> {
        let symbol = symbol.to_string();
        Box::pin(async move { self.submit_market_order(&symbol, side, quantity).await })
    }
}
