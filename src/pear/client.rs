use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use super::api::{BasketExecutor, ExecutionError};
use super::types::{BasketOrder, OrderType, TradeResult};
use crate::config::PearConfig;

/// HTTP client for the Pear Protocol basket-trading API.
pub struct PearClient {
    http_client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
    client_id: String,
    slippage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetWeight<'a> {
    asset: &'a str,
    weight: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionRequest<'a> {
    long_assets: Vec<AssetWeight<'a>>,
    short_assets: Vec<AssetWeight<'a>>,
    usd_value: f64,
    execution_type: &'static str,
    slippage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionResponse {
    #[serde(alias = "id")]
    order_id: String,
    #[serde(default = "default_status")]
    status: String,
}

fn default_status() -> String {
    "submitted".to_string()
}

impl PearClient {
    pub fn new(config: &PearConfig) -> Result<Self, ExecutionError> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        // Url::join replaces the last path segment unless the base ends with '/'
        let mut raw = config.api_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;

        if config.access_token.is_none() {
            warn!("⚠️ PEAR_ACCESS_TOKEN not set - Pear API calls will be unauthenticated");
        }

        Ok(Self {
            http_client,
            base_url,
            access_token: config.access_token.clone(),
            client_id: config.client_id.clone(),
            slippage: config.slippage,
        })
    }

    fn position_request<'a>(&self, order: &'a BasketOrder) -> PositionRequest<'a> {
        let weigh = |assets: &'a [String], weights: Vec<f64>| {
            assets
                .iter()
                .zip(weights)
                .map(|(asset, weight)| AssetWeight { asset, weight })
                .collect::<Vec<_>>()
        };

        PositionRequest {
            long_assets: weigh(order.basket.long.as_slice(), order.long_weights()),
            short_assets: weigh(order.basket.short.as_slice(), order.short_weights()),
            usd_value: order.notional,
            execution_type: match order.order_type {
                OrderType::Market => "MARKET",
                OrderType::Limit => "TRIGGER",
            },
            slippage: self.slippage,
            trigger_value: order.limit_price,
        }
    }
}

#[async_trait]
impl BasketExecutor for PearClient {
    async fn submit(&self, order: &BasketOrder) -> Result<TradeResult, ExecutionError> {
        let url = self.base_url.join("positions")?;
        let body = self.position_request(order);

        info!(
            "🍐 Submitting basket {} (${:.2}) to Pear",
            order.label(),
            order.notional
        );
        debug!(?body, "Pear position request");

        let mut request = self
            .http_client
            .post(url)
            .header("x-client-id", &self.client_id)
            .json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("❌ Pear API error {}: {}", status, body);
            return Err(ExecutionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PositionResponse = response.json().await?;
        info!("✅ Pear order accepted: {} ({})", parsed.order_id, parsed.status);

        Ok(TradeResult {
            order_id: parsed.order_id,
            status: parsed.status,
        })
    }
}
