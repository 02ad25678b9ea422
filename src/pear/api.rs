use async_trait::async_trait;
use thiserror::Error;

use super::types::{Basket, BasketOrder, TradeResult};

/// Weights must sum to 1.0 within this tolerance.
const WEIGHT_TOLERANCE: f64 = 0.01;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Long basket is required and must be a non-empty array")]
    EmptyLongBasket,

    #[error("Notional value is required and must be greater than 0")]
    InvalidNotional,

    #[error("{leg} weights must match asset count and sum to 1.0")]
    InvalidWeights { leg: &'static str },

    #[error("Limit orders require a positive limitPrice")]
    MissingLimitPrice,

    #[error("Pear API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid Pear API URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ExecutionError {
    /// True when the order was rejected before reaching the trading API.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExecutionError::EmptyLongBasket
                | ExecutionError::InvalidNotional
                | ExecutionError::InvalidWeights { .. }
                | ExecutionError::MissingLimitPrice
        )
    }
}

/// Executes basket trades against a trading venue.
#[async_trait]
pub trait BasketExecutor: Send + Sync {
    /// Submit a validated basket order.
    async fn submit(&self, order: &BasketOrder) -> Result<TradeResult, ExecutionError>;

    /// Validate and execute a market basket trade for `notional` USD.
    async fn execute_basket_trade(
        &self,
        basket: Basket,
        notional: f64,
    ) -> Result<TradeResult, ExecutionError> {
        let order = BasketOrder::market(basket, notional);
        validate_order(&order)?;
        self.submit(&order).await
    }

    async fn execute_order(&self, order: &BasketOrder) -> Result<TradeResult, ExecutionError> {
        validate_order(order)?;
        self.submit(order).await
    }
}

pub fn validate_order(order: &BasketOrder) -> Result<(), ExecutionError> {
    if order.basket.long.is_empty() {
        return Err(ExecutionError::EmptyLongBasket);
    }
    if !order.notional.is_finite() || order.notional <= 0.0 {
        return Err(ExecutionError::InvalidNotional);
    }
    if let Some(weights) = &order.weights_long {
        check_weights(weights, order.basket.long.len(), "Long")?;
    }
    if !order.basket.short.is_empty() {
        if let Some(weights) = &order.weights_short {
            check_weights(weights, order.basket.short.len(), "Short")?;
        }
    }
    if order.order_type == super::types::OrderType::Limit
        && !order.limit_price.is_some_and(|p| p > 0.0)
    {
        return Err(ExecutionError::MissingLimitPrice);
    }
    Ok(())
}

fn check_weights(weights: &[f64], assets: usize, leg: &'static str) -> Result<(), ExecutionError> {
    let sum: f64 = weights.iter().sum();
    if weights.len() != assets || (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ExecutionError::InvalidWeights { leg });
    }
    Ok(())
}
