use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::pear::{BasketExecutor, BasketOrder, ExecutionError, TradeResult};

/// Recent fills kept for inspection; older ones are dropped.
pub const DEFAULT_FILL_HISTORY: usize = 256;

/// Demo-mode executor: fills every order immediately without touching the venue.
pub struct PaperExecutor {
    fills: Mutex<VecDeque<BasketOrder>>,
    fill_history: usize,
    // Simulated venue rejection, for exercising the failure path
    reject_with: Option<(u16, String)>,
}

impl PaperExecutor {
    pub fn new() -> Self {
        Self::with_fill_history(DEFAULT_FILL_HISTORY)
    }

    pub fn with_fill_history(fill_history: usize) -> Self {
        Self {
            fills: Mutex::new(VecDeque::with_capacity(fill_history.min(DEFAULT_FILL_HISTORY))),
            fill_history,
            reject_with: None,
        }
    }

    /// An executor whose every submission fails with the given API status and body.
    pub fn rejecting(status: u16, body: impl Into<String>) -> Self {
        Self {
            reject_with: Some((status, body.into())),
            ..Self::new()
        }
    }

    /// Most recent fills, oldest first.
    pub fn fills(&self) -> Vec<BasketOrder> {
        self.fills
            .lock()
            .map(|fills| fills.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for PaperExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasketExecutor for PaperExecutor {
    async fn submit(&self, order: &BasketOrder) -> Result<TradeResult, ExecutionError> {
        if let Some((status, body)) = &self.reject_with {
            warn!("⚡ [PAPER] Rejecting basket {}: {}", order.label(), body);
            return Err(ExecutionError::Api {
                status: *status,
                body: body.clone(),
            });
        }

        info!(
            "📝 [PAPER] Basket filled: {} @ ${:.2}",
            order.label(),
            order.notional
        );
        if let Ok(mut fills) = self.fills.lock() {
            if self.fill_history > 0 {
                if fills.len() == self.fill_history {
                    fills.pop_front();
                }
                fills.push_back(order.clone());
            }
        }

        Ok(TradeResult {
            order_id: format!("paper-order-{}", uuid::Uuid::new_v4()),
            status: "filled".to_string(),
        })
    }
}
