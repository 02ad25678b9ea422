use serde::{Deserialize, Serialize};

/// Assets to go long and short in a single basket order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub long: Vec<String>,
    #[serde(default)]
    pub short: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Market,
    Limit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketOrder {
    #[serde(flatten)]
    pub basket: Basket,
    #[serde(default)]
    pub weights_long: Option<Vec<f64>>,
    #[serde(default)]
    pub weights_short: Option<Vec<f64>>,
    pub notional: f64,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub limit_price: Option<f64>,
}

impl BasketOrder {
    pub fn market(basket: Basket, notional: f64) -> Self {
        Self {
            basket,
            weights_long: None,
            weights_short: None,
            notional,
            order_type: OrderType::Market,
            limit_price: None,
        }
    }

    /// Weights for the long leg, equal split when none were given.
    pub fn long_weights(&self) -> Vec<f64> {
        self.weights_long
            .clone()
            .unwrap_or_else(|| equal_weights(self.basket.long.len()))
    }

    pub fn short_weights(&self) -> Vec<f64> {
        self.weights_short
            .clone()
            .unwrap_or_else(|| equal_weights(self.basket.short.len()))
    }

    /// "HYPE+ARB-ETH" style label used on minted cards.
    pub fn label(&self) -> String {
        basket_label(&self.basket)
    }
}

pub fn basket_label(basket: &Basket) -> String {
    let mut label = basket.long.join("+");
    if !basket.short.is_empty() {
        label.push('-');
        label.push_str(&basket.short.join("+"));
    }
    label
}

fn equal_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResult {
    pub order_id: String,
    pub status: String,
}
