//! Character cards and the thematic basket trade each one executes when minted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{Basket, BasketOrder, OrderType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterTradeConfig {
    pub long: Vec<String>,
    pub short: Vec<String>,
    pub notional: f64,
    pub weights_long: Vec<f64>,
    pub weights_short: Vec<f64>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub limit_price: Option<f64>,
}

impl CharacterTradeConfig {
    pub fn basket(&self) -> Basket {
        Basket {
            long: self.long.clone(),
            short: self.short.clone(),
        }
    }

    pub fn order(&self) -> BasketOrder {
        BasketOrder {
            basket: self.basket(),
            weights_long: Some(self.weights_long.clone()),
            weights_short: (!self.short.is_empty()).then(|| self.weights_short.clone()),
            notional: self.notional,
            order_type: self.order_type,
            limit_price: self.limit_price,
        }
    }
}

/// Lookup table from character id to basket trade.
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    trades: BTreeMap<String, CharacterTradeConfig>,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            "nexus-prime",
            CharacterTradeConfig {
                long: vec!["HYPE".into(), "ARB".into()],
                short: vec!["ETH".into()],
                notional: 10.0,
                weights_long: vec![0.5, 0.5],
                weights_short: vec![1.0],
                order_type: OrderType::Market,
                limit_price: None,
            },
        );
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, config: CharacterTradeConfig) {
        self.trades.insert(id.into(), config);
    }

    pub fn get(&self, character_id: &str) -> Option<&CharacterTradeConfig> {
        self.trades.get(character_id)
    }

    pub fn available(&self) -> Vec<&str> {
        self.trades.keys().map(String::as_str).collect()
    }

    /// Resolve "nexus-prime", "Nexus Prime" or " NEXUS  PRIME " to a registered id.
    pub fn normalize(&self, input: &str) -> Option<String> {
        let lower = input.trim().to_lowercase();

        if self.trades.contains_key(&lower) {
            return Some(lower);
        }

        let hyphenated = lower.split_whitespace().collect::<Vec<_>>().join("-");
        if self.trades.contains_key(&hyphenated) {
            return Some(hyphenated);
        }

        self.trades
            .keys()
            .find(|key| {
                let key = key.to_lowercase();
                key == lower || key.replace('-', " ") == lower
            })
            .cloned()
    }
}

/// "nexus-prime" -> "Nexus Prime"
pub fn display_name(character_id: &str) -> String {
    character_id
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_variants() {
        let registry = CharacterRegistry::with_defaults();
        assert_eq!(registry.normalize("nexus-prime").as_deref(), Some("nexus-prime"));
        assert_eq!(registry.normalize("Nexus Prime").as_deref(), Some("nexus-prime"));
        assert_eq!(registry.normalize("  NEXUS   PRIME ").as_deref(), Some("nexus-prime"));
        assert_eq!(registry.normalize("voidweaver"), None);
    }

    #[test]
    fn test_default_trade() {
        let registry = CharacterRegistry::with_defaults();
        let config = registry.get("nexus-prime").unwrap();
        let order = config.order();
        assert_eq!(order.label(), "HYPE+ARB-ETH");
        assert_eq!(order.notional, 10.0);
        assert!(crate::pear::api::validate_order(&order).is_ok());
        assert_eq!(registry.available(), vec!["nexus-prime"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("nexus-prime"), "Nexus Prime");
        assert_eq!(display_name("voidweaver"), "Voidweaver");
    }
}
