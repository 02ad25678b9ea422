//! Market data for the pairs the trading API can basket.
//!
//! The static source serves fixed tables; a live source would implement the
//! same trait against the venue's ticker endpoints.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPair {
    pub symbol: String,
    pub base: String,
    pub quote: String,
    pub price: f64,
    pub change24h: f64,
    pub volume24h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTicker {
    pub pair: String,
    pub price: f64,
    pub change24h: f64,
    pub volume24h: f64,
    pub high24h: f64,
    pub low24h: f64,
}

pub trait MarketData: Send + Sync {
    fn pairs(&self) -> Vec<TradingPair>;

    fn tickers(&self) -> Vec<MarketTicker>;

    fn ticker(&self, pair: &str) -> Option<MarketTicker>;

    /// Ticker for `pair`, or a synthetic one drawn from `rng` when the pair is unknown.
    fn ticker_or_synthetic(&self, pair: &str, rng: &mut dyn RngCore) -> MarketTicker {
        self.ticker(pair).unwrap_or_else(|| synthetic_ticker(pair, rng))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    pairs: Vec<TradingPair>,
    tickers: BTreeMap<String, MarketTicker>,
}

impl StaticMarketData {
    pub fn new(pairs: Vec<TradingPair>, tickers: Vec<MarketTicker>) -> Self {
        Self {
            pairs,
            tickers: tickers.into_iter().map(|t| (t.pair.clone(), t)).collect(),
        }
    }

    pub fn with_defaults() -> Self {
        let pair = |symbol: &str, price, change24h, volume24h| TradingPair {
            symbol: symbol.to_string(),
            base: symbol.to_string(),
            quote: "USD".to_string(),
            price,
            change24h,
            volume24h,
        };
        let ticker = |name: &str, price, change24h, volume24h, high24h, low24h| MarketTicker {
            pair: name.to_string(),
            price,
            change24h,
            volume24h,
            high24h,
            low24h,
        };

        Self::new(
            vec![
                pair("HYPE", 0.045, -2.15, 850_000.0),
                pair("ETH", 2450.89, 1.87, 50_000_000.0),
                pair("BTC", 43250.12, 0.95, 200_000_000.0),
                pair("SOL", 98.45, 3.21, 15_000_000.0),
                pair("AI", 2.35, -1.25, 500_000.0),
                pair("ML", 1.89, 4.56, 300_000.0),
                pair("DOGE", 0.089, 2.34, 800_000.0),
                pair("ARB", 1.45, -0.87, 200_000.0),
                pair("MATIC", 0.78, 1.12, 1_500_000.0),
                pair("LINK", 14.89, 0.45, 5_000_000.0),
                pair("UNI", 6.78, -0.23, 3_000_000.0),
            ],
            vec![
                ticker("HYPE-ETH", 245.32, 5.23, 1_250_000.0, 250.15, 230.89),
                ticker("HYPE", 0.045, -2.15, 850_000.0, 0.048, 0.043),
                ticker("ETH", 2450.89, 1.87, 50_000_000.0, 2500.12, 2400.45),
            ],
        )
    }
}

impl MarketData for StaticMarketData {
    fn pairs(&self) -> Vec<TradingPair> {
        self.pairs.clone()
    }

    fn tickers(&self) -> Vec<MarketTicker> {
        self.tickers.values().cloned().collect()
    }

    fn ticker(&self, pair: &str) -> Option<MarketTicker> {
        self.tickers.get(pair).cloned()
    }
}

pub fn synthetic_ticker<R: rand::Rng + ?Sized>(pair: &str, rng: &mut R) -> MarketTicker {
    let price = rng.random_range(100.0..1100.0);
    let low24h = price * rng.random_range(0.90..1.0);
    let high24h = price * rng.random_range(1.0..1.10);

    MarketTicker {
        pair: pair.to_string(),
        price,
        change24h: rng.random_range(-5.0..5.0),
        volume24h: rng.random_range(0.0..1_000_000.0),
        high24h,
        low24h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_tables() {
        let market = StaticMarketData::with_defaults();
        assert_eq!(market.pairs().len(), 11);
        assert_eq!(market.tickers().len(), 3);
        assert_eq!(market.ticker("ETH").unwrap().high24h, 2500.12);
        assert!(market.ticker("XRP").is_none());
    }

    #[test]
    fn test_synthetic_ticker_is_consistent() {
        let market = StaticMarketData::with_defaults();
        let mut rng = StdRng::seed_from_u64(11);
        let ticker = market.ticker_or_synthetic("XRP-ETH", &mut rng);

        assert_eq!(ticker.pair, "XRP-ETH");
        assert!(ticker.low24h <= ticker.price && ticker.price <= ticker.high24h);
        assert!((100.0..1100.0).contains(&ticker.price));
    }
}
