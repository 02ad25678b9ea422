use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Card rarity tiers, ordered from least to most valuable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// Value multiplier applied to the trade's absolute profit.
    pub fn multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.2,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
            Rarity::Mythic => 5.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Mythic => "MYTHIC",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("roiPercent must be a finite number, got {0}")]
    NonFiniteRoi(f64),

    #[error("notionalUSD must be a positive finite number, got {0}")]
    InvalidNotional(f64),
}

/// Outcome of a closed trade, as fed into the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetrics {
    pub roi_percent: f64, // signed: + for profit, - for loss
    pub hold_days: u32,
    #[serde(rename = "notionalUSD")]
    pub notional_usd: f64,
    pub direction: Direction,
    pub pair: String, // e.g. "BTC/USD"
}

impl TradeMetrics {
    /// Build metrics for a closed trade, rejecting values the scorer is not defined for.
    pub fn new(
        roi_percent: f64,
        hold_days: u32,
        notional_usd: f64,
        direction: Direction,
        pair: impl Into<String>,
    ) -> Result<Self, MetricsError> {
        if !roi_percent.is_finite() {
            return Err(MetricsError::NonFiniteRoi(roi_percent));
        }
        if !notional_usd.is_finite() || notional_usd <= 0.0 {
            return Err(MetricsError::InvalidNotional(notional_usd));
        }

        Ok(Self {
            roi_percent,
            hold_days,
            notional_usd,
            direction,
            pair: pair.into(),
        })
    }

    pub fn is_win(&self) -> bool {
        self.roi_percent > 0.0
    }

    /// Base asset of the pair ("BTC" for "BTC/USD").
    pub fn asset(&self) -> &str {
        base_asset(&self.pair)
    }
}

pub fn base_asset(pair: &str) -> &str {
    pair.split('/').next().unwrap_or(pair)
}

/// Base asset of a well-formed "BASE/QUOTE" pair.
pub fn base_asset_checked(pair: &str) -> Option<&str> {
    match pair.split_once('/') {
        Some((base, quote)) if !base.is_empty() && !quote.is_empty() => Some(base),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMetadata {
    pub rarity: Rarity,
    pub value: f64, // USD, never below the $10 floor
    pub name: String,
}
