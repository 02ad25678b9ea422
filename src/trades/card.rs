use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::cards::{CardDesign, CosmicTradeData, Direction, Rarity};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStats {
    pub long_position: u32,
    pub short_position: u32,
    pub leverage: u32,
    #[serde(rename = "marketIQ")]
    pub market_iq: u32,
}

impl CardStats {
    /// Stats for a card minted from a closed trade.
    pub fn from_trade(direction: Direction, roi_percent: f64, card_value: f64) -> Self {
        let (long_position, short_position) = match direction {
            Direction::Long => (80, 20),
            Direction::Short => (20, 80),
        };
        Self {
            long_position,
            short_position,
            leverage: ((roi_percent.abs() / 10.0).floor() as u32).min(100),
            market_iq: ((card_value / 100.0 * 10.0).floor() as u32).min(100),
        }
    }

    /// Random stats for a character card minted through a live trade.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            long_position: rng.random_range(50..100),
            short_position: rng.random_range(50..100),
            leverage: rng.random_range(70..100),
            market_iq: rng.random_range(80..100),
        }
    }
}

/// The trade a card was minted from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTradeData {
    pub trade_id: String,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub roi_percent: f64,
    pub hold_days: u32,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedCard {
    pub id: String,
    pub name: String,
    pub title: String,
    pub rarity: Rarity,
    pub value: f64,
    pub faction: &'static str,
    pub stats: CardStats,
    pub description: String,
    pub image_url: String,
    pub owner_address: String,
    pub minted_at: DateTime<Utc>,
    pub trading_pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_data: Option<CardTradeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<CardDesign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosmic: Option<CosmicTradeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCollection {
    pub wallet_address: String,
    pub cards: Vec<MintedCard>,
    pub total_cards: usize,
    pub total_value: f64,
}
