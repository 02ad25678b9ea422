use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::card::{CardStats, CardTradeData, MintedCard, UserCollection};
use super::error::TradeError;
use crate::cards::{
    self, base_asset_checked, card_design, cosmic_trade_data, Direction, NameTables, TradeMetrics,
};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTrade {
    pub id: String,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub notional: f64,
    pub opened_at: DateTime<Utc>,
    pub wallet_address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTradeRequest {
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub notional: f64,
    pub wallet_address: String,
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseTradeRequest {
    #[serde(default)]
    pub trade_id: Option<String>,
    #[serde(default)]
    pub exit_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTrade {
    pub id: String,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    pub hold_time: u32, // days
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub card_id: String,
    pub status: TradeStatus,
    pub wallet_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseOutcome {
    pub closed_trade: ClosedTrade,
    pub card: MintedCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub wallet_address: String,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub win_rate: f64, // percent
    pub realized_pnl: f64,
    pub total_card_value: f64,
    pub max_drawdown: f64, // USD, from the cumulative P&L peak
    pub portfolio_value: Vec<f64>, // realized P&L plus value of cards held at that close
    pub profit_loss: Vec<f64>, // cumulative, one point per closed trade
    pub dates: Vec<String>,
}

/// Whole days between open and close, rounded up. A same-day close counts as one day.
pub fn hold_days(opened_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> u32 {
    let elapsed_ms = (closed_at - opened_at).num_milliseconds().abs();
    let days = (elapsed_ms + MS_PER_DAY - 1) / MS_PER_DAY;
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

pub fn roi_percent(entry_price: f64, exit_price: f64) -> f64 {
    (exit_price - entry_price) / entry_price * 100.0
}

/// In-memory store of open trades, closed trades and minted cards.
#[derive(Default)]
pub struct TradeLedger {
    open: DashMap<String, OpenTrade>,
    closed: DashMap<String, ClosedTrade>,
    cards: DashMap<String, Vec<MintedCard>>, // wallet (lowercase) -> cards
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_trade(
        &self,
        request: OpenTradeRequest,
        now: DateTime<Utc>,
    ) -> Result<OpenTrade, TradeError> {
        if base_asset_checked(&request.pair).is_none() {
            return Err(TradeError::InvalidPair(request.pair));
        }
        if !request.entry_price.is_finite() || request.entry_price <= 0.0 {
            return Err(TradeError::InvalidEntryPrice);
        }
        if !request.notional.is_finite() || request.notional <= 0.0 {
            return Err(TradeError::InvalidNotional);
        }
        if request.wallet_address.trim().is_empty() {
            return Err(TradeError::MissingWallet);
        }

        let trade = OpenTrade {
            id: format!("trade_{}", uuid::Uuid::new_v4().simple()),
            pair: request.pair,
            direction: request.direction,
            entry_price: request.entry_price,
            notional: request.notional,
            opened_at: request.opened_at.unwrap_or(now),
            wallet_address: request.wallet_address,
        };

        info!(
            "📝 Trade opened: {} {} {} @ {:.4} (${:.2})",
            trade.id, trade.pair, trade.direction, trade.entry_price, trade.notional
        );
        self.open.insert(trade.id.clone(), trade.clone());
        Ok(trade)
    }

    pub fn get_open(&self, trade_id: &str) -> Option<OpenTrade> {
        self.open.get(trade_id).map(|t| t.clone())
    }

    pub fn get_closed(&self, trade_id: &str) -> Option<ClosedTrade> {
        self.closed.get(trade_id).map(|t| t.clone())
    }

    /// Close an open trade at `exit_price` and mint its card.
    ///
    /// Inputs are validated before the trade is touched. The trade stays locked in
    /// the open set until its closed record exists, so it is closed at most once
    /// and is always visible as either open or closed.
    pub fn close_with_card<R: Rng + ?Sized>(
        &self,
        request: &CloseTradeRequest,
        closed_at: DateTime<Utc>,
        tables: &NameTables,
        rng: &mut R,
    ) -> Result<CloseOutcome, TradeError> {
        let trade_id = request
            .trade_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(TradeError::MissingTradeId)?;
        let exit_price = request
            .exit_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or(TradeError::InvalidExitPrice)?;

        // The entry holds the trade's shard lock until the close is recorded
        let entry = match self.open.entry(trade_id.to_string()) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => return Err(TradeError::NotFound(trade_id.to_string())),
        };
        let trade = entry.get().clone();

        let roi = roi_percent(trade.entry_price, exit_price);
        let days = hold_days(trade.opened_at, closed_at);
        let profit = roi / 100.0 * trade.notional;

        let metrics = TradeMetrics::new(roi, days, trade.notional, trade.direction, &trade.pair)
            .map_err(|e| {
                warn!("⚠️ Could not score trade {}: {}", trade.id, e);
                TradeError::from(e)
            })?;

        let metadata = cards::compute_card_metadata(&metrics, tables, rng);
        let card_id = format!("card-{}-{}", trade.id, closed_at.timestamp_millis());
        let design = card_design(metadata.rarity);

        let card = MintedCard {
            id: card_id.clone(),
            name: metadata.name.clone(),
            title: format!("{} {} Card", metadata.rarity, metrics.asset()),
            rarity: metadata.rarity,
            value: metadata.value,
            faction: "cosmic",
            stats: CardStats::from_trade(trade.direction, roi, metadata.value),
            description: format!(
                "Minted from {} {} trade. ROI: {:.2}%, Held: {} days",
                trade.pair, trade.direction, roi, days
            ),
            image_url: design.image_url.clone(),
            owner_address: trade.wallet_address.clone(),
            minted_at: closed_at,
            trading_pair: trade.pair.clone(),
            trade_data: Some(CardTradeData {
                trade_id: trade.id.clone(),
                pair: trade.pair.clone(),
                direction: trade.direction,
                entry_price: trade.entry_price,
                exit_price,
                roi_percent: roi,
                hold_days: days,
                profit,
            }),
            design: Some(design),
            cosmic: Some(cosmic_trade_data(&metrics, metadata.rarity, profit, rng)),
            order_id: None,
        };

        let closed_trade = ClosedTrade {
            id: trade.id.clone(),
            pair: trade.pair.clone(),
            direction: trade.direction,
            entry_price: trade.entry_price,
            exit_price,
            pnl: profit,
            pnl_percent: roi,
            hold_time: days,
            opened_at: trade.opened_at,
            closed_at,
            card_id,
            status: TradeStatus::Closed,
            wallet_address: trade.wallet_address.clone(),
        };

        info!(
            "✅ Trade closed and card minted: {} | {} {} {:.2}% ROI | {} ({}) ${:.2}",
            card.id, trade.pair, trade.direction, roi, card.name, card.rarity, card.value
        );

        self.closed.insert(closed_trade.id.clone(), closed_trade.clone());
        self.record_card(card.clone());
        entry.remove();

        Ok(CloseOutcome { closed_trade, card })
    }

    pub fn record_card(&self, card: MintedCard) {
        self.cards
            .entry(card.owner_address.to_lowercase())
            .or_default()
            .push(card);
    }

    pub fn collection(&self, wallet_address: &str) -> UserCollection {
        let cards = self
            .cards
            .get(&wallet_address.to_lowercase())
            .map(|c| c.clone())
            .unwrap_or_default();
        let total_value = cards.iter().map(|c| c.value).sum();

        UserCollection {
            wallet_address: wallet_address.to_string(),
            total_cards: cards.len(),
            total_value,
            cards,
        }
    }

    pub fn portfolio_stats(&self, wallet_address: &str) -> PortfolioStats {
        let wallet = wallet_address.to_lowercase();
        let mut trades: Vec<ClosedTrade> = self
            .closed
            .iter()
            .filter(|t| t.wallet_address.to_lowercase() == wallet)
            .map(|t| t.value().clone())
            .collect();
        trades.sort_by_key(|t| t.closed_at);

        let winning_trades = trades.iter().filter(|t| t.pnl > 0.0).count();
        let win_rate = if trades.is_empty() {
            0.0
        } else {
            winning_trades as f64 / trades.len() as f64 * 100.0
        };

        let collection = self.collection(wallet_address);
        let mut minted: Vec<(DateTime<Utc>, f64)> =
            collection.cards.iter().map(|c| (c.minted_at, c.value)).collect();
        minted.sort_by_key(|(at, _)| *at);

        let mut cumulative = 0.0;
        let mut peak = 0.0_f64;
        let mut max_drawdown = 0.0_f64;
        let mut card_value = 0.0;
        let mut next_card = 0;
        let mut portfolio_value = Vec::with_capacity(trades.len());
        let mut profit_loss = Vec::with_capacity(trades.len());
        let mut dates = Vec::with_capacity(trades.len());
        for trade in &trades {
            while next_card < minted.len() && minted[next_card].0 <= trade.closed_at {
                card_value += minted[next_card].1;
                next_card += 1;
            }
            cumulative += trade.pnl;
            peak = peak.max(cumulative);
            max_drawdown = max_drawdown.max(peak - cumulative);
            portfolio_value.push(cumulative + card_value);
            profit_loss.push(cumulative);
            dates.push(trade.closed_at.format("%Y-%m-%d").to_string());
        }

        PortfolioStats {
            wallet_address: wallet_address.to_string(),
            total_trades: trades.len(),
            winning_trades,
            win_rate,
            realized_pnl: cumulative,
            total_card_value: collection.total_value,
            max_drawdown,
            portfolio_value,
            profit_loss,
            dates,
        }
    }
}
