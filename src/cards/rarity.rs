//! Card rarity and value scoring.
//!
//! A trade's score is the sum of four components:
//! - ROI score (0-50 points): `min(|roi|, 100) * 0.5`
//! - Duration score (0-20 points): one point per day held, capped at 20
//! - Size score (0-20 points): one point per $100 notional, capped at 20
//! - Win bonus (0 or 10 points)
//!
//! Losing trades score on the magnitude of their ROI, so a large loss can reach
//! the same tier as an equally large win (minus the win bonus).

use serde::Serialize;

use super::types::{Rarity, TradeMetrics};

pub const MIN_CARD_VALUE: f64 = 10.0;

/// Inclusive lower bounds, highest tier first.
const THRESHOLDS: [(f64, Rarity); 4] = [
    (90.0, Rarity::Mythic),
    (70.0, Rarity::Legendary),
    (50.0, Rarity::Epic),
    (30.0, Rarity::Rare),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub roi_score: f64,
    pub duration_score: f64,
    pub size_score: f64,
    pub win_bonus: f64,
}

impl ScoreBreakdown {
    pub fn from_metrics(metrics: &TradeMetrics) -> Self {
        Self {
            roi_score: metrics.roi_percent.abs().min(100.0) * 0.5,
            duration_score: f64::from(metrics.hold_days.min(20)),
            size_score: (metrics.notional_usd / 100.0).min(20.0),
            win_bonus: if metrics.is_win() { 10.0 } else { 0.0 },
        }
    }

    #[inline(always)]
    pub fn total(&self) -> f64 {
        self.roi_score + self.duration_score + self.size_score + self.win_bonus
    }

    pub fn rarity(&self) -> Rarity {
        rarity_for_score(self.total())
    }
}

#[inline(always)]
pub fn rarity_for_score(total_score: f64) -> Rarity {
    THRESHOLDS
        .iter()
        .find(|(threshold, _)| total_score >= *threshold)
        .map(|(_, rarity)| *rarity)
        .unwrap_or(Rarity::Common)
}

pub fn compute_rarity(metrics: &TradeMetrics) -> Rarity {
    ScoreBreakdown::from_metrics(metrics).rarity()
}

/// Card value: `max(|profit| * multiplier, $10)`.
pub fn compute_value(roi_percent: f64, notional_usd: f64, rarity: Rarity) -> f64 {
    let profit = (roi_percent / 100.0 * notional_usd).abs();
    (profit * rarity.multiplier()).max(MIN_CARD_VALUE)
}
