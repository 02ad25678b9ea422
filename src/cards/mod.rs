pub mod design;
pub mod naming;
pub mod rarity;
pub mod types;

pub use design::{card_design, cosmic_trade_data, CardDesign, CosmicTradeData};
pub use naming::{compute_name, NameTables};
pub use rarity::{compute_rarity, compute_value, ScoreBreakdown, MIN_CARD_VALUE};
pub use types::{
    base_asset, base_asset_checked, CardMetadata, Direction, MetricsError, Rarity, TradeMetrics,
};

use rand::Rng;
use tracing::debug;

/// Score a closed trade and produce its card metadata.
///
/// Rarity and value are fully determined by `metrics`; only the name's
/// adjective depends on `rng`.
pub fn compute_card_metadata<R: Rng + ?Sized>(
    metrics: &TradeMetrics,
    tables: &NameTables,
    rng: &mut R,
) -> CardMetadata {
    let breakdown = ScoreBreakdown::from_metrics(metrics);
    let rarity = breakdown.rarity();
    let value = compute_value(metrics.roi_percent, metrics.notional_usd, rarity);
    let name = compute_name(metrics, rarity, tables, rng);

    debug!(
        pair = %metrics.pair,
        roi_score = breakdown.roi_score,
        duration_score = breakdown.duration_score,
        size_score = breakdown.size_score,
        win_bonus = breakdown.win_bonus,
        total = breakdown.total(),
        %rarity,
        value,
        "🃏 Scored trade"
    );

    CardMetadata { rarity, value, name }
}
