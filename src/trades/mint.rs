use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use super::card::{CardStats, MintedCard};
use super::ledger::TradeLedger;
use crate::cards::{card_design, Rarity, MIN_CARD_VALUE};
use crate::pear::characters::display_name;
use crate::pear::{BasketExecutor, CharacterRegistry, ExecutionError, TradeResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    #[serde(default)]
    pub character_id: Option<String>,
    #[serde(default)]
    pub user_wallet: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedTrade {
    pub order_id: String,
    pub status: String,
    pub character_id: String,
    pub notional: f64,
    pub basket: crate::pear::Basket,
}

#[derive(Debug, Clone, Serialize)]
pub struct MintOutcome {
    pub trade: MintedTrade,
    pub card: MintedCard,
}

#[derive(Error, Debug)]
pub enum MintError {
    #[error("characterId is required")]
    MissingCharacterId,

    #[error("userWallet is required")]
    MissingWallet,

    #[error("Character \"{input}\" not found in trade mapping. Available characters: {available}")]
    UnknownCharacter { input: String, available: String },

    /// The basket trade failed; no card was minted.
    #[error("{message}")]
    Execution {
        message: String,
        details: String,
        #[source]
        source: ExecutionError,
    },
}

/// Turn a trade execution failure into a message a user can act on.
pub fn explain_execution_failure(err: &ExecutionError) -> (String, String) {
    let raw = err.to_string();
    let lower = raw.to_lowercase();

    if raw.contains("500") || lower.contains("internal server error") {
        (
            "Trade execution failed: Internal server error from Pear Protocol API.".to_string(),
            "Common causes: Agent wallet not set up, builder not approved, insufficient balance, \
             or invalid trade configuration. Please approve the builder address first, then retry."
                .to_string(),
        )
    } else if lower.contains("agent wallet") {
        (
            "Trade execution failed: Agent wallet not set up. Please approve the builder address first."
                .to_string(),
            "Go to Portfolio page → Approve Builder → Confirm transaction → Retry mint.".to_string(),
        )
    } else if lower.contains("api key") || lower.contains("authentication") || raw.contains("401") {
        (
            "Trade execution failed: Authentication error. Please check your API configuration."
                .to_string(),
            "Check PEAR_ACCESS_TOKEN and PEAR_CLIENT_ID.".to_string(),
        )
    } else if lower.contains("insufficient") || lower.contains("balance") {
        (
            "Trade execution failed: Insufficient balance or builder not approved.".to_string(),
            "Add more funds to the wallet or approve the builder address first.".to_string(),
        )
    } else {
        (
            format!("Trade execution failed: {}", raw),
            "No card was minted. The trade must succeed to mint a card.".to_string(),
        )
    }
}

/// Execute a character's basket trade and mint its card with the given `stats`.
/// A card is only minted when the trade succeeds.
pub async fn mint_character_card(
    registry: &CharacterRegistry,
    executor: &dyn BasketExecutor,
    ledger: &TradeLedger,
    request: &MintRequest,
    minted_at: DateTime<Utc>,
    stats: CardStats,
) -> Result<MintOutcome, MintError> {
    let character_input = request
        .character_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(MintError::MissingCharacterId)?;
    let wallet = request
        .user_wallet
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(MintError::MissingWallet)?;

    let character_id = registry
        .normalize(character_input)
        .unwrap_or_else(|| character_input.to_string());
    let config = registry
        .get(&character_id)
        .ok_or_else(|| MintError::UnknownCharacter {
            input: character_input.to_string(),
            available: registry.available().join(", "),
        })?;

    info!("🎴 Minting card for character {} (wallet {})", character_id, wallet);
    let order = config.order();

    let TradeResult { order_id, status } = match executor.execute_order(&order).await {
        Ok(result) => result,
        Err(e) => {
            error!("❌ Trade execution failed for {}: {}", character_id, e);
            let (message, details) = explain_execution_failure(&e);
            return Err(MintError::Execution {
                message,
                details,
                source: e,
            });
        }
    };

    let rarity = Rarity::Legendary;
    let skip = order_id.chars().count().saturating_sub(8);
    let short_order: String = order_id.chars().skip(skip).collect();

    let card = MintedCard {
        id: format!("{}-{}", character_id, order_id),
        name: display_name(&character_id),
        title: format!("Minted via Trade {}", short_order),
        rarity,
        value: MIN_CARD_VALUE,
        faction: "cosmic",
        stats,
        description: format!(
            "This card was minted through a live Pear Protocol trade. Trade Order ID: {}",
            order_id
        ),
        image_url: card_design(rarity).image_url,
        owner_address: wallet.to_string(),
        minted_at,
        trading_pair: order.label(),
        trade_data: None,
        design: None,
        cosmic: None,
        order_id: Some(order_id.clone()),
    };

    info!("✅ Card minted with trade orderId {}", order_id);
    ledger.record_card(card.clone());

    Ok(MintOutcome {
        trade: MintedTrade {
            order_id,
            status,
            character_id,
            notional: config.notional,
            basket: config.basket(),
        },
        card,
    })
}
