use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use super::error::ApiError;
use super::extract::ApiJson;
use super::AppState;
use crate::market::TradingPair;
use crate::pear::characters::display_name;
use crate::pear::BasketOrder;
use crate::trades::{
    mint_character_card, CardStats, CloseTradeRequest, MintRequest, OpenTrade, OpenTradeRequest,
    PortfolioStats, UserCollection,
};

pub type SharedState = Arc<AppState>;

pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "paperTrading": state.paper_trading,
    }))
}

pub async fn open_trade(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<OpenTradeRequest>,
) -> Result<(StatusCode, Json<OpenTrade>), ApiError> {
    let trade = state.ledger.open_trade(request, Utc::now())?;
    Ok((StatusCode::CREATED, Json(trade)))
}

pub async fn get_trade(
    State(state): State<SharedState>,
    Path(trade_id): Path<String>,
) -> Result<Response, ApiError> {
    if let Some(open) = state.ledger.get_open(&trade_id) {
        return Ok(Json(open).into_response());
    }
    if let Some(closed) = state.ledger.get_closed(&trade_id) {
        return Ok(Json(closed).into_response());
    }
    Err(ApiError::new(
        StatusCode::NOT_FOUND,
        format!("trade {} not found", trade_id),
    ))
}

/// POST /api/trades/close-with-card
pub async fn close_with_card(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<CloseTradeRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.ledger.close_with_card(
        &request,
        Utc::now(),
        &state.name_tables,
        &mut rand::rng(),
    )?;

    let message = format!(
        "Successfully closed trade and minted {} card: {}",
        outcome.card.rarity, outcome.card.name
    );
    Ok(Json(json!({
        "success": true,
        "closedTrade": outcome.closed_trade,
        "card": outcome.card,
        "message": message,
    })))
}

/// POST /api/mint-card
pub async fn mint_card(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<MintRequest>,
) -> Result<Json<Value>, ApiError> {
    let stats = CardStats::roll(&mut rand::rng());
    let outcome = mint_character_card(
        &state.characters,
        state.executor.as_ref(),
        &state.ledger,
        &request,
        Utc::now(),
        stats,
    )
    .await?;

    let message = format!(
        "Successfully minted {} card via Pear Protocol trade",
        outcome.card.name
    );
    Ok(Json(json!({
        "success": true,
        "trade": outcome.trade,
        "card": outcome.card,
        "message": message,
    })))
}

/// POST /api/execute-trade
///
/// Accepts either `{ "characterId": ... }` or a basket order body.
pub async fn execute_trade(
    State(state): State<SharedState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>, ApiError> {
    let character_id = body
        .get("characterId")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let (order, character) = match character_id {
        Some(input) => {
            let id = state
                .characters
                .normalize(&input)
                .ok_or_else(|| {
                    ApiError::new(
                        StatusCode::NOT_FOUND,
                        format!("Character with id \"{}\" not found", input),
                    )
                })?;
            let order = state
                .characters
                .get(&id)
                .map(|config| config.order())
                .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "character has no trade"))?;
            (order, Some(id))
        }
        None => {
            let order: BasketOrder = serde_json::from_value(body)
                .map_err(|e| ApiError::bad_request(format!("invalid basket order: {}", e)))?;
            (order, None)
        }
    };

    let result = state.executor.execute_order(&order).await.map_err(|e| {
        error!("❌ Error executing trade: {}", e);
        ApiError::from(e)
    })?;
    info!("✅ Basket {} executed: {}", order.label(), result.order_id);

    let mut response = json!({
        "success": true,
        "orderId": result.order_id,
        "status": result.status,
        "basket": order.basket,
    });
    match character {
        Some(id) => {
            let name = display_name(&id);
            response["message"] = json!(format!("Trade executed for {}", name));
            response["character"] = json!({ "id": id, "name": name });
        }
        None => {
            response["message"] = json!("Trade executed successfully");
            response["orderType"] = json!(order.order_type);
            if let Some(limit_price) = order.limit_price {
                response["limitPrice"] = json!(limit_price);
            }
        }
    }

    Ok(Json(response))
}

pub async fn market_pairs(State(state): State<SharedState>) -> Json<Vec<TradingPair>> {
    Json(state.market.pairs())
}

#[derive(Debug, Deserialize)]
pub struct TickerQuery {
    pub pair: Option<String>,
}

pub async fn market_ticker(
    State(state): State<SharedState>,
    Query(query): Query<TickerQuery>,
) -> Response {
    match query.pair {
        Some(pair) => {
            let ticker = state.market.ticker_or_synthetic(&pair, &mut rand::rng());
            Json(ticker).into_response()
        }
        None => Json(state.market.tickers()).into_response(),
    }
}

pub async fn collection(
    State(state): State<SharedState>,
    Path(wallet_address): Path<String>,
) -> Json<UserCollection> {
    Json(state.ledger.collection(&wallet_address))
}

pub async fn portfolio_stats(
    State(state): State<SharedState>,
    Path(wallet_address): Path<String>,
) -> Json<PortfolioStats> {
    Json(state.ledger.portfolio_stats(&wallet_address))
}
