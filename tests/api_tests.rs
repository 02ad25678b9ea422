use arbit::api::{router, AppState};
use arbit::cards::{compute_value, Rarity};
use arbit::pear::BasketExecutor;
use arbit::simulation::PaperExecutor;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(executor: PaperExecutor) -> Router {
    let executor: Arc<dyn BasketExecutor> = Arc::new(executor);
    router(Arc::new(AppState::new(executor, true)))
}

fn app() -> Router {
    app_with(PaperExecutor::new())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|b| b.to_string())).await
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open_eth_long(app: &Router, wallet: &str) -> String {
    let opened_at = Utc::now() - Duration::days(7) + Duration::hours(1);
    let (status, trade) = send(
        app,
        "POST",
        "/api/trades",
        Some(json!({
            "pair": "ETH/USD",
            "direction": "LONG",
            "entryPrice": 2000.0,
            "notional": 5000.0,
            "walletAddress": wallet,
            "openedAt": opened_at,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    trade["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["paperTrading"], true);
}

#[tokio::test]
async fn test_close_with_card_flow() {
    let app = app();
    let trade_id = open_eth_long(&app, "0xAbC").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/trades/close-with-card",
        Some(json!({ "tradeId": trade_id, "exitPrice": 2300.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["closedTrade"]["status"], "CLOSED");
    assert_eq!(body["closedTrade"]["holdTime"], 7);
    assert_eq!(body["card"]["rarity"], "RARE");
    assert_eq!(body["card"]["title"], "RARE ETH Card");
    assert_eq!(body["card"]["stats"]["longPosition"], 80);
    let value = body["card"]["value"].as_f64().unwrap();
    assert!((value - compute_value(15.0, 5000.0, Rarity::Rare)).abs() < 1e-6);
    assert!(body["message"].as_str().unwrap().contains("RARE"));

    let (status, closed) = send(&app, "GET", &format!("/api/trades/{}", trade_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["cardId"], body["card"]["id"]);

    // Wallet lookups are case-insensitive
    let (_, collection) = send(&app, "GET", "/api/cards/0xabc", None).await;
    assert_eq!(collection["totalCards"], 1);

    let (_, stats) = send(&app, "GET", "/api/trading/0xABC/stats", None).await;
    assert_eq!(stats["totalTrades"], 1);
    assert_eq!(stats["winRate"], 100.0);
    assert_eq!(stats["profitLoss"].as_array().unwrap().len(), 1);

    let (status, charts) = send(&app, "GET", "/api/trading/0xabc/charts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(charts["totalTrades"], 1);
    let pnl = charts["profitLoss"][0].as_f64().unwrap();
    let portfolio = charts["portfolioValue"][0].as_f64().unwrap();
    assert!((portfolio - (pnl + value)).abs() < 1e-6);
    assert_eq!(charts["dates"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_trade_closes_only_once() {
    let app = app();
    let trade_id = open_eth_long(&app, "0xabc").await;
    let close = json!({ "tradeId": trade_id, "exitPrice": 1900.0 });

    let (first, _) = send(&app, "POST", "/api/trades/close-with-card", Some(close.clone())).await;
    let (second, body) = send(&app, "POST", "/api/trades/close-with-card", Some(close)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_close_validation_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/trades/close-with-card",
        Some(json!({ "exitPrice": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tradeId is required");

    let trade_id = open_eth_long(&app, "0xabc").await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/trades/close-with-card",
        Some(json!({ "tradeId": trade_id, "exitPrice": -1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A rejected close leaves the trade open
    let (status, open) = send(&app, "GET", &format!("/api/trades/{}", trade_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(open["entryPrice"], 2000.0);
}

#[tokio::test]
async fn test_malformed_bodies_use_failure_shape() {
    let app = app();
    let trade_id = open_eth_long(&app, "0xabc").await;

    let cases = [
        ("/api/trades/close-with-card", json!({ "tradeId": trade_id, "exitPrice": "2300" }).to_string()),
        ("/api/trades/close-with-card", json!({ "tradeId": 5, "exitPrice": 2300.0 }).to_string()),
        ("/api/trades/close-with-card", "not json".to_string()),
        ("/api/mint-card", json!({ "characterId": ["nexus-prime"] }).to_string()),
        ("/api/trades", json!({ "pair": "ETH/USD" }).to_string()),
        ("/api/execute-trade", "{".to_string()),
    ];
    for (uri, body) in cases {
        let (status, response) = send_raw(&app, "POST", uri, Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(response["success"], false, "{uri} {body}");
        assert!(response["error"].is_string(), "{uri} {body}");
    }

    let (_, response) = send_raw(
        &app,
        "POST",
        "/api/trades/close-with-card",
        Some(json!({ "tradeId": trade_id, "exitPrice": "2300" }).to_string()),
    )
    .await;
    assert!(response["details"].as_str().unwrap().contains("exitPrice"));

    // The trade is untouched by the rejected bodies
    let (status, _) = send(&app, "GET", &format!("/api/trades/{}", trade_id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_open_trade_rejects_bad_pair() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/trades",
        Some(json!({
            "pair": "",
            "direction": "SHORT",
            "entryPrice": 1.0,
            "notional": 100.0,
            "walletAddress": "0xabc",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_mint_card() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/mint-card",
        Some(json!({ "characterId": "Nexus Prime", "userWallet": "0xMinter" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["card"]["name"], "Nexus Prime");
    assert_eq!(body["card"]["rarity"], "LEGENDARY");
    assert_eq!(body["trade"]["characterId"], "nexus-prime");
    assert!(body["card"]["orderId"].as_str().unwrap().starts_with("paper-order-"));

    let (_, collection) = send(&app, "GET", "/api/cards/0xminter", None).await;
    assert_eq!(collection["totalCards"], 1);
}

#[tokio::test]
async fn test_mint_card_errors() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/mint-card",
        Some(json!({ "userWallet": "0xMinter" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/mint-card",
        Some(json!({ "characterId": "nobody", "userWallet": "0xMinter" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nexus-prime"));

    let failing = app_with(PaperExecutor::rejecting(500, "Internal server error"));
    let (status, body) = send(
        &failing,
        "POST",
        "/api/mint-card",
        Some(json!({ "characterId": "nexus-prime", "userWallet": "0xMinter" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].is_string());

    let (_, collection) = send(&failing, "GET", "/api/cards/0xminter", None).await;
    assert_eq!(collection["totalCards"], 0);
}

#[tokio::test]
async fn test_execute_basket_trade() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/execute-trade",
        Some(json!({
            "long": ["BTC", "SOL"],
            "short": ["ETH"],
            "weightsLong": [0.7, 0.3],
            "notional": 250.0,
            "orderType": "limit",
            "limitPrice": 1.05,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["orderId"].as_str().unwrap().starts_with("paper-order-"));
    assert_eq!(body["basket"]["long"], json!(["BTC", "SOL"]));
    assert_eq!(body["orderType"], "limit");
    assert_eq!(body["limitPrice"], 1.05);
}

#[tokio::test]
async fn test_execute_trade_for_character() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/execute-trade",
        Some(json!({ "characterId": "nexus-prime" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["character"]["name"], "Nexus Prime");
    assert_eq!(body["basket"]["short"], json!(["ETH"]));
}

#[tokio::test]
async fn test_execute_trade_errors() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/execute-trade",
        Some(json!({ "long": [], "notional": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Long basket is required and must be a non-empty array");

    let (status, _) = send(
        &app,
        "POST",
        "/api/execute-trade",
        Some(json!({ "long": ["BTC"], "weightsLong": [0.5], "notional": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unauthorized = app_with(PaperExecutor::rejecting(401, "invalid access token"));
    let (status, body) = send(
        &unauthorized,
        "POST",
        "/api/execute-trade",
        Some(json!({ "long": ["BTC"], "notional": 10.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Authentication or configuration error");
}

#[tokio::test]
async fn test_market_endpoints() {
    let app = app();

    let (status, pairs) = send(&app, "GET", "/api/market/pairs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pairs.as_array().unwrap().len(), 11);

    let (_, ticker) = send(&app, "GET", "/api/market/ticker?pair=ETH", None).await;
    assert_eq!(ticker["high24h"], 2500.12);

    let (_, synthetic) = send(&app, "GET", "/api/market/ticker?pair=XRP-ETH", None).await;
    assert_eq!(synthetic["pair"], "XRP-ETH");

    let (_, all) = send(&app, "GET", "/api/market/ticker", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}
