pub mod error;
pub mod extract;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cards::NameTables;
use crate::market::{MarketData, StaticMarketData};
use crate::pear::{BasketExecutor, CharacterRegistry};
use crate::trades::TradeLedger;

pub use error::ApiError;
pub use extract::ApiJson;
pub use handlers::SharedState;

/// Everything the handlers share.
pub struct AppState {
    pub ledger: TradeLedger,
    pub executor: Arc<dyn BasketExecutor>,
    pub characters: CharacterRegistry,
    pub market: Arc<dyn MarketData>,
    pub name_tables: NameTables,
    pub paper_trading: bool,
}

impl AppState {
    /// State with the built-in character, market and naming tables.
    pub fn new(executor: Arc<dyn BasketExecutor>, paper_trading: bool) -> Self {
        Self {
            ledger: TradeLedger::new(),
            executor,
            characters: CharacterRegistry::with_defaults(),
            market: Arc::new(StaticMarketData::with_defaults()),
            name_tables: NameTables::default(),
            paper_trading,
        }
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/trades", post(handlers::open_trade))
        .route("/api/trades/close-with-card", post(handlers::close_with_card))
        .route("/api/trades/{trade_id}", get(handlers::get_trade))
        .route("/api/mint-card", post(handlers::mint_card))
        .route("/api/execute-trade", post(handlers::execute_trade))
        .route("/api/market/pairs", get(handlers::market_pairs))
        .route("/api/market/ticker", get(handlers::market_ticker))
        .route("/api/cards/{wallet_address}", get(handlers::collection))
        .route("/api/trading/{wallet_address}/stats", get(handlers::portfolio_stats))
        .route("/api/trading/{wallet_address}/charts", get(handlers::portfolio_stats))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: SharedState, bind_addr: &str) -> anyhow::Result<()> {
    tracing::info!("🌐 Starting card API server...");

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("🌐 Card API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
