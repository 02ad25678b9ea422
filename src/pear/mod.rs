pub mod api;
pub mod characters;
pub mod client;
pub mod types;

pub use api::{validate_order, BasketExecutor, ExecutionError};
pub use characters::{CharacterRegistry, CharacterTradeConfig};
pub use client::PearClient;
pub use types::{Basket, BasketOrder, OrderType, TradeResult};
