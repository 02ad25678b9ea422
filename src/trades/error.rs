use thiserror::Error;

use crate::cards::MetricsError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("tradeId is required")]
    MissingTradeId,

    #[error("exitPrice must be a positive number")]
    InvalidExitPrice,

    #[error("entryPrice must be a positive number")]
    InvalidEntryPrice,

    #[error("notional must be a positive number")]
    InvalidNotional,

    #[error("pair must look like BASE/QUOTE, got '{0}'")]
    InvalidPair(String),

    #[error("walletAddress is required")]
    MissingWallet,

    #[error("trade {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl TradeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TradeError::NotFound(_))
    }
}
