pub mod card;
pub mod error;
pub mod ledger;
pub mod mint;

pub use card::{CardStats, CardTradeData, MintedCard, UserCollection};
pub use error::TradeError;
pub use ledger::{
    hold_days, roi_percent, CloseOutcome, CloseTradeRequest, ClosedTrade, OpenTrade,
    OpenTradeRequest, PortfolioStats, TradeLedger,
};
pub use mint::{mint_character_card, MintError, MintOutcome, MintRequest};
