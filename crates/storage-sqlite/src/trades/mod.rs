//! SQLite storage implementation for trades and trade adjustments.

mod model;
mod repository;

pub use model::{NewTradeAdjustmentDB, NewTradeDB, TradeAdjustmentDB, TradeDB};
pub use repository::TradeRepository;
