//! Trades module - domain models, cost-basis metrics, services, and traits.

pub mod trade_metrics;
mod trades_model;
mod trades_service;
mod trades_traits;

pub use trade_metrics::TradeMetrics;
pub use trades_model::{
    CloseTrade, NewTrade, NewTradeAdjustment, OptionType, Trade, TradeAdjustment, TradeUpdate,
    TradeWithMetrics,
};
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
