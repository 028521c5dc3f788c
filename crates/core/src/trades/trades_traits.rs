use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::trades::trades_model::{
    NewTrade, NewTradeAdjustment, Trade, TradeAdjustment, TradeUpdate, TradeWithMetrics,
};
use async_trait::async_trait;

/// Trait for trade repository operations.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    fn get_by_id(&self, trade_id: &str) -> Result<Trade>;
    fn list_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<Trade>>;
    fn list_adjustments(&self, trade_id: &str) -> Result<Vec<TradeAdjustment>>;
    async fn insert(&self, portfolio_id: String, new_trade: NewTrade) -> Result<Trade>;
    async fn update(&self, trade_id: String, update: TradeUpdate) -> Result<Trade>;
    async fn insert_adjustment(
        &self,
        trade_id: String,
        adjustment: NewTradeAdjustment,
    ) -> Result<TradeAdjustment>;
    /// Marks the trade closed and credits the captured premium to the owning
    /// portfolio's current capital in the same transaction.
    async fn close(
        &self,
        trade_id: String,
        premium_captured: f64,
        closed_at: NaiveDateTime,
    ) -> Result<Trade>;
}

/// Trait for trade service operations. Every operation takes the calling
/// user's id and enforces ownership through the portfolio chain.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    async fn create_trade(
        &self,
        user_id: &str,
        portfolio_id: &str,
        new_trade: NewTrade,
    ) -> Result<Trade>;
    fn get_trade(&self, user_id: &str, trade_id: &str) -> Result<TradeWithMetrics>;
    async fn update_trade(
        &self,
        user_id: &str,
        trade_id: &str,
        update: TradeUpdate,
    ) -> Result<Trade>;
    async fn add_adjustment(
        &self,
        user_id: &str,
        trade_id: &str,
        adjustment: NewTradeAdjustment,
    ) -> Result<TradeAdjustment>;
    async fn close_trade(
        &self,
        user_id: &str,
        trade_id: &str,
        close: crate::trades::CloseTrade,
    ) -> Result<Trade>;
}
