use chrono::Utc;
use log::debug;
use std::sync::Arc;

use super::trade_metrics;
use super::trades_model::{
    CloseTrade, NewTrade, NewTradeAdjustment, Trade, TradeAdjustment, TradeUpdate,
    TradeWithMetrics,
};
use super::trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::portfolios::PortfolioRepositoryTrait;

/// Service for managing trades and their adjustments.
///
/// Ownership is enforced through the portfolio chain: every operation resolves
/// the trade's portfolio and checks it belongs to the calling user. Records
/// owned by other users surface as not found.
pub struct TradeService {
    repository: Arc<dyn TradeRepositoryTrait>,
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
}

impl TradeService {
    pub fn new(
        repository: Arc<dyn TradeRepositoryTrait>,
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            portfolio_repository,
        }
    }

    fn assert_portfolio_owner(&self, user_id: &str, portfolio_id: &str) -> Result<()> {
        let portfolio = self.portfolio_repository.get_by_id(portfolio_id)?;
        if portfolio.user_id != user_id {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Portfolio {portfolio_id} not found"
            ))));
        }
        Ok(())
    }

    fn get_owned_trade(&self, user_id: &str, trade_id: &str) -> Result<Trade> {
        let trade = self.repository.get_by_id(trade_id).map_err(|e| {
            if e.is_not_found() {
                Error::Database(DatabaseError::NotFound(format!(
                    "Trade {trade_id} not found"
                )))
            } else {
                e
            }
        })?;
        self.assert_portfolio_owner(user_id, &trade.portfolio_id)
            .map_err(|_| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Trade {trade_id} not found"
                )))
            })?;
        Ok(trade)
    }
}

#[async_trait::async_trait]
impl TradeServiceTrait for TradeService {
    async fn create_trade(
        &self,
        user_id: &str,
        portfolio_id: &str,
        new_trade: NewTrade,
    ) -> Result<Trade> {
        debug!(
            "Opening {} {} trade in portfolio {}",
            new_trade.ticker,
            new_trade.option_type.as_str(),
            portfolio_id
        );
        self.assert_portfolio_owner(user_id, portfolio_id)?;
        self.repository
            .insert(portfolio_id.to_string(), new_trade)
            .await
    }

    fn get_trade(&self, user_id: &str, trade_id: &str) -> Result<TradeWithMetrics> {
        let trade = self.get_owned_trade(user_id, trade_id)?;
        let adjustments = self.repository.list_adjustments(trade_id)?;
        let metrics = trade_metrics::compute(&trade, &adjustments);
        Ok(TradeWithMetrics {
            trade,
            adjustments,
            metrics,
        })
    }

    async fn update_trade(
        &self,
        user_id: &str,
        trade_id: &str,
        update: TradeUpdate,
    ) -> Result<Trade> {
        self.get_owned_trade(user_id, trade_id)?;
        self.repository.update(trade_id.to_string(), update).await
    }

    async fn add_adjustment(
        &self,
        user_id: &str,
        trade_id: &str,
        adjustment: NewTradeAdjustment,
    ) -> Result<TradeAdjustment> {
        self.get_owned_trade(user_id, trade_id)?;
        self.repository
            .insert_adjustment(trade_id.to_string(), adjustment)
            .await
    }

    async fn close_trade(
        &self,
        user_id: &str,
        trade_id: &str,
        close: CloseTrade,
    ) -> Result<Trade> {
        let trade = self.get_owned_trade(user_id, trade_id)?;
        if trade.is_closed() {
            return Err(Error::ConstraintViolation(format!(
                "Trade {trade_id} is already closed"
            )));
        }
        let closed_at = close.closed_at.unwrap_or_else(|| Utc::now().naive_utc());
        self.repository
            .close(trade_id.to_string(), close.premium_captured, closed_at)
            .await
    }
}
