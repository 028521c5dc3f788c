use log::debug;
use std::sync::Arc;

use super::portfolios_model::{NewPortfolio, Portfolio, PortfolioDetail};
use super::portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::trades::{trade_metrics, TradeRepositoryTrait, TradeWithMetrics};

/// Service for managing portfolios.
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    trade_repository: Arc<dyn TradeRepositoryTrait>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        trade_repository: Arc<dyn TradeRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            trade_repository,
        }
    }
}

#[async_trait::async_trait]
impl PortfolioServiceTrait for PortfolioService {
    /// Creates a portfolio with `current_capital` seeded from `starting_capital`.
    async fn create_portfolio(
        &self,
        user_id: &str,
        new_portfolio: NewPortfolio,
    ) -> Result<Portfolio> {
        debug!(
            "Creating portfolio '{}' for user {}",
            new_portfolio.name, user_id
        );
        self.repository
            .insert(user_id.to_string(), new_portfolio)
            .await
    }

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        self.repository.list_for_user(user_id)
    }

    fn get_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<Portfolio> {
        let portfolio = self.repository.get_by_id(portfolio_id)?;
        // Other users' portfolios are indistinguishable from absent ones.
        if portfolio.user_id != user_id {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Portfolio {portfolio_id} not found"
            ))));
        }
        Ok(portfolio)
    }

    fn portfolio_detail(&self, user_id: &str, portfolio_id: &str) -> Result<PortfolioDetail> {
        let portfolio = self.get_portfolio(user_id, portfolio_id)?;
        let trades = self.trade_repository.list_for_portfolio(portfolio_id)?;
        let mut with_metrics = Vec::with_capacity(trades.len());
        for trade in trades {
            let adjustments = self.trade_repository.list_adjustments(&trade.id)?;
            let metrics = trade_metrics::compute(&trade, &adjustments);
            with_metrics.push(TradeWithMetrics {
                trade,
                adjustments,
                metrics,
            });
        }
        Ok(PortfolioDetail {
            portfolio,
            trades: with_metrics,
        })
    }
}
