use crate::errors::Result;
use crate::portfolios::portfolios_model::{NewPortfolio, Portfolio, PortfolioDetail};
use async_trait::async_trait;

/// Trait for portfolio repository operations.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Portfolio>>;
    async fn insert(&self, user_id: String, new_portfolio: NewPortfolio) -> Result<Portfolio>;
}

/// Trait for portfolio service operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn create_portfolio(
        &self,
        user_id: &str,
        new_portfolio: NewPortfolio,
    ) -> Result<Portfolio>;
    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>>;
    /// Fetches a portfolio, reporting one owned by someone else as not found.
    fn get_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<Portfolio>;
    fn portfolio_detail(&self, user_id: &str, portfolio_id: &str) -> Result<PortfolioDetail>;
}
