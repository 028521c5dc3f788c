use wheeltrack_core::portfolios::{NewPortfolio, Portfolio, PortfolioRepositoryTrait};
use wheeltrack_core::Result;

use super::model::{NewPortfolioDB, PortfolioDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::portfolios;
use crate::schema::portfolios::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PortfolioRepository { pool, writer }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        let portfolio_db = portfolios
            .find(portfolio_id)
            .first::<PortfolioDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Portfolio::from(portfolio_db))
    }

    fn list_for_user(&self, owner_id: &str) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;
        let portfolios_db = portfolios
            .filter(user_id.eq(owner_id))
            .order(created_at.asc())
            .load::<PortfolioDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(portfolios_db.into_iter().map(Portfolio::from).collect())
    }

    async fn insert(&self, owner_id: String, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                let mut new_portfolio_db = NewPortfolioDB::from_domain(owner_id, new_portfolio);
                new_portfolio_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(portfolios::table)
                    .values(&new_portfolio_db)
                    .returning(PortfolioDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Portfolio::from(result_db))
            })
            .await
    }
}
