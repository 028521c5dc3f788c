use chrono::{NaiveDateTime, Utc};
use wheeltrack_core::trades::{
    NewTrade, NewTradeAdjustment, Trade, TradeAdjustment, TradeRepositoryTrait, TradeUpdate,
};
use wheeltrack_core::{Error, Result};

use super::model::{NewTradeAdjustmentDB, NewTradeDB, TradeAdjustmentDB, TradeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{portfolios, trade_adjustments, trades};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct TradeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TradeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TradeRepository { pool, writer }
    }

    fn load_trade(conn: &mut SqliteConnection, trade_id: &str) -> Result<Trade> {
        let trade_db = trades::table
            .find(trade_id)
            .first::<TradeDB>(conn)
            .map_err(StorageError::from)?;
        Trade::try_from(trade_db)
    }
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    fn get_by_id(&self, trade_id: &str) -> Result<Trade> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_trade(&mut conn, trade_id)
    }

    fn list_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<Trade>> {
        let mut conn = get_connection(&self.pool)?;
        let trades_db = trades::table
            .filter(trades::portfolio_id.eq(portfolio_id))
            .order(trades::created_at.asc())
            .load::<TradeDB>(&mut conn)
            .map_err(StorageError::from)?;
        trades_db.into_iter().map(Trade::try_from).collect()
    }

    fn list_adjustments(&self, trade_id: &str) -> Result<Vec<TradeAdjustment>> {
        let mut conn = get_connection(&self.pool)?;
        let adjustments_db = trade_adjustments::table
            .filter(trade_adjustments::trade_id.eq(trade_id))
            .order(trade_adjustments::created_at.asc())
            .load::<TradeAdjustmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(adjustments_db
            .into_iter()
            .map(TradeAdjustment::from)
            .collect())
    }

    async fn insert(&self, portfolio_id: String, new_trade: NewTrade) -> Result<Trade> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                let mut new_trade_db = NewTradeDB::from_domain(portfolio_id, new_trade);
                new_trade_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(trades::table)
                    .values(&new_trade_db)
                    .returning(TradeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Trade::try_from(result_db)
            })
            .await
    }

    async fn update(&self, trade_id: String, update: TradeUpdate) -> Result<Trade> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                let now = Utc::now().naive_utc();
                diesel::update(trades::table.find(trade_id.as_str()))
                    .set((
                        trades::expiration_date.eq(update.expiration_date),
                        update
                            .contract_price
                            .map(|v| trades::contract_price.eq(v)),
                        update.notes.map(|v| trades::notes.eq(v)),
                        trades::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Self::load_trade(conn, &trade_id)
            })
            .await
    }

    async fn insert_adjustment(
        &self,
        trade_id: String,
        adjustment: NewTradeAdjustment,
    ) -> Result<TradeAdjustment> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<TradeAdjustment> {
                    // Fails with NotFound before touching the child table when
                    // the trade is gone.
                    Self::load_trade(conn, &trade_id)?;

                    let mut adjustment_db =
                        NewTradeAdjustmentDB::from_domain(trade_id, adjustment);
                    adjustment_db.id = Some(Uuid::new_v4().to_string());

                    let result_db = diesel::insert_into(trade_adjustments::table)
                        .values(&adjustment_db)
                        .returning(TradeAdjustmentDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(TradeAdjustment::from(result_db))
                },
            )
            .await
    }

    async fn close(
        &self,
        trade_id: String,
        premium_captured: f64,
        closed_at: NaiveDateTime,
    ) -> Result<Trade> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                let trade = Self::load_trade(conn, &trade_id)?;
                // Checked inside the transaction so two concurrent closes
                // cannot both slip past it and credit capital twice.
                if trade.is_closed() {
                    return Err(Error::ConstraintViolation(format!(
                        "Trade {trade_id} is already closed"
                    )));
                }
                let now = Utc::now().naive_utc();

                diesel::update(trades::table.find(trade_id.as_str()))
                    .set((
                        trades::closed_at.eq(Some(closed_at)),
                        trades::premium_captured.eq(Some(premium_captured)),
                        trades::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                // Ledger rule: captured premium credits the owning portfolio's
                // running capital, atomically with the close.
                diesel::update(portfolios::table.find(trade.portfolio_id.as_str()))
                    .set((
                        portfolios::current_capital
                            .eq(portfolios::current_capital + premium_captured),
                        portfolios::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Self::load_trade(conn, &trade_id)
            })
            .await
    }
}
