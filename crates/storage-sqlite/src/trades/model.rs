//! Database models for trades and trade adjustments.
//!
//! The option type is stored as TEXT ("PUT"/"CALL"); anything else in the
//! column is a data defect and surfaces as an internal database error rather
//! than a panic.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::portfolios::PortfolioDB;
use wheeltrack_core::errors::{DatabaseError, Error};
use wheeltrack_core::trades::OptionType;

/// Database model for trades.
#[derive(
    Queryable,
    Identifiable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(PortfolioDB, foreign_key = portfolio_id))]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TradeDB {
    pub id: String,
    pub portfolio_id: String,
    pub ticker: String,
    pub strike_price: f64,
    pub expiration_date: NaiveDate,
    pub option_type: String,
    pub contracts: i32,
    pub contract_price: f64,
    pub closed_at: Option<NaiveDateTime>,
    pub premium_captured: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for opening a new trade.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
#[serde(rename_all = "camelCase")]
pub struct NewTradeDB {
    pub id: Option<String>,
    pub portfolio_id: String,
    pub ticker: String,
    pub strike_price: f64,
    pub expiration_date: NaiveDate,
    pub option_type: String,
    pub contracts: i32,
    pub contract_price: f64,
    pub notes: Option<String>,
}

/// Database model for trade adjustments.
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(TradeDB, foreign_key = trade_id))]
#[diesel(table_name = crate::schema::trade_adjustments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TradeAdjustmentDB {
    pub id: String,
    pub trade_id: String,
    pub contracts: i32,
    pub price: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for recording a new adjustment.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::trade_adjustments)]
#[serde(rename_all = "camelCase")]
pub struct NewTradeAdjustmentDB {
    pub id: Option<String>,
    pub trade_id: String,
    pub contracts: i32,
    pub price: f64,
    pub notes: Option<String>,
}

// Conversion to domain models
impl TryFrom<TradeDB> for wheeltrack_core::trades::Trade {
    type Error = Error;

    fn try_from(db: TradeDB) -> Result<Self, Error> {
        let option_type = OptionType::parse(&db.option_type).ok_or_else(|| {
            Error::Database(DatabaseError::Internal(format!(
                "Unknown option type '{}' for trade {}",
                db.option_type, db.id
            )))
        })?;
        Ok(Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            ticker: db.ticker,
            strike_price: db.strike_price,
            expiration_date: db.expiration_date,
            option_type,
            contracts: db.contracts,
            contract_price: db.contract_price,
            closed_at: db.closed_at,
            premium_captured: db.premium_captured,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl NewTradeDB {
    pub fn from_domain(portfolio: String, domain: wheeltrack_core::trades::NewTrade) -> Self {
        Self {
            id: domain.id,
            portfolio_id: portfolio,
            ticker: domain.ticker.to_ascii_uppercase(),
            strike_price: domain.strike_price,
            expiration_date: domain.expiration_date,
            option_type: domain.option_type.as_str().to_string(),
            contracts: domain.contracts,
            contract_price: domain.contract_price,
            notes: domain.notes,
        }
    }
}

impl From<TradeAdjustmentDB> for wheeltrack_core::trades::TradeAdjustment {
    fn from(db: TradeAdjustmentDB) -> Self {
        Self {
            id: db.id,
            trade_id: db.trade_id,
            contracts: db.contracts,
            price: db.price,
            notes: db.notes,
            created_at: db.created_at,
        }
    }
}

impl NewTradeAdjustmentDB {
    pub fn from_domain(trade: String, domain: wheeltrack_core::trades::NewTradeAdjustment) -> Self {
        Self {
            id: None,
            trade_id: trade,
            contracts: domain.contracts,
            price: domain.price,
            notes: domain.notes,
        }
    }
}
