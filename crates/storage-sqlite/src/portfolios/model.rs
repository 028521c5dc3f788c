//! Database models for portfolios.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::users::UserDB;

/// Database model for portfolios.
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
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub starting_capital: f64,
    pub current_capital: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new portfolio.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioDB {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub starting_capital: f64,
    pub current_capital: f64,
}

// Conversion to domain models
impl From<PortfolioDB> for wheeltrack_core::portfolios::Portfolio {
    fn from(db: PortfolioDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            starting_capital: db.starting_capital,
            current_capital: db.current_capital,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl NewPortfolioDB {
    /// Builds the insertable row; current capital always starts at the
    /// immutable baseline.
    pub fn from_domain(owner: String, domain: wheeltrack_core::portfolios::NewPortfolio) -> Self {
        Self {
            id: domain.id,
            user_id: owner,
            name: domain.name,
            starting_capital: domain.starting_capital,
            current_capital: domain.starting_capital,
        }
    }
}
