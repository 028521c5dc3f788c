//! Trade and trade-adjustment domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::trade_metrics::TradeMetrics;

/// The option leg a wheel trade sells.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Put,
    Call,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Put => "PUT",
            OptionType::Call => "CALL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(OptionType::Put),
            "CALL" => Some(OptionType::Call),
            _ => None,
        }
    }
}

/// Domain model representing an open or closed wheel trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub portfolio_id: String,
    pub ticker: String,
    pub strike_price: f64,
    pub expiration_date: NaiveDate,
    pub option_type: OptionType,
    /// Base contract count at entry. Adjustments are layered on top.
    pub contracts: i32,
    /// Base entry price per contract.
    pub contract_price: f64,
    pub closed_at: Option<NaiveDateTime>,
    pub premium_captured: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Trade {
    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

/// Input model for opening a new trade.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub id: Option<String>,
    pub ticker: String,
    pub strike_price: f64,
    pub expiration_date: NaiveDate,
    pub option_type: OptionType,
    pub contracts: i32,
    pub contract_price: f64,
    pub notes: Option<String>,
}

/// Partial update of an open trade. The expiration date is always required;
/// entry price and notes are replaced only when present.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeUpdate {
    pub contract_price: Option<f64>,
    pub expiration_date: NaiveDate,
    pub notes: Option<String>,
}

/// Input for closing a trade with its captured premium.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CloseTrade {
    pub premium_captured: f64,
    /// Defaults to now when omitted.
    pub closed_at: Option<NaiveDateTime>,
}

/// Domain model representing one adjustment event (roll, add, partial close)
/// against an open trade. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeAdjustment {
    pub id: String,
    pub trade_id: String,
    /// Signed: negative reduces the position, positive adds to it.
    pub contracts: i32,
    pub price: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a new adjustment.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTradeAdjustment {
    pub contracts: i32,
    pub price: f64,
    pub notes: Option<String>,
}

/// A trade with its adjustments and derived cost-basis metrics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeWithMetrics {
    #[serde(flatten)]
    pub trade: Trade,
    pub adjustments: Vec<TradeAdjustment>,
    pub metrics: TradeMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_round_trip() {
        assert_eq!(serde_json::to_string(&OptionType::Put).unwrap(), "\"PUT\"");
        assert_eq!(
            serde_json::from_str::<OptionType>("\"CALL\"").unwrap(),
            OptionType::Call
        );
        assert_eq!(OptionType::parse("put"), Some(OptionType::Put));
        assert_eq!(OptionType::parse("straddle"), None);
    }
}
