//! Cost-basis metrics for a trade and its adjustments.
//!
//! Pure arithmetic over in-memory data: no I/O and no failure modes. The
//! contract count is signed, so a fully closed (zero) or net-short (negative)
//! position is a valid input, not an error.

use serde::{Deserialize, Serialize};

use super::trades_model::{Trade, TradeAdjustment};

/// Derived position metrics returned alongside a trade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetrics {
    pub adjusted_contracts: i32,
    pub average_price: f64,
}

/// Total contract count after applying every adjustment to the base position.
pub fn adjusted_contracts(trade: &Trade, adjustments: &[TradeAdjustment]) -> i32 {
    trade.contracts + adjustments.iter().map(|a| a.contracts).sum::<i32>()
}

/// Volume-weighted average entry price across the base position and all
/// adjustments. Returns 0.0 when the adjusted contract count is zero.
pub fn average_price(trade: &Trade, adjustments: &[TradeAdjustment]) -> f64 {
    let total_contracts = adjusted_contracts(trade, adjustments);
    if total_contracts == 0 {
        return 0.0;
    }
    let notional = trade.contracts as f64 * trade.contract_price
        + adjustments
            .iter()
            .map(|a| a.contracts as f64 * a.price)
            .sum::<f64>();
    notional / total_contracts as f64
}

pub fn compute(trade: &Trade, adjustments: &[TradeAdjustment]) -> TradeMetrics {
    TradeMetrics {
        adjusted_contracts: adjusted_contracts(trade, adjustments),
        average_price: average_price(trade, adjustments),
    }
}
