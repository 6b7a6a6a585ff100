use serde::Serialize;

use super::trade::Trade;

/// Journal-wide statistics over a set of trades.
///
/// Monetary values are in the journal's display currency. A trade with
/// `pnl == 0` counts as a loss.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Sum of every trade's pnl
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,

    pub total_trades: usize,

    /// Trades with pnl > 0
    pub win_count: usize,

    /// Trades with pnl <= 0
    pub loss_count: usize,

    /// Sum of winning pnl
    pub total_win_amount: f64,

    /// Sum of |pnl| over losing trades
    pub total_loss_amount: f64,

    /// Percentage in [0, 100]; 0 for an empty journal
    pub win_rate: f64,

    pub avg_win: f64,

    /// Average |pnl| of losing trades (positive number)
    pub avg_loss: f64,

    /// `total_win_amount / total_loss_amount`; `f64::INFINITY` when there
    /// are wins but nothing lost, 0 when there is neither.
    pub profit_factor: f64,

    /// Winning trade with the largest pnl (first one on ties)
    pub best_trade: Option<Trade>,

    /// Losing or breakeven trade with the smallest pnl (first one on ties)
    pub worst_trade: Option<Trade>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_pnl: 0.0,
            total_trades: 0,
            win_count: 0,
            loss_count: 0,
            total_win_amount: 0.0,
            total_loss_amount: 0.0,
            win_rate: 0.0,
            avg_win: 0.0,
            avg_loss: 0.0,
            profit_factor: 0.0,
            best_trade: None,
            worst_trade: None,
        }
    }
}

/// Summary of the trades entered on one calendar day.
///
/// Only produced when the day has at least one trade, so a `None` day
/// is distinguishable from a day that broke exactly even.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    #[serde(rename = "dayPnL")]
    pub day_pnl: f64,

    pub trade_count: usize,

    pub win_rate: f64,
}
