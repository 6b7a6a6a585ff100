use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::analytics::{DaySummary, Stats};
use crate::models::trade::Trade;

/// Computes journal statistics: totals, win rate, averages, profit factor,
/// best/worst trade and per-day summaries.
///
/// Stateless: every call reads the trades it is given and returns a fresh
/// result. Trades are never modified.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate statistics over all trades in a single pass.
    ///
    /// A trade wins when `pnl > 0`; everything else (including breakeven
    /// and NaN pnl) lands in the loss partition. On equal pnl the earlier
    /// trade stays best/worst.
    pub fn aggregate(&self, trades: &[Trade]) -> Stats {
        let mut total_pnl = 0.0;
        let mut win_count = 0usize;
        let mut loss_count = 0usize;
        let mut total_win_amount = 0.0;
        let mut total_loss_amount = 0.0;
        let mut best: Option<&Trade> = None;
        let mut worst: Option<&Trade> = None;

        for trade in trades {
            total_pnl += trade.pnl;

            if trade.pnl > 0.0 {
                win_count += 1;
                total_win_amount += trade.pnl;
                if best.map_or(true, |b| trade.pnl > b.pnl) {
                    best = Some(trade);
                }
            } else {
                loss_count += 1;
                total_loss_amount += trade.pnl.abs();
                if worst.map_or(true, |w| trade.pnl < w.pnl) {
                    worst = Some(trade);
                }
            }
        }

        let total_trades = trades.len();

        let win_rate = if total_trades > 0 {
            win_count as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };
        let avg_win = if win_count > 0 {
            total_win_amount / win_count as f64
        } else {
            0.0
        };
        let avg_loss = if loss_count > 0 {
            total_loss_amount / loss_count as f64
        } else {
            0.0
        };
        let profit_factor = if total_loss_amount > 0.0 {
            total_win_amount / total_loss_amount
        } else if total_win_amount > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Stats {
            total_pnl,
            total_trades,
            win_count,
            loss_count,
            total_win_amount,
            total_loss_amount,
            win_rate,
            avg_win,
            avg_loss,
            profit_factor,
            best_trade: best.cloned(),
            worst_trade: worst.cloned(),
        }
    }

    /// Summary of the trades entered on `day`. The entry time is ignored.
    ///
    /// Returns `None` when no trade was entered that day.
    pub fn bucket_by_day(&self, trades: &[Trade], day: NaiveDate) -> Option<DaySummary> {
        let mut bucket = DayBucket::default();
        for trade in trades.iter().filter(|t| t.entry_day() == Some(day)) {
            bucket.push(trade);
        }
        bucket.finish()
    }

    /// Day summaries for every entry day in the journal, in one pass.
    /// Trades whose entry date does not parse are left out.
    pub fn summarize_days(&self, trades: &[Trade]) -> BTreeMap<NaiveDate, DaySummary> {
        let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
        for trade in trades {
            if let Some(day) = trade.entry_day() {
                buckets.entry(day).or_default().push(trade);
            }
        }
        buckets
            .into_iter()
            .filter_map(|(day, bucket)| bucket.finish().map(|summary| (day, summary)))
            .collect()
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Running totals for one calendar day.
#[derive(Debug, Default)]
struct DayBucket {
    pnl: f64,
    count: usize,
    wins: usize,
}

impl DayBucket {
    fn push(&mut self, trade: &Trade) {
        self.pnl += trade.pnl;
        self.count += 1;
        if trade.pnl > 0.0 {
            self.wins += 1;
        }
    }

    fn finish(self) -> Option<DaySummary> {
        if self.count == 0 {
            return None;
        }
        Some(DaySummary {
            day_pnl: self.pnl,
            trade_count: self.count,
            win_rate: self.wins as f64 / self.count as f64 * 100.0,
        })
    }
}
