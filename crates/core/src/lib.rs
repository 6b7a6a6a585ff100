pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc, Weekday};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use errors::CoreError;
use models::{
    analytics::{DaySummary, Stats},
    calendar::{CalendarMonth, YearMonth},
    settings::JournalSettings,
    trade::{Trade, TradeId, TradeInput},
};
use services::{
    analytics_service::AnalyticsService, calendar_service::CalendarService,
    trade_builder::TradeBuilder,
};
use storage::{format, store::TradeStore};

/// Main entry point for the Trading Journal core library.
///
/// Owns the trade collection and the store it is persisted to. Every
/// mutation writes the whole collection back through the store before
/// returning; if that write fails the mutation is undone, so memory and
/// storage never disagree.
#[must_use]
pub struct TradingJournal<S: TradeStore> {
    trades: Vec<Trade>,
    settings: JournalSettings,
    store: S,
    trade_builder: TradeBuilder,
    analytics_service: AnalyticsService,
    calendar_service: CalendarService,
}

impl<S: TradeStore> std::fmt::Debug for TradingJournal<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingJournal")
            .field("trades", &self.trades.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl<S: TradeStore> TradingJournal<S> {
    /// Open a journal backed by `store`. A store with nothing saved yet
    /// gives an empty journal.
    pub fn open(store: S, settings: JournalSettings) -> Result<Self, CoreError> {
        let trades = match store.load()? {
            Some(trades) => trades,
            None => {
                warn!("no saved journal found, starting empty");
                Vec::new()
            }
        };
        info!(trades = trades.len(), currency = %settings.currency, "journal opened");

        Ok(Self {
            trades,
            settings,
            store,
            trade_builder: TradeBuilder::new(),
            analytics_service: AnalyticsService::new(),
            calendar_service: CalendarService::new(),
        })
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the journal and hand back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Trade Management ────────────────────────────────────────────

    /// Record a new trade from form input.
    ///
    /// The P&L fields are computed here, once. Returns the new trade's id.
    pub fn add_trade(&mut self, input: TradeInput) -> Result<TradeId, CoreError> {
        let id = TradeId::generate();
        let trade = self.trade_builder.build(&input, id.clone(), Utc::now());
        debug!(id = %id, symbol = %trade.symbol, pnl = trade.pnl, "adding trade");

        self.trades.push(trade);
        if let Err(e) = self.store.save(&self.trades) {
            self.trades.pop();
            warn!(id = %id, error = %e, "save failed, trade not added");
            return Err(e);
        }
        Ok(id)
    }

    /// Delete a trade by id. Returns the removed trade.
    pub fn remove_trade(&mut self, id: &TradeId) -> Result<Trade, CoreError> {
        let idx = self
            .trades
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CoreError::TradeNotFound(id.to_string()))?;

        let removed = self.trades.remove(idx);
        if let Err(e) = self.store.save(&self.trades) {
            self.trades.insert(idx, removed);
            warn!(id = %id, error = %e, "save failed, trade not removed");
            return Err(e);
        }
        debug!(id = %id, remaining = self.trades.len(), "trade removed");
        Ok(removed)
    }

    /// Get a single trade by its id.
    #[must_use]
    pub fn get_trade(&self, id: &TradeId) -> Option<&Trade> {
        self.trades.iter().find(|t| &t.id == id)
    }

    /// All trades in journal (insertion) order.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    // ── Statistics ──────────────────────────────────────────────────

    /// Journal-wide statistics.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.analytics_service.aggregate(&self.trades)
    }

    /// Summary of trades entered on `day`, or `None` if there were none.
    #[must_use]
    pub fn day_summary(&self, day: NaiveDate) -> Option<DaySummary> {
        self.analytics_service.bucket_by_day(&self.trades, day)
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Month grid for the calendar view, using the configured week start.
    #[must_use]
    pub fn calendar(&self, month: YearMonth, today: NaiveDate) -> CalendarMonth {
        self.calendar_service
            .calendar_month(&self.trades, month, self.settings.week_start, today)
    }

    /// Trades for the list view, newest entry date first.
    #[must_use]
    pub fn trades_newest_first(&self) -> Vec<&Trade> {
        self.calendar_service.newest_first(&self.trades)
    }

    /// Search trades by symbol and notes (case-insensitive substring).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Trade> {
        let q = query.to_lowercase();
        self.trades
            .iter()
            .filter(|t| {
                t.symbol.to_lowercase().contains(&q)
                    || t.notes.as_deref().unwrap_or("").to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Trades for one symbol (case-insensitive exact match).
    #[must_use]
    pub fn trades_for_symbol(&self, symbol: &str) -> Vec<&Trade> {
        self.trades
            .iter()
            .filter(|t| t.symbol.eq_ignore_ascii_case(symbol))
            .collect()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &JournalSettings {
        &self.settings
    }

    /// Set the display currency. Must be a 3-letter code (e.g., USD, EUR).
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
            )));
        }
        self.settings.currency = trimmed;
        Ok(())
    }

    /// Set the first weekday of the calendar grid.
    pub fn set_week_start(&mut self, week_start: Weekday) {
        self.settings.week_start = week_start;
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all trades as a JSON array (the same shape as the stored blob).
    pub fn export_json(&self) -> Result<String, CoreError> {
        format::encode_trades(&self.trades)
    }

    /// Export all trades as CSV.
    /// Columns: id, symbol, direction, entryDate, entryTime, exitDate,
    /// exitTime, entryPrice, exitPrice, quantity, pnl, notes
    #[must_use]
    pub fn export_csv(&self) -> String {
        let mut csv = String::from(
            "id,symbol,direction,entryDate,entryTime,exitDate,exitTime,entryPrice,exitPrice,quantity,pnl,notes\n",
        );
        for t in &self.trades {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{}\n",
                csv_field(t.id.as_str()),
                csv_field(&t.symbol),
                t.direction,
                csv_field(&t.entry_date),
                csv_field(&t.entry_time),
                csv_field(&t.exit_date),
                csv_field(&t.exit_time),
                t.entry_price,
                t.exit_price,
                t.quantity,
                t.pnl,
                csv_field(t.notes.as_deref().unwrap_or("")),
            ));
        }
        csv
    }

    /// Append trades from a JSON array. Trades are taken as stored: their
    /// P&L fields are not recomputed.
    ///
    /// All-or-nothing: if any id is already in the journal (or repeated in
    /// the input), nothing is added. Returns the number of trades imported.
    pub fn import_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let incoming = format::decode_trades(json)?;

        {
            let mut seen: HashSet<&TradeId> = self.trades.iter().map(|t| &t.id).collect();
            for trade in &incoming {
                if !seen.insert(&trade.id) {
                    return Err(CoreError::DuplicateTrade(trade.id.to_string()));
                }
            }
        }

        let count = incoming.len();
        let before = self.trades.len();
        self.trades.extend(incoming);
        if let Err(e) = self.store.save(&self.trades) {
            self.trades.truncate(before);
            warn!(error = %e, "save failed, import rolled back");
            return Err(e);
        }
        info!(imported = count, total = self.trades.len(), "trades imported");
        Ok(count)
    }
}

/// Quote a CSV field when it contains a comma, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
