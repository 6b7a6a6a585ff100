use chrono::{NaiveDate, Weekday};
use trading_journal_core::errors::CoreError;
use trading_journal_core::models::calendar::YearMonth;
use trading_journal_core::models::settings::JournalSettings;
use trading_journal_core::models::trade::{Trade, TradeId, TradeInput};
use trading_journal_core::storage::store::{JsonFileStore, MemoryStore, TradeStore};
use trading_journal_core::TradingJournal;

// ═══════════════════════════════════════════════════════════════════
// Failing store (for testing rollback without a broken disk)
// ═══════════════════════════════════════════════════════════════════

#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_saves: bool,
}

impl TradeStore for FlakyStore {
    fn load(&self) -> Result<Option<Vec<Trade>>, CoreError> {
        self.inner.load()
    }

    fn save(&mut self, trades: &[Trade]) -> Result<(), CoreError> {
        if self.fail_saves {
            return Err(CoreError::FileIO("disk full".into()));
        }
        self.inner.save(trades)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn form(symbol: &str, direction: &str, date: &str, entry: &str, exit: &str, qty: &str) -> TradeInput {
    TradeInput {
        symbol: symbol.into(),
        direction: direction.into(),
        entry_date: date.into(),
        entry_time: "09:30".into(),
        exit_date: date.into(),
        exit_time: "15:00".into(),
        entry_price: entry.into(),
        exit_price: exit.into(),
        quantity: qty.into(),
        notes: None,
    }
}

fn open_memory() -> TradingJournal<MemoryStore> {
    TradingJournal::open(MemoryStore::new(), JournalSettings::default()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Journal lifecycle
// ═══════════════════════════════════════════════════════════════════

#[test]
fn new_journal_is_empty() {
    let journal = open_memory();
    assert_eq!(journal.trade_count(), 0);
    assert!(journal.trades().is_empty());
    assert_eq!(journal.stats().total_trades, 0);
    assert!(journal.store().blob().is_none());
}

#[test]
fn add_trade_builds_and_persists() {
    let mut journal = open_memory();
    let id = journal
        .add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10"))
        .unwrap();

    let trade = journal.get_trade(&id).unwrap();
    assert_eq!(trade.entry_value, 1000.0);
    assert_eq!(trade.exit_value, 1100.0);
    assert_eq!(trade.pnl, 100.0);
    assert!(trade.is_win);

    let saved = journal.store().load().unwrap().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, id);
}

#[test]
fn remove_trade_persists() {
    let mut journal = open_memory();
    let a = journal.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap();
    let b = journal.add_trade(form("MSFT", "short", "2025-01-16", "100", "90", "5")).unwrap();

    let removed = journal.remove_trade(&a).unwrap();
    assert_eq!(removed.symbol, "AAPL");
    assert_eq!(journal.trade_count(), 1);
    assert!(journal.get_trade(&a).is_none());

    let saved = journal.store().load().unwrap().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, b);
}

#[test]
fn remove_unknown_trade() {
    let mut journal = open_memory();
    let err = journal.remove_trade(&TradeId::new("ghost")).unwrap_err();
    assert!(matches!(err, CoreError::TradeNotFound(ref id) if id == "ghost"));
}

#[test]
fn reopen_from_memory_store() {
    let mut journal = open_memory();
    journal.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap();
    journal.add_trade(form("TSLA", "short", "2025-01-15", "250", "260", "2")).unwrap();
    let before = journal.trades().to_vec();

    let store = journal.into_store();
    let reopened = TradingJournal::open(store, JournalSettings::default()).unwrap();
    assert_eq!(reopened.trades(), before.as_slice());
}

#[test]
fn reopen_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.json");

    let ids = {
        let mut journal = TradingJournal::open(JsonFileStore::new(&path), JournalSettings::default()).unwrap();
        let a = journal.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap();
        let b = journal.add_trade(form("NVDA", "long", "2025-01-17", "500", "480", "1")).unwrap();
        vec![a, b]
    };

    let journal = TradingJournal::open(JsonFileStore::new(&path), JournalSettings::default()).unwrap();
    assert_eq!(journal.trade_count(), 2);
    assert!(ids.iter().all(|id| journal.get_trade(id).is_some()));
    assert_eq!(journal.stats().total_pnl, 80.0);
}

#[test]
fn open_with_corrupt_blob_fails() {
    let result = TradingJournal::open(MemoryStore::with_blob("{oops"), JournalSettings::default());
    assert!(matches!(result, Err(CoreError::Deserialization(_))));
}

// ═══════════════════════════════════════════════════════════════════
// Rollback on failed saves
// ═══════════════════════════════════════════════════════════════════

#[test]
fn failed_save_rolls_back_add() {
    let mut journal = TradingJournal::open(FlakyStore::default(), JournalSettings::default()).unwrap();
    journal.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap();

    let mut store = journal.into_store();
    store.fail_saves = true;
    let mut journal = TradingJournal::open(store, JournalSettings::default()).unwrap();

    let err = journal
        .add_trade(form("MSFT", "long", "2025-01-16", "1", "2", "1"))
        .unwrap_err();
    assert!(matches!(err, CoreError::FileIO(_)));
    assert_eq!(journal.trade_count(), 1);
    assert_eq!(journal.trades()[0].symbol, "AAPL");
}

#[test]
fn failed_save_rolls_back_remove_in_place() {
    let mut journal = TradingJournal::open(FlakyStore::default(), JournalSettings::default()).unwrap();
    let a = journal.add_trade(form("A", "long", "2025-01-15", "1", "2", "1")).unwrap();
    let b = journal.add_trade(form("B", "long", "2025-01-15", "1", "2", "1")).unwrap();
    let c = journal.add_trade(form("C", "long", "2025-01-15", "1", "2", "1")).unwrap();

    let mut store = journal.into_store();
    store.fail_saves = true;
    let mut journal = TradingJournal::open(store, JournalSettings::default()).unwrap();

    assert!(journal.remove_trade(&b).is_err());
    let order: Vec<&TradeId> = journal.trades().iter().map(|t| &t.id).collect();
    assert_eq!(order, vec![&a, &b, &c]);
}

// ═══════════════════════════════════════════════════════════════════
// Statistics & views through the facade
// ═══════════════════════════════════════════════════════════════════

#[test]
fn stats_over_journal() {
    let mut journal = open_memory();
    journal.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap(); // +100
    journal.add_trade(form("MSFT", "short", "2025-01-15", "100", "90", "5")).unwrap(); // +50
    journal.add_trade(form("TSLA", "long", "2025-01-16", "200", "175", "2")).unwrap(); // -50
    journal.add_trade(form("AMD", "long", "2025-01-17", "80", "80", "3")).unwrap(); // 0

    let s = journal.stats();
    assert_eq!(s.total_pnl, 100.0);
    assert_eq!(s.total_trades, 4);
    assert_eq!(s.win_count, 2);
    assert_eq!(s.loss_count, 2);
    assert_eq!(s.win_rate, 50.0);
    assert_eq!(s.avg_win, 75.0);
    assert_eq!(s.avg_loss, 25.0);
    assert_eq!(s.profit_factor, 3.0);
    assert_eq!(s.best_trade.unwrap().symbol, "AAPL");
    assert_eq!(s.worst_trade.unwrap().symbol, "TSLA");
}

#[test]
fn day_summary_through_facade() {
    let mut journal = open_memory();
    journal.add_trade(form("A", "long", "2025-01-15", "100", "103", "10")).unwrap(); // +30
    journal.add_trade(form("B", "long", "2025-01-15", "100", "99", "10")).unwrap(); // -10

    let s = journal.day_summary(d(2025, 1, 15)).unwrap();
    assert_eq!(s.day_pnl, 20.0);
    assert_eq!(s.trade_count, 2);
    assert_eq!(s.win_rate, 50.0);
    assert!(journal.day_summary(d(2025, 1, 14)).is_none());
}

#[test]
fn calendar_uses_configured_week_start() {
    let mut journal = open_memory();
    journal.add_trade(form("A", "long", "2025-01-15", "1", "2", "1")).unwrap();
    let month = YearMonth::new(2025, 1).unwrap();

    let sunday = journal.calendar(month, d(2025, 1, 15));
    assert_eq!(sunday.weeks[0][0].date, d(2024, 12, 29));
    assert!(sunday.day(d(2025, 1, 15)).unwrap().is_today);
    assert_eq!(sunday.day(d(2025, 1, 15)).unwrap().summary.as_ref().unwrap().trade_count, 1);

    journal.set_week_start(Weekday::Mon);
    let monday = journal.calendar(month, d(2025, 1, 15));
    assert_eq!(monday.weeks[0][0].date, d(2024, 12, 30));
}

#[test]
fn list_view_newest_first() {
    let mut journal = open_memory();
    journal.add_trade(form("OLD", "long", "2025-01-01", "1", "2", "1")).unwrap();
    journal.add_trade(form("NEW", "long", "2025-03-01", "1", "2", "1")).unwrap();
    journal.add_trade(form("MID", "long", "2025-02-01", "1", "2", "1")).unwrap();

    let symbols: Vec<&str> = journal
        .trades_newest_first()
        .iter()
        .map(|t| t.symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["NEW", "MID", "OLD"]);
    // Journal order itself is untouched.
    assert_eq!(journal.trades()[0].symbol, "OLD");
}

#[test]
fn search_and_symbol_filter() {
    let mut journal = open_memory();
    let mut with_notes = form("AAPL", "long", "2025-01-15", "1", "2", "1");
    with_notes.notes = Some("Earnings gap".into());
    journal.add_trade(with_notes).unwrap();
    journal.add_trade(form("MSFT", "long", "2025-01-15", "1", "2", "1")).unwrap();
    journal.add_trade(form("aapl", "short", "2025-01-16", "1", "2", "1")).unwrap();

    assert_eq!(journal.search("gap").len(), 1);
    assert_eq!(journal.search("ms").len(), 1);
    assert_eq!(journal.search("AaPl").len(), 2);
    assert_eq!(journal.trades_for_symbol("AAPL").len(), 2);
    assert!(journal.trades_for_symbol("AAP").is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

#[test]
fn set_currency_validates_and_normalizes() {
    let mut journal = open_memory();
    journal.set_currency(" eur ").unwrap();
    assert_eq!(journal.settings().currency, "EUR");

    for bad in ["EURO", "E1R", "", "€€"] {
        let err = journal.set_currency(bad).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
    assert_eq!(journal.settings().currency, "EUR");
}

// ═══════════════════════════════════════════════════════════════════
// Export / Import
// ═══════════════════════════════════════════════════════════════════

#[test]
fn export_csv_quotes_fields() {
    let mut journal = open_memory();
    let mut input = form("AAPL", "long", "2025-01-15", "100", "110", "10");
    input.notes = Some("held \"overnight\", then sold".into());
    let id = journal.add_trade(input).unwrap();

    let csv = journal.export_csv();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,symbol,direction,entryDate,entryTime,exitDate,exitTime,entryPrice,exitPrice,quantity,pnl,notes"
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with(&format!("{id},AAPL,long,2025-01-15,09:30,")));
    assert!(row.contains(",100,110,10,100,"));
    assert!(row.ends_with("\"held \"\"overnight\"\", then sold\""));
    assert!(lines.next().is_none());
}

#[test]
fn export_then_import_into_new_journal() {
    let mut source = open_memory();
    source.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap();
    source.add_trade(form("MSFT", "short", "2025-01-16", "100", "90", "5")).unwrap();
    let json = source.export_json().unwrap();

    let mut target = open_memory();
    assert_eq!(target.import_json(&json).unwrap(), 2);
    assert_eq!(target.trades(), source.trades());
    assert_eq!(target.store().load().unwrap().unwrap().len(), 2);
}

#[test]
fn import_rejects_duplicates_atomically() {
    let mut journal = open_memory();
    journal.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap();
    let json = journal.export_json().unwrap();

    let err = journal.import_json(&json).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateTrade(_)));
    assert_eq!(journal.trade_count(), 1);
}

#[test]
fn import_rejects_repeated_ids_in_batch() {
    let mut source = open_memory();
    source.add_trade(form("AAPL", "long", "2025-01-15", "100", "110", "10")).unwrap();
    let mut trades = source.trades().to_vec();
    trades.push(trades[0].clone());
    let json = serde_json::to_string(&trades).unwrap();

    let mut target = open_memory();
    assert!(matches!(target.import_json(&json), Err(CoreError::DuplicateTrade(_))));
    assert_eq!(target.trade_count(), 0);
    assert!(target.store().blob().is_none());
}

#[test]
fn import_keeps_stored_pnl() {
    let json = r#"[{
        "id": "1736950000000",
        "symbol": "ES",
        "direction": "long",
        "entryDate": "2025-01-15",
        "entryTime": "09:30",
        "exitDate": "2025-01-15",
        "exitTime": "10:00",
        "entryPrice": "5000",
        "exitPrice": "5010",
        "quantity": "1",
        "entryValue": 5000,
        "exitValue": 5010,
        "pnl": 500,
        "isWin": true,
        "createdAt": "2025-01-15T10:05:00.000Z"
    }]"#;
    let mut journal = open_memory();
    assert_eq!(journal.import_json(json).unwrap(), 1);
    let trade = journal.get_trade(&TradeId::new("1736950000000")).unwrap();
    assert_eq!(trade.pnl, 500.0);
    assert_eq!(trade.entry_price, 5000.0);
}
