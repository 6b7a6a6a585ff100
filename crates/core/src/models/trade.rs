use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque trade identifier.
///
/// New trades get a UUID v4 string, but any text is accepted when a
/// journal blob is loaded, so older ids (e.g. millisecond timestamps)
/// keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TradeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Profits when price rises
    Long,
    /// Profits when price falls
    Short,
}

impl Direction {
    /// Interpret form text. Only the exact text `long` is long; anything
    /// else takes the short-side formula.
    pub fn from_input(text: &str) -> Self {
        if text == "long" {
            Direction::Long
        } else {
            Direction::Short
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

/// Raw fields as entered on the trade form.
///
/// Prices and quantity stay as text here; the builder parses them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInput {
    pub symbol: String,
    pub direction: String,
    pub entry_date: String,
    pub entry_time: String,
    pub exit_date: String,
    pub exit_time: String,
    pub entry_price: String,
    pub exit_price: String,
    pub quantity: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One closed trade with its derived P&L fields.
///
/// `entry_value`, `exit_value`, `pnl` and `is_win` are computed once by
/// [`TradeBuilder`](crate::services::trade_builder::TradeBuilder) and are
/// never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: TradeId,

    pub symbol: String,

    pub direction: Direction,

    /// `YYYY-MM-DD`, stored verbatim
    pub entry_date: String,

    /// `HH:MM`, stored verbatim
    pub entry_time: String,

    pub exit_date: String,

    pub exit_time: String,

    #[serde(deserialize_with = "number_or_text")]
    pub entry_price: f64,

    #[serde(deserialize_with = "number_or_text")]
    pub exit_price: f64,

    #[serde(deserialize_with = "number_or_text")]
    pub quantity: f64,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(deserialize_with = "number_or_text")]
    pub entry_value: f64,

    #[serde(deserialize_with = "number_or_text")]
    pub exit_value: f64,

    /// Realized profit (positive) or loss (negative). NaN when the form
    /// input was not numeric.
    #[serde(deserialize_with = "number_or_text")]
    pub pnl: f64,

    pub is_win: bool,

    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// Calendar day of entry, ignoring the time field.
    pub fn entry_day(&self) -> Option<NaiveDate> {
        parse_day(&self.entry_date)
    }

    pub fn exit_day(&self) -> Option<NaiveDate> {
        parse_day(&self.exit_date)
    }
}

/// Parse the date part of a stored date field. Accepts a bare
/// `YYYY-MM-DD` or a longer ISO text starting with one.
pub fn parse_day(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Accept a JSON number, `null` (a non-finite value written out by JSON)
/// or decimal text for a numeric field.
fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => crate::services::trade_builder::parse_decimal(&s),
        Raw::Null(()) => f64::NAN,
    })
}
