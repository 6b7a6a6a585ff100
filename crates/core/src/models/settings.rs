use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// User-configurable journal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSettings {
    /// Display currency for amounts (e.g., "USD", "EUR", "PLN").
    /// Amounts are never converted, only labelled.
    pub currency: String,

    /// First column of the calendar grid.
    pub week_start: Weekday,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            week_start: Weekday::Sun,
        }
    }
}
