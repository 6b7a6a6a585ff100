use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::analytics::DaySummary;

/// A calendar month, the unit the calendar view pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` if `month` is not in 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Header label, e.g. "January 2025".
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,

    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,

    pub is_today: bool,

    /// `None` when no trade was entered on this day
    pub summary: Option<DaySummary>,
}

/// Month grid: whole weeks covering the month, seven days per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub month: YearMonth,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl CalendarMonth {
    /// All cells in display order.
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten()
    }

    /// Cell for a specific date, if it is on the grid.
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days().find(|d| d.date == date)
    }
}
