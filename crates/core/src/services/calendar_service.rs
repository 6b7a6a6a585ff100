use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::cmp::Ordering;

use crate::models::calendar::{CalendarDay, CalendarMonth, YearMonth};
use crate::models::trade::Trade;
use crate::services::analytics_service::AnalyticsService;

/// Lays trades out for the calendar and list views.
///
/// The core computes the grid and the per-day numbers; the frontend only
/// renders cells.
pub struct CalendarService {
    analytics_service: AnalyticsService,
}

impl CalendarService {
    pub fn new() -> Self {
        Self {
            analytics_service: AnalyticsService::new(),
        }
    }

    /// Build the month grid for `month`.
    ///
    /// The grid starts on the `week_start` day on or before the 1st and
    /// ends on the last day of the week containing the month's last day,
    /// so it always holds whole weeks. `today` only sets `is_today`.
    ///
    /// Trades are indexed by entry day once: O(days + trades).
    pub fn calendar_month(
        &self,
        trades: &[Trade],
        month: YearMonth,
        week_start: Weekday,
        today: NaiveDate,
    ) -> CalendarMonth {
        let first = month.first_day();
        let last = month.last_day();

        let lead = days_after(first.weekday(), week_start);
        let trail = 6 - days_after(last.weekday(), week_start);
        let grid_start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
        let grid_end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

        let mut summaries = self.analytics_service.summarize_days(trades);

        let mut weeks: Vec<Vec<CalendarDay>> = Vec::new();
        let mut week: Vec<CalendarDay> = Vec::with_capacity(7);
        let mut current = grid_start;

        loop {
            week.push(CalendarDay {
                date: current,
                in_month: current.month() == month.month && current.year() == month.year,
                is_today: current == today,
                summary: summaries.remove(&current),
            });
            if week.len() == 7 {
                weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
            }
            if current >= grid_end {
                break;
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        if !week.is_empty() {
            weeks.push(week);
        }

        CalendarMonth { month, weeks }
    }

    /// Trades ordered for the list view: newest entry date first.
    ///
    /// The sort is stable, so trades on the same date keep their journal
    /// order. A trade with an empty or unparseable entry date counts as
    /// newest.
    pub fn newest_first<'a>(&self, trades: &'a [Trade]) -> Vec<&'a Trade> {
        let mut sorted: Vec<&Trade> = trades.iter().collect();
        sorted.sort_by(|a, b| match (a.entry_day(), b.entry_day()) {
            (Some(da), Some(db)) => db.cmp(&da),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        sorted
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

/// How many days `day` comes after `week_start` within a week (0..=6).
fn days_after(day: Weekday, week_start: Weekday) -> u64 {
    let d = day.num_days_from_monday();
    let s = week_start.num_days_from_monday();
    u64::from((d + 7 - s) % 7)
}
