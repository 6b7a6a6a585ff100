use chrono::{DateTime, Utc};

use crate::models::trade::{Direction, Trade, TradeId, TradeInput};

/// Turns raw form input into a [`Trade`] with its derived P&L fields.
///
/// Pure business logic: no validation, no I/O. The caller supplies the
/// id and creation time and is responsible for storing the result.
pub struct TradeBuilder;

impl TradeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a trade from form input.
    ///
    /// - `entry_value = entry_price × quantity`
    /// - `exit_value = exit_price × quantity`
    /// - long: `pnl = exit_value − entry_value`, otherwise the reverse
    /// - `is_win = pnl > 0` (breakeven is not a win)
    ///
    /// Non-numeric price or quantity text becomes NaN and carries through
    /// to `pnl`; such a trade is never a win.
    pub fn build(&self, input: &TradeInput, id: TradeId, created_at: DateTime<Utc>) -> Trade {
        let entry_price = parse_decimal(&input.entry_price);
        let exit_price = parse_decimal(&input.exit_price);
        let quantity = parse_decimal(&input.quantity);
        let direction = Direction::from_input(&input.direction);

        let entry_value = entry_price * quantity;
        let exit_value = exit_price * quantity;
        let pnl = compute_pnl(direction, entry_value, exit_value);

        Trade {
            id,
            symbol: input.symbol.clone(),
            direction,
            entry_date: input.entry_date.clone(),
            entry_time: input.entry_time.clone(),
            exit_date: input.exit_date.clone(),
            exit_time: input.exit_time.clone(),
            entry_price,
            exit_price,
            quantity,
            notes: input.notes.clone(),
            entry_value,
            exit_value,
            pnl,
            is_win: pnl > 0.0,
            created_at,
        }
    }
}

impl Default for TradeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Realized P&L from the two position values.
pub fn compute_pnl(direction: Direction, entry_value: f64, exit_value: f64) -> f64 {
    match direction {
        Direction::Long => exit_value - entry_value,
        Direction::Short => entry_value - exit_value,
    }
}

/// Lenient decimal parsing for form text.
///
/// Leading whitespace is skipped and the longest leading decimal literal
/// is used, so `"12.5 USD"` is 12.5. Text without a numeric prefix is NaN.
pub fn parse_decimal(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let is_digit = |i: usize| i < len && bytes[i].is_ascii_digit();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;

    while is_digit(end) {
        end += 1;
    }
    let int_digits = end - digits_start;

    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        let mut j = end + 1;
        while is_digit(j) {
            j += 1;
        }
        frac_digits = j - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        if s[digits_start..].starts_with("Infinity") {
            return if s.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        return f64::NAN;
    }

    // Exponent only counts when it has digits ("1e" parses as 1).
    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while is_digit(j) {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

