use crate::models::trade::parse_day;

/// Format an amount with its currency: two decimals, thousands separators,
/// minus sign in front of the symbol (e.g. `-$1,234.50`).
///
/// Known symbols are used for USD, EUR, GBP and JPY; any other code is
/// written as a prefix (`PLN 12.00`).
pub fn format_currency(amount: f64, currency: &str) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }

    let prefix = match currency.to_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{other} "),
    };
    let sign = if amount < 0.0 { "-" } else { "" };

    if amount.is_infinite() {
        return format!("{sign}{prefix}∞");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    // "-0.00" reads as zero, drop the sign
    let sign = if int_part.chars().all(|c| c == '0') && frac_part.chars().all(|c| c == '0') {
        ""
    } else {
        sign
    };

    format!("{sign}{prefix}{}.{frac_part}", group_thousands(int_part))
}

/// Percentage with a fixed number of decimals, e.g. `50.0%`.
pub fn format_percent(rate: f64, decimals: usize) -> String {
    format!("{rate:.decimals$}%")
}

/// Profit factor as shown on the stats cards: `∞` or two decimals.
pub fn format_profit_factor(profit_factor: f64) -> String {
    if profit_factor == f64::INFINITY {
        "∞".to_string()
    } else {
        format!("{profit_factor:.2}")
    }
}

/// Stored `YYYY-MM-DD` date as `Jan 5, 2025`.
///
/// Empty text stays empty; text that is not a date is returned as-is.
pub fn format_trade_date(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    match parse_day(text) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => text.to_string(),
    }
}

/// `1 trade`, `3 trades`.
pub fn trade_count_label(count: usize) -> String {
    if count == 1 {
        "1 trade".to_string()
    } else {
        format!("{count} trades")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
