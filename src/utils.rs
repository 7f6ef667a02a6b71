/// Utility functions
use chrono::NaiveDate;

/// Group the integer digits of a number with commas, keeping up to three
/// fraction digits (trailing zeros dropped).
pub fn group_thousands(value: f64) -> String {
    let negative = value.is_sign_negative() && value != 0.0;
    let magnitude = value.abs();
    let mut int_part = magnitude.trunc() as u64;
    let mut frac_milli = (magnitude.fract() * 1000.0).round() as u64;
    if frac_milli >= 1000 {
        int_part += 1;
        frac_milli = 0;
    }

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 6);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if frac_milli > 0 {
        grouped.push('.');
        let frac = format!("{:03}", frac_milli);
        grouped.push_str(frac.trim_end_matches('0'));
    }
    grouped
}

/// Format a decimal quantity that arrives as a string on the wire.
/// Unparseable input is shown unchanged.
pub fn format_quantity(raw: &str) -> String {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(group_thousands)
        .unwrap_or_else(|| raw.to_string())
}

/// Render a date in long form, e.g. "June 16, 2025".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Render a `YYYY-MM-DD` string in long form, falling back to the raw text.
pub fn long_date_str(raw: &str) -> String {
    raw.parse::<NaiveDate>()
        .map(long_date)
        .unwrap_or_else(|_| raw.to_string())
}

/// Truncate to at most `max` characters, appending an ellipsis when cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max).collect();
    while cut.ends_with(' ') {
        cut.pop();
    }
    cut.push('…');
    cut
}
