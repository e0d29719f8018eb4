use chrono::{DateTime, NaiveDateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Display format used for start/end columns, e.g. `01.11.2024 09:30`.
pub const DATE_DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Input format of the date pickers, read as UTC.
pub const DATE_INPUT_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Elapsed days between two instants, truncated (not rounded) to two decimals.
///
/// Ordering is not checked: `end < start` gives a negative count, which callers
/// use as the "range is inverted" signal.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let diff_millis = end.signed_duration_since(start).num_milliseconds() as f64;
    let diff_days = diff_millis / MILLIS_PER_DAY;

    (diff_days * 100.0).floor() / 100.0
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

/// Accepts RFC 3339 or the picker format `dd.MM.yyyy HH:mm:ss`.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();

    DateTime::parse_from_rfc3339(input)
        .map(|date| date.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(input, DATE_INPUT_FORMAT).map(|n| n.and_utc()))
        .map_err(|_| format!("expected RFC 3339 or dd.MM.yyyy HH:mm:ss, got `{input}`"))
}
