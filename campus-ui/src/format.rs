//! Locale-aware number and date formatting for table cells.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;

use crate::value::Value;

/// Separators used when formatting numbers.
///
/// Only the separators vary between the supported locales; digit grouping is
/// always by thousands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    /// Thousands separator.
    pub group: char,
    /// Decimal separator.
    pub decimal: char,
}

impl NumberLocale {
    /// `1,234.5`
    pub const EN_US: Self = Self {
        group: ',',
        decimal: '.',
    };

    /// `1.234,5`
    pub const DE_DE: Self = Self {
        group: '.',
        decimal: ',',
    };

    /// `1 234,5` (narrow no-break space)
    pub const FR_FR: Self = Self {
        group: '\u{202f}',
        decimal: ',',
    };

    /// Resolves a BCP 47 tag. Unknown tags fall back to en-US.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "de" | "nl" | "id" | "it" | "es" | "pt" | "tr" => Self::DE_DE,
            "fr" | "pl" | "cs" | "sv" | "fi" | "nb" => Self::FR_FR,
            _ => Self::EN_US,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Formats `value` rounded to at most `max_fraction` digits, keeping at least
/// `min_fraction` digits after the separator.
///
/// ```
/// use campus_ui::format::{format_number, NumberLocale};
///
/// assert_eq!(format_number(1234.5, 2, 2, &NumberLocale::EN_US), "1,234.50");
/// assert_eq!(format_number(0.12345, 0, 3, &NumberLocale::EN_US), "0.123");
/// ```
pub fn format_number(
    value: f64,
    min_fraction: usize,
    max_fraction: usize,
    locale: &NumberLocale,
) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let max_fraction = max_fraction.max(min_fraction);
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (fixed, String::new()),
    };

    let mut frac = frac_part;
    while frac.len() > min_fraction && frac.ends_with('0') {
        frac.pop();
    }

    let negative = value < 0.0 && (int_part.chars().any(|c| c != '0') || !frac.chars().all(|c| c == '0'));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(&int_part, locale.group));
    if !frac.is_empty() {
        out.push(locale.decimal);
        out.push_str(&frac);
    }
    out
}

/// Inserts `separator` between each group of three digits.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Formats a currency amount: symbol prefix, exactly two decimals.
///
/// Negative amounts put the sign before the symbol (`-$5.00`).
pub fn format_currency(value: f64, symbol: &str, locale: &NumberLocale) -> String {
    let formatted = format_number(value, 2, 2, locale);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-{symbol}{rest}"),
        None => format!("{symbol}{formatted}"),
    }
}

/// Formats a percentage with exactly one decimal and a `%` suffix.
pub fn format_percentage(value: f64, locale: &NumberLocale) -> String {
    format!("{}%", format_number(value, 1, 1, locale))
}

/// Interprets a cell value as a timestamp.
///
/// Accepts timestamps, epoch milliseconds, RFC 3339 strings, and
/// `YYYY-MM-DD[ HH:MM[:SS]]` strings (read as UTC). Anything else is `None`.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Int(ms) => Utc.timestamp_millis_opt(*ms).single(),
        Value::Float(ms) if ms.is_finite() => Utc.timestamp_millis_opt(*ms as i64).single(),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `Mar 5, 2025`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// `Mar 5, 2025 14:07`
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let en = NumberLocale::EN_US;
        assert_eq!(format_number(1234567.0, 0, 3, &en), "1,234,567");
        assert_eq!(format_number(999.0, 0, 3, &en), "999");
        assert_eq!(format_number(-1000.25, 2, 2, &en), "-1,000.25");
    }

    #[test]
    fn trims_trailing_zeros_down_to_minimum() {
        let en = NumberLocale::EN_US;
        assert_eq!(format_number(1.5, 0, 3, &en), "1.5");
        assert_eq!(format_number(2.0, 0, 3, &en), "2");
        assert_eq!(format_number(2.0, 1, 1, &en), "2.0");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.0001, 2, 2, &NumberLocale::EN_US), "0.00");
    }

    #[test]
    fn german_separators() {
        assert_eq!(
            format_number(1234.5, 2, 2, &NumberLocale::from_tag("de-DE")),
            "1.234,50"
        );
    }

    #[test]
    fn currency_and_percentage() {
        let en = NumberLocale::EN_US;
        assert_eq!(format_currency(99.0, "$", &en), "$99.00");
        assert_eq!(format_currency(-5.0, "€", &en), "-€5.00");
        assert_eq!(format_percentage(12.345, &en), "12.3%");
    }

    #[test]
    fn parses_common_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_date(&Value::from("2025-03-05")), Some(expected));
        assert_eq!(
            parse_date(&Value::from("2025-03-05T00:00:00Z")),
            Some(expected)
        );
        assert_eq!(
            parse_date(&Value::Int(expected.timestamp_millis())),
            Some(expected)
        );
        assert_eq!(parse_date(&Value::from("not a date")), None);
        assert_eq!(parse_date(&Value::Bool(true)), None);
    }

    #[test]
    fn formats_dates() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 5, 14, 7, 0).unwrap();
        assert_eq!(format_date(&dt), "Mar 5, 2025");
        assert_eq!(format_datetime(&dt), "Mar 5, 2025 14:07");
    }
}
