//! Typed accessors built on raw string values.
//!
//! Every accessor returns `None` when the key is absent or when the text
//! cannot be coerced. There are no defaults and no errors.
//!
//! Numeric rules: the value's leading numeric prefix (optional sign, digits,
//! optional fraction, optional exponent) is used, so `"123.456"` reads as
//! integer `123` and float `123.456`, and `"12abc"` reads as `12`. Text with
//! no numeric prefix, such as `"abc"`, is absent rather than zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::borrow::Cow;

/// Typed getters shared by `Section` and `Config`.
pub trait TypedGetter {
    /// Raw string for `key`, after any override the implementor applies.
    fn raw(&self, key: &str) -> Option<Cow<'_, str>>;

    fn get_string(&self, key: &str) -> Option<String> {
        self.raw(key).map(Cow::into_owned)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.raw(key).and_then(|v| coerce_int(&v))
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        self.raw(key).and_then(|v| coerce_float(&v))
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.raw(key).and_then(|v| coerce_bool(&v))
    }

    fn get_date_time(&self, key: &str) -> Option<DateTime<Utc>> {
        self.raw(key).and_then(|v| coerce_date_time(&v))
    }
}

/// Longest numeric prefix of `value`, ignoring leading whitespace.
///
/// Returns the prefix and whether it carries a fraction or exponent.
fn numeric_prefix(value: &str) -> Option<(&str, bool)> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    let mut is_real = false;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
            is_real = true;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
            is_real = true;
        }
    }

    Some((&s[..end], is_real))
}

/// Coerce to an integer, truncating any fraction toward zero.
///
/// Values outside the `i64` range saturate.
pub fn coerce_int(value: &str) -> Option<i64> {
    let (prefix, is_real) = numeric_prefix(value)?;
    if !is_real {
        if let Ok(n) = prefix.parse::<i64>() {
            return Some(n);
        }
    }
    // `as` saturates on overflow.
    prefix.parse::<f64>().ok().map(|f| f.trunc() as i64)
}

/// Coerce to a float. `inf` and `nan` spellings are not accepted.
pub fn coerce_float(value: &str) -> Option<f64> {
    let (prefix, _) = numeric_prefix(value)?;
    prefix.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Coerce to a boolean using a fixed, case-insensitive vocabulary.
pub fn coerce_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Coerce to a UTC date/time.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD` (midnight) and whole-second Unix timestamps.
pub fn coerce_date_time(value: &str) -> Option<DateTime<Utc>> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    if is_timestamp(s) {
        return s
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn is_timestamp(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
