//! Field type detection

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tabstream_core::CellValue;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

// Display form of an offset date-time cell
const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %:z";

/// Detect the value carried by a CSV field
///
/// In order: empty → [`CellValue::Empty`], `true`/`false` (any case) →
/// boolean, integer → `Int64`, decimal number → `Float64`, ISO date,
/// date-time, date-time with offset (RFC 3339 or `2024-03-01 08:30:00 +02:00`),
/// time of day (`08:30:00`), otherwise text.
/// Integers with leading zeros ("007") stay text.
pub fn detect_type(field: &str) -> CellValue {
    let trimmed = field.trim();

    if trimmed.is_empty() {
        return CellValue::Empty;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Boolean(false);
    }

    if looks_numeric(trimmed) {
        if let Ok(n) = trimmed.parse::<i64>() {
            if !has_leading_zero(trimmed) {
                return CellValue::Int64(n);
            }
            return CellValue::string(field);
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Float64(n);
            }
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return CellValue::DateTime(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, OFFSET_DATETIME_FORMAT))
    {
        return CellValue::DateTimeOffset(dt);
    }
    if let Ok(t) = NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f") {
        return CellValue::Time(t);
    }

    CellValue::string(field)
}

/// Digits with an optional sign, point and exponent; rejects "inf" and "NaN"
fn looks_numeric(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

fn has_leading_zero(s: &str) -> bool {
    let digits = s.trim_start_matches(['+', '-']);
    digits.len() > 1 && digits.starts_with('0')
}
