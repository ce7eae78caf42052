//! Typed conversions out of [`CellValue`]
//!
//! Every target type implements [`FromCellValue`] with an exhaustive match
//! over the value tag. The rules:
//!
//! - An empty value converts only to `String` (as `""`); every other target
//!   fails with [`ConversionFailure::Absent`].
//! - Integers widen and narrow with range checks. Floats and decimals round
//!   half-to-even before narrowing to an integer. Booleans are `1`/`0`.
//! - Text is trimmed and parsed into numbers, booleans (`true`/`false`, any
//!   case) and dates/times (ISO 8601 shapes).
//! - Numbers convert to `bool` as "non-zero".
//! - Date/time targets return an exact-shape raw value as-is and otherwise
//!   project or combine through a [`NaiveDateTime`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::cell::CellValue;
use crate::error::{ConversionError, ConversionFailure};

type ConvertResult<T> = std::result::Result<T, ConversionError>;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATETIME_OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// A type that a [`CellValue`] can be converted into
pub trait FromCellValue: Sized {
    /// Name used in conversion errors
    const TYPE_NAME: &'static str;

    /// Convert the raw value, failing with a [`ConversionError`]
    fn from_cell_value(value: &CellValue) -> ConvertResult<Self>;
}

fn fail<T>(value: &CellValue, to: &'static str, reason: ConversionFailure) -> ConvertResult<T> {
    Err(ConversionError::new(value.type_name(), to, reason))
}

fn reject<T>(value: &CellValue, to: &'static str) -> ConvertResult<T> {
    let reason = if value.is_empty() {
        ConversionFailure::Absent
    } else {
        ConversionFailure::Incompatible
    };
    fail(value, to, reason)
}

fn unparseable<T>(value: &CellValue, to: &'static str, text: &str) -> ConvertResult<T> {
    fail(value, to, ConversionFailure::Unparseable(text.to_string()))
}

fn float_to_wide(value: &CellValue, to: &'static str, f: f64) -> ConvertResult<i128> {
    if !f.is_finite() {
        return fail(value, to, ConversionFailure::OutOfRange);
    }
    // `as` saturates; anything past i128 fails the narrowing check later.
    Ok(f.round_ties_even() as i128)
}

/// Widen any integer-convertible value to `i128` before narrowing
fn to_wide_integer(value: &CellValue, to: &'static str) -> ConvertResult<i128> {
    match value {
        CellValue::Boolean(b) => Ok(i128::from(*b)),
        CellValue::Int8(n) => Ok(i128::from(*n)),
        CellValue::Int16(n) => Ok(i128::from(*n)),
        CellValue::Int32(n) => Ok(i128::from(*n)),
        CellValue::Int64(n) => Ok(i128::from(*n)),
        CellValue::UInt8(n) => Ok(i128::from(*n)),
        CellValue::UInt16(n) => Ok(i128::from(*n)),
        CellValue::UInt32(n) => Ok(i128::from(*n)),
        CellValue::UInt64(n) => Ok(i128::from(*n)),
        CellValue::Float32(f) => float_to_wide(value, to, f64::from(*f)),
        CellValue::Float64(f) => float_to_wide(value, to, *f),
        CellValue::Decimal(d) => match d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i128()
        {
            Some(n) => Ok(n),
            None => fail(value, to, ConversionFailure::OutOfRange),
        },
        CellValue::Char(c) => Ok(i128::from(u32::from(*c))),
        CellValue::String(s) => match s.trim().parse::<i128>() {
            Ok(n) => Ok(n),
            Err(_) => unparseable(value, to, s),
        },
        CellValue::Empty
        | CellValue::Date(_)
        | CellValue::Time(_)
        | CellValue::DateTime(_)
        | CellValue::DateTimeOffset(_) => reject(value, to),
    }
}

macro_rules! impl_from_cell_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromCellValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
                    let wide = to_wide_integer(value, Self::TYPE_NAME)?;
                    match <$ty>::try_from(wide) {
                        Ok(n) => Ok(n),
                        Err(_) => fail(value, Self::TYPE_NAME, ConversionFailure::OutOfRange),
                    }
                }
            }
        )*
    };
}

impl_from_cell_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromCellValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            CellValue::Int8(n) => Ok(f64::from(*n)),
            CellValue::Int16(n) => Ok(f64::from(*n)),
            CellValue::Int32(n) => Ok(f64::from(*n)),
            CellValue::Int64(n) => Ok(*n as f64),
            CellValue::UInt8(n) => Ok(f64::from(*n)),
            CellValue::UInt16(n) => Ok(f64::from(*n)),
            CellValue::UInt32(n) => Ok(f64::from(*n)),
            CellValue::UInt64(n) => Ok(*n as f64),
            CellValue::Float32(f) => Ok(f64::from(*f)),
            CellValue::Float64(f) => Ok(*f),
            CellValue::Decimal(d) => match d.to_f64() {
                Some(f) => Ok(f),
                None => fail(value, Self::TYPE_NAME, ConversionFailure::OutOfRange),
            },
            CellValue::String(s) => match s.trim().parse::<f64>() {
                Ok(f) => Ok(f),
                Err(_) => unparseable(value, Self::TYPE_NAME, s),
            },
            CellValue::Empty
            | CellValue::Char(_)
            | CellValue::Date(_)
            | CellValue::Time(_)
            | CellValue::DateTime(_)
            | CellValue::DateTimeOffset(_) => reject(value, Self::TYPE_NAME),
        }
    }
}

impl FromCellValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::Float32(f) => Ok(*f),
            CellValue::String(s) => match s.trim().parse::<f32>() {
                Ok(f) => Ok(f),
                Err(_) => unparseable(value, Self::TYPE_NAME, s),
            },
            _ => match f64::from_cell_value(value) {
                Ok(f) => Ok(f as f32),
                Err(err) => Err(ConversionError {
                    to: Self::TYPE_NAME,
                    ..err
                }),
            },
        }
    }
}

impl FromCellValue for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        let converted = match value {
            CellValue::Boolean(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
            CellValue::Int8(n) => Some(Decimal::from(*n)),
            CellValue::Int16(n) => Some(Decimal::from(*n)),
            CellValue::Int32(n) => Some(Decimal::from(*n)),
            CellValue::Int64(n) => Some(Decimal::from(*n)),
            CellValue::UInt8(n) => Some(Decimal::from(*n)),
            CellValue::UInt16(n) => Some(Decimal::from(*n)),
            CellValue::UInt32(n) => Some(Decimal::from(*n)),
            CellValue::UInt64(n) => Some(Decimal::from(*n)),
            CellValue::Float32(f) => Decimal::from_f32(*f),
            CellValue::Float64(f) => Decimal::from_f64(*f),
            CellValue::Decimal(d) => Some(*d),
            CellValue::String(s) => {
                return match Decimal::from_str(s.trim())
                    .or_else(|_| Decimal::from_scientific(s.trim()))
                {
                    Ok(d) => Ok(d),
                    Err(_) => unparseable(value, Self::TYPE_NAME, s),
                };
            }
            CellValue::Empty
            | CellValue::Char(_)
            | CellValue::Date(_)
            | CellValue::Time(_)
            | CellValue::DateTime(_)
            | CellValue::DateTimeOffset(_) => return reject(value, Self::TYPE_NAME),
        };

        match converted {
            Some(d) => Ok(d),
            None => fail(value, Self::TYPE_NAME, ConversionFailure::OutOfRange),
        }
    }
}

impl FromCellValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::Boolean(b) => Ok(*b),
            CellValue::Int8(n) => Ok(*n != 0),
            CellValue::Int16(n) => Ok(*n != 0),
            CellValue::Int32(n) => Ok(*n != 0),
            CellValue::Int64(n) => Ok(*n != 0),
            CellValue::UInt8(n) => Ok(*n != 0),
            CellValue::UInt16(n) => Ok(*n != 0),
            CellValue::UInt32(n) => Ok(*n != 0),
            CellValue::UInt64(n) => Ok(*n != 0),
            CellValue::Float32(f) => Ok(*f != 0.0),
            CellValue::Float64(f) => Ok(*f != 0.0),
            CellValue::Decimal(d) => Ok(!d.is_zero()),
            CellValue::String(s) => {
                let text = s.trim();
                if text.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    unparseable(value, Self::TYPE_NAME, s)
                }
            }
            CellValue::Empty
            | CellValue::Char(_)
            | CellValue::Date(_)
            | CellValue::Time(_)
            | CellValue::DateTime(_)
            | CellValue::DateTimeOffset(_) => reject(value, Self::TYPE_NAME),
        }
    }
}

impl FromCellValue for char {
    const TYPE_NAME: &'static str = "char";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::Char(c) => Ok(*c),
            CellValue::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => unparseable(value, Self::TYPE_NAME, s),
                }
            }
            v if v.is_integer() => {
                let code = to_wide_integer(value, Self::TYPE_NAME)?;
                match u32::try_from(code).ok().and_then(char::from_u32) {
                    Some(c) => Ok(c),
                    None => fail(value, Self::TYPE_NAME, ConversionFailure::OutOfRange),
                }
            }
            _ => reject(value, Self::TYPE_NAME),
        }
    }
}

impl FromCellValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::String(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Some(dt) = parse_datetime_offset(text) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
}

fn parse_datetime_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text).ok().or_else(|| {
        DATETIME_OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    })
}

impl FromCellValue for NaiveDateTime {
    const TYPE_NAME: &'static str = "datetime";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::DateTime(dt) => Ok(*dt),
            CellValue::Date(d) => Ok(d.and_time(NaiveTime::MIN)),
            CellValue::DateTimeOffset(dt) => Ok(dt.naive_local()),
            CellValue::String(s) => match parse_datetime(s) {
                Some(dt) => Ok(dt),
                None => unparseable(value, Self::TYPE_NAME, s),
            },
            _ => reject(value, Self::TYPE_NAME),
        }
    }
}

impl FromCellValue for NaiveDate {
    const TYPE_NAME: &'static str = "date";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::Date(d) => Ok(*d),
            _ => match NaiveDateTime::from_cell_value(value) {
                Ok(dt) => Ok(dt.date()),
                Err(err) => Err(ConversionError {
                    to: Self::TYPE_NAME,
                    ..err
                }),
            },
        }
    }
}

impl FromCellValue for NaiveTime {
    const TYPE_NAME: &'static str = "time";

    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::Time(t) => Ok(*t),
            CellValue::String(s) => match parse_time(s).or_else(|| parse_datetime(s).map(|dt| dt.time()))
            {
                Some(t) => Ok(t),
                None => unparseable(value, Self::TYPE_NAME, s),
            },
            _ => match NaiveDateTime::from_cell_value(value) {
                Ok(dt) => Ok(dt.time()),
                Err(err) => Err(ConversionError {
                    to: Self::TYPE_NAME,
                    ..err
                }),
            },
        }
    }
}

impl FromCellValue for DateTime<FixedOffset> {
    const TYPE_NAME: &'static str = "datetime_offset";

    /// Values without an offset are taken to be UTC.
    fn from_cell_value(value: &CellValue) -> ConvertResult<Self> {
        match value {
            CellValue::DateTimeOffset(dt) => Ok(*dt),
            CellValue::String(s) => match parse_datetime_offset(s)
                .or_else(|| parse_datetime(s).map(|dt| Utc.from_utc_datetime(&dt).into()))
            {
                Some(dt) => Ok(dt),
                None => unparseable(value, Self::TYPE_NAME, s),
            },
            _ => match NaiveDateTime::from_cell_value(value) {
                Ok(dt) => Ok(Utc.from_utc_datetime(&dt).into()),
                Err(err) => Err(ConversionError {
                    to: Self::TYPE_NAME,
                    ..err
                }),
            },
        }
    }
}
