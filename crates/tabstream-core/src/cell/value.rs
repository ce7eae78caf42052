//! Cell value types

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::fmt;

/// Represents the raw value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Signed 8-bit integer
    Int8(i8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Signed 64-bit integer
    Int64(i64),

    /// Unsigned 8-bit integer
    UInt8(u8),
    /// Unsigned 16-bit integer
    UInt16(u16),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Unsigned 64-bit integer
    UInt64(u64),

    /// Single-precision float
    Float32(f32),
    /// Double-precision float
    Float64(f64),
    /// Fixed-point decimal
    Decimal(Decimal),

    /// A single character
    Char(char),
    /// String value
    String(String),

    /// Calendar date
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Date and time without offset
    DateTime(NaiveDateTime),
    /// Date and time with a UTC offset
    DateTimeOffset(DateTime<FixedOffset>),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Check if the cell holds no value
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the value is absent or a zero-length string
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Check if the value is any integer width
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CellValue::Int8(_)
                | CellValue::Int16(_)
                | CellValue::Int32(_)
                | CellValue::Int64(_)
                | CellValue::UInt8(_)
                | CellValue::UInt16(_)
                | CellValue::UInt32(_)
                | CellValue::UInt64(_)
        )
    }

    /// Check if the value is any numeric shape (integer, float or decimal)
    pub fn is_number(&self) -> bool {
        self.is_integer()
            || matches!(
                self,
                CellValue::Float32(_) | CellValue::Float64(_) | CellValue::Decimal(_)
            )
    }

    /// Check if the value carries a date and/or time
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            CellValue::Date(_)
                | CellValue::Time(_)
                | CellValue::DateTime(_)
                | CellValue::DateTimeOffset(_)
        )
    }

    /// Try to get the value as a string slice without conversion
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Int8(_) => "i8",
            CellValue::Int16(_) => "i16",
            CellValue::Int32(_) => "i32",
            CellValue::Int64(_) => "i64",
            CellValue::UInt8(_) => "u8",
            CellValue::UInt16(_) => "u16",
            CellValue::UInt32(_) => "u32",
            CellValue::UInt64(_) => "u64",
            CellValue::Float32(_) => "f32",
            CellValue::Float64(_) => "f64",
            CellValue::Decimal(_) => "decimal",
            CellValue::Char(_) => "char",
            CellValue::String(_) => "string",
            CellValue::Date(_) => "date",
            CellValue::Time(_) => "time",
            CellValue::DateTime(_) => "datetime",
            CellValue::DateTimeOffset(_) => "datetime_offset",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Int8(n) => write!(f, "{}", n),
            CellValue::Int16(n) => write!(f, "{}", n),
            CellValue::Int32(n) => write!(f, "{}", n),
            CellValue::Int64(n) => write!(f, "{}", n),
            CellValue::UInt8(n) => write!(f, "{}", n),
            CellValue::UInt16(n) => write!(f, "{}", n),
            CellValue::UInt32(n) => write!(f, "{}", n),
            CellValue::UInt64(n) => write!(f, "{}", n),
            CellValue::Float32(n) => write!(f, "{}", n),
            CellValue::Float64(n) => write!(f, "{}", n),
            CellValue::Decimal(n) => write!(f, "{}", n),
            CellValue::Char(c) => write!(f, "{}", c),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Time(t) => write!(f, "{}", t),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
            CellValue::DateTimeOffset(dt) => write!(f, "{}", dt),
        }
    }
}

macro_rules! define_from {
    ($variant:path, $ty:ty) => {
        impl From<$ty> for CellValue {
            fn from(v: $ty) -> Self {
                $variant(v)
            }
        }
    };
}

define_from!(CellValue::Boolean, bool);
define_from!(CellValue::Int8, i8);
define_from!(CellValue::Int16, i16);
define_from!(CellValue::Int32, i32);
define_from!(CellValue::Int64, i64);
define_from!(CellValue::UInt8, u8);
define_from!(CellValue::UInt16, u16);
define_from!(CellValue::UInt32, u32);
define_from!(CellValue::UInt64, u64);
define_from!(CellValue::Float32, f32);
define_from!(CellValue::Float64, f64);
define_from!(CellValue::Decimal, Decimal);
define_from!(CellValue::Char, char);
define_from!(CellValue::String, String);
define_from!(CellValue::Date, NaiveDate);
define_from!(CellValue::Time, NaiveTime);
define_from!(CellValue::DateTime, NaiveDateTime);
define_from!(CellValue::DateTimeOffset, DateTime<FixedOffset>);

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<()> for CellValue {
    fn from(_: ()) -> Self {
        CellValue::Empty
    }
}

impl<T> From<Option<T>> for CellValue
where
    CellValue: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => From::from(v),
            None => CellValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_from() {
        assert_eq!(CellValue::from(42), CellValue::Int32(42));
        assert_eq!(CellValue::from(42u64), CellValue::UInt64(42));
        assert_eq!(CellValue::from(3.5), CellValue::Float64(3.5));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
        assert_eq!(CellValue::from("hello").as_str(), Some("hello"));
        assert_eq!(CellValue::from(None::<i32>), CellValue::Empty);
        assert_eq!(CellValue::from(Some('x')), CellValue::Char('x'));
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::string("").is_blank());
        assert!(!CellValue::string(" ").is_blank());
        assert!(!CellValue::Int32(0).is_blank());
        assert!(!CellValue::Boolean(false).is_blank());
    }

    #[test]
    fn test_classification() {
        assert!(CellValue::UInt16(1).is_integer());
        assert!(CellValue::Decimal(Decimal::ONE).is_number());
        assert!(!CellValue::Float64(1.0).is_integer());
        assert!(CellValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).is_temporal());
        assert!(!CellValue::string("2024-02-29").is_temporal());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Boolean(true).to_string(), "TRUE");
        assert_eq!(CellValue::Int64(-7).to_string(), "-7");
        assert_eq!(CellValue::Float64(2.5).to_string(), "2.5");
        assert_eq!(
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).to_string(),
            "2024-01-02"
        );
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_string(), "2024-01-02 03:04:05");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CellValue::Empty.type_name(), "empty");
        assert_eq!(CellValue::string("x").type_name(), "string");
        assert_eq!(CellValue::UInt8(1).type_name(), "u8");
    }
}
