//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The raw value stored in a cell
//! - [`Cell`] and [`CellAccess`] - A cell and its typed getters
//! - [`CellCollection`] - The cells of one row, with bounds-safe lookup
//! - [`CellAddress`] and [`CellRange`] - Typed A1-style references
//! - [`reference`] - The underlying text/index codec

mod address;
mod collection;
mod convert;
pub mod reference;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use collection::CellCollection;
pub use convert::FromCellValue;
pub use value::CellValue;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::error::ConversionError;

static EMPTY_CELL: Cell = Cell {
    value: CellValue::Empty,
};

macro_rules! typed_getters {
    ($($get:ident, $or_none:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("Convert the value to `", stringify!($ty), "`")]
            fn $get(&self) -> std::result::Result<$ty, ConversionError> {
                self.get::<$ty>()
            }

            #[doc = concat!("Convert the value to `", stringify!($ty), "`, or `None` if it does not convert")]
            fn $or_none(&self) -> Option<$ty> {
                self.get_or_none::<$ty>()
            }
        )*
    };
}

/// Read access to a cell's value with strict and failure-tolerant getters
///
/// Strict getters return a [`ConversionError`] when the raw value is absent,
/// of an incompatible shape, or out of range. The `_or_none` variants turn
/// exactly that error into `None`.
///
/// ```
/// use tabstream_core::{Cell, CellAccess};
///
/// let cell = Cell::new("42");
/// assert_eq!(cell.get_i32().unwrap(), 42);
/// assert_eq!(cell.get_bool_or_none(), None);
/// assert_eq!(Cell::empty().get_string().unwrap(), "");
/// ```
pub trait CellAccess {
    /// The raw value
    fn value(&self) -> &CellValue;

    /// True if the value is absent or a zero-length string
    fn is_blank(&self) -> bool {
        self.value().is_blank()
    }

    /// Convert the value to any [`FromCellValue`] type
    fn get<T: FromCellValue>(&self) -> std::result::Result<T, ConversionError> {
        T::from_cell_value(self.value())
    }

    /// Convert the value, or `None` if it does not convert
    fn get_or_none<T: FromCellValue>(&self) -> Option<T> {
        self.get::<T>().ok()
    }

    typed_getters! {
        get_string, get_string_or_none => String;
        get_char, get_char_or_none => char;
        get_bool, get_bool_or_none => bool;
        get_f32, get_f32_or_none => f32;
        get_f64, get_f64_or_none => f64;
        get_decimal, get_decimal_or_none => Decimal;
        get_i8, get_i8_or_none => i8;
        get_u8, get_u8_or_none => u8;
        get_i16, get_i16_or_none => i16;
        get_u16, get_u16_or_none => u16;
        get_i32, get_i32_or_none => i32;
        get_u32, get_u32_or_none => u32;
        get_i64, get_i64_or_none => i64;
        get_u64, get_u64_or_none => u64;
        get_date, get_date_or_none => NaiveDate;
        get_time, get_time_or_none => NaiveTime;
        get_datetime, get_datetime_or_none => NaiveDateTime;
        get_datetime_offset, get_datetime_offset_or_none => DateTime<FixedOffset>;
    }
}

/// A single cell: an immutable raw value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    value: CellValue,
}

impl Cell {
    /// Create a cell holding the given value
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The shared empty cell returned for out-of-bounds lookups
    pub fn empty() -> &'static Cell {
        &EMPTY_CELL
    }

    /// Consume the cell, returning its raw value
    pub fn into_value(self) -> CellValue {
        self.value
    }
}

impl CellAccess for Cell {
    fn value(&self) -> &CellValue {
        &self.value
    }
}

impl CellAccess for CellValue {
    fn value(&self) -> &CellValue {
        self
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        Self { value }
    }
}
