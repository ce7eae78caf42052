//! Error types for tabstream-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabstream-core
#[derive(Debug, Error)]
pub enum Error {
    /// Row reference is not a positive decimal number
    #[error("Invalid row reference: {0}")]
    InvalidRowReference(String),

    /// Column reference is empty or contains a non-letter
    #[error("Invalid column reference: {0}")]
    InvalidColumnReference(String),

    /// Cell reference has no row part or a malformed half
    #[error("Invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// Range reference has no `:` or its corners are out of order
    #[error("Invalid range reference: {0}")]
    InvalidRangeReference(String),

    /// Cell value could not be converted to the requested type
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Sheet not found by name
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet index out of bounds
    #[error("Worksheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// A cancellation signal stopped a cursor advance
    #[error("Operation cancelled")]
    Cancelled,

    /// Failure reported by a row source
    #[error("Row source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed reference text or range ordering
    InvalidArgument,
    /// Raw cell value cannot be coerced to the requested type
    Conversion,
    /// Named worksheet or worksheet index absent
    NotFound,
    /// Caller-requested cancellation
    Cancelled,
    /// Failure from the underlying row source
    Source,
}

impl Error {
    /// Wrap a source-level failure
    pub fn from_source<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Source(err.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidRowReference(_)
            | Error::InvalidColumnReference(_)
            | Error::InvalidCellReference(_)
            | Error::InvalidRangeReference(_) => ErrorKind::InvalidArgument,
            Error::Conversion(_) => ErrorKind::Conversion,
            Error::SheetNotFound(_) | Error::SheetOutOfBounds(..) => ErrorKind::NotFound,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Source(_) | Error::Io(_) => ErrorKind::Source,
        }
    }
}

/// A cell value that cannot be represented as the requested type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.from, .to, .reason))]
pub struct ConversionError {
    /// Type name of the raw value (see [`CellValue::type_name`](crate::CellValue::type_name))
    pub from: &'static str,
    /// Requested target type
    pub to: &'static str,
    /// Why the conversion failed
    pub reason: ConversionFailure,
}

/// Reason attached to a [`ConversionError`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionFailure {
    /// The cell holds no value
    Absent,
    /// The raw value has a shape that never converts to the target
    Incompatible,
    /// The numeric value does not fit the target type
    OutOfRange,
    /// Text could not be parsed as the target type
    Unparseable(String),
}

impl ConversionError {
    pub(crate) fn new(from: &'static str, to: &'static str, reason: ConversionFailure) -> Self {
        Self { from, to, reason }
    }
}

fn describe(from: &str, to: &str, reason: &ConversionFailure) -> String {
    match reason {
        ConversionFailure::Absent => format!("Cannot convert empty cell to {to}"),
        ConversionFailure::Incompatible => format!("Cannot convert {from} to {to}"),
        ConversionFailure::OutOfRange => {
            format!("Value of type {from} is out of range for {to}")
        }
        ConversionFailure::Unparseable(text) => format!("Cannot parse {text:?} as {to}"),
    }
}
