//! vCard parse error types.

use std::fmt;

/// Result type for vCard parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred during vCard parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based, 0 when not from a stream).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates a truncated property error (end of input before the value).
    #[must_use]
    pub fn truncated(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::UnexpectedEof, line, message)
    }

    /// Creates a malformed parameter error.
    #[must_use]
    pub fn invalid_parameter(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidParameter, line, message)
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub fn invalid_datetime(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidDateTime, line, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ParseErrorKind::Io, 0, err.to_string())
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended inside a property's name or parameters.
    UnexpectedEof,
    /// Property line without a name.
    InvalidPropertyName,
    /// Parameter segment without a name.
    InvalidParameter,
    /// Timestamp not in `YYYYMMDD"T"HHMMSS"Z"` form.
    InvalidDateTime,
    /// Reading the input failed.
    Io,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "truncated property"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::InvalidDateTime => write!(f, "invalid date/time"),
            Self::Io => write!(f, "read error"),
        }
    }
}
