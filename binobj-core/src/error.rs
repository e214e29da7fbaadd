//! Failure kinds a binary parser can report.
//!
//! None of these ever reach the caller of the dispatcher; they are logged and
//! surfaced as [`ParseOutcome::Failed`](crate::ParseOutcome::Failed) so the
//! caller can inspect the reason without matching on parser-specific types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fixed set of reasons a parse can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    BadFormat,
    BadFile,
    Conversion,
    Builder,
    Parser,
    Integrity,
    Pe,
    Type,
    Exception,
    /// Recognized container whose format has no record builder.
    ///
    /// Nothing in this crate raises it today; custom parsers may.
    FileTypeNotImplemented,
}

impl ParseErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ParseErrorKind::BadFormat => "Bad format",
            ParseErrorKind::BadFile => "Bad file",
            ParseErrorKind::Conversion => "Conversion error",
            ParseErrorKind::Builder => "Builder error",
            ParseErrorKind::Parser => "Parser error",
            ParseErrorKind::Integrity => "Integrity error",
            ParseErrorKind::Pe => "PE error",
            ParseErrorKind::Type => "Type error",
            ParseErrorKind::Exception => "Parser exception",
            ParseErrorKind::FileTypeNotImplemented => "File type not implemented",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parse failure with its kind and the parser's message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct ParseFailure {
    pub kind: ParseErrorKind,
    pub message: String,
}

impl ParseFailure {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseFailure>;
