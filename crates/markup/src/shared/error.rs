//! Parse diagnostics.

use super::Cursor;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorCode {
    HoleCountMismatch { segments: usize, holes: usize },
    UnclosedElement { tag: String },
    UnexpectedCloseTag,
    MismatchedCloseTag { expected: String, found: String },
    UnterminatedTag,
    InvalidTagHole { kind: &'static str },
    InvalidSpread { kind: &'static str },
    SplitAttributeValue { name: String },
    DepthLimitExceeded { limit: usize },
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorCode::HoleCountMismatch { segments, holes } => write!(
                f,
                "expected {} holes for {segments} segments, got {holes}",
                segments.saturating_sub(1)
            ),
            ParseErrorCode::UnclosedElement { tag } => write!(f, "unclosed element <{tag}>"),
            ParseErrorCode::UnexpectedCloseTag => f.write_str("close tag without open element"),
            ParseErrorCode::MismatchedCloseTag { expected, found } => {
                write!(f, "close tag </{found}> does not match <{expected}>")
            }
            ParseErrorCode::UnterminatedTag => f.write_str("end of input inside a tag"),
            ParseErrorCode::InvalidTagHole { kind } => {
                write!(f, "{kind} hole cannot be used as a tag")
            }
            ParseErrorCode::InvalidSpread { kind } => {
                write!(f, "{kind} hole cannot be spread into props")
            }
            ParseErrorCode::SplitAttributeValue { name } => {
                write!(f, "value of '{name}' continues after an interpolated hole")
            }
            ParseErrorCode::DepthLimitExceeded { limit } => {
                write!(f, "nesting deeper than {limit} elements")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub position: Cursor,
}

impl ParseError {
    pub fn new(code: ParseErrorCode, position: Cursor) -> Self {
        Self { code, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.code, self.position)
    }
}

impl std::error::Error for ParseError {}
