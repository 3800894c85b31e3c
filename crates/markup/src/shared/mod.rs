//! Shared parse types: cursor positions, diagnostics and per-parse context.

mod context;
mod counters;
mod cursor;
mod error;

pub use context::ParseContext;
pub use counters::Counters;
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorCode};
