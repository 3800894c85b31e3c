//! Per-parse context (diagnostics and counters).

use super::{Counters, ParseError};

/// Context shared by every frame of one parse.
///
/// Parsing never aborts; problems found along the way land in `errors`.
#[derive(Debug, Default)]
pub struct ParseContext {
    pub counters: Counters,
    pub errors: Vec<ParseError>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, error: ParseError) {
        log::debug!(target: "markup.parser", "parse error: {error}");
        self.counters.parse_errors = self.counters.parse_errors.saturating_add(1);
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_first_error(&mut self) -> Option<ParseError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.remove(0))
        }
    }
}
