//! Read position inside a template.

use std::fmt;

/// Segment index plus byte offset inside that segment.
///
/// Invariant: `offset` is always a UTF-8 char boundary of its segment. The
/// cursor only moves forward; crossing a hole always bumps `segment`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub segment: usize,
    pub offset: usize,
}

impl Cursor {
    pub fn new(segment: usize, offset: usize) -> Self {
        Self { segment, offset }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.segment, self.offset)
    }
}
