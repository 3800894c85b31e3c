//! Parser state machine definitions.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ParserState {
    /// Between elements and text; whitespace is skipped.
    Await,
    Text,
    /// Just consumed `<`.
    TagOpen,
    /// Inside `</...`, waiting for `>`.
    ClosingTag,
    TagName,
    /// Between attributes of an open tag.
    Props,
    PropName,
    /// After `=`, waiting for a quote or a hole.
    PropValue,
    PropValueString,
    /// After `/` in a tag, waiting for `>`.
    SelfClosing,
}

impl ParserState {
    /// States that leave a tag half-written when input ends.
    pub(crate) fn is_inside_tag(self) -> bool {
        !matches!(self, ParserState::Await | ParserState::Text)
    }
}

pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}
