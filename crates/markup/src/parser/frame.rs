//! Per-nesting-level parse state.

use super::states::ParserState;
use crate::types::{Props, TagRef, Value};

/// State private to one nesting level. Frames live on the call stack only.
pub(crate) struct Frame<N> {
    pub(crate) state: ParserState,
    pub(crate) buffer: String,
    pub(crate) tag: Option<TagRef<N>>,
    pub(crate) props: Props<N>,
    pub(crate) prop_name: String,
    pub(crate) children: Vec<Value<N>>,
}

impl<N> Frame<N> {
    pub(crate) fn new() -> Self {
        Self {
            state: ParserState::Await,
            buffer: String::new(),
            tag: None,
            props: Props::new(),
            prop_name: String::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn restart_buffer(&mut self, ch: char) {
        self.buffer.clear();
        self.buffer.push(ch);
    }

    /// Moves the text buffer into the children, right-trimmed when `trim` is set.
    /// Empty runs are dropped.
    pub(crate) fn flush_text(&mut self, trim: bool) {
        if trim {
            let keep = self.buffer.trim_end().len();
            self.buffer.truncate(keep);
        }
        if self.buffer.is_empty() {
            return;
        }
        self.children.push(Value::Text(std::mem::take(&mut self.buffer)));
    }

    pub(crate) fn commit_tag_name(&mut self) {
        self.tag = Some(TagRef::Name(std::mem::take(&mut self.buffer)));
        self.props = Props::new();
    }

    pub(crate) fn commit_tag(&mut self, tag: TagRef<N>) {
        self.tag = Some(tag);
        self.props = Props::new();
    }

    pub(crate) fn commit_prop_name(&mut self) {
        self.prop_name = std::mem::take(&mut self.buffer);
    }

    pub(crate) fn set_prop(&mut self, value: Value<N>) {
        let name = std::mem::take(&mut self.prop_name);
        self.props.insert(name, value);
    }

    /// Hands out the finished tag and its props, leaving the frame ready for the next sibling.
    pub(crate) fn take_element(&mut self) -> (TagRef<N>, Props<N>) {
        debug_assert!(self.tag.is_some(), "element finished without a committed tag");
        let tag = self
            .tag
            .take()
            .unwrap_or_else(|| TagRef::Name(String::new()));
        (tag, std::mem::take(&mut self.props))
    }

    /// Splices a hole into the children: falsy values vanish, lists flatten one level.
    pub(crate) fn splice(&mut self, hole: Value<N>) -> bool {
        if !hole.is_truthy() {
            return false;
        }
        match hole {
            Value::List(items) => self.children.extend(items),
            other => self.children.push(other),
        }
        true
    }
}
