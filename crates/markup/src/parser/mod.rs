//! Interpolating markup parser.
//!
//! A character-level state machine over the template segments. Crossing the
//! end of a segment is the "hole boundary" event: the hole between that
//! segment and the next is consumed in whatever way the current state
//! dictates (child splice, dynamic tag, spread props, attribute value).
//!
//! Nesting is handled by recursion: the `>` of an opening tag starts a new
//! frame that parses children until a close tag, then hands the children and
//! the cursor back to the parent.
//!
//! Invariants:
//! - The cursor only moves forward and is threaded through call and return;
//!   frames never share mutable parse state.
//! - Each hole is consumed at most once.
//! - Malformed input never aborts parsing; problems are recorded in
//!   [`ParseContext::errors`] and the partial tree is returned.
//!
//! Close tags are not matched against the open tag by default: any `</...>`
//! ends the innermost open element.

use crate::factory::NodeFactory;
use crate::shared::{Cursor, ParseContext, ParseError, ParseErrorCode};
use crate::template::Template;
use crate::types::{Props, TagRef, Value};
use frame::Frame;
use states::{ParserState, is_whitespace};

mod frame;
mod states;


const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ParserConfig {
    /// Deepest element nesting that still recurses. Elements below the limit
    /// are built with no children and their content stays in the parent.
    pub max_depth: usize,
    /// Record a diagnostic when `</name>` does not name the element it closes.
    pub check_close_tags: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            check_close_tags: false,
        }
    }
}

/// Entry point for parsing templates with a given configuration.
#[derive(Clone, Debug, Default)]
pub struct TemplateParser {
    config: ParserConfig,
}

impl TemplateParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `template`, building nodes through `factory`.
    ///
    /// Returns the single top-level value when there is exactly one, otherwise
    /// a `Value::List` of the top-level siblings in source order.
    pub fn parse<F: NodeFactory>(
        &self,
        template: Template<F::Node>,
        factory: &mut F,
        ctx: &mut ParseContext,
    ) -> Value<F::Node> {
        let (segments, holes) = template.into_parts();
        if holes.len() + 1 != segments.len() {
            ctx.record(ParseError::new(
                ParseErrorCode::HoleCountMismatch {
                    segments: segments.len(),
                    holes: holes.len(),
                },
                Cursor::default(),
            ));
        }

        let mut session = Session {
            segments: &segments,
            holes: holes.into_iter().map(Some).collect(),
            factory,
            config: &self.config,
            ctx,
        };
        let (mut children, _) = session.parse_frame(Cursor::default(), 0, None);
        if children.len() == 1
            && let Some(only) = children.pop()
        {
            return only;
        }
        Value::List(children)
    }

    /// Like [`TemplateParser::parse`], but fails with the first recorded diagnostic.
    pub fn parse_checked<F: NodeFactory>(
        &self,
        template: Template<F::Node>,
        factory: &mut F,
    ) -> Result<Value<F::Node>, ParseError> {
        let mut ctx = ParseContext::new();
        let value = self.parse(template, factory, &mut ctx);
        match ctx.take_first_error() {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }
}

enum Step {
    Continue,
    OpenElement,
    SelfClose,
    Close,
}

/// Read-only input plus the per-parse collaborators shared by every frame.
struct Session<'a, F: NodeFactory> {
    segments: &'a [String],
    holes: Vec<Option<Value<F::Node>>>,
    factory: &'a mut F,
    config: &'a ParserConfig,
    ctx: &'a mut ParseContext,
}

impl<F: NodeFactory> Session<'_, F> {
    /// Parse one nesting level starting at `start`.
    ///
    /// `open` is the element whose children this frame collects (`None` at
    /// the root). Returns the children and the cursor just past the close tag.
    fn parse_frame(
        &mut self,
        start: Cursor,
        depth: usize,
        open: Option<&TagRef<F::Node>>,
    ) -> (Vec<Value<F::Node>>, Cursor) {
        let segments = self.segments;
        let mut frame = Frame::new();
        let mut cursor = start;
        self.ctx.counters.deepest_frame = self.ctx.counters.deepest_frame.max(depth);

        loop {
            let Some(segment) = segments.get(cursor.segment) else {
                break;
            };
            let Some(ch) = segment[cursor.offset..].chars().next() else {
                if cursor.segment + 1 < segments.len() {
                    self.cross_hole(&mut frame, &mut cursor);
                    continue;
                }
                break;
            };
            let at = cursor;
            cursor.offset += ch.len_utf8();
            self.ctx.counters.steps = self.ctx.counters.steps.saturating_add(1);

            match self.step(&mut frame, ch, at) {
                Step::Continue => {}
                Step::SelfClose => {
                    let (tag, props) = frame.take_element();
                    let node = self.build_node(tag, props, Vec::new());
                    frame.children.push(node);
                    self.transition(&mut frame, ParserState::Await, at);
                }
                Step::OpenElement => {
                    let (tag, props) = frame.take_element();
                    let children = if depth + 1 > self.config.max_depth {
                        self.ctx.record(ParseError::new(
                            ParseErrorCode::DepthLimitExceeded {
                                limit: self.config.max_depth,
                            },
                            at,
                        ));
                        Vec::new()
                    } else {
                        let (children, next) = self.parse_frame(cursor, depth + 1, Some(&tag));
                        cursor = next;
                        children
                    };
                    let node = self.build_node(tag, props, children);
                    frame.children.push(node);
                    self.transition(&mut frame, ParserState::Await, at);
                }
                Step::Close => {
                    let found = std::mem::take(&mut frame.buffer);
                    self.check_close(open, found.trim(), depth, at);
                    return (frame.children, cursor);
                }
            }
        }

        if frame.state == ParserState::Text {
            frame.flush_text(true);
        }
        if frame.state.is_inside_tag() {
            self.ctx
                .record(ParseError::new(ParseErrorCode::UnterminatedTag, cursor));
        }
        if depth > 0 {
            self.ctx.record(ParseError::new(
                ParseErrorCode::UnclosedElement {
                    tag: open.map(TagRef::label).unwrap_or_default().to_string(),
                },
                cursor,
            ));
        }
        (frame.children, cursor)
    }

    fn step(&mut self, frame: &mut Frame<F::Node>, ch: char, at: Cursor) -> Step {
        match frame.state {
            ParserState::Await => {
                if ch == '<' {
                    self.transition(frame, ParserState::TagOpen, at);
                } else if !is_whitespace(ch) {
                    frame.restart_buffer(ch);
                    self.transition(frame, ParserState::Text, at);
                }
            }
            ParserState::Text => {
                if ch == '<' {
                    frame.flush_text(true);
                    self.transition(frame, ParserState::TagOpen, at);
                } else {
                    frame.buffer.push(ch);
                }
            }
            ParserState::TagOpen => {
                if ch == '/' {
                    frame.buffer.clear();
                    self.transition(frame, ParserState::ClosingTag, at);
                } else {
                    frame.restart_buffer(ch);
                    self.transition(frame, ParserState::TagName, at);
                }
            }
            ParserState::ClosingTag => {
                if ch == '>' {
                    return Step::Close;
                }
                frame.buffer.push(ch);
            }
            ParserState::TagName => {
                if is_whitespace(ch) {
                    frame.commit_tag_name();
                    self.transition(frame, ParserState::Props, at);
                } else if ch == '/' {
                    frame.commit_tag_name();
                    self.transition(frame, ParserState::SelfClosing, at);
                } else if ch == '>' {
                    frame.commit_tag_name();
                    return Step::OpenElement;
                } else {
                    frame.buffer.push(ch);
                }
            }
            ParserState::SelfClosing => {
                if ch == '>' {
                    return Step::SelfClose;
                }
            }
            ParserState::Props => match ch {
                // Reserved; accepted and discarded.
                '.' => {}
                '/' => self.transition(frame, ParserState::SelfClosing, at),
                '>' => return Step::OpenElement,
                ch if is_whitespace(ch) => {}
                ch => {
                    frame.restart_buffer(ch);
                    self.transition(frame, ParserState::PropName, at);
                }
            },
            ParserState::PropName => {
                if ch == '=' {
                    frame.commit_prop_name();
                    self.transition(frame, ParserState::PropValue, at);
                } else {
                    frame.buffer.push(ch);
                }
            }
            ParserState::PropValue => {
                if ch == '"' {
                    frame.buffer.clear();
                    self.transition(frame, ParserState::PropValueString, at);
                }
            }
            ParserState::PropValueString => {
                if ch == '"' {
                    let value = std::mem::take(&mut frame.buffer);
                    frame.set_prop(Value::Text(value));
                    self.transition(frame, ParserState::Props, at);
                } else {
                    frame.buffer.push(ch);
                }
            }
        }
        Step::Continue
    }

    /// Handle the hole between `cursor.segment` and the next segment, then move
    /// the cursor to the start of that next segment.
    fn cross_hole(&mut self, frame: &mut Frame<F::Node>, cursor: &mut Cursor) {
        let at = *cursor;
        let hole = self
            .holes
            .get_mut(cursor.segment)
            .and_then(Option::take)
            .unwrap_or(Value::Null);
        cursor.segment += 1;
        cursor.offset = 0;

        match frame.state {
            ParserState::Await => self.splice(frame, hole),
            ParserState::Text => {
                frame.flush_text(!hole.is_truthy());
                self.splice(frame, hole);
            }
            ParserState::TagOpen => {
                let tag = match TagRef::from_hole(hole) {
                    Ok(tag) => tag,
                    Err(other) => {
                        self.ctx.record(ParseError::new(
                            ParseErrorCode::InvalidTagHole { kind: other.kind() },
                            at,
                        ));
                        TagRef::Name(String::new())
                    }
                };
                frame.commit_tag(tag);
                self.transition(frame, ParserState::Props, at);
            }
            ParserState::Props => match hole {
                Value::Props(spread) => frame.props.merge(spread),
                other if !other.is_truthy() => {}
                other => self.ctx.record(ParseError::new(
                    ParseErrorCode::InvalidSpread { kind: other.kind() },
                    at,
                )),
            },
            ParserState::PropValue => {
                frame.set_prop(hole);
                self.transition(frame, ParserState::Props, at);
            }
            ParserState::PropValueString => {
                let name = frame.prop_name.clone();
                frame.set_prop(hole);
                self.transition(frame, ParserState::Props, at);
                self.skip_closing_quote(cursor, name);
            }
            ParserState::TagName
            | ParserState::PropName
            | ParserState::ClosingTag
            | ParserState::SelfClosing => {
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(
                    target: "markup.parser",
                    "hole dropped in {:?} @{}",
                    frame.state,
                    at
                );
            }
        }
    }

    /// The character right after an attribute-value hole is taken to be the
    /// closing quote and is skipped whatever it is.
    fn skip_closing_quote(&mut self, cursor: &mut Cursor, name: String) {
        let Some(ch) = self
            .segments
            .get(cursor.segment)
            .and_then(|segment| segment.chars().next())
        else {
            return;
        };
        if ch != '"' {
            self.ctx.record(ParseError::new(
                ParseErrorCode::SplitAttributeValue { name },
                *cursor,
            ));
        }
        cursor.offset = ch.len_utf8();
    }

    fn splice(&mut self, frame: &mut Frame<F::Node>, hole: Value<F::Node>) {
        if frame.splice(hole) {
            self.ctx.counters.holes_spliced = self.ctx.counters.holes_spliced.saturating_add(1);
        }
    }

    fn check_close(
        &mut self,
        open: Option<&TagRef<F::Node>>,
        found: &str,
        depth: usize,
        at: Cursor,
    ) {
        if depth == 0 {
            self.ctx
                .record(ParseError::new(ParseErrorCode::UnexpectedCloseTag, at));
            return;
        }
        if !self.config.check_close_tags || found.is_empty() {
            return;
        }
        if let Some(expected) = open.and_then(TagRef::name)
            && expected != found
        {
            self.ctx.record(ParseError::new(
                ParseErrorCode::MismatchedCloseTag {
                    expected: expected.to_string(),
                    found: found.to_string(),
                },
                at,
            ));
        }
    }

    fn build_node(
        &mut self,
        tag: TagRef<F::Node>,
        props: Props<F::Node>,
        children: Vec<Value<F::Node>>,
    ) -> Value<F::Node> {
        match tag {
            TagRef::Component(component) => {
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(target: "markup.parser", "invoke component {}", component.name());
                self.ctx.counters.components_invoked =
                    self.ctx.counters.components_invoked.saturating_add(1);
                component.call(props, children)
            }
            TagRef::Name(name) => {
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(target: "markup.parser", "create <{name}>");
                self.ctx.counters.nodes_created = self.ctx.counters.nodes_created.saturating_add(1);
                Value::Node(self.factory.create(&name, props, children))
            }
        }
    }

    fn transition(&mut self, frame: &mut Frame<F::Node>, next: ParserState, at: Cursor) {
        if frame.state == next {
            return;
        }
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "markup.parser",
            "state {:?} -> {:?} @{}",
            frame.state,
            next,
            at
        );
        #[cfg(not(any(test, feature = "debug-stats")))]
        let _ = at;
        frame.state = next;
        self.ctx.counters.state_transitions = self.ctx.counters.state_transitions.saturating_add(1);
    }
}
