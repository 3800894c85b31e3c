//! Interpolating markup parser.
//!
//! Turns a template given as literal segments interleaved with dynamic holes
//! into a tree of caller-defined nodes:
//!
//! ```text
//! segments: ["<a href=\"", "\">", "</a>"]
//! holes:    ["/x", "label"]
//! result:   a { href: "/x" } ["label"]
//! ```
//!
//! Nodes are built through a [`NodeFactory`]; a [`Component`] placed in tag
//! position is called directly instead.

#[cfg(feature = "json")]
pub mod json;
pub mod perf_fixtures;
pub mod snapshot;

mod factory;
mod parser;
mod shared;
mod template;
mod types;

pub use crate::factory::{ElementFactory, FnFactory, NodeFactory};
pub use crate::parser::{ParserConfig, TemplateParser};
pub use crate::shared::{Counters, Cursor, ParseContext, ParseError, ParseErrorCode};
pub use crate::template::{Template, TemplateBuilder, split_placeholders};
pub use crate::types::{Component, Element, Props, TagRef, Value};

/// Parse `segments` and `holes` with the default configuration.
///
/// `holes.len()` should be `segments.len() - 1`; missing holes read as
/// `Value::Null` and extra holes are ignored.
pub fn parse<F, S>(segments: &[S], holes: Vec<Value<F::Node>>, factory: &mut F) -> Value<F::Node>
where
    F: NodeFactory,
    S: AsRef<str>,
{
    let template = Template::new(segments.iter().map(|s| s.as_ref().to_string()), holes);
    parse_template(template, factory)
}

/// Parse an owned [`Template`] with the default configuration.
pub fn parse_template<F: NodeFactory>(template: Template<F::Node>, factory: &mut F) -> Value<F::Node> {
    let mut ctx = ParseContext::new();
    TemplateParser::default().parse(template, factory, &mut ctx)
}
