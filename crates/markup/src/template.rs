//! Template input: literal segments interleaved with hole values.
//!
//! Hole `k` sits between `segments[k]` and `segments[k + 1]`, so a well-formed
//! template has exactly one more segment than holes.

use crate::types::Value;
use memchr::memchr;

const PLACEHOLDER_OPEN: &[u8] = b"${";

#[derive(Clone, Debug, PartialEq)]
pub struct Template<N> {
    segments: Vec<String>,
    holes: Vec<Value<N>>,
}

impl<N> Template<N> {
    pub fn new<I, S>(segments: I, holes: Vec<Value<N>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            holes,
        }
    }

    pub fn builder() -> TemplateBuilder<N> {
        TemplateBuilder::new()
    }

    /// Builds a template from source text containing `${name}` placeholders.
    ///
    /// Each placeholder name is handed to `resolve` in source order. A `${`
    /// without a closing `}` stays literal text.
    pub fn from_placeholders(source: &str, mut resolve: impl FnMut(&str) -> Value<N>) -> Self {
        let (segments, names) = split_placeholders(source);
        let holes = names.iter().map(|name| resolve(name)).collect();
        Self { segments, holes }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn holes(&self) -> &[Value<N>] {
        &self.holes
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Value<N>>) {
        (self.segments, self.holes)
    }
}

/// Incremental template construction; text calls append to the open segment.
#[derive(Debug)]
pub struct TemplateBuilder<N> {
    segments: Vec<String>,
    holes: Vec<Value<N>>,
}

impl<N> Default for TemplateBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> TemplateBuilder<N> {
    pub fn new() -> Self {
        Self {
            segments: vec![String::new()],
            holes: Vec::new(),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        if let Some(open) = self.segments.last_mut() {
            open.push_str(text);
        }
        self
    }

    pub fn hole(mut self, value: impl Into<Value<N>>) -> Self {
        self.holes.push(value.into());
        self.segments.push(String::new());
        self
    }

    pub fn build(self) -> Template<N> {
        Template {
            segments: self.segments,
            holes: self.holes,
        }
    }
}

/// Splits `${name}` placeholders out of `source`.
///
/// Returns `names.len() + 1` segments. Names are trimmed.
pub fn split_placeholders(source: &str) -> (Vec<String>, Vec<String>) {
    let bytes = source.as_bytes();
    let mut segments = Vec::new();
    let mut names = Vec::new();
    let mut current = String::new();
    let mut copied = 0;
    let mut i = 0;
    // Slices are only cut at ASCII `$`, `{` and `}`, which are always char boundaries.
    while let Some(rel) = memchr(b'$', &bytes[i..]) {
        let dollar = i + rel;
        if !bytes[dollar..].starts_with(PLACEHOLDER_OPEN) {
            i = dollar + 1;
            continue;
        }
        let name_start = dollar + PLACEHOLDER_OPEN.len();
        let Some(close_rel) = memchr(b'}', &bytes[name_start..]) else {
            break;
        };
        let name_end = name_start + close_rel;
        current.push_str(&source[copied..dollar]);
        segments.push(std::mem::take(&mut current));
        names.push(source[name_start..name_end].trim().to_string());
        copied = name_end + 1;
        i = copied;
    }
    current.push_str(&source[copied..]);
    segments.push(current);
    debug_assert_eq!(segments.len(), names.len() + 1);
    (segments, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;

    #[test]
    fn builder_interleaves_segments_and_holes() {
        let template: Template<Element> = Template::builder()
            .text("<p>")
            .hole("hi")
            .text("</p>")
            .build();
        assert_eq!(template.segments(), &["<p>".to_string(), "</p>".to_string()]);
        assert_eq!(template.holes(), &[Value::from("hi")]);
    }

    #[test]
    fn builder_adjacent_holes_get_empty_segment() {
        let template: Template<Element> = Template::builder().hole(1i64).hole(2i64).build();
        assert_eq!(template.segments().len(), 3);
        assert!(template.segments().iter().all(String::is_empty));
    }

    #[test]
    fn split_simple_placeholders() {
        let (segments, names) = split_placeholders("<a href=\"${ href }\">${label}</a>");
        assert_eq!(segments, vec!["<a href=\"", "\">", "</a>"]);
        assert_eq!(names, vec!["href", "label"]);
    }

    #[test]
    fn lone_dollar_and_unterminated_placeholder_stay_literal() {
        let (segments, names) = split_placeholders("cost $5 ${open");
        assert_eq!(segments, vec!["cost $5 ${open"]);
        assert!(names.is_empty());
    }

    #[test]
    fn placeholders_keep_utf8_text_intact() {
        let (segments, names) = split_placeholders("héllo ${x} wörld");
        assert_eq!(segments, vec!["héllo ", " wörld"]);
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn from_placeholders_resolves_in_order() {
        let mut seen = Vec::new();
        let template: Template<Element> = Template::from_placeholders("${a}-${b}", |name| {
            seen.push(name.to_string());
            Value::from(name)
        });
        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(template.holes(), &[Value::from("a"), Value::from("b")]);
        assert_eq!(template.segments().len(), 3);
    }
}
