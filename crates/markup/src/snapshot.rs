use crate::{Element, Props, Value};
use std::fmt::{self, Write};
use std::sync::OnceLock;

/// Deterministic tree serialization and equality rules for golden tests and
/// CLI output. Not a stable interchange format.
///
/// Line rules, two spaces of indent per level:
/// - element: `<tag name="text" other=#number 3>` followed by its children
/// - text: `"escaped text"`
/// - list: `#list` followed by its items
/// - other hole values: `#null`, `#bool true`, `#number 1.5`,
///   `#props {..}`, `#component Name`
///
/// Prop order is significant.
#[derive(Debug)]
pub struct TreeSnapshot {
    lines: Vec<String>,
}

impl TreeSnapshot {
    pub fn new(root: &Value<Element>) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

const INDENT_STEP: &str = "  ";

fn walk_snapshot(value: &Value<Element>, depth: usize, out: &mut Vec<String>) {
    let mut line = INDENT_STEP.repeat(depth);
    match value {
        Value::Node(element) => {
            push_element_head(&mut line, element);
            out.push(line);
            for child in &element.children {
                walk_snapshot(child, depth + 1, out);
            }
        }
        Value::List(items) => {
            line.push_str("#list");
            out.push(line);
            for item in items {
                walk_snapshot(item, depth + 1, out);
            }
        }
        other => {
            push_inline_value(&mut line, other);
            out.push(line);
        }
    }
}

fn push_element_head(line: &mut String, element: &Element) {
    line.push('<');
    line.push_str(&element.tag);
    push_props(line, &element.props);
    line.push('>');
}

fn push_props(line: &mut String, props: &Props<Element>) {
    for (name, value) in props.iter() {
        line.push(' ');
        line.push_str(name);
        line.push('=');
        push_inline_value(line, value);
    }
}

fn push_inline_value(line: &mut String, value: &Value<Element>) {
    match value {
        Value::Null => line.push_str("#null"),
        Value::Bool(b) => {
            let _ = write!(line, "#bool {b}");
        }
        Value::Number(n) => {
            let _ = write!(line, "#number {n}");
        }
        Value::Text(text) => {
            line.push('"');
            push_escaped(line, text);
            line.push('"');
        }
        Value::List(items) => {
            let _ = write!(line, "#list[{}]", items.len());
        }
        Value::Props(props) => {
            line.push_str("#props {");
            push_props(line, props);
            line.push_str(" }");
        }
        Value::Component(component) => {
            let _ = write!(line, "#component {}", component.name());
        }
        Value::Node(element) => push_element_head(line, element),
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                let _ = write!(out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
}

#[derive(Debug)]
pub struct TreeMismatch<'a> {
    path: String,
    detail: String,
    expected_node: &'a Value<Element>,
    actual_node: &'a Value<Element>,
    expected_subtree: OnceLock<String>,
    actual_subtree: OnceLock<String>,
}

impl TreeMismatch<'_> {
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for TreeMismatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected_subtree = self
            .expected_subtree
            .get_or_init(|| TreeSnapshot::new(self.expected_node).render());
        let actual_subtree = self
            .actual_subtree
            .get_or_init(|| TreeSnapshot::new(self.actual_node).render());
        writeln!(f, "tree mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected subtree:\n{expected_subtree}")?;
        writeln!(f, "actual subtree:\n{actual_subtree}")?;
        Ok(())
    }
}

impl std::error::Error for TreeMismatch<'_> {}

pub fn assert_tree_eq(expected: &Value<Element>, actual: &Value<Element>) {
    if let Err(mismatch) = compare_tree(expected, actual) {
        panic!("{mismatch}");
    }
}

pub fn compare_tree<'a>(
    expected: &'a Value<Element>,
    actual: &'a Value<Element>,
) -> Result<(), Box<TreeMismatch<'a>>> {
    let mut path = vec![node_label(expected)];
    compare_values(expected, actual, &mut path)
}

fn compare_values<'a>(
    expected: &'a Value<Element>,
    actual: &'a Value<Element>,
    path: &mut Vec<String>,
) -> Result<(), Box<TreeMismatch<'a>>> {
    match (expected, actual) {
        (Value::Node(e), Value::Node(a)) => {
            if e.tag != a.tag {
                return Err(mismatch(path, "tag name", expected, actual));
            }
            if e.props != a.props {
                return Err(mismatch(path, "props", expected, actual));
            }
            compare_children(expected, actual, &e.children, &a.children, path)
        }
        (Value::List(e), Value::List(a)) => compare_children(expected, actual, e, a, path),
        _ if expected.kind() != actual.kind() => {
            Err(mismatch(path, "value kind", expected, actual))
        }
        _ if expected != actual => Err(mismatch(path, "value", expected, actual)),
        _ => Ok(()),
    }
}

fn compare_children<'a>(
    expected_parent: &'a Value<Element>,
    actual_parent: &'a Value<Element>,
    expected: &'a [Value<Element>],
    actual: &'a [Value<Element>],
    path: &mut Vec<String>,
) -> Result<(), Box<TreeMismatch<'a>>> {
    if expected.len() != actual.len() {
        let detail = format!(
            "child count (expected {}, actual {})",
            expected.len(),
            actual.len()
        );
        return Err(mismatch(path, &detail, expected_parent, actual_parent));
    }
    for (index, (e, a)) in expected.iter().zip(actual).enumerate() {
        path.push(format!("{}[{index}]", node_label(e)));
        compare_values(e, a, path)?;
        path.pop();
    }
    Ok(())
}

fn node_label(value: &Value<Element>) -> String {
    match value {
        Value::Node(element) => element.tag.clone(),
        other => format!("#{}", other.kind()),
    }
}

fn mismatch<'a>(
    path: &[String],
    detail: &str,
    expected: &'a Value<Element>,
    actual: &'a Value<Element>,
) -> Box<TreeMismatch<'a>> {
    Box::new(TreeMismatch {
        path: path.join(" > "),
        detail: detail.to_string(),
        expected_node: expected,
        actual_node: actual,
        expected_subtree: OnceLock::new(),
        actual_subtree: OnceLock::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Component;

    fn sample() -> Value<Element> {
        Element::new("ul")
            .with_prop("class", "list")
            .with_child(Element::new("li").with_child("one \"1\""))
            .with_child(Value::Number(2.0))
            .into()
    }

    #[test]
    fn snapshot_lines_are_indented_by_depth() {
        let lines = TreeSnapshot::new(&sample()).into_lines();
        assert_eq!(
            lines,
            vec![
                "<ul class=\"list\">",
                "  <li>",
                "    \"one \\\"1\\\"\"",
                "  #number 2",
            ]
        );
    }

    #[test]
    fn snapshot_renders_lists_and_components() {
        let component: Component<Element> = Component::named("Card", |_, _| Value::Null);
        let value = Value::List(vec![
            Value::from("a"),
            Value::Node(Element::new("x").with_prop("on", component)),
        ]);
        assert_eq!(
            TreeSnapshot::new(&value).render(),
            "#list\n  \"a\"\n  <x on=#component Card>"
        );
    }

    #[test]
    fn compare_reports_first_mismatch_path() {
        let expected = sample();
        let actual: Value<Element> = Element::new("ul")
            .with_prop("class", "list")
            .with_child(Element::new("li").with_child("one"))
            .with_child(Value::Number(2.0))
            .into();
        let err = compare_tree(&expected, &actual).expect_err("trees differ");
        assert_eq!(err.path(), "ul > li[0] > #text[0]");
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn equal_trees_compare_ok() {
        assert_tree_eq(&sample(), &sample());
    }
}
