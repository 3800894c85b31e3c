use std::fmt;
use std::rc::Rc;

/// A hole value, a produced child, or a whole parse result.
///
/// `N` is the node type produced by the caller's [`crate::NodeFactory`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value<N> {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value<N>>),
    Props(Props<N>),
    Component(Component<N>),
    Node(N),
}

impl<N> Value<N> {
    /// Falsy values are dropped when spliced as children and do not suppress
    /// trailing-whitespace trimming of a preceding text run.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(text) => !text.is_empty(),
            Value::List(_) | Value::Props(_) | Value::Component(_) | Value::Node(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value<N>]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<N> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Props(_) => "props",
            Value::Component(_) => "component",
            Value::Node(_) => "node",
        }
    }
}

impl<N> From<&str> for Value<N> {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl<N> From<String> for Value<N> {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl<N> From<bool> for Value<N> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<N> From<f64> for Value<N> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl<N> From<i64> for Value<N> {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<N> From<Vec<Value<N>>> for Value<N> {
    fn from(items: Vec<Value<N>>) -> Self {
        Value::List(items)
    }
}

impl<N> From<Props<N>> for Value<N> {
    fn from(props: Props<N>) -> Self {
        Value::Props(props)
    }
}

impl<N> From<Component<N>> for Value<N> {
    fn from(component: Component<N>) -> Self {
        Value::Component(component)
    }
}

/// Ordered property mapping with unique keys.
///
/// Overwriting a key keeps its first position.
#[derive(Clone, Debug, PartialEq)]
pub struct Props<N> {
    entries: Vec<(String, Value<N>)>,
}

impl<N> Default for Props<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<N> Props<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value<N>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Shallow merge: every entry of `other` is inserted in order.
    pub fn merge(&mut self, other: Props<N>) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value<N>>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value<N>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, Value<N>)> {
        self.entries.iter()
    }
}

impl<N> IntoIterator for Props<N> {
    type Item = (String, Value<N>);
    type IntoIter = std::vec::IntoIter<(String, Value<N>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<N> FromIterator<(String, Value<N>)> for Props<N> {
    fn from_iter<I: IntoIterator<Item = (String, Value<N>)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (name, value) in iter {
            props.insert(name, value);
        }
        props
    }
}

type ComponentFn<N> = dyn Fn(Props<N>, Vec<Value<N>>) -> Value<N>;

/// A callable used in tag position, invoked as `component(props, children)`.
///
/// Equality is identity: two handles are equal when they share the same closure.
pub struct Component<N> {
    name: Rc<str>,
    func: Rc<ComponentFn<N>>,
}

impl<N> Component<N> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Props<N>, Vec<Value<N>>) -> Value<N> + 'static,
    {
        Self::named("anonymous", func)
    }

    pub fn named<F>(name: &str, func: F) -> Self
    where
        F: Fn(Props<N>, Vec<Value<N>>) -> Value<N> + 'static,
    {
        Self {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, props: Props<N>, children: Vec<Value<N>>) -> Value<N> {
        (self.func)(props, children)
    }
}

impl<N> Clone for Component<N> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            func: Rc::clone(&self.func),
        }
    }
}

impl<N> PartialEq for Component<N> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl<N> fmt::Debug for Component<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.name)
    }
}

/// Tag identifier of the element being parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum TagRef<N> {
    Name(String),
    Component(Component<N>),
}

impl<N> TagRef<N> {
    /// Resolves a tag-position hole. Returns the value back when it cannot name a tag.
    pub fn from_hole(value: Value<N>) -> Result<Self, Value<N>> {
        match value {
            Value::Text(name) => Ok(TagRef::Name(name)),
            Value::Component(component) => Ok(TagRef::Component(component)),
            other => Err(other),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TagRef::Name(name) => Some(name),
            TagRef::Component(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TagRef::Name(name) => name,
            TagRef::Component(component) => component.name(),
        }
    }
}

/// Reference node type produced by [`crate::ElementFactory`].
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: String,
    pub props: Props<Element>,
    pub children: Vec<Value<Element>>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, name: &str, value: impl Into<Value<Element>>) -> Self {
        self.props.insert(name, value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<Value<Element>>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl From<Element> for Value<Element> {
    fn from(element: Element) -> Self {
        Value::Node(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_splice_rules() {
        let falsy: Vec<Value<Element>> = vec![
            Value::Null,
            Value::Bool(false),
            Value::Number(0.0),
            Value::Number(f64::NAN),
            Value::Text(String::new()),
        ];
        for value in falsy {
            assert!(!value.is_truthy(), "{value:?} should be falsy");
        }
        let truthy: Vec<Value<Element>> = vec![
            Value::Bool(true),
            Value::Number(-1.0),
            Value::from(" "),
            Value::List(Vec::new()),
            Value::Props(Props::new()),
        ];
        for value in truthy {
            assert!(value.is_truthy(), "{value:?} should be truthy");
        }
    }

    #[test]
    fn props_overwrite_keeps_position() {
        let mut props: Props<Element> = Props::new().with("a", "1").with("b", "2");
        props.insert("a", Value::from("3"));
        let keys: Vec<&str> = props.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(props.get("a"), Some(&Value::from("3")));
    }

    #[test]
    fn merge_is_shallow_and_last_write_wins() {
        let mut props: Props<Element> = Props::new().with("id", "x");
        props.merge(Props::new().with("id", "y").with("class", "c"));
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("id").and_then(Value::as_text), Some("y"));
        assert_eq!(props.get("class").and_then(Value::as_text), Some("c"));
    }

    #[test]
    fn component_equality_is_identity() {
        let a: Component<Element> = Component::new(|_, _| Value::Null);
        let b = a.clone();
        let c: Component<Element> = Component::new(|_, _| Value::Null);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn tag_ref_from_hole() {
        assert_eq!(
            TagRef::<Element>::from_hole(Value::from("div")),
            Ok(TagRef::Name("div".to_string()))
        );
        assert_eq!(
            TagRef::<Element>::from_hole(Value::Number(1.0)),
            Err(Value::Number(1.0))
        );
    }
}
