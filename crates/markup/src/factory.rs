//! Node construction seam.

use crate::types::{Element, Props, Value};

/// Turns a finished element into a caller-owned node.
///
/// The parser only calls this for named tags; component tags are invoked
/// directly and never reach the factory.
pub trait NodeFactory {
    type Node;

    fn create(
        &mut self,
        tag: &str,
        props: Props<Self::Node>,
        children: Vec<Value<Self::Node>>,
    ) -> Self::Node;
}

/// Factory producing the crate's own [`Element`] tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElementFactory;

impl NodeFactory for ElementFactory {
    type Node = Element;

    fn create(&mut self, tag: &str, props: Props<Element>, children: Vec<Value<Element>>) -> Element {
        Element {
            tag: tag.to_string(),
            props,
            children,
        }
    }
}

/// Adapts a closure into a [`NodeFactory`].
pub struct FnFactory<N, F> {
    func: F,
    _node: std::marker::PhantomData<fn() -> N>,
}

impl<N, F> FnFactory<N, F>
where
    F: FnMut(&str, Props<N>, Vec<Value<N>>) -> N,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _node: std::marker::PhantomData,
        }
    }
}

impl<N, F> NodeFactory for FnFactory<N, F>
where
    F: FnMut(&str, Props<N>, Vec<Value<N>>) -> N,
{
    type Node = N;

    fn create(&mut self, tag: &str, props: Props<N>, children: Vec<Value<N>>) -> N {
        (self.func)(tag, props, children)
    }
}
