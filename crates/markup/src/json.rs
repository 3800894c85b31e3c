//! Conversions between `serde_json` values and template values.

use crate::{Element, Props, Value};
use serde_json::{Map, Number, Value as Json};

/// Objects become props, arrays become lists. JSON cannot carry nodes or
/// components, so neither is ever produced.
pub fn value_from_json<N>(json: Json) -> Value<N> {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::Text(s),
        Json::Array(items) => Value::List(items.into_iter().map(value_from_json).collect()),
        Json::Object(map) => Value::Props(props_from_json(map)),
    }
}

pub fn props_from_json<N>(map: Map<String, Json>) -> Props<N> {
    map.into_iter()
        .map(|(name, value)| (name, value_from_json(value)))
        .collect()
}

/// Serializes a parsed `Element` tree.
///
/// Elements map to `{"tag", "props", "children"}` objects; components map to
/// `{"component": name}`. Non-finite numbers become `null`.
pub fn tree_to_json(value: &Value<Element>) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => Number::from_f64(*n).map_or(Json::Null, Json::Number),
        Value::Text(text) => Json::String(text.clone()),
        Value::List(items) => Json::Array(items.iter().map(tree_to_json).collect()),
        Value::Props(props) => Json::Object(props_to_json(props)),
        Value::Component(component) => {
            let mut map = Map::new();
            map.insert("component".to_string(), Json::String(component.name().to_string()));
            Json::Object(map)
        }
        Value::Node(element) => {
            let mut map = Map::new();
            map.insert("tag".to_string(), Json::String(element.tag.clone()));
            map.insert("props".to_string(), Json::Object(props_to_json(&element.props)));
            map.insert(
                "children".to_string(),
                Json::Array(element.children.iter().map(tree_to_json).collect()),
            );
            Json::Object(map)
        }
    }
}

fn props_to_json(props: &Props<Element>) -> Map<String, Json> {
    props
        .iter()
        .map(|(name, value)| (name.clone(), tree_to_json(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_become_spreadable_props() {
        let value: Value<Element> = value_from_json(json!({"id": 1, "tags": ["a", null]}));
        let Value::Props(props) = value else {
            panic!("json object should convert to props");
        };
        assert_eq!(props.get("id"), Some(&Value::Number(1.0)));
        assert_eq!(
            props.get("tags"),
            Some(&Value::List(vec![Value::from("a"), Value::Null]))
        );
    }

    #[test]
    fn element_tree_serializes_with_children() {
        let tree: Value<Element> = Element::new("p")
            .with_prop("class", "x")
            .with_child("hi")
            .into();
        assert_eq!(
            tree_to_json(&tree),
            json!({"tag": "p", "props": {"class": "x"}, "children": ["hi"]})
        );
    }
}
