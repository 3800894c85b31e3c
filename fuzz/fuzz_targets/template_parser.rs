#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{
    Component, Element, ElementFactory, ParseContext, ParseErrorCode, ParserConfig, Props,
    Template, TemplateParser, Value,
};

// NUL bytes separate segments; the byte after each NUL picks the hole kind.
fn hole_for(selector: u8) -> Value<Element> {
    match selector % 8 {
        0 => Value::Null,
        1 => Value::from("x"),
        2 => Value::Number(f64::from(selector)),
        3 => Value::Bool(selector & 0x80 != 0),
        4 => Value::List(vec![Value::from("a"), Value::Node(Element::new("i"))]),
        5 => Value::Props(Props::new().with("k", "v")),
        6 => Value::Node(Element::new("b")),
        _ => Value::Component(Component::named("C", |props, children| {
            Value::Node(Element {
                tag: "c".to_string(),
                props,
                children,
            })
        })),
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let mut segments = Vec::new();
    let mut holes = Vec::new();
    for (i, chunk) in data.split(|&b| b == 0).enumerate() {
        let text = if i == 0 {
            chunk
        } else {
            let (selector, rest) = chunk.split_first().map_or((0, chunk), |(s, r)| (*s, r));
            holes.push(hole_for(selector));
            rest
        };
        segments.push(String::from_utf8_lossy(text).into_owned());
    }

    let config = ParserConfig {
        max_depth: 32,
        check_close_tags: data.first().is_some_and(|b| b & 1 == 1),
    };
    let mut ctx = ParseContext::new();
    let template = Template::new(segments, holes);
    let _ = TemplateParser::new(config).parse(template, &mut ElementFactory, &mut ctx);

    assert_eq!(ctx.counters.parse_errors, ctx.errors.len() as u64);
    assert!(ctx.counters.deepest_frame <= 32);
    assert!(
        !ctx.errors
            .iter()
            .any(|e| matches!(e.code, ParseErrorCode::HoleCountMismatch { .. })),
        "segments and holes were built in lockstep"
    );
});
